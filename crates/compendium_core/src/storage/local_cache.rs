//! Fail-closed JSON adapter over a [`KeyValueStore`].
//!
//! # Responsibility
//! - Serialize values to JSON text under string keys.
//! - Keep the compendium snapshot under one well-known key.
//!
//! # Invariants
//! - No operation returns an error or panics: storage failures and malformed
//!   JSON are logged and turned into `false` or the caller's default.
//! - Logged diagnostics carry keys and error text only, never stored values.

use super::KeyValueStore;
use crate::model::snapshot::Snapshot;
use log::{error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Storage key holding the serialized [`Snapshot`].
pub const SNAPSHOT_STORAGE_KEY: &str = "compendium_data";

/// JSON value cache on top of a text key/value store.
pub struct LocalCache<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> LocalCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Serializes `value` and stores it under `key`.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let text = match serde_json::to_string(value) {
            Ok(text) => text,
            Err(err) => {
                error!(
                    "event=cache_save module=storage status=error key={key} error_code=encode_failed error={err}"
                );
                return false;
            }
        };

        match self.store.set_item(key, &text) {
            Ok(()) => true,
            Err(err) => {
                error!(
                    "event=cache_save module=storage status=error key={key} error_code=storage_write_failed error={err}"
                );
                false
            }
        }
    }

    /// Loads and decodes the value under `key`.
    ///
    /// Returns `default` when the key is missing, empty, unreadable, or holds
    /// JSON that does not decode into `T`.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let text = match self.store.get_item(key) {
            Ok(Some(text)) if !text.is_empty() => text,
            Ok(_) => return default,
            Err(err) => {
                error!(
                    "event=cache_load module=storage status=error key={key} error_code=storage_read_failed error={err}"
                );
                return default;
            }
        };

        match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=cache_load module=storage status=error key={key} error_code=malformed_json error={err}"
                );
                default
            }
        }
    }

    pub fn remove(&self, key: &str) -> bool {
        match self.store.remove_item(key) {
            Ok(()) => true,
            Err(err) => {
                error!(
                    "event=cache_remove module=storage status=error key={key} error={err}"
                );
                false
            }
        }
    }

    /// Reports whether `key` holds a value; `false` when the store fails.
    pub fn exists(&self, key: &str) -> bool {
        match self.store.get_item(key) {
            Ok(value) => value.is_some(),
            Err(err) => {
                error!(
                    "event=cache_exists module=storage status=error key={key} error={err}"
                );
                false
            }
        }
    }

    /// Removes every key from the underlying store.
    pub fn clear(&self) -> bool {
        match self.store.clear() {
            Ok(()) => true,
            Err(err) => {
                error!("event=cache_clear module=storage status=error error={err}");
                false
            }
        }
    }

    pub fn save_snapshot(&self, snapshot: &Snapshot) -> bool {
        self.save(SNAPSHOT_STORAGE_KEY, snapshot)
    }

    /// Loads the cached snapshot, or an empty one.
    pub fn load_snapshot(&self) -> Snapshot {
        self.load(SNAPSHOT_STORAGE_KEY, Snapshot::default())
    }

    pub fn clear_snapshot(&self) -> bool {
        self.remove(SNAPSHOT_STORAGE_KEY)
    }
}
