//! Local key/value persistence.
//!
//! # Responsibility
//! - Define the text key/value contract the local cache is written against.
//! - Provide in-memory and SQLite implementations of that contract.
//! - Wrap it in a fail-closed JSON adapter ([`LocalCache`]).
//!
//! # Invariants
//! - `KeyValueStore` implementations surface every failure as
//!   [`StorageError`]; only [`LocalCache`] converts them into soft results.

mod local_cache;
mod memory;
mod sqlite_kv;

pub use local_cache::{LocalCache, SNAPSHOT_STORAGE_KEY};
pub use memory::InMemoryKeyValueStore;
pub use sqlite_kv::SqliteKeyValueStore;

use crate::db::DbError;
use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by a key/value backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Db(#[from] DbError),
    /// Backend refused the operation (quota, disabled storage, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Text key/value store scoped to one local profile.
pub trait KeyValueStore {
    /// Returns the stored text, or `None` when the key is absent.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    /// Inserts or replaces the value for `key`.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Removes `key`; removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> StorageResult<()>;
    /// Removes every key.
    fn clear(&self) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }

    fn clear(&self) -> StorageResult<()> {
        (**self).clear()
    }
}
