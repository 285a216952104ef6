//! Core state management for the compendium: notes, appointments and goals
//! held in memory, cached locally and synchronized with a remote row store.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;
pub mod sync;

pub use config::{CompendiumConfig, ConfigError};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::appointment::{Appointment, AppointmentPatch};
pub use model::goal::{Goal, GoalPatch, ProgressBand};
pub use model::note::{Note, NotePatch};
pub use model::snapshot::{PartialSnapshot, Snapshot};
pub use model::{new_entity_id, now_timestamp, EntityId};
pub use storage::{
    InMemoryKeyValueStore, KeyValueStore, LocalCache, SqliteKeyValueStore, StorageError,
    StorageResult, SNAPSHOT_STORAGE_KEY,
};
pub use store::{CompendiumContext, CompendiumStore, SessionStore, UserIdentity};
pub use sync::{
    AuthClient, CompendiumSync, InitOutcome, LoadOutcome, RemoteDataStore, RemoteError,
    RemoteOperation, RemoteResult, SqliteUserDataStore, StaticAuthClient, SyncError,
    SyncErrorKind, SyncResult, UserDataRow,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
