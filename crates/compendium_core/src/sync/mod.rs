//! Remote synchronization of the compendium snapshot.
//!
//! # Responsibility
//! - Define the remote row-store and auth contracts (async traits).
//! - Provide a SQLite row store and an in-process auth client.
//! - Orchestrate load/save/init/logout against a [`CompendiumContext`].
//!
//! # Invariants
//! - The remote side stores at most one row per user id.
//! - Sync operations never panic; every failure is logged and returned as a
//!   [`SyncError`] value.
//!
//! [`CompendiumContext`]: crate::store::CompendiumContext

pub mod compendium_sync;
pub mod error;
pub mod remote;
pub mod sqlite_backend;
pub mod static_auth;

pub use compendium_sync::{CompendiumSync, InitOutcome, LoadOutcome};
pub use error::{SyncError, SyncErrorKind, SyncResult};
pub use remote::{
    AuthClient, RemoteDataStore, RemoteError, RemoteOperation, RemoteResult, UserDataRow,
    NO_ROWS_ERROR_CODE,
};
pub use sqlite_backend::SqliteUserDataStore;
pub use static_auth::StaticAuthClient;
