//! SQLite implementation of the per-user row store.
//!
//! # Invariants
//! - `user_data.user_id` is the primary key; upserts replace in place.
//! - Payloads are stored as JSON text and must parse back into JSON.

use super::remote::{RemoteDataStore, RemoteError, RemoteOperation, RemoteResult, UserDataRow};
use crate::db::{open_db, open_db_in_memory, DbResult};
use async_trait::async_trait;
use log::{debug, error};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Row store over the `user_data` table of a migrated SQLite database.
pub struct SqliteUserDataStore {
    conn: Mutex<Connection>,
}

impl SqliteUserDataStore {
    /// Opens (and migrates) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps a connection that already went through migrations.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self, operation: RemoteOperation) -> RemoteResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            RemoteError::new(
                operation,
                "lock_poisoned",
                "connection lock poisoned by an earlier panic",
                false,
            )
        })
    }
}

#[async_trait]
impl RemoteDataStore for SqliteUserDataStore {
    async fn select_user_data(&self, user_id: &str) -> RemoteResult<UserDataRow> {
        let operation = RemoteOperation::SelectUserData;
        let conn = self.lock(operation)?;
        let row = conn
            .query_row(
                "SELECT user_id, data, updated_at FROM user_data WHERE user_id = ?1;",
                [user_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()
            .map_err(|err| sqlite_error(operation, err))?;

        let Some((user_id, data, updated_at)) = row else {
            debug!("event=user_data_select module=sync status=empty backend=sqlite");
            return Err(RemoteError::no_rows(operation));
        };

        let data = serde_json::from_str(&data).map_err(|err| {
            error!(
                "event=user_data_select module=sync status=error backend=sqlite error_code=invalid_payload error={err}"
            );
            RemoteError::new(operation, "invalid_payload", err.to_string(), false)
        })?;

        Ok(UserDataRow {
            user_id,
            data,
            updated_at,
        })
    }

    async fn upsert_user_data(&self, row: UserDataRow) -> RemoteResult<()> {
        let operation = RemoteOperation::UpsertUserData;
        let payload = row.data.to_string();
        let conn = self.lock(operation)?;
        conn.execute(
            "INSERT INTO user_data (user_id, data, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id) DO UPDATE SET
                data = excluded.data,
                updated_at = excluded.updated_at;",
            params![row.user_id, payload, row.updated_at],
        )
        .map_err(|err| sqlite_error(operation, err))?;
        Ok(())
    }
}

fn sqlite_error(operation: RemoteOperation, err: rusqlite::Error) -> RemoteError {
    let retryable = matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
    );
    RemoteError::new(operation, "sqlite_error", err.to_string(), retryable)
}
