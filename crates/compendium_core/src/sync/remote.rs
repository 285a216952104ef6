//! Contracts for the hosted backend: a per-user row store and an auth API.

use crate::store::UserIdentity;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Reserved error code for "point select matched no rows".
pub const NO_ROWS_ERROR_CODE: &str = "PGRST116";

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Backend call that produced a [`RemoteError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOperation {
    SelectUserData,
    UpsertUserData,
    CurrentSession,
    SignOut,
}

impl Display for RemoteOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::SelectUserData => "select_user_data",
            Self::UpsertUserData => "upsert_user_data",
            Self::CurrentSession => "current_session",
            Self::SignOut => "sign_out",
        };
        f.write_str(label)
    }
}

/// Error envelope returned by backend collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed [{code}]: {message}")]
pub struct RemoteError {
    pub operation: RemoteOperation,
    /// Backend-specific error code, e.g. [`NO_ROWS_ERROR_CODE`].
    pub code: String,
    pub message: String,
    /// Whether the same call may succeed if retried.
    pub retryable: bool,
}

impl RemoteError {
    pub fn new(
        operation: RemoteOperation,
        code: impl Into<String>,
        message: impl Into<String>,
        retryable: bool,
    ) -> Self {
        Self {
            operation,
            code: code.into(),
            message: message.into(),
            retryable,
        }
    }

    pub fn no_rows(operation: RemoteOperation) -> Self {
        Self::new(
            operation,
            NO_ROWS_ERROR_CODE,
            "The result contains 0 rows",
            false,
        )
    }

    pub fn is_no_rows(&self) -> bool {
        self.code == NO_ROWS_ERROR_CODE
    }
}

/// One row of the `user_data` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDataRow {
    pub user_id: String,
    /// JSON snapshot payload; may be `null` for a row without data.
    pub data: Value,
    pub updated_at: String,
}

/// Row store keyed by user id.
#[async_trait]
pub trait RemoteDataStore: Send + Sync {
    /// Returns the row for `user_id`, or a no-rows [`RemoteError`].
    async fn select_user_data(&self, user_id: &str) -> RemoteResult<UserDataRow>;
    /// Inserts `row`, replacing any existing row with the same user id.
    async fn upsert_user_data(&self, row: UserDataRow) -> RemoteResult<()>;
}

/// Auth sub-interface of the backend.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Identity of the current session, if any.
    async fn current_session(&self) -> RemoteResult<Option<UserIdentity>>;
    async fn sign_out(&self) -> RemoteResult<()>;
}
