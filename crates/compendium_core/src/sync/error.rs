//! Sync error taxonomy.

use super::remote::RemoteError;
use thiserror::Error;

pub type SyncResult<T> = Result<T, SyncError>;

/// Coarse classification of a [`SyncError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncErrorKind {
    /// Neither the session store nor the backend yielded a user id.
    IdentityUnresolved,
    BackendRead,
    BackendWrite,
    /// The remote payload is not a snapshot.
    MalformedPayload,
    /// The local snapshot could not be encoded.
    EncodePayload,
    SignOut,
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("no authenticated user id available")]
    IdentityUnresolved,
    #[error("failed to load user data: {0}")]
    BackendRead(#[source] RemoteError),
    #[error("failed to save user data: {0}")]
    BackendWrite(#[source] RemoteError),
    #[error("remote user data is not a valid snapshot: {0}")]
    MalformedPayload(#[source] serde_json::Error),
    #[error("failed to encode snapshot: {0}")]
    EncodePayload(#[source] serde_json::Error),
    #[error("sign-out failed: {0}")]
    SignOut(#[source] RemoteError),
}

impl SyncError {
    pub fn kind(&self) -> SyncErrorKind {
        match self {
            Self::IdentityUnresolved => SyncErrorKind::IdentityUnresolved,
            Self::BackendRead(_) => SyncErrorKind::BackendRead,
            Self::BackendWrite(_) => SyncErrorKind::BackendWrite,
            Self::MalformedPayload(_) => SyncErrorKind::MalformedPayload,
            Self::EncodePayload(_) => SyncErrorKind::EncodePayload,
            Self::SignOut(_) => SyncErrorKind::SignOut,
        }
    }

    /// Whether retrying the same operation may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::BackendRead(err) | Self::BackendWrite(err) | Self::SignOut(err) => {
                err.retryable
            }
            _ => false,
        }
    }
}
