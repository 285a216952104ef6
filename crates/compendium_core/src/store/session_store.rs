//! Authenticated-user session state.

use serde::{Deserialize, Serialize};

/// Identity of the signed-in user as reported by the auth backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl UserIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
            created_at: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Session flags for the current user.
///
/// Starts in the "unknown" state: no user and `is_loading == true` until the
/// first [`SessionStore::set_user`] or [`SessionStore::clear_user`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStore {
    user: Option<UserIdentity>,
    is_authenticated: bool,
    is_loading: bool,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            is_loading: true,
        }
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (or unsets) the user; authentication follows presence.
    pub fn set_user(&mut self, user: Option<UserIdentity>) {
        self.is_authenticated = user.is_some();
        self.user = user;
        self.is_loading = false;
    }

    pub fn clear_user(&mut self) {
        self.user = None;
        self.is_authenticated = false;
        self.is_loading = false;
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.id.as_str())
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|user| user.email.as_deref())
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }
}
