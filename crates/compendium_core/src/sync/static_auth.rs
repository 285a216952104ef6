//! In-process auth client holding one optional identity.

use super::remote::{AuthClient, RemoteError, RemoteOperation, RemoteResult};
use crate::store::UserIdentity;
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

/// Auth client for local-only setups and tooling.
///
/// The identity is fixed at construction (or by [`Self::sign_in`]) and
/// dropped by `sign_out`.
#[derive(Debug, Default)]
pub struct StaticAuthClient {
    session: Mutex<Option<UserIdentity>>,
}

impl StaticAuthClient {
    pub fn signed_in(identity: UserIdentity) -> Self {
        Self {
            session: Mutex::new(Some(identity)),
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, identity: UserIdentity) -> RemoteResult<()> {
        *self.lock(RemoteOperation::CurrentSession)? = Some(identity);
        Ok(())
    }

    fn lock(
        &self,
        operation: RemoteOperation,
    ) -> RemoteResult<MutexGuard<'_, Option<UserIdentity>>> {
        self.session.lock().map_err(|_| {
            RemoteError::new(
                operation,
                "lock_poisoned",
                "session lock poisoned by an earlier panic",
                false,
            )
        })
    }
}

#[async_trait]
impl AuthClient for StaticAuthClient {
    async fn current_session(&self) -> RemoteResult<Option<UserIdentity>> {
        Ok(self.lock(RemoteOperation::CurrentSession)?.clone())
    }

    async fn sign_out(&self) -> RemoteResult<()> {
        *self.lock(RemoteOperation::SignOut)? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::StaticAuthClient;
    use crate::store::UserIdentity;
    use crate::sync::remote::AuthClient;

    #[tokio::test]
    async fn sign_out_drops_session() {
        let auth = StaticAuthClient::signed_in(UserIdentity::new("u-1"));
        assert_eq!(
            auth.current_session().await.unwrap().map(|user| user.id),
            Some("u-1".to_string())
        );

        auth.sign_out().await.unwrap();
        assert_eq!(auth.current_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn sign_in_replaces_identity() {
        let auth = StaticAuthClient::signed_out();
        assert_eq!(auth.current_session().await.unwrap(), None);

        auth.sign_in(UserIdentity::new("u-2")).unwrap();
        assert_eq!(
            auth.current_session().await.unwrap(),
            Some(UserIdentity::new("u-2"))
        );
    }
}
