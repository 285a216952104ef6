//! Sync orchestration between the in-memory stores and the backend.
//!
//! # Responsibility
//! - Resolve the current user id (session store first, backend second).
//! - Load the remote snapshot into the domain store and save it back.
//! - Drive session init and logout for a [`CompendiumContext`].
//!
//! # Invariants
//! - `is_loading` / `is_saving` are set only once a user id is resolved and
//!   are always cleared before the operation returns.
//! - A missing remote row is a new user, not a failure.
//! - Logout always clears local state, whether or not sign-out succeeded.

use super::error::{SyncError, SyncResult};
use super::remote::{AuthClient, RemoteDataStore, UserDataRow};
use crate::model::now_timestamp;
use crate::model::snapshot::PartialSnapshot;
use crate::store::{CompendiumContext, CompendiumStore, UserIdentity};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Instant;

/// Result of a successful [`CompendiumSync::load_user_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Remote data replaced the local collections.
    Loaded,
    /// The user has no stored data yet; local state was left alone.
    NoRemoteData,
}

/// Result of a successful [`CompendiumSync::init_sync`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    SignedIn(LoadOutcome),
    /// No identity was found and the context was reset.
    SignedOut,
}

/// Remote sync driver bound to one backend.
#[derive(Clone)]
pub struct CompendiumSync {
    data: Arc<dyn RemoteDataStore>,
    auth: Arc<dyn AuthClient>,
}

impl CompendiumSync {
    pub fn new(data: Arc<dyn RemoteDataStore>, auth: Arc<dyn AuthClient>) -> Self {
        Self { data, auth }
    }

    /// Returns the current user id, if one can be resolved.
    pub async fn user_id(&self, ctx: &CompendiumContext) -> Option<String> {
        self.resolve_identity(ctx).await.map(|identity| identity.id)
    }

    /// Fetches the user's remote snapshot into the domain store.
    ///
    /// # Errors
    /// - `IdentityUnresolved` without touching `is_loading`.
    /// - `BackendRead` for any backend failure other than "no rows".
    /// - `MalformedPayload` when the stored payload is not a snapshot.
    pub async fn load_user_data(&self, ctx: &mut CompendiumContext) -> SyncResult<LoadOutcome> {
        let user_id = self.require_user_id(ctx, "load").await?;

        let started_at = Instant::now();
        ctx.store.set_loading(true);
        let result = self.fetch_into(&mut ctx.store, &user_id).await;
        ctx.store.set_loading(false);

        match &result {
            Ok(outcome) => info!(
                "event=sync_load module=sync status=ok outcome={outcome:?} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=sync_load module=sync status=error error_kind={:?} duration_ms={} error={err}",
                err.kind(),
                started_at.elapsed().as_millis()
            ),
        }
        result
    }

    /// Upserts the current snapshot for the user and returns the sync time.
    ///
    /// # Errors
    /// - `IdentityUnresolved` without touching `is_saving`.
    /// - `EncodePayload` when the snapshot cannot be serialized.
    /// - `BackendWrite` for any backend failure.
    pub async fn save_user_data(&self, ctx: &mut CompendiumContext) -> SyncResult<String> {
        let user_id = self.require_user_id(ctx, "save").await?;

        let started_at = Instant::now();
        ctx.store.set_saving(true);
        let result = self.push_from(&mut ctx.store, user_id).await;
        ctx.store.set_saving(false);

        match &result {
            Ok(_) => info!(
                "event=sync_save module=sync status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=sync_save module=sync status=error error_kind={:?} duration_ms={} error={err}",
                err.kind(),
                started_at.elapsed().as_millis()
            ),
        }
        result
    }

    /// Establishes the session: load data when signed in, reset otherwise.
    pub async fn init_sync(&self, ctx: &mut CompendiumContext) -> SyncResult<InitOutcome> {
        match self.resolve_identity(ctx).await {
            Some(identity) => {
                ctx.session.set_user(Some(identity));
                let outcome = self.load_user_data(ctx).await?;
                Ok(InitOutcome::SignedIn(outcome))
            }
            None => {
                ctx.reset();
                info!("event=sync_init module=sync status=signed_out");
                Ok(InitOutcome::SignedOut)
            }
        }
    }

    /// Signs out and clears the context.
    ///
    /// The context is cleared even when the backend sign-out fails; that
    /// failure is still returned so callers can report it.
    pub async fn logout(&self, ctx: &mut CompendiumContext) -> SyncResult<()> {
        let sign_out = self.auth.sign_out().await;
        ctx.reset();

        match sign_out {
            Ok(()) => {
                info!("event=sync_logout module=sync status=ok");
                Ok(())
            }
            Err(err) => {
                warn!("event=sync_logout module=sync status=error error={err}");
                Err(SyncError::SignOut(err))
            }
        }
    }

    async fn resolve_identity(&self, ctx: &CompendiumContext) -> Option<UserIdentity> {
        if let Some(user) = ctx.session.user().filter(|user| !user.id.is_empty()) {
            return Some(user.clone());
        }

        match self.auth.current_session().await {
            Ok(session) => session.filter(|user| !user.id.is_empty()),
            Err(err) => {
                warn!(
                    "event=session_lookup module=sync status=error error_code={} error={err}",
                    err.code
                );
                None
            }
        }
    }

    async fn require_user_id(
        &self,
        ctx: &CompendiumContext,
        action: &'static str,
    ) -> SyncResult<String> {
        match self.user_id(ctx).await {
            Some(user_id) => Ok(user_id),
            None => {
                debug!("event=sync_{action} module=sync status=skipped reason=no_identity");
                Err(SyncError::IdentityUnresolved)
            }
        }
    }

    async fn fetch_into(
        &self,
        store: &mut CompendiumStore,
        user_id: &str,
    ) -> SyncResult<LoadOutcome> {
        let row = match self.data.select_user_data(user_id).await {
            Ok(row) => row,
            Err(err) if err.is_no_rows() => return Ok(LoadOutcome::NoRemoteData),
            Err(err) => return Err(SyncError::BackendRead(err)),
        };

        if row.data.is_null() {
            return Ok(LoadOutcome::NoRemoteData);
        }

        let snapshot: PartialSnapshot =
            serde_json::from_value(row.data).map_err(SyncError::MalformedPayload)?;
        store.load_from_data(snapshot);
        Ok(LoadOutcome::Loaded)
    }

    async fn push_from(&self, store: &mut CompendiumStore, user_id: String) -> SyncResult<String> {
        let data = serde_json::to_value(store.get_data_for_save())
            .map_err(SyncError::EncodePayload)?;
        let row = UserDataRow {
            user_id,
            data,
            updated_at: now_timestamp(),
        };

        self.data
            .upsert_user_data(row)
            .await
            .map_err(SyncError::BackendWrite)?;

        let synced_at = now_timestamp();
        store.mark_synced(synced_at.clone());
        Ok(synced_at)
    }
}
