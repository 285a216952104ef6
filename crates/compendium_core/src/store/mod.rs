//! In-memory stores for domain data and session state.
//!
//! # Responsibility
//! - Hold the notes/appointments/goals collections and sync flags.
//! - Hold the authenticated identity.
//! - Bundle both into the per-session [`CompendiumContext`].
//!
//! # Invariants
//! - Store mutations are synchronous and never fail.
//! - A context is owned by exactly one session; it is reset, not dropped,
//!   on logout.

pub mod compendium_store;
pub mod session_store;

pub use compendium_store::CompendiumStore;
pub use session_store::{SessionStore, UserIdentity};

/// Per-session state passed to sync operations.
#[derive(Debug, Default)]
pub struct CompendiumContext {
    pub store: CompendiumStore,
    pub session: SessionStore,
}

impl CompendiumContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns both stores to the logged-out baseline.
    pub fn reset(&mut self) {
        self.session.clear_user();
        self.store.clear_all();
    }
}
