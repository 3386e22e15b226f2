//! Core `adapters` crate for abstracting the identity provider and the
//! document store.
//!
//! This crate defines the capability traits the backend consumes
//! (`IdentityProvider`, `DirectoryStore`, `EventStore`), which outline the
//! generic functionality of the external collaborators, and provides the
//! concrete implementations shipped with the service (in-memory and
//! JSON-file backed).

pub mod errors;
pub mod jsonfile;
pub mod memory;
pub mod models;

use async_trait::async_trait;
use tokio::sync::watch;

pub use crate::errors::StoreError;
pub use crate::models::{AssignableRole, AuthState, Identity, Role, Rsvp, UserRecord};

/// Source of caller identities.
///
/// Implementations wrap the external authentication provider. Resolution may
/// take time after startup (key sets, session caches); until then `resolve`
/// reports [`AuthState::Resolving`] for every session.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the identity attached to a bearer token, if any.
    ///
    /// `None` and unknown tokens resolve to [`AuthState::Anonymous`] once the
    /// provider is ready.
    async fn resolve(&self, token: Option<&str>) -> AuthState;

    /// Receiver bumped whenever a session resolves or changes.
    fn changes(&self) -> watch::Receiver<u64>;
}

/// Bulk reads and single-record role updates against the user directory.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Fetch every user record in the directory, in storage order.
    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError>;

    /// Replace the role field of a single record and return the updated
    /// record as the store now holds it.
    async fn update_role(&self, user_id: &str, role: Role) -> Result<UserRecord, StoreError>;
}

/// Read access to event RSVPs.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Every RSVP registered by the given user, in storage order.
    async fn user_rsvps(&self, user_id: &str) -> Result<Vec<Rsvp>, StoreError>;
}
