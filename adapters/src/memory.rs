//! In-memory adapter implementations.
//!
//! These back the service in development and tests, standing in for the
//! hosted document database and authentication provider. Both support fault
//! injection so every failure and pending path can be exercised
//! deterministically, without simulated delays.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::errors::StoreError;
use crate::models::{AuthState, Identity, Role, Rsvp, StoreDocument, UserRecord};
use crate::{DirectoryStore, EventStore, IdentityProvider};

/// In-memory document store holding the user directory and event RSVPs.
pub struct MemoryStore {
    users: RwLock<Vec<UserRecord>>,
    rsvps: RwLock<HashMap<String, Vec<Rsvp>>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Store seeded with the given directory and no RSVPs.
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self {
            users: RwLock::new(users),
            rsvps: RwLock::new(HashMap::new()),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Store seeded from a full document, flattening each event's attendance
    /// list into per-user RSVPs.
    pub fn from_document(doc: StoreDocument) -> Self {
        let mut rsvps: HashMap<String, Vec<Rsvp>> = HashMap::new();
        for event in doc.events {
            for entry in &event.rsvps {
                rsvps.entry(entry.user_id.clone()).or_default().push(Rsvp {
                    id: event.id.clone(),
                    event_title: event.title.clone(),
                    event_date: event.date,
                    location: event.location.clone(),
                    rsvp_date: entry.rsvp_date,
                });
            }
        }
        Self {
            users: RwLock::new(doc.users),
            rsvps: RwLock::new(rsvps),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Register RSVPs for a user, appending to any already present.
    pub fn insert_rsvps(&self, user_id: &str, rsvps: Vec<Rsvp>) {
        if let Ok(mut table) = self.rsvps.write() {
            table.entry(user_id.to_string()).or_default().extend(rsvps);
        }
    }

    /// Simulate the store being unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store marked offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DirectoryStore for MemoryStore {
    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        self.check_available()?;
        let users = self
            .users
            .read()
            .map_err(|_| StoreError::Backend("user table lock poisoned".into()))?;
        Ok(users.clone())
    }

    async fn update_role(&self, user_id: &str, role: Role) -> Result<UserRecord, StoreError> {
        self.check_available()?;
        let mut users = self
            .users
            .write()
            .map_err(|_| StoreError::Backend("user table lock poisoned".into()))?;
        let record = users
            .iter_mut()
            .find(|record| record.id == user_id)
            .ok_or_else(|| StoreError::NotFound(user_id.to_string()))?;
        record.role = role;
        Ok(record.clone())
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn user_rsvps(&self, user_id: &str) -> Result<Vec<Rsvp>, StoreError> {
        self.check_available()?;
        let rsvps = self
            .rsvps
            .read()
            .map_err(|_| StoreError::Backend("rsvp table lock poisoned".into()))?;
        Ok(rsvps.get(user_id).cloned().unwrap_or_default())
    }
}

/// In-memory identity provider keyed by bearer token.
///
/// Starts unresolved: every session reads as [`AuthState::Resolving`] until
/// [`MemoryIdentityProvider::mark_ready`] is called, mirroring a real
/// provider warming up its key set.
pub struct MemoryIdentityProvider {
    sessions: RwLock<HashMap<String, Identity>>,
    ready: AtomicBool,
    changes: watch::Sender<u64>,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            sessions: RwLock::new(HashMap::new()),
            ready: AtomicBool::new(false),
            changes,
        }
    }

    /// Attach an identity to a bearer token.
    pub fn insert_session(&self, token: &str, identity: Identity) {
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.insert(token.to_string(), identity);
        }
        self.bump();
    }

    /// Detach whatever identity a bearer token held.
    pub fn remove_session(&self, token: &str) {
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.remove(token);
        }
        self.bump();
    }

    /// Mark the provider as having finished its startup resolution.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::SeqCst);
        self.bump();
    }

    fn bump(&self) {
        self.changes.send_modify(|generation| *generation += 1);
    }
}

impl Default for MemoryIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn resolve(&self, token: Option<&str>) -> AuthState {
        if !self.ready.load(Ordering::SeqCst) {
            return AuthState::Resolving;
        }
        let Some(token) = token else {
            return AuthState::Anonymous;
        };
        match self.sessions.read() {
            Ok(sessions) => sessions
                .get(token)
                .cloned()
                .map(AuthState::Authenticated)
                .unwrap_or(AuthState::Anonymous),
            // A poisoned session table reads as anonymous rather than
            // granting anything.
            Err(_) => AuthState::Anonymous,
        }
    }

    fn changes(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }
}
