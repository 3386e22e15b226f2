//! Role administration over the user directory.
//!
//! `RoleDirectory` owns the in-memory directory snapshot, performs the bulk
//! load for the admin console, and applies single-record role transitions
//! against the backing store. The `super-admin` role can never be assigned
//! or removed through this path.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, RwLock};

use thiserror::Error;
use tracing::{info, warn};

use volunhub_adapters::errors::StoreError;
use volunhub_adapters::models::{AssignableRole, Role, UserRecord};
use volunhub_adapters::DirectoryStore;

/// Faults surfaced by directory operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The bulk load failed; the previous snapshot is preserved.
    #[error("could not fetch the user directory: {0}")]
    Fetch(#[source] StoreError),

    /// The store rejected or failed the role update; nothing changed.
    #[error("could not update the user role: {0}")]
    Update(#[source] StoreError),

    /// The target record holds the protected `super-admin` role.
    #[error("user '{user_id}' holds a protected role and cannot be changed")]
    ProtectedRole { user_id: String },

    /// The target id is not present in the directory snapshot.
    #[error("user '{user_id}' is not in the directory")]
    UnknownUser { user_id: String },

    /// Another role update for the same user has not resolved yet.
    #[error("a role update for user '{user_id}' is already in flight")]
    UpdateInFlight { user_id: String },

    /// An internal lock was poisoned by a panicking thread.
    #[error("internal directory lock poisoned")]
    LockPoisoned,
}

/// Directory service holding the snapshot the admin console renders.
///
/// The snapshot is an explicitly owned copy of the store's directory, not a
/// live view: it changes only through [`RoleDirectory::list`] and confirmed
/// [`RoleDirectory::set_role`] writes.
pub struct RoleDirectory {
    store: Arc<dyn DirectoryStore>,
    snapshot: RwLock<Vec<UserRecord>>,
    in_flight: Mutex<HashSet<String>>,
}

impl RoleDirectory {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self {
            store,
            snapshot: RwLock::new(Vec::new()),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Load the directory from the store, replacing the snapshot on success.
    ///
    /// A failed load leaves the previous snapshot untouched (empty on first
    /// load), so the console never renders a partially fetched directory.
    pub async fn list(&self) -> Result<Vec<UserRecord>, DirectoryError> {
        let users = self.store.list_users().await.map_err(|err| {
            warn!(error = %err, "directory fetch failed");
            DirectoryError::Fetch(err)
        })?;

        let mut snapshot = self.snapshot.write().map_err(|_| DirectoryError::LockPoisoned)?;
        *snapshot = users.clone();
        Ok(users)
    }

    /// Current cached view of the directory. No I/O.
    pub fn snapshot(&self) -> Result<Vec<UserRecord>, DirectoryError> {
        Ok(self
            .snapshot
            .read()
            .map_err(|_| DirectoryError::LockPoisoned)?
            .clone())
    }

    /// Whether a role update for `user_id` is still outstanding.
    pub fn is_updating(&self, user_id: &str) -> bool {
        self.in_flight
            .lock()
            .map(|set| set.contains(user_id))
            .unwrap_or(false)
    }

    /// Assign `new_role` to `user_id` and return the updated record.
    ///
    /// The snapshot changes only after the store confirms the write, so the
    /// console can never show a role the store did not persist. At most one
    /// update per user may be outstanding; a second call while the first is
    /// unresolved is refused. Records holding `super-admin` are refused
    /// before any store call.
    pub async fn set_role(
        &self,
        user_id: &str,
        new_role: AssignableRole,
    ) -> Result<UserRecord, DirectoryError> {
        let current = self.find(user_id)?.ok_or_else(|| DirectoryError::UnknownUser {
            user_id: user_id.to_string(),
        })?;
        if current.role == Role::SuperAdmin {
            warn!(user_id, "refused role change on a protected record");
            return Err(DirectoryError::ProtectedRole {
                user_id: user_id.to_string(),
            });
        }

        let _guard = InFlight::mark(&self.in_flight, user_id)?;

        let role = Role::from(new_role);
        let updated = self.store.update_role(user_id, role).await.map_err(|err| {
            warn!(user_id, error = %err, "role update failed");
            DirectoryError::Update(err)
        })?;

        let mut snapshot = self.snapshot.write().map_err(|_| DirectoryError::LockPoisoned)?;
        if let Some(record) = snapshot.iter_mut().find(|record| record.id == user_id) {
            record.role = updated.role;
        }
        info!(user_id, role = %updated.role, "user role updated");
        Ok(updated)
    }

    fn find(&self, user_id: &str) -> Result<Option<UserRecord>, DirectoryError> {
        Ok(self
            .snapshot
            .read()
            .map_err(|_| DirectoryError::LockPoisoned)?
            .iter()
            .find(|record| record.id == user_id)
            .cloned())
    }
}

/// Per-user in-flight marker, cleared when the update resolves on any path.
struct InFlight<'a> {
    set: &'a Mutex<HashSet<String>>,
    user_id: String,
}

impl<'a> InFlight<'a> {
    fn mark(set: &'a Mutex<HashSet<String>>, user_id: &str) -> Result<Self, DirectoryError> {
        let mut guard = set.lock().map_err(|_| DirectoryError::LockPoisoned)?;
        if !guard.insert(user_id.to_string()) {
            return Err(DirectoryError::UpdateInFlight {
                user_id: user_id.to_string(),
            });
        }
        Ok(Self {
            set,
            user_id: user_id.to_string(),
        })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Ok(mut guard) = self.set.lock() {
            guard.remove(&self.user_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Notify;
    use volunhub_adapters::memory::MemoryStore;

    fn record(id: &str, name: &str, role: Role) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{id}@example.com"),
            role,
        }
    }

    fn seeded() -> (Arc<MemoryStore>, RoleDirectory) {
        let store = Arc::new(MemoryStore::new(vec![
            record("1", "John Doe", Role::Volunteer),
            record("2", "Jane Smith", Role::Admin),
            record("3", "Sam Rivera", Role::SuperAdmin),
        ]));
        let directory = RoleDirectory::new(store.clone());
        (store, directory)
    }

    #[tokio::test]
    async fn promotes_and_demotes_between_volunteer_and_admin() {
        let (_store, directory) = seeded();
        directory.list().await.unwrap();

        let updated = directory.set_role("1", AssignableRole::Admin).await.unwrap();
        assert_eq!(updated.role, Role::Admin);
        let updated = directory.set_role("2", AssignableRole::Volunteer).await.unwrap();
        assert_eq!(updated.role, Role::Volunteer);

        let snapshot = directory.snapshot().unwrap();
        let role_of = |id: &str| snapshot.iter().find(|r| r.id == id).unwrap().role;
        assert_eq!(role_of("1"), Role::Admin);
        assert_eq!(role_of("2"), Role::Volunteer);
        assert_eq!(role_of("3"), Role::SuperAdmin);
    }

    #[tokio::test]
    async fn super_admin_records_are_protected() {
        let (store, directory) = seeded();
        directory.list().await.unwrap();

        let err = directory.set_role("3", AssignableRole::Admin).await.unwrap_err();
        assert!(matches!(err, DirectoryError::ProtectedRole { user_id } if user_id == "3"));

        // Neither the snapshot nor the store changed.
        let snapshot = directory.snapshot().unwrap();
        assert_eq!(snapshot.iter().find(|r| r.id == "3").unwrap().role, Role::SuperAdmin);
        let stored = store.list_users().await.unwrap();
        assert_eq!(stored.iter().find(|r| r.id == "3").unwrap().role, Role::SuperAdmin);
    }

    #[tokio::test]
    async fn protection_is_checked_before_any_store_call() {
        let (store, directory) = seeded();
        directory.list().await.unwrap();

        // An offline store would turn any store call into an Update error,
        // so getting ProtectedRole proves no call was made.
        store.set_unavailable(true);
        let err = directory.set_role("3", AssignableRole::Admin).await.unwrap_err();
        assert!(matches!(err, DirectoryError::ProtectedRole { .. }));
    }

    #[tokio::test]
    async fn unknown_users_are_refused_without_a_store_call() {
        let (store, directory) = seeded();
        directory.list().await.unwrap();

        store.set_unavailable(true);
        let err = directory.set_role("42", AssignableRole::Admin).await.unwrap_err();
        assert!(matches!(err, DirectoryError::UnknownUser { user_id } if user_id == "42"));
    }

    #[tokio::test]
    async fn role_round_trip_restores_the_original_directory() {
        let (_store, directory) = seeded();
        let original = directory.list().await.unwrap();

        directory.set_role("1", AssignableRole::Admin).await.unwrap();
        directory.set_role("1", AssignableRole::Volunteer).await.unwrap();

        assert_eq!(directory.snapshot().unwrap(), original);
    }

    #[tokio::test]
    async fn reassigning_the_current_role_is_idempotent() {
        let (_store, directory) = seeded();
        let original = directory.list().await.unwrap();

        let updated = directory.set_role("2", AssignableRole::Admin).await.unwrap();
        assert_eq!(updated.role, Role::Admin);
        assert_eq!(directory.snapshot().unwrap(), original);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_the_snapshot_untouched() {
        let (store, directory) = seeded();

        // Initial load failure: the directory stays empty, not partial.
        store.set_unavailable(true);
        let err = directory.list().await.unwrap_err();
        assert!(matches!(err, DirectoryError::Fetch(_)));
        assert!(directory.snapshot().unwrap().is_empty());

        // A later failure keeps the last good snapshot.
        store.set_unavailable(false);
        directory.list().await.unwrap();
        store.set_unavailable(true);
        assert!(directory.list().await.is_err());
        assert_eq!(directory.snapshot().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn failed_update_does_not_touch_the_snapshot() {
        let (store, directory) = seeded();
        directory.list().await.unwrap();

        store.set_unavailable(true);
        let err = directory.set_role("1", AssignableRole::Admin).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Update(_)));

        let snapshot = directory.snapshot().unwrap();
        assert_eq!(snapshot.iter().find(|r| r.id == "1").unwrap().role, Role::Volunteer);
        assert!(!directory.is_updating("1"));
    }

    /// Store that parks updates for one user until released, so tests can
    /// observe the in-flight window.
    struct BlockingStore {
        inner: MemoryStore,
        gate: Notify,
        blocked_user: &'static str,
    }

    #[async_trait]
    impl DirectoryStore for BlockingStore {
        async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
            self.inner.list_users().await
        }

        async fn update_role(&self, user_id: &str, role: Role) -> Result<UserRecord, StoreError> {
            if user_id == self.blocked_user {
                self.gate.notified().await;
            }
            self.inner.update_role(user_id, role).await
        }
    }

    #[tokio::test]
    async fn concurrent_updates_for_one_user_are_refused() {
        let store = Arc::new(BlockingStore {
            inner: MemoryStore::new(vec![
                record("1", "John Doe", Role::Volunteer),
                record("2", "Jane Smith", Role::Admin),
            ]),
            gate: Notify::new(),
            blocked_user: "1",
        });
        let directory = Arc::new(RoleDirectory::new(store.clone()));
        directory.list().await.unwrap();

        let background = {
            let directory = directory.clone();
            tokio::spawn(async move { directory.set_role("1", AssignableRole::Admin).await })
        };
        while !directory.is_updating("1") {
            tokio::task::yield_now().await;
        }

        // Same user: refused while the first update is unresolved.
        let err = directory.set_role("1", AssignableRole::Admin).await.unwrap_err();
        assert!(matches!(err, DirectoryError::UpdateInFlight { user_id } if user_id == "1"));

        // A different user is not serialized behind it.
        directory.set_role("2", AssignableRole::Volunteer).await.unwrap();

        store.gate.notify_one();
        let updated = background.await.unwrap().unwrap();
        assert_eq!(updated.role, Role::Admin);
        assert!(!directory.is_updating("1"));
    }
}
