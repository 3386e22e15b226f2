//! JSON-document store adapter.
//!
//! This file contains the complete concrete implementation of the store
//! traits over a single JSON document on disk, holding the user and event
//! collections in the same shape as the hosted document database. Role
//! updates are written through to disk before they are acknowledged.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::StoreError;
use crate::models::{Role, Rsvp, StoreDocument, UserRecord};
use crate::{DirectoryStore, EventStore};

/// Store backed by one JSON document at a fixed path.
pub struct JsonStore {
    path: PathBuf,
    // Serializes read-modify-write cycles; concurrent updates would
    // otherwise clobber each other's writes.
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<StoreDocument, StoreError> {
        let raw = tokio::fs::read(&self.path).await.map_err(|err| {
            StoreError::Unavailable(format!("cannot read {}: {err}", self.path.display()))
        })?;
        serde_json::from_slice(&raw)
            .map_err(|err| StoreError::Backend(format!("malformed store document: {err}")))
    }

    async fn persist(&self, doc: &StoreDocument) -> Result<(), StoreError> {
        let raw = serde_json::to_vec_pretty(doc)
            .map_err(|err| StoreError::Backend(format!("cannot encode store document: {err}")))?;
        tokio::fs::write(&self.path, raw).await.map_err(|err| {
            StoreError::Backend(format!("cannot write {}: {err}", self.path.display()))
        })?;
        debug!(path = %self.path.display(), "store document persisted");
        Ok(())
    }
}

#[async_trait]
impl DirectoryStore for JsonStore {
    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self.load().await?.users)
    }

    async fn update_role(&self, user_id: &str, role: Role) -> Result<UserRecord, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut doc = self.load().await?;
        let record = doc
            .users
            .iter_mut()
            .find(|record| record.id == user_id)
            .ok_or_else(|| StoreError::NotFound(user_id.to_string()))?;
        record.role = role;
        let updated = record.clone();

        self.persist(&doc).await?;
        Ok(updated)
    }
}

#[async_trait]
impl EventStore for JsonStore {
    async fn user_rsvps(&self, user_id: &str) -> Result<Vec<Rsvp>, StoreError> {
        let doc = self.load().await?;
        Ok(doc
            .events
            .into_iter()
            .filter_map(|event| {
                let entry = event.rsvps.iter().find(|entry| entry.user_id == user_id)?;
                Some(Rsvp {
                    id: event.id.clone(),
                    event_title: event.title.clone(),
                    event_date: event.date,
                    location: event.location.clone(),
                    rsvp_date: entry.rsvp_date,
                })
            })
            .collect())
    }
}
