//! Read-side feed for the volunteer dashboard.
//!
//! Collects the caller's event RSVPs from the event store and orders them
//! with the next upcoming event first.

use std::sync::Arc;

use tracing::warn;

use volunhub_adapters::errors::StoreError;
use volunhub_adapters::models::Rsvp;
use volunhub_adapters::EventStore;

/// Dashboard feed over the event store.
pub struct RsvpFeed {
    store: Arc<dyn EventStore>,
}

impl RsvpFeed {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Every RSVP for `user_id`, sorted by event date ascending.
    pub async fn list_for(&self, user_id: &str) -> Result<Vec<Rsvp>, StoreError> {
        let mut rsvps = self.store.user_rsvps(user_id).await.map_err(|err| {
            warn!(user_id, error = %err, "rsvp fetch failed");
            err
        })?;
        rsvps.sort_by_key(|rsvp| rsvp.event_date);
        Ok(rsvps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use volunhub_adapters::memory::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rsvp(id: &str, title: &str, event_date: NaiveDate) -> Rsvp {
        Rsvp {
            id: id.to_string(),
            event_title: title.to_string(),
            event_date,
            location: "Marina Beach, Chennai".into(),
            rsvp_date: date(2024, 6, 20),
        }
    }

    #[tokio::test]
    async fn feed_lists_upcoming_events_first() {
        let store = Arc::new(MemoryStore::new(Vec::new()));
        store.insert_rsvps(
            "u-1",
            vec![
                rsvp("2", "Tree Plantation", date(2024, 7, 22)),
                rsvp("1", "Beach Cleanup Drive", date(2024, 7, 15)),
            ],
        );

        let feed = RsvpFeed::new(store);
        let rsvps = feed.list_for("u-1").await.unwrap();
        assert_eq!(rsvps.len(), 2);
        assert_eq!(rsvps[0].event_title, "Beach Cleanup Drive");
        assert_eq!(rsvps[1].event_title, "Tree Plantation");
    }

    #[tokio::test]
    async fn users_without_rsvps_get_an_empty_feed() {
        let store = Arc::new(MemoryStore::new(Vec::new()));
        let feed = RsvpFeed::new(store);
        assert!(feed.list_for("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let store = Arc::new(MemoryStore::new(Vec::new()));
        store.set_unavailable(true);

        let feed = RsvpFeed::new(store.clone());
        let err = feed.list_for("u-1").await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
