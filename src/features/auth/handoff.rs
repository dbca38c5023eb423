//! Same-tab, read-once handoff of a freshly authenticated user from the
//! callback processor to the first protected view.
//!
//! The store holds at most one record plus a separate "just authenticated"
//! marker. Publishing moves a record in; `take` moves it out and leaves the
//! slot empty, so only one consumer can ever observe a given record. Each take
//! is a single synchronous critical section with no suspension point inside.
//! The marker only counts for a short window after publishing; a guard that
//! mounts later treats the session like any other.
//! Nothing here is persisted: the store lives as long as the page.

use crate::{app_lib::time::Instant, features::auth::types::UserProfile};
use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tracing::debug;

/// How long after a publish the "just authenticated" marker is honored.
pub const DEFAULT_MARKER_TTL: Duration = Duration::from_secs(10);

/// Result of a successful exchange, waiting for its single consumer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandoffRecord {
    pub user: UserProfile,
    pub just_authenticated: bool,
}

#[derive(Default)]
struct Slots {
    record: Option<HandoffRecord>,
    /// When the marker was raised; `None` once taken or cleared.
    authenticated_at: Option<Instant>,
}

/// Cloneable handle to the page-wide handoff slots.
#[derive(Clone)]
pub struct HandoffStore {
    slots: Arc<Mutex<Slots>>,
    marker_ttl: Duration,
}

impl Default for HandoffStore {
    fn default() -> Self {
        Self::with_marker_ttl(DEFAULT_MARKER_TTL)
    }
}

impl HandoffStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_marker_ttl(marker_ttl: Duration) -> Self {
        Self {
            slots: Arc::new(Mutex::new(Slots::default())),
            marker_ttl,
        }
    }

    fn slots(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores a freshly authenticated user and raises the marker.
    /// An unconsumed record is overwritten (last write wins).
    pub fn publish(&self, user: UserProfile) {
        let mut slots = self.slots();
        if slots.record.is_some() {
            debug!("replacing unconsumed session handoff");
        }
        slots.record = Some(HandoffRecord {
            user,
            just_authenticated: true,
        });
        slots.authenticated_at = Some(Instant::now());
    }

    /// Removes and returns the pending record, if any.
    pub fn take(&self) -> Option<HandoffRecord> {
        self.slots().record.take()
    }

    /// Clears the marker and reports whether it was raised within the TTL.
    pub fn take_just_authenticated(&self) -> bool {
        let Some(raised) = self.slots().authenticated_at.take() else {
            return false;
        };
        let fresh = raised.elapsed() <= self.marker_ttl;
        if !fresh {
            debug!("ignoring expired just-authenticated marker");
        }
        fresh
    }

    pub fn has_pending(&self) -> bool {
        self.slots().record.is_some()
    }

    /// Drops any pending record and marker, used on sign-out.
    pub fn clear(&self) {
        let mut slots = self.slots();
        slots.record = None;
        slots.authenticated_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_MARKER_TTL, HandoffStore};
    use crate::features::auth::types::UserProfile;
    use serde_json::json;
    use std::time::Duration;

    fn user(id: &str) -> UserProfile {
        serde_json::from_value(json!({ "id": id, "email": format!("{id}@hub.example") })).unwrap()
    }

    #[test]
    fn take_is_read_once() {
        let store = HandoffStore::new();
        store.publish(user("u1"));

        let record = store.take().unwrap();
        assert_eq!(record.user.id, "u1");
        assert!(record.just_authenticated);
        assert!(store.take().is_none());
    }

    #[test]
    fn marker_survives_record_consumption_once() {
        let store = HandoffStore::new();
        store.publish(user("u1"));
        let _ = store.take();

        assert!(store.take_just_authenticated());
        assert!(!store.take_just_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn marker_expires_after_ttl() {
        let store = HandoffStore::new();
        store.publish(user("u1"));
        let _ = store.take();

        tokio::time::advance(DEFAULT_MARKER_TTL + Duration::from_millis(1)).await;

        assert!(!store.take_just_authenticated());
        assert!(!store.take_just_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn marker_is_honored_within_ttl() {
        let store = HandoffStore::with_marker_ttl(Duration::from_secs(2));
        store.publish(user("u1"));

        tokio::time::advance(Duration::from_secs(1)).await;

        assert!(store.take_just_authenticated());
    }

    #[test]
    fn clones_share_the_same_slots() {
        let writer = HandoffStore::new();
        let reader = writer.clone();
        writer.publish(user("u1"));

        assert!(reader.has_pending());
        assert!(reader.take().is_some());
        assert!(!writer.has_pending());
    }

    #[test]
    fn second_publish_overwrites_first() {
        let store = HandoffStore::new();
        store.publish(user("u1"));
        store.publish(user("u2"));

        assert_eq!(store.take().unwrap().user.id, "u2");
        assert!(store.take().is_none());
    }

    #[test]
    fn clear_drops_record_and_marker() {
        let store = HandoffStore::new();
        store.publish(user("u1"));
        store.clear();

        assert!(store.take().is_none());
        assert!(!store.take_just_authenticated());
    }
}
