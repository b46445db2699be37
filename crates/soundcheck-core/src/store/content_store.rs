// Single-owner reactive container for the content snapshot.
//
// Mutations flow through `apply`; readers take cheap clones or
// subscribe for push-based change notification via a `watch` channel.
// There is exactly one writer (the editor); the public renderer and the
// CLI only ever read.

use tokio::sync::watch;

use super::snapshot::{ContentAction, ContentSnapshot};

/// Reactive store holding the current `ContentSnapshot`.
pub struct ContentStore {
    snapshot: watch::Sender<ContentSnapshot>,
}

impl ContentStore {
    pub fn new(initial: ContentSnapshot) -> Self {
        let (snapshot, _) = watch::channel(initial);
        Self { snapshot }
    }

    /// The current snapshot (cloned; the aggregate is small).
    pub fn snapshot(&self) -> ContentSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Apply a transition and notify subscribers.
    pub fn apply(&self, action: ContentAction) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| snap.apply(action));
    }

    /// Replace the entire snapshot (initial load, rollback re-fetch).
    pub fn replace(&self, next: ContentSnapshot) {
        self.snapshot.send_modify(|snap| *snap = next);
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub fn subscribe(&self) -> watch::Receiver<ContentSnapshot> {
        self.snapshot.subscribe()
    }
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new(ContentSnapshot::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{EntityId, Photo};

    fn photo(id: i64) -> Photo {
        Photo {
            id: EntityId::from(id),
            url: format!("https://cdn.example/{id}.jpg"),
            alt: "alt".into(),
            display_order: id,
        }
    }

    #[test]
    fn apply_notifies_subscribers() {
        let store = ContentStore::default();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.apply(ContentAction::ReplacePhotos(vec![photo(1)]));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().photos.len(), 1);
    }

    #[test]
    fn replace_swaps_whole_snapshot() {
        let store = ContentStore::default();
        let next = ContentSnapshot {
            photos: vec![photo(1), photo(2)],
            ..ContentSnapshot::default()
        };
        store.replace(next.clone());
        assert_eq!(store.snapshot(), next);
    }
}
