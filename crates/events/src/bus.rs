//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the central publish/subscribe hub for [`DocumentEvent`]s.
//! It is designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use folio_core::collection::Collection;
use folio_core::types::DocId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// DocumentEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// A committed change to one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEvent {
    pub collection: Collection,
    pub document_id: DocId,
    pub kind: ChangeKind,
    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl DocumentEvent {
    pub fn new(collection: Collection, document_id: impl Into<DocId>, kind: ChangeKind) -> Self {
        Self {
            collection,
            document_id: document_id.into(),
            kind,
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`DocumentEvent`].
///
/// # Usage
///
/// ```rust
/// use folio_core::collection::Collection;
/// use folio_events::bus::{ChangeKind, DocumentEvent, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(DocumentEvent::new(Collection::Projects, "abc", ChangeKind::Created));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<DocumentEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: DocumentEvent) {
        // Ignore the SendError; it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<DocumentEvent> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(DocumentEvent::new(
            Collection::Services,
            "svc-1",
            ChangeKind::Updated,
        ));

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.collection, Collection::Services);
        assert_eq!(received.document_id, "svc-1");
        assert_eq!(received.kind, ChangeKind::Updated);
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.receiver_count(), 2);

        bus.publish(DocumentEvent::new(Collection::Messages, "m", ChangeKind::Created));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert_eq!(e1.document_id, "m");
        assert_eq!(e2.document_id, "m");
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(DocumentEvent::new(Collection::About, "profile", ChangeKind::Deleted));
    }

    #[test]
    fn event_serializes_camel_case() {
        let event = DocumentEvent::new(Collection::Projects, "p1", ChangeKind::Created);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["collection"], "projects");
        assert_eq!(json["documentId"], "p1");
        assert_eq!(json["kind"], "created");
    }
}
