use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use folio_core::collection::Collection;
use folio_core::types::Timestamp;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single WebSocket connection.
pub struct WsConnection {
    /// Token subject of the admin who opened the socket.
    pub subject: String,
    /// The collection this socket is subscribed to.
    pub collection: Collection,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    pub connected_at: Timestamp,
}

/// Tracks every open subscription socket.
///
/// Thread-safe via interior `RwLock`; shared behind an `Arc`.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a connection.
    ///
    /// Returns the sender (for producers such as the snapshot callback) and
    /// the receiver the caller forwards to the WebSocket sink.
    pub async fn add(
        &self,
        conn_id: String,
        subject: String,
        collection: Collection,
    ) -> (WsSender, mpsc::UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            subject,
            collection,
            sender: tx.clone(),
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        (tx, rx)
    }

    /// Remove a connection by its ID, returning its metadata.
    pub async fn remove(&self, conn_id: &str) -> Option<WsConnection> {
        self.connections.write().await.remove(conn_id)
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Number of sockets watching `collection`.
    pub async fn subscriber_count(&self, collection: Collection) -> usize {
        self.connections
            .read()
            .await
            .values()
            .filter(|conn| conn.collection == collection)
            .count()
    }

    /// Send a Close frame to every connection, then clear the map.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }

    /// Send a Ping frame to every connected client.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_and_remove_track_counts() {
        let manager = WsManager::new();
        let (_tx, _rx) = manager
            .add("a".into(), "admin@example.com".into(), Collection::Projects)
            .await;
        let (_tx2, _rx2) = manager
            .add("b".into(), "admin@example.com".into(), Collection::Messages)
            .await;

        assert_eq!(manager.connection_count().await, 2);
        assert_eq!(manager.subscriber_count(Collection::Projects).await, 1);

        let removed = manager.remove("a").await.unwrap();
        assert_eq!(removed.collection, Collection::Projects);
        assert_eq!(manager.connection_count().await, 1);
        assert!(manager.remove("a").await.is_none());
    }

    #[tokio::test]
    async fn shutdown_sends_close_and_clears() {
        let manager = WsManager::new();
        let (_tx, mut rx) = manager
            .add("a".into(), "admin@example.com".into(), Collection::About)
            .await;

        manager.shutdown_all().await;

        assert!(matches!(rx.recv().await, Some(Message::Close(None))));
        assert_eq!(manager.connection_count().await, 0);
    }
}
