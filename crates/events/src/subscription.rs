//! Realtime collection subscriptions.
//!
//! A subscription delivers the full, filtered contents of one collection:
//! once immediately, then again after every change to that collection.

use std::sync::Arc;

use folio_core::collection::Collection;
use folio_db::store::{Document, DocumentStore, Filter};
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::bus::EventBus;

/// One delivery to a subscriber.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub data: Vec<Document>,
}

impl Snapshot {
    pub fn ok(data: Vec<Document>) -> Self {
        Self {
            success: true,
            error: None,
            data,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            data: Vec::new(),
        }
    }
}

/// Handle to a running subscription. Dropping it also unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    handle: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Stop delivery. No callback runs after this returns, other than one
    /// that was already executing.
    pub fn unsubscribe(mut self) {
        self.stop();
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Watch `collection` and hand every snapshot to `callback`.
///
/// The receiver is registered before the first snapshot is read, so no
/// change committed after this call is missed. A subscriber that falls
/// behind the bus re-reads the collection instead of failing.
pub fn subscribe<F>(
    store: Arc<dyn DocumentStore>,
    bus: &EventBus,
    collection: Collection,
    filters: Vec<Filter>,
    mut callback: F,
) -> Subscription
where
    F: FnMut(Snapshot) + Send + 'static,
{
    let mut rx = bus.subscribe();

    let handle = tokio::spawn(async move {
        callback(read_snapshot(store.as_ref(), collection, &filters).await);

        loop {
            match rx.recv().await {
                Ok(event) if event.collection == collection => {}
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(%collection, skipped, "Subscriber lagged, re-reading snapshot");
                }
                Err(RecvError::Closed) => break,
            }
            callback(read_snapshot(store.as_ref(), collection, &filters).await);
        }

        tracing::debug!(%collection, "Subscription ended");
    });

    Subscription {
        handle: Some(handle),
    }
}

async fn read_snapshot(
    store: &dyn DocumentStore,
    collection: Collection,
    filters: &[Filter],
) -> Snapshot {
    match store.get_documents(collection, filters).await {
        Ok(docs) => Snapshot::ok(docs),
        Err(e) => {
            tracing::error!(%collection, error = %e, "Subscription snapshot failed");
            Snapshot::failed(e.to_string())
        }
    }
}
