//! Store decorator that announces committed writes on the [`EventBus`].

use std::sync::Arc;

use async_trait::async_trait;
use folio_core::collection::Collection;
use folio_db::store::{Document, DocumentStore, Fields, Filter, StoreError};

use crate::bus::{ChangeKind, DocumentEvent, EventBus};

/// Wraps another [`DocumentStore`]; reads pass straight through, successful
/// writes publish a [`DocumentEvent`].
pub struct NotifyingStore {
    inner: Arc<dyn DocumentStore>,
    bus: Arc<EventBus>,
}

impl NotifyingStore {
    pub fn new(inner: Arc<dyn DocumentStore>, bus: Arc<EventBus>) -> Self {
        Self { inner, bus }
    }

    fn announce(&self, collection: Collection, id: &str, kind: ChangeKind) {
        tracing::debug!(collection = %collection, document_id = %id, ?kind, "Document changed");
        self.bus.publish(DocumentEvent::new(collection, id, kind));
    }
}

#[async_trait]
impl DocumentStore for NotifyingStore {
    fn backend(&self) -> &'static str {
        self.inner.backend()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }

    async fn add_document(
        &self,
        collection: Collection,
        data: Fields,
    ) -> Result<Document, StoreError> {
        let doc = self.inner.add_document(collection, data).await?;
        self.announce(collection, &doc.id, ChangeKind::Created);
        Ok(doc)
    }

    async fn get_documents(
        &self,
        collection: Collection,
        filters: &[Filter],
    ) -> Result<Vec<Document>, StoreError> {
        self.inner.get_documents(collection, filters).await
    }

    async fn get_document(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Document, StoreError> {
        self.inner.get_document(collection, id).await
    }

    async fn update_document(
        &self,
        collection: Collection,
        id: &str,
        data: Fields,
    ) -> Result<Document, StoreError> {
        let doc = self.inner.update_document(collection, id, data).await?;
        self.announce(collection, id, ChangeKind::Updated);
        Ok(doc)
    }

    async fn delete_document(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<bool, StoreError> {
        let removed = self.inner.delete_document(collection, id).await?;
        if removed {
            self.announce(collection, id, ChangeKind::Deleted);
        }
        Ok(removed)
    }

    async fn set_document(
        &self,
        collection: Collection,
        id: &str,
        data: Fields,
        merge: bool,
    ) -> Result<Document, StoreError> {
        let doc = self.inner.set_document(collection, id, data, merge).await?;
        let kind = if doc.created_at == doc.updated_at {
            ChangeKind::Created
        } else {
            ChangeKind::Updated
        };
        self.announce(collection, id, kind);
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use folio_db::MemoryDocumentStore;
    use serde_json::json;

    use super::*;

    fn fields(value: serde_json::Value) -> Fields {
        folio_db::to_fields(&value).unwrap()
    }

    #[tokio::test]
    async fn writes_publish_events_in_order() {
        let bus = Arc::new(EventBus::default());
        let store = NotifyingStore::new(Arc::new(MemoryDocumentStore::new()), bus.clone());
        let mut rx = bus.subscribe();

        let doc = store
            .add_document(Collection::Projects, fields(json!({"title": "a"})))
            .await
            .unwrap();
        store
            .update_document(Collection::Projects, &doc.id, fields(json!({"title": "b"})))
            .await
            .unwrap();
        store.delete_document(Collection::Projects, &doc.id).await.unwrap();

        let kinds: Vec<_> = [
            rx.recv().await.unwrap(),
            rx.recv().await.unwrap(),
            rx.recv().await.unwrap(),
        ]
        .into_iter()
        .map(|e| {
            assert_eq!(e.document_id, doc.id);
            e.kind
        })
        .collect();
        assert_eq!(
            kinds,
            vec![ChangeKind::Created, ChangeKind::Updated, ChangeKind::Deleted]
        );
    }

    #[tokio::test]
    async fn failed_or_empty_writes_publish_nothing() {
        let bus = Arc::new(EventBus::default());
        let store = NotifyingStore::new(Arc::new(MemoryDocumentStore::new()), bus.clone());
        let mut rx = bus.subscribe();

        assert!(store
            .update_document(Collection::Services, "missing", Fields::new())
            .await
            .is_err());
        assert!(!store.delete_document(Collection::Services, "missing").await.unwrap());
        store.get_documents(Collection::Services, &[]).await.unwrap();

        assert!(rx.try_recv().is_err());
    }
}
