//! Repository for the `messages` collection.

use folio_core::collection::Collection;
use folio_core::message::ContactMessage;

use crate::models::message::Message;
use crate::store::{decode_all, Document, DocumentStore, Fields, StoreError};

/// Provides data access for contact form submissions.
pub struct MessageRepo;

impl MessageRepo {
    /// All messages, newest first.
    pub async fn list(store: &dyn DocumentStore) -> Result<Vec<Message>, StoreError> {
        let docs = store.get_documents(Collection::Messages, &[]).await?;
        Ok(decode_all(&docs))
    }

    /// Store a validated contact message.
    pub async fn create(
        store: &dyn DocumentStore,
        input: &ContactMessage,
    ) -> Result<Message, StoreError> {
        let mut fields = Fields::new();
        fields.insert("name".into(), input.name.clone().into());
        fields.insert("email".into(), input.email.clone().into());
        fields.insert("message".into(), input.message.clone().into());

        let doc: Document = store.add_document(Collection::Messages, fields).await?;
        doc.decode()
    }

    /// Returns `true` if a message was deleted.
    pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<bool, StoreError> {
        store.delete_document(Collection::Messages, id).await
    }
}
