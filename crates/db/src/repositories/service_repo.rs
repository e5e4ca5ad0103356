//! Repository for the `services` collection.

use folio_core::collection::Collection;

use crate::models::service::{Service, ServiceInput};
use crate::store::{decode_all, to_fields, DocumentStore, StoreError};

/// Provides data access for service offerings.
pub struct ServiceRepo;

impl ServiceRepo {
    pub async fn list(store: &dyn DocumentStore) -> Result<Vec<Service>, StoreError> {
        let docs = store.get_documents(Collection::Services, &[]).await?;
        Ok(decode_all(&docs))
    }

    pub async fn find_by_id(store: &dyn DocumentStore, id: &str) -> Result<Service, StoreError> {
        store.get_document(Collection::Services, id).await?.decode()
    }

    pub async fn create(
        store: &dyn DocumentStore,
        input: &ServiceInput,
    ) -> Result<Service, StoreError> {
        store
            .add_document(Collection::Services, to_fields(input)?)
            .await?
            .decode()
    }

    pub async fn update(
        store: &dyn DocumentStore,
        id: &str,
        input: &ServiceInput,
    ) -> Result<Service, StoreError> {
        store
            .update_document(Collection::Services, id, to_fields(input)?)
            .await?
            .decode()
    }

    /// Returns `true` if a service was deleted.
    pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<bool, StoreError> {
        store.delete_document(Collection::Services, id).await
    }
}
