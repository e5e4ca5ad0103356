//! Repository for the `about/profile` document.

use folio_core::collection::{Collection, PROFILE_DOC_ID};

use crate::models::profile::Profile;
use crate::store::{DocumentStore, Fields, StoreError};

/// Provides data access for the single profile document.
pub struct ProfileRepo;

impl ProfileRepo {
    /// The stored profile, or `None` before the first save.
    pub async fn get(store: &dyn DocumentStore) -> Result<Option<Profile>, StoreError> {
        match store.get_document(Collection::About, PROFILE_DOC_ID).await {
            Ok(doc) => doc.decode().map(Some),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Deep-merge `fields` into the profile, creating it if needed.
    pub async fn merge(store: &dyn DocumentStore, fields: Fields) -> Result<Profile, StoreError> {
        store
            .set_document(Collection::About, PROFILE_DOC_ID, fields, true)
            .await?
            .decode()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::memory::MemoryDocumentStore;
    use crate::store::to_fields;

    #[tokio::test]
    async fn merge_creates_then_updates_in_place() {
        let store = MemoryDocumentStore::new();
        assert!(ProfileRepo::get(&store).await.unwrap().is_none());

        ProfileRepo::merge(&store, to_fields(&json!({"text": "Hello", "skills": ["Rust"]})).unwrap())
            .await
            .unwrap();
        let merged = ProfileRepo::merge(
            &store,
            to_fields(&json!({"cvUrl": "https://example.com/cv.pdf"})).unwrap(),
        )
        .await
        .unwrap();

        assert_eq!(merged.text, "Hello");
        assert_eq!(merged.skills, vec!["Rust".to_string()]);
        assert_eq!(merged.cv_url.as_deref(), Some("https://example.com/cv.pdf"));
        assert_eq!(merged.experience.years, "5+");
    }
}
