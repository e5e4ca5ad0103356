//! Repository for the `projects` collection.

use folio_core::collection::Collection;

use crate::models::project::{Project, ProjectInput};
use crate::store::{decode_all, to_fields, DocumentStore, Filter, StoreError};

/// Category value meaning "no filter".
pub const ALL_CATEGORIES: &str = "All";

/// Provides data access for portfolio projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// List projects newest first, optionally restricted to one category.
    ///
    /// `None`, an empty string and `"All"` all list every project.
    pub async fn list(
        store: &dyn DocumentStore,
        category: Option<&str>,
    ) -> Result<Vec<Project>, StoreError> {
        let filters: Vec<Filter> = category
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
            .map(|c| vec![Filter::eq("category", c)])
            .unwrap_or_default();

        let docs = store.get_documents(Collection::Projects, &filters).await?;
        Ok(decode_all(&docs))
    }

    pub async fn find_by_id(store: &dyn DocumentStore, id: &str) -> Result<Project, StoreError> {
        store.get_document(Collection::Projects, id).await?.decode()
    }

    /// Up to `limit` other projects sharing `project`'s category.
    pub async fn related(
        store: &dyn DocumentStore,
        project: &Project,
        limit: usize,
    ) -> Result<Vec<Project>, StoreError> {
        if project.category.is_empty() {
            return Ok(Vec::new());
        }
        let mut same = Self::list(store, Some(project.category.as_str())).await?;
        same.retain(|p| p.id != project.id);
        same.truncate(limit);
        Ok(same)
    }

    pub async fn create(
        store: &dyn DocumentStore,
        input: &ProjectInput,
    ) -> Result<Project, StoreError> {
        store
            .add_document(Collection::Projects, to_fields(input)?)
            .await?
            .decode()
    }

    /// Overwrite every writable field of an existing project.
    pub async fn update(
        store: &dyn DocumentStore,
        id: &str,
        input: &ProjectInput,
    ) -> Result<Project, StoreError> {
        store
            .update_document(Collection::Projects, id, to_fields(input)?)
            .await?
            .decode()
    }

    /// Returns `true` if a project was deleted.
    pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<bool, StoreError> {
        store.delete_document(Collection::Projects, id).await
    }
}
