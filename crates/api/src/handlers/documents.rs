//! Generic document passthrough over the public collections.
//!
//! These endpoints expose the raw store operations to the dashboard. The
//! internal `sessions` collection is rejected at the path.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::collection::Collection;
use folio_db::{Document, Fields, Filter, StoreError};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// `?filters=` carries a JSON array of `{field, op, value}` objects.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub filters: Option<String>,
}

impl FilterQuery {
    pub fn parse(&self) -> AppResult<Vec<Filter>> {
        let Some(raw) = self.filters.as_deref().filter(|f| !f.trim().is_empty()) else {
            return Ok(Vec::new());
        };
        let filters: Vec<Filter> = serde_json::from_str(raw)
            .map_err(|e| AppError::BadRequest(format!("Invalid filters: {e}")))?;
        for filter in &filters {
            filter.validate()?;
        }
        Ok(filters)
    }
}

#[derive(Debug, Deserialize)]
pub struct SetQuery {
    pub merge: Option<bool>,
}

pub fn parse_collection(name: &str) -> AppResult<Collection> {
    Ok(Collection::parse_public(name)?)
}

/// GET /api/v1/admin/collections/{collection}/documents
pub async fn list_documents(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(collection): Path<String>,
    Query(query): Query<FilterQuery>,
) -> AppResult<Json<DataResponse<Vec<Document>>>> {
    let collection = parse_collection(&collection)?;
    let filters = query.parse()?;
    let docs = state.store().get_documents(collection, &filters).await?;
    Ok(Json(DataResponse::new(docs)))
}

/// POST /api/v1/admin/collections/{collection}/documents
pub async fn create_document(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(collection): Path<String>,
    Json(data): Json<Fields>,
) -> AppResult<(StatusCode, Json<DataResponse<Document>>)> {
    let collection = parse_collection(&collection)?;
    let doc = state.store().add_document(collection, data).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(doc))))
}

/// GET /api/v1/admin/collections/{collection}/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((collection, id)): Path<(String, String)>,
) -> AppResult<Json<DataResponse<Document>>> {
    let collection = parse_collection(&collection)?;
    let doc = state.store().get_document(collection, &id).await?;
    Ok(Json(DataResponse::new(doc)))
}

/// PATCH /api/v1/admin/collections/{collection}/documents/{id}
///
/// Overwrites the given top-level fields.
pub async fn update_document(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((collection, id)): Path<(String, String)>,
    Json(data): Json<Fields>,
) -> AppResult<Json<DataResponse<Document>>> {
    let collection = parse_collection(&collection)?;
    let doc = state.store().update_document(collection, &id, data).await?;
    Ok(Json(DataResponse::new(doc)))
}

/// PUT /api/v1/admin/collections/{collection}/documents/{id}?merge=
///
/// Creates or overwrites under the given id; merges unless `merge=false`.
pub async fn set_document(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((collection, id)): Path<(String, String)>,
    Query(query): Query<SetQuery>,
    Json(data): Json<Fields>,
) -> AppResult<Json<DataResponse<Document>>> {
    let collection = parse_collection(&collection)?;
    let merge = query.merge.unwrap_or(true);
    let doc = state
        .store()
        .set_document(collection, &id, data, merge)
        .await?;
    Ok(Json(DataResponse::new(doc)))
}

/// DELETE /api/v1/admin/collections/{collection}/documents/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((collection, id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let collection = parse_collection(&collection)?;
    if !state.store().delete_document(collection, &id).await? {
        return Err(StoreError::NotFound { collection, id }.into());
    }
    Ok(StatusCode::NO_CONTENT)
}
