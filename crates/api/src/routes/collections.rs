//! Route definitions for the generic document passthrough.

use axum::routing::get;
use axum::Router;

use crate::handlers::documents;
use crate::routes::admin::MAX_ADMIN_BODY_BYTES;
use crate::state::AppState;
use crate::ws;

/// Routes mounted at `/admin/collections`.
///
/// ```text
/// GET    /{collection}/documents        -> list_documents (?filters=)
/// POST   /{collection}/documents        -> create_document
/// GET    /{collection}/documents/{id}   -> get_document
/// PATCH  /{collection}/documents/{id}   -> update_document
/// PUT    /{collection}/documents/{id}   -> set_document (?merge=, default true)
/// DELETE /{collection}/documents/{id}   -> delete_document
/// GET    /{collection}/subscribe        -> WebSocket snapshots
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{collection}/documents",
            get(documents::list_documents).post(documents::create_document),
        )
        .route(
            "/{collection}/documents/{id}",
            get(documents::get_document)
                .patch(documents::update_document)
                .put(documents::set_document)
                .delete(documents::delete_document),
        )
        .route("/{collection}/subscribe", get(ws::subscribe_handler))
        .layer(axum::extract::DefaultBodyLimit::max(MAX_ADMIN_BODY_BYTES))
}
