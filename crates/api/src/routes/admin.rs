//! Route definitions for the admin dashboard.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{messages, profile, projects, services, settings, uploads};
use crate::state::AppState;

/// Request body cap for admin routes.
///
/// Fits five 5 MiB images once base64 encoded, plus the rest of a project.
pub const MAX_ADMIN_BODY_BYTES: usize = 40 * 1024 * 1024;

/// Routes mounted at `/admin`. Every handler requires the admin role.
///
/// ```text
/// POST   /projects            -> create_project
/// PUT    /projects/{id}       -> update_project
/// DELETE /projects/{id}       -> delete_project
/// POST   /services            -> create_service
/// PUT    /services/{id}       -> update_service
/// DELETE /services/{id}       -> delete_service
/// GET    /messages            -> list_messages
/// DELETE /messages/{id}       -> delete_message
/// PUT    /about               -> update_about
/// PUT    /about/cv            -> upload_cv
/// DELETE /about/cv            -> delete_cv
/// PUT    /settings/theme      -> set_theme
/// POST   /uploads/image       -> upload_image
/// POST   /uploads/pdf         -> upload_pdf
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", post(projects::create_project))
        .route(
            "/projects/{id}",
            put(projects::update_project).delete(projects::delete_project),
        )
        .route("/services", post(services::create_service))
        .route(
            "/services/{id}",
            put(services::update_service).delete(services::delete_service),
        )
        .route("/messages", get(messages::list_messages))
        .route("/messages/{id}", axum::routing::delete(messages::delete_message))
        .route("/about", put(profile::update_about))
        .route("/about/cv", put(profile::upload_cv).delete(profile::delete_cv))
        .route("/settings/theme", put(settings::set_theme))
        .route("/uploads/image", post(uploads::upload_image))
        .route("/uploads/pdf", post(uploads::upload_pdf))
        .layer(DefaultBodyLimit::max(MAX_ADMIN_BODY_BYTES))
}
