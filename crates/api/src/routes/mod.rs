pub mod admin;
pub mod auth;
pub mod collections;
pub mod content;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                        list (?category=)
/// /projects/{id}                                   detail with embedUrl and related
/// /portfolio                                       categories + projects
/// /services                                        list (defaults while empty)
/// /about                                           profile
/// /resume                                          resume download
/// /messages                                        contact form (POST)
/// /settings/theme                                  theme
///
/// /auth/login                                      login
/// /auth/refresh                                    refresh
/// /auth/logout                                     logout (admin)
/// /auth/me                                         auth-state check (admin)
///
/// /admin/projects                                  create
/// /admin/projects/{id}                             update, delete
/// /admin/services                                  create
/// /admin/services/{id}                             update, delete
/// /admin/messages                                  list
/// /admin/messages/{id}                             delete
/// /admin/about                                     merge update
/// /admin/about/cv                                  upload PDF, delete
/// /admin/settings/theme                            set or toggle
/// /admin/uploads/image                             image -> data URL
/// /admin/uploads/pdf                               PDF -> data URL
///
/// /admin/collections/{c}/documents                 list, create
/// /admin/collections/{c}/documents/{id}            get, update, set, delete
/// /admin/collections/{c}/subscribe                 WebSocket snapshots
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(content::router())
        .nest("/auth", auth::router())
        .nest(
            "/admin",
            admin::router().nest("/collections", collections::router()),
        )
}
