//! Public, unauthenticated routes read by the marketing site.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{messages, profile, projects, services, settings};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(projects::list_projects))
        .route("/projects/{id}", get(projects::get_project))
        .route("/portfolio", get(projects::portfolio))
        .route("/services", get(services::list_services))
        .route("/about", get(profile::get_about))
        .route("/resume", get(profile::download_resume))
        .route("/messages", post(messages::submit_message))
        .route("/settings/theme", get(settings::get_theme))
}
