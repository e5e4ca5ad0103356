//! Handlers for the contact form and the admin inbox.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::message::ContactMessage;
use folio_db::models::message::Message;
use folio_db::repositories::MessageRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/messages
pub async fn submit_message(
    State(state): State<AppState>,
    Json(input): Json<ContactMessage>,
) -> AppResult<(StatusCode, Json<DataResponse<Message>>)> {
    let input = input.normalized()?;
    let message = MessageRepo::create(state.store(), &input).await?;
    tracing::info!(id = %message.id, "Contact message received");
    Ok((StatusCode::CREATED, Json(DataResponse::new(message))))
}

/// GET /api/v1/admin/messages
pub async fn list_messages(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<Message>>>> {
    let messages = MessageRepo::list(state.store()).await?;
    Ok(Json(DataResponse::new(messages)))
}

/// DELETE /api/v1/admin/messages/{id}
pub async fn delete_message(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !MessageRepo::delete(state.store(), &id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "message",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
