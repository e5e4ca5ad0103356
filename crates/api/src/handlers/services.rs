//! Handlers for service offerings.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::icon::{detect_icon_name, SERVICE_ICON_NAMES};
use folio_db::models::service::{default_services, Service, ServiceInput};
use folio_db::repositories::ServiceRepo;
use folio_db::{DocumentStore, StoreError};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of service create and edit. A missing icon is detected from the title.
#[derive(Debug, Deserialize, Validate)]
pub struct ServicePayload {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl ServicePayload {
    fn into_input(self) -> AppResult<ServiceInput> {
        let payload = Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            icon: self.icon,
        };
        payload.validate()?;

        let icon = match payload.icon.as_deref().map(str::trim) {
            None | Some("") => detect_icon_name(&payload.title).to_string(),
            Some(name) if SERVICE_ICON_NAMES.contains(&name) => name.to_string(),
            Some(name) => {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "Unknown icon '{name}'. Expected one of: {}",
                    SERVICE_ICON_NAMES.join(", ")
                ))))
            }
        };

        Ok(ServiceInput {
            title: payload.title,
            description: payload.description,
            icon,
        })
    }
}

/// Stored services, or the built-in four while none are stored.
pub async fn services_or_defaults(store: &dyn DocumentStore) -> Result<Vec<Service>, StoreError> {
    let services = ServiceRepo::list(store).await?;
    if services.is_empty() {
        return Ok(default_services());
    }
    Ok(services)
}

/// GET /api/v1/services
pub async fn list_services(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Service>>>> {
    let services = services_or_defaults(state.store()).await?;
    Ok(Json(DataResponse::new(services)))
}

/// POST /api/v1/admin/services
pub async fn create_service(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(payload): Json<ServicePayload>,
) -> AppResult<(StatusCode, Json<DataResponse<Service>>)> {
    let input = payload.into_input()?;
    let service = ServiceRepo::create(state.store(), &input).await?;
    tracing::info!(id = %service.id, icon = %service.icon, "Service created");
    Ok((StatusCode::CREATED, Json(DataResponse::new(service))))
}

/// PUT /api/v1/admin/services/{id}
pub async fn update_service(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
    Json(payload): Json<ServicePayload>,
) -> AppResult<Json<DataResponse<Service>>> {
    let input = payload.into_input()?;
    let service = ServiceRepo::update(state.store(), &id, &input).await?;
    Ok(Json(DataResponse::new(service)))
}

/// DELETE /api/v1/admin/services/{id}
pub async fn delete_service(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !ServiceRepo::delete(state.store(), &id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "service",
            id,
        }));
    }
    tracing::info!(%id, "Service deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn payload(title: &str, icon: Option<&str>) -> ServicePayload {
        ServicePayload {
            title: title.into(),
            description: "Something".into(),
            icon: icon.map(str::to_string),
        }
    }

    #[test]
    fn missing_icon_is_detected_from_title() {
        let input = payload("Mobile App Development", None).into_input().unwrap();
        assert_eq!(input.icon, "Smartphone");
        let input = payload("Consulting", Some(" ")).into_input().unwrap();
        assert_eq!(input.icon, "Code");
    }

    #[test]
    fn explicit_icon_is_kept() {
        let input = payload("Web Development", Some("Video")).into_input().unwrap();
        assert_eq!(input.icon, "Video");
    }

    #[test]
    fn unknown_icon_is_rejected() {
        assert_matches!(
            payload("Web", Some("Rocket")).into_input(),
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }
}
