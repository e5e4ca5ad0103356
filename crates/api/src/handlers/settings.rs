//! Handlers for the site theme setting.

use axum::extract::State;
use axum::Json;
use folio_core::theme::Theme;
use folio_db::models::settings::ThemeSettings;
use folio_db::repositories::SettingsRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `PUT /admin/settings/theme`. Without `theme` the stored value is
/// toggled.
#[derive(Debug, Default, Deserialize)]
pub struct ThemeUpdate {
    #[serde(default)]
    pub theme: Option<Theme>,
}

async fn current_theme(state: &AppState) -> AppResult<ThemeSettings> {
    Ok(SettingsRepo::get_theme(state.store())
        .await?
        .unwrap_or(ThemeSettings {
            default_theme: state.config.default_theme,
        }))
}

/// GET /api/v1/settings/theme
pub async fn get_theme(State(state): State<AppState>) -> AppResult<Json<DataResponse<ThemeSettings>>> {
    Ok(Json(DataResponse::new(current_theme(&state).await?)))
}

/// PUT /api/v1/admin/settings/theme
pub async fn set_theme(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(update): Json<ThemeUpdate>,
) -> AppResult<Json<DataResponse<ThemeSettings>>> {
    let theme = match update.theme {
        Some(theme) => theme,
        None => current_theme(&state).await?.default_theme.toggled(),
    };
    let settings = SettingsRepo::set_theme(state.store(), theme).await?;
    tracing::info!(theme = %settings.default_theme, "Theme saved");
    Ok(Json(DataResponse::new(settings)))
}
