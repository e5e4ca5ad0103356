//! Handlers for the `/auth` resource (login, refresh, logout, me).

use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use folio_core::error::CoreError;
use folio_db::models::session::CreateSession;
use folio_db::repositories::SessionRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::verify_password;
use crate::auth::ROLE_ADMIN;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Returned by login and refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: AdminInfo,
}

#[derive(Debug, Serialize)]
pub struct AdminInfo {
    pub email: String,
    pub role: String,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

fn invalid_refresh_token() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid or expired refresh token".into(),
    ))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate the admin by email and password.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    input.validate()?;

    let admin = &state.config.admin;
    if !input.email.trim().eq_ignore_ascii_case(&admin.email) {
        tracing::warn!("Login attempt with unknown email");
        return Err(invalid_credentials());
    }

    let password_valid = verify_password(&input.password, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!("Login attempt with wrong password");
        return Err(invalid_credentials());
    }

    let response = create_auth_response(&state, user_agent(&headers)).await?;
    tracing::info!(email = %admin.email, "Admin logged in");
    Ok(Json(DataResponse::new(response)))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new token pair. The old session is revoked.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    {
        let _rotation = state.refresh_lock.lock().await;
        let session = SessionRepo::find_by_refresh_token_hash(state.store(), &token_hash)
            .await?
            .ok_or_else(invalid_refresh_token)?;
        if !SessionRepo::revoke(state.store(), &session.id).await? {
            tracing::warn!(session_id = %session.id, "Refresh token already rotated");
            return Err(invalid_refresh_token());
        }
    }

    let response = create_auth_response(&state, user_agent(&headers)).await?;
    Ok(Json(DataResponse::new(response)))
}

/// POST /api/v1/auth/logout
///
/// Revoke every admin session. Returns 204 No Content.
pub async fn logout(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all(state.store()).await?;
    tracing::info!(email = %admin.subject, revoked, "Admin logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
///
/// Succeeds only with a valid admin token.
pub async fn me(RequireAdmin(admin): RequireAdmin) -> Json<DataResponse<AdminInfo>> {
    Json(DataResponse::new(AdminInfo {
        email: admin.subject,
        role: admin.role,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Issue an access + refresh token pair and persist the session.
async fn create_auth_response(
    state: &AppState,
    user_agent: Option<String>,
) -> AppResult<AuthResponse> {
    let email = state.config.admin.email.clone();
    let access_token = generate_access_token(&email, ROLE_ADMIN, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    SessionRepo::create(
        state.store(),
        &CreateSession {
            refresh_token_hash: refresh_hash,
            expires_at,
            user_agent,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: AdminInfo {
            email,
            role: ROLE_ADMIN.to_string(),
        },
    })
}
