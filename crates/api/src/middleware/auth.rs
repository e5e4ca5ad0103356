//! JWT-based authentication extractor for Axum handlers.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use folio_core::error::CoreError;
use serde::Deserialize;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller.
///
/// The token is read from the `Authorization: Bearer` header. Browsers
/// cannot set headers on a WebSocket handshake, so an `access_token` query
/// parameter is accepted as a fallback.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The token subject (the admin email).
    pub subject: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    access_token: Option<String>,
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

fn bearer_token(parts: &Parts) -> Result<Option<String>, AppError> {
    let Some(header) = parts.headers.get("authorization") else {
        return Ok(None);
    };
    let value = header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;
    let token = value.strip_prefix("Bearer ").ok_or_else(|| {
        unauthorized("Invalid Authorization format. Expected: Bearer <token>")
    })?;
    Ok(Some(token.to_string()))
}

fn query_token(parts: &Parts) -> Option<String> {
    Query::<TokenQuery>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(q)| q.access_token)
        .filter(|t| !t.is_empty())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match bearer_token(parts)? {
            Some(token) => token,
            None => query_token(parts)
                .ok_or_else(|| unauthorized("Missing Authorization header"))?,
        };

        let claims = validate_token(&token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        // Tokens issued to a previous admin email stop working once it changes.
        if claims.sub != state.config.admin.email {
            return Err(unauthorized("Invalid or expired token"));
        }

        Ok(AuthUser {
            subject: claims.sub,
            role: claims.role,
        })
    }
}
