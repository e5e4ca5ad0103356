//! Admin refresh sessions, kept in the internal `sessions` collection.

use folio_core::types::{DocId, Timestamp};
use serde::{Deserialize, Serialize};

/// A session document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: DocId,
    /// SHA-256 hex digest of the opaque refresh token.
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    #[serde(default)]
    pub is_revoked: bool,
    #[serde(default)]
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}

impl Session {
    pub fn is_active(&self, now: Timestamp) -> bool {
        !self.is_revoked && self.expires_at > now
    }
}

/// DTO for creating a new session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSession {
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub user_agent: Option<String>,
}
