//! Repository for admin refresh sessions.

use chrono::Utc;
use folio_core::collection::Collection;
use serde_json::Value;

use crate::models::session::{CreateSession, Session};
use crate::store::{decode_all, to_fields, DocumentStore, Fields, Filter, StoreError};

/// Provides CRUD operations for admin sessions.
pub struct SessionRepo;

impl SessionRepo {
    pub async fn create(
        store: &dyn DocumentStore,
        input: &CreateSession,
    ) -> Result<Session, StoreError> {
        let mut fields = to_fields(input)?;
        fields.insert("isRevoked".into(), Value::Bool(false));
        store
            .add_document(Collection::Sessions, fields)
            .await?
            .decode()
    }

    /// Find an active session by its refresh token hash.
    ///
    /// Only returns sessions that are not revoked and not expired.
    pub async fn find_by_refresh_token_hash(
        store: &dyn DocumentStore,
        hash: &str,
    ) -> Result<Option<Session>, StoreError> {
        let docs = store
            .get_documents(
                Collection::Sessions,
                &[
                    Filter::eq("refreshTokenHash", hash),
                    Filter::eq("isRevoked", false),
                ],
            )
            .await?;
        let now = Utc::now();
        Ok(decode_all::<Session>(&docs)
            .into_iter()
            .find(|s| s.is_active(now)))
    }

    /// Revoke a single session. Returns `true` if it was active.
    pub async fn revoke(store: &dyn DocumentStore, id: &str) -> Result<bool, StoreError> {
        let session: Session = match store.get_document(Collection::Sessions, id).await {
            Ok(doc) => doc.decode()?,
            Err(StoreError::NotFound { .. }) => return Ok(false),
            Err(e) => return Err(e),
        };
        if session.is_revoked {
            return Ok(false);
        }

        let mut fields = Fields::new();
        fields.insert("isRevoked".into(), Value::Bool(true));
        store
            .update_document(Collection::Sessions, id, fields)
            .await?;
        Ok(true)
    }

    /// Revoke every active session. Returns the count of revoked sessions.
    pub async fn revoke_all(store: &dyn DocumentStore) -> Result<u64, StoreError> {
        let active = store
            .get_documents(Collection::Sessions, &[Filter::eq("isRevoked", false)])
            .await?;
        let mut count = 0;
        for doc in active {
            if Self::revoke(store, &doc.id).await? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Delete expired or revoked sessions. Returns the count of deleted sessions.
    pub async fn cleanup_expired(store: &dyn DocumentStore) -> Result<u64, StoreError> {
        let now = Utc::now();
        let all = store.get_documents(Collection::Sessions, &[]).await?;
        let mut count = 0;
        for session in decode_all::<Session>(&all) {
            if !session.is_active(now) && store.delete_document(Collection::Sessions, &session.id).await? {
                count += 1;
            }
        }
        Ok(count)
    }
}
