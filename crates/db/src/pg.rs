//! PostgreSQL document store.
//!
//! All collections share the `documents` table; the document body lives in
//! a JSONB `data` column keyed by `(collection, id)`.

use async_trait::async_trait;
use folio_core::collection::Collection;
use folio_core::types::Timestamp;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::fields::{merge_fields, strip_reserved};
use crate::store::{Document, DocumentStore, Fields, Filter, FilterOp, StoreError};

/// Column list shared across queries.
const COLUMNS: &str = "id, data, created_at, updated_at";

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: String,
    data: Json<Fields>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id,
            fields: row.data.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn not_found(collection: Collection, id: &str) -> StoreError {
        StoreError::NotFound {
            collection,
            id: id.to_string(),
        }
    }
}

/// Append one filter as an `AND` clause over the JSONB body.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    let field = filter.field.clone();
    let value = Json(filter.value.clone());

    qb.push(" AND data ? ").push_bind(field.clone());
    match filter.op {
        FilterOp::Eq => {
            qb.push(" AND data -> ").push_bind(field).push(" = ").push_bind(value);
        }
        FilterOp::Ne => {
            qb.push(" AND data -> ").push_bind(field).push(" <> ").push_bind(value);
        }
        FilterOp::Lt | FilterOp::Lte | FilterOp::Gt | FilterOp::Gte => {
            let op = match filter.op {
                FilterOp::Lt => " < ",
                FilterOp::Lte => " <= ",
                FilterOp::Gt => " > ",
                _ => " >= ",
            };
            // Mixed-type comparisons never match.
            qb.push(" AND jsonb_typeof(data -> ")
                .push_bind(field.clone())
                .push(") = jsonb_typeof(")
                .push_bind(value.clone())
                .push(") AND data -> ")
                .push_bind(field)
                .push(op)
                .push_bind(value);
        }
        FilterOp::ArrayContains => {
            qb.push(" AND jsonb_typeof(data -> ")
                .push_bind(field.clone())
                .push(") = 'array' AND data -> ")
                .push_bind(field)
                .push(" @> jsonb_build_array(")
                .push_bind(value)
                .push(")");
        }
        FilterOp::In => {
            qb.push(" AND ")
                .push_bind(value)
                .push(" @> jsonb_build_array(data -> ")
                .push_bind(field)
                .push(")");
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn add_document(
        &self,
        collection: Collection,
        data: Fields,
    ) -> Result<Document, StoreError> {
        let id = Uuid::new_v4().simple().to_string();
        let query = format!(
            "INSERT INTO documents (collection, id, data) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(collection.as_str())
            .bind(&id)
            .bind(Json(strip_reserved(data)))
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn get_documents(
        &self,
        collection: Collection,
        filters: &[Filter],
    ) -> Result<Vec<Document>, StoreError> {
        for filter in filters {
            filter.validate()?;
        }

        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {COLUMNS} FROM documents WHERE collection = "
        ));
        qb.push_bind(collection.as_str());
        for filter in filters {
            push_filter(&mut qb, filter);
        }
        qb.push(" ORDER BY created_at DESC, id");

        let rows = qb
            .build_query_as::<DocumentRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn get_document(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Document, StoreError> {
        let query =
            format!("SELECT {COLUMNS} FROM documents WHERE collection = $1 AND id = $2");
        sqlx::query_as::<_, DocumentRow>(&query)
            .bind(collection.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Document::from)
            .ok_or_else(|| Self::not_found(collection, id))
    }

    async fn update_document(
        &self,
        collection: Collection,
        id: &str,
        data: Fields,
    ) -> Result<Document, StoreError> {
        // `||` replaces top-level keys and leaves the rest alone.
        let query = format!(
            "UPDATE documents SET data = data || $3, updated_at = NOW() \
             WHERE collection = $1 AND id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DocumentRow>(&query)
            .bind(collection.as_str())
            .bind(id)
            .bind(Json(strip_reserved(data)))
            .fetch_optional(&self.pool)
            .await?
            .map(Document::from)
            .ok_or_else(|| Self::not_found(collection, id))
    }

    async fn delete_document(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_document(
        &self,
        collection: Collection,
        id: &str,
        data: Fields,
        merge: bool,
    ) -> Result<Document, StoreError> {
        let data = strip_reserved(data);
        let mut tx = self.pool.begin().await?;

        // Row locks cannot cover a row that does not exist yet, so concurrent
        // first writes to one id queue on a transaction-scoped advisory lock.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1 || '/' || $2, 0))")
            .bind(collection.as_str())
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let existing = sqlx::query_scalar::<_, Json<Fields>>(
            "SELECT data FROM documents WHERE collection = $1 AND id = $2 FOR UPDATE",
        )
        .bind(collection.as_str())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let row = match existing {
            Some(Json(mut stored)) => {
                let next = if merge {
                    merge_fields(&mut stored, data);
                    stored
                } else {
                    data
                };
                let query = format!(
                    "UPDATE documents SET data = $3, updated_at = NOW() \
                     WHERE collection = $1 AND id = $2 \
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, DocumentRow>(&query)
                    .bind(collection.as_str())
                    .bind(id)
                    .bind(Json(next))
                    .fetch_one(&mut *tx)
                    .await?
            }
            None => {
                let query = format!(
                    "INSERT INTO documents (collection, id, data) \
                     VALUES ($1, $2, $3) \
                     ON CONFLICT (collection, id) \
                     DO UPDATE SET data = EXCLUDED.data, updated_at = NOW() \
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, DocumentRow>(&query)
                    .bind(collection.as_str())
                    .bind(id)
                    .bind(Json(data))
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        tx.commit().await?;
        tracing::debug!(collection = %collection, document_id = %id, merge, "Document set");
        Ok(row.into())
    }
}
