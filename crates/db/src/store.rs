//! The document store contract.
//!
//! A store keeps schemaless JSON documents grouped by [`Collection`]. Every
//! document carries a server-assigned id and `createdAt`/`updatedAt`
//! timestamps; all other fields are free-form.

use async_trait::async_trait;
use folio_core::collection::Collection;
use folio_core::error::CoreError;
use folio_core::types::{DocId, Timestamp};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The free-form body of a document.
pub type Fields = serde_json::Map<String, Value>;

/// A stored document, serialized flat as `{id, ...fields, createdAt, updatedAt}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocId,
    #[serde(flatten)]
    pub fields: Fields,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Document {
    /// Decode the document (including its id and timestamps) into a typed view.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let value = serde_json::to_value(self)?;
        serde_json::from_value(value).map_err(|e| StoreError::Undecodable {
            id: self.id.clone(),
            message: e.to_string(),
        })
    }
}

/// Decode a batch of documents. Documents that do not fit `T` are logged and
/// skipped so one malformed entry cannot hide the rest of a collection.
pub fn decode_all<T: DeserializeOwned>(docs: &[Document]) -> Vec<T> {
    docs.iter()
        .filter_map(|doc| match doc.decode() {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(document_id = %doc.id, error = %e, "Skipping undecodable document");
                None
            }
        })
        .collect()
}

/// Serialize a typed payload into document fields.
///
/// The payload must serialize to a JSON object.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidData(format!(
            "expected an object, got {}",
            json_type_name(&other)
        ))),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Comparison applied by a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOp {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "array-contains")]
    ArrayContains,
    #[serde(rename = "in")]
    In,
}

/// A single `{field, op, value}` predicate on a top-level field.
///
/// Documents missing the field never match, whatever the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }

    /// Reject filters the store cannot evaluate.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.field.is_empty() {
            return Err(StoreError::InvalidData("filter field must not be empty".into()));
        }
        if self.op == FilterOp::In && !self.value.is_array() {
            return Err(StoreError::InvalidData(format!(
                "'in' filter on '{}' needs an array value",
                self.field
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Document not found")]
    NotFound { collection: Collection, id: DocId },

    #[error("Invalid document data: {0}")]
    InvalidData(String),

    /// A stored document does not fit the typed view it was read as.
    #[error("document {id} does not decode: {message}")]
    Undecodable { id: DocId, message: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { collection, id } => CoreError::NotFound {
                entity: collection.as_str(),
                id,
            },
            StoreError::InvalidData(msg) => CoreError::Validation(msg),
            other => CoreError::Internal(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// Generic create/read/update/delete over document collections.
///
/// Reserved keys (`id`, `createdAt`, `updatedAt`) are stripped from incoming
/// fields; the store owns them.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short name of the backend, reported by the health endpoint.
    fn backend(&self) -> &'static str;

    /// Cheap liveness check.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Insert a new document under a fresh id.
    async fn add_document(
        &self,
        collection: Collection,
        data: Fields,
    ) -> Result<Document, StoreError>;

    /// All documents matching every filter, newest first.
    async fn get_documents(
        &self,
        collection: Collection,
        filters: &[Filter],
    ) -> Result<Vec<Document>, StoreError>;

    /// A single document, or [`StoreError::NotFound`].
    async fn get_document(&self, collection: Collection, id: &str)
        -> Result<Document, StoreError>;

    /// Overwrite the given top-level fields of an existing document.
    async fn update_document(
        &self,
        collection: Collection,
        id: &str,
        data: Fields,
    ) -> Result<Document, StoreError>;

    /// Remove a document. Returns `false` when nothing was stored under `id`.
    async fn delete_document(&self, collection: Collection, id: &str)
        -> Result<bool, StoreError>;

    /// Create or overwrite a document under a caller-chosen id.
    ///
    /// With `merge`, nested objects are merged key by key and every other
    /// value replaces what was stored. Without it the fields are replaced
    /// wholesale.
    async fn set_document(
        &self,
        collection: Collection,
        id: &str,
        data: Fields,
        merge: bool,
    ) -> Result<Document, StoreError>;
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;

    #[test]
    fn document_serializes_flat() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut fields = Fields::new();
        fields.insert("title".into(), json!("Site"));
        let doc = Document {
            id: "abc".into(),
            fields,
            created_at: ts,
            updated_at: ts,
        };

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["title"], "Site");
        assert_eq!(value["createdAt"], "2024-05-01T12:00:00Z");
        assert!(value.get("fields").is_none());
    }

    #[test]
    fn decode_all_skips_documents_that_do_not_fit() {
        #[derive(Debug, Deserialize)]
        struct Titled {
            title: String,
        }

        let ts = Utc::now();
        let doc = |id: &str, title: Value| {
            let mut fields = Fields::new();
            fields.insert("title".into(), title);
            Document {
                id: id.into(),
                fields,
                created_at: ts,
                updated_at: ts,
            }
        };
        let docs = vec![doc("a", json!("Site")), doc("b", json!(42)), doc("c", json!("Shop"))];

        let titles: Vec<String> = decode_all::<Titled>(&docs)
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["Site".to_string(), "Shop".to_string()]);
        assert!(matches!(
            docs[1].decode::<Titled>(),
            Err(StoreError::Undecodable { id, .. }) if id == "b"
        ));
    }

    #[test]
    fn filter_ops_use_symbolic_names() {
        let filter: Filter =
            serde_json::from_value(json!({"field": "tags", "op": "array-contains", "value": "rust"}))
                .unwrap();
        assert_eq!(filter.op, FilterOp::ArrayContains);
        assert_eq!(serde_json::to_value(FilterOp::Lte).unwrap(), "<=");
    }

    #[test]
    fn in_filter_requires_array() {
        assert!(Filter::new("category", FilterOp::In, "Web").validate().is_err());
        assert!(Filter::new("category", FilterOp::In, json!(["Web"])).validate().is_ok());
        assert!(Filter::eq("", 1).validate().is_err());
    }

    #[test]
    fn to_fields_rejects_non_objects() {
        assert!(to_fields(&json!([1, 2])).is_err());
        assert_eq!(to_fields(&json!({"a": 1})).unwrap()["a"], 1);
    }

    #[test]
    fn not_found_maps_to_core_error() {
        let err: CoreError = StoreError::NotFound {
            collection: Collection::Projects,
            id: "x".into(),
        }
        .into();
        assert!(matches!(err, CoreError::NotFound { entity: "projects", .. }));
    }
}
