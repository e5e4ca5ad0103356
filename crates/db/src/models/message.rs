//! Contact form submissions.

use folio_core::types::{DocId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::lenient::or_default;

/// A document from the `messages` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    #[serde(deserialize_with = "or_default")]
    pub id: DocId,
    #[serde(deserialize_with = "or_default")]
    pub name: String,
    #[serde(deserialize_with = "or_default")]
    pub email: String,
    #[serde(deserialize_with = "or_default")]
    pub message: String,
    #[serde(deserialize_with = "or_default")]
    pub created_at: Option<Timestamp>,
    #[serde(deserialize_with = "or_default")]
    pub updated_at: Option<Timestamp>,
}
