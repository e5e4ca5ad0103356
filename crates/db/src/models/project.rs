//! Portfolio project documents.

use folio_core::types::{DocId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::lenient::{list, or_default};

/// A document from the `projects` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(deserialize_with = "or_default")]
    pub id: DocId,
    #[serde(deserialize_with = "or_default")]
    pub title: String,
    /// Matched against service titles by string equality.
    #[serde(deserialize_with = "or_default")]
    pub category: String,
    #[serde(deserialize_with = "or_default")]
    pub description: String,
    #[serde(deserialize_with = "or_default")]
    pub full_description: String,
    #[serde(deserialize_with = "list")]
    pub tech_stack: Vec<String>,
    /// Thumbnail first.
    #[serde(deserialize_with = "list")]
    pub image_urls: Vec<String>,
    /// Mirror of `image_urls[0]`, or empty.
    #[serde(deserialize_with = "or_default")]
    pub image_url: String,
    #[serde(deserialize_with = "or_default")]
    pub project_url: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub video_url: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub created_at: Option<Timestamp>,
    #[serde(deserialize_with = "or_default")]
    pub updated_at: Option<Timestamp>,
}

impl Project {
    /// The first image, falling back to the legacy single-image field.
    pub fn thumbnail(&self) -> Option<&str> {
        self.image_urls
            .first()
            .map(String::as_str)
            .or_else(|| (!self.image_url.is_empty()).then_some(self.image_url.as_str()))
    }
}

/// The full set of fields written on project create and edit.
///
/// Both link fields are always written so switching the link kind clears
/// the other one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub title: String,
    pub category: String,
    pub description: String,
    pub full_description: String,
    pub tech_stack: Vec<String>,
    pub image_urls: Vec<String>,
    pub image_url: String,
    pub project_url: Option<String>,
    pub video_url: Option<String>,
}
