//! The closed set of document collections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Well-known document id of the profile inside the `about` collection.
pub const PROFILE_DOC_ID: &str = "profile";

/// Well-known document id of the theme settings inside `settings`.
pub const THEME_DOC_ID: &str = "theme";

/// A named group of documents.
///
/// `Sessions` holds admin refresh sessions and is never exposed through the
/// generic collection endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Projects,
    Services,
    Messages,
    About,
    Settings,
    Sessions,
}

impl Collection {
    /// Collections reachable through the admin passthrough API.
    pub const PUBLIC: [Collection; 5] = [
        Collection::Projects,
        Collection::Services,
        Collection::Messages,
        Collection::About,
        Collection::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Projects => "projects",
            Collection::Services => "services",
            Collection::Messages => "messages",
            Collection::About => "about",
            Collection::Settings => "settings",
            Collection::Sessions => "sessions",
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Collection::Sessions)
    }

    /// Parse a collection name coming from a request path, rejecting
    /// internal collections.
    pub fn parse_public(name: &str) -> Result<Self, CoreError> {
        let collection: Collection = name.parse()?;
        if collection.is_internal() {
            return Err(CoreError::Validation(format!("Unknown collection: {name}")));
        }
        Ok(collection)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "projects" => Ok(Collection::Projects),
            "services" => Ok(Collection::Services),
            "messages" => Ok(Collection::Messages),
            "about" => Ok(Collection::About),
            "settings" => Ok(Collection::Settings),
            "sessions" => Ok(Collection::Sessions),
            other => Err(CoreError::Validation(format!("Unknown collection: {other}"))),
        }
    }
}
