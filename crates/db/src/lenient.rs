//! Field decoders for the typed views in [`models`](crate::models).
//!
//! Documents are schemaless, so a stored field may be `null` or hold a value
//! of the wrong type. These helpers are used with `deserialize_with` and
//! fall back to the default instead of failing the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a field, or `T::default()` when the value is `null` or does not fit.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Decode a list element by element, dropping elements that do not fit.
/// Anything other than an array decodes as an empty list.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct View {
        #[serde(deserialize_with = "or_default")]
        title: String,
        #[serde(deserialize_with = "or_default")]
        link: Option<String>,
        #[serde(deserialize_with = "list")]
        tags: Vec<String>,
    }

    #[test]
    fn null_and_wrong_types_fall_back() {
        let view: View =
            serde_json::from_value(json!({"title": null, "link": 7, "tags": "rust"})).unwrap();
        assert_eq!(view.title, "");
        assert_eq!(view.link, None);
        assert!(view.tags.is_empty());
    }

    #[test]
    fn list_keeps_the_elements_that_fit() {
        let view: View =
            serde_json::from_value(json!({"title": "Site", "tags": ["rust", 1, null, "axum"]}))
                .unwrap();
        assert_eq!(view.title, "Site");
        assert_eq!(view.tags, vec!["rust".to_string(), "axum".to_string()]);
    }

    #[test]
    fn missing_fields_use_the_container_default() {
        let view: View = serde_json::from_value(json!({})).unwrap();
        assert_eq!(view.title, "");
        assert!(view.tags.is_empty());
    }
}
