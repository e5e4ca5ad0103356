//! Service offering documents.

use folio_core::icon::{DEFAULT_ICON, SERVICE_ICON_NAMES};
use folio_core::types::{DocId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};

use crate::lenient::or_default;

/// A document from the `services` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    #[serde(deserialize_with = "or_default")]
    pub id: DocId,
    #[serde(deserialize_with = "or_default")]
    pub title: String,
    #[serde(deserialize_with = "or_default")]
    pub description: String,
    /// One of `Code`, `Palette`, `Smartphone`, `Video`.
    #[serde(deserialize_with = "icon_name")]
    pub icon: String,
    #[serde(deserialize_with = "or_default")]
    pub created_at: Option<Timestamp>,
    #[serde(deserialize_with = "or_default")]
    pub updated_at: Option<Timestamp>,
}

/// A known service icon name, or the default icon for anything else.
fn icon_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let name: Option<String> = or_default(deserializer)?;
    Ok(name
        .filter(|n| SERVICE_ICON_NAMES.contains(&n.as_str()))
        .unwrap_or_else(|| DEFAULT_ICON.service_icon_name().to_string()))
}

impl Default for Service {
    fn default() -> Self {
        Self {
            id: DocId::new(),
            title: String::new(),
            description: String::new(),
            icon: DEFAULT_ICON.service_icon_name().to_string(),
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceInput {
    pub title: String,
    pub description: String,
    pub icon: String,
}

/// Shown on the public site while the collection is empty.
pub fn default_services() -> Vec<Service> {
    [
        (
            "default-graphic-designing",
            "Graphic Designing",
            "Creating stunning visual designs, logos, and brand identities that make your business stand out.",
            "Palette",
        ),
        (
            "default-web-development",
            "Web Development",
            "Building responsive, modern web applications with the latest technologies and best practices.",
            "Code",
        ),
        (
            "default-app-development",
            "App Development",
            "Developing native and cross-platform mobile applications for iOS and Android devices.",
            "Smartphone",
        ),
        (
            "default-video-editing",
            "Video Editing",
            "Professional video editing, motion graphics, and post-production services for your content.",
            "Video",
        ),
    ]
    .into_iter()
    .map(|(id, title, description, icon)| Service {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        created_at: None,
        updated_at: None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use folio_core::icon::detect_icon_name;

    use super::*;

    #[test]
    fn default_service_icons_match_their_titles() {
        for service in default_services() {
            assert_eq!(detect_icon_name(&service.title), service.icon, "{}", service.title);
        }
    }

    #[test]
    fn missing_icon_decodes_to_code() {
        let service: Service = serde_json::from_str(r#"{"title": "Consulting"}"#).unwrap();
        assert_eq!(service.icon, "Code");
        assert!(service.description.is_empty());
    }

    #[test]
    fn unknown_or_mistyped_fields_fall_back() {
        let service: Service = serde_json::from_str(
            r#"{"title": null, "description": ["not", "text"], "icon": "Rocket"}"#,
        )
        .unwrap();
        assert_eq!(service.title, "");
        assert_eq!(service.description, "");
        assert_eq!(service.icon, "Code");

        let service: Service = serde_json::from_str(r#"{"icon": "Video"}"#).unwrap();
        assert_eq!(service.icon, "Video");
    }
}
