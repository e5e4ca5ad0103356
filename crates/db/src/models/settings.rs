//! The `settings/theme` document.

use folio_core::theme::Theme;
use serde::{Deserialize, Serialize};

use crate::lenient::or_default;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    pub default_theme: Theme,
}

/// The stored `settings/theme` document as read back. `default_theme` is
/// `None` when the field is missing or not a recognised theme name, so the
/// configured fallback can apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredThemeSettings {
    #[serde(deserialize_with = "or_default")]
    default_theme: Option<String>,
}

impl StoredThemeSettings {
    /// The saved theme, matched case-insensitively.
    pub fn theme(&self) -> Option<Theme> {
        self.default_theme.as_deref().and_then(|t| t.parse().ok())
    }
}
