//! Repository for the `settings/theme` document.

use folio_core::collection::{Collection, THEME_DOC_ID};
use folio_core::theme::Theme;

use crate::models::settings::{StoredThemeSettings, ThemeSettings};
use crate::store::{to_fields, DocumentStore, StoreError};

/// Provides data access for site settings.
pub struct SettingsRepo;

impl SettingsRepo {
    /// The saved theme settings. `None` before the first save, and when the
    /// stored document carries no usable `defaultTheme`.
    pub async fn get_theme(store: &dyn DocumentStore) -> Result<Option<ThemeSettings>, StoreError> {
        let stored: StoredThemeSettings =
            match store.get_document(Collection::Settings, THEME_DOC_ID).await {
                Ok(doc) => doc.decode()?,
                Err(StoreError::NotFound { .. }) => return Ok(None),
                Err(e) => return Err(e),
            };
        Ok(stored.theme().map(|default_theme| ThemeSettings { default_theme }))
    }

    pub async fn set_theme(
        store: &dyn DocumentStore,
        theme: Theme,
    ) -> Result<ThemeSettings, StoreError> {
        let settings = ThemeSettings {
            default_theme: theme,
        };
        store
            .set_document(Collection::Settings, THEME_DOC_ID, to_fields(&settings)?, true)
            .await?
            .decode()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::memory::MemoryDocumentStore;

    #[tokio::test]
    async fn theme_is_absent_until_set() {
        let store = MemoryDocumentStore::new();
        assert_eq!(SettingsRepo::get_theme(&store).await.unwrap(), None);

        SettingsRepo::set_theme(&store, Theme::Light).await.unwrap();
        let saved = SettingsRepo::get_theme(&store).await.unwrap().unwrap();
        assert_eq!(saved.default_theme, Theme::Light);
    }

    #[tokio::test]
    async fn unusable_stored_theme_reads_as_unset() {
        let store = MemoryDocumentStore::new();
        for stored in [json!({"accent": "blue"}), json!({"defaultTheme": null}), json!({"defaultTheme": "sepia"})] {
            store
                .set_document(Collection::Settings, THEME_DOC_ID, to_fields(&stored).unwrap(), false)
                .await
                .unwrap();
            assert_eq!(SettingsRepo::get_theme(&store).await.unwrap(), None, "{stored}");
        }

        store
            .set_document(
                Collection::Settings,
                THEME_DOC_ID,
                to_fields(&json!({"defaultTheme": "Light"})).unwrap(),
                false,
            )
            .await
            .unwrap();
        let saved = SettingsRepo::get_theme(&store).await.unwrap().unwrap();
        assert_eq!(saved.default_theme, Theme::Light);
    }
}
