//! unitpop - Popup Unit Converter

mod error;
mod options;
mod popup;
mod render;

pub use error::PopupError;
pub use options::OptionsPage;
pub use popup::{Popup, PopupState};
pub use render::{
    category_options, document_attributes, options_bindings, popup_bindings, render_labels, unit_options,
    DocumentAttributes, ElementBinding, ElementKind, MissingLabel, RenderedLabel, SelectOption,
};

use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use unitpop_i18n::{Language, ReloadOutcome, TranslationResolver};
use unitpop_prefs::{PreferenceStore, Preferences, Theme};

/// Everything needed to draw the popup
#[derive(Debug, Clone, Serialize)]
pub struct PopupView {
    pub document: DocumentAttributes,
    pub labels: Vec<RenderedLabel>,
    pub categories: Vec<SelectOption>,
    pub units: Vec<SelectOption>,
    pub state: PopupState,
}

/// Main popup application
pub struct UnitPopup {
    store: Arc<dyn PreferenceStore>,
    resolver: Arc<TranslationResolver>,
    preferences: Preferences,
    popup: Popup,
}

impl UnitPopup {
    /// Read preferences and switch translations before anything is rendered
    pub async fn load(
        store: Arc<dyn PreferenceStore>,
        resolver: Arc<TranslationResolver>,
    ) -> Result<Self, PopupError> {
        let preferences = Preferences::load(store.as_ref()).await?;
        let outcome = resolver.reload(&preferences.language).await;
        info!(theme = %preferences.theme, language = %preferences.language, ?outcome, "popup loaded");

        Ok(Self {
            store,
            resolver,
            preferences,
            popup: Popup::new()?,
        })
    }

    pub fn popup(&self) -> &Popup {
        &self.popup
    }

    pub fn popup_mut(&mut self) -> &mut Popup {
        &mut self.popup
    }

    pub fn resolver(&self) -> &TranslationResolver {
        &self.resolver
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn options(&self) -> OptionsPage<'_> {
        OptionsPage::new(self.store.as_ref(), &self.resolver)
    }

    /// Save options page changes. A new language is applied before this returns.
    pub async fn save_options(
        &mut self,
        theme: Option<Theme>,
        language: Option<Language>,
    ) -> Result<Option<ReloadOutcome>, PopupError> {
        let page = self.options();
        if let Some(theme) = &theme {
            page.save_theme(theme).await?;
        }
        let outcome = match &language {
            Some(language) => Some(page.save_language(language).await?),
            None => None,
        };

        self.preferences = Preferences::load(self.store.as_ref()).await?;
        Ok(outcome)
    }

    /// Re-read preferences changed elsewhere and apply them
    pub async fn refresh_preferences(&mut self) -> Result<ReloadOutcome, PopupError> {
        self.preferences = Preferences::load(self.store.as_ref()).await?;
        Ok(self.resolver.reload(&self.preferences.language).await)
    }

    pub fn view(&self) -> Result<PopupView, PopupError> {
        let state = self.popup.state().clone();
        Ok(PopupView {
            document: document_attributes(&self.resolver, &self.preferences.theme),
            labels: render_labels(&self.resolver, &popup_bindings(), MissingLabel::Marker),
            categories: category_options(&self.resolver),
            units: unit_options(&self.resolver, state.category)?,
            state,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;
    use std::sync::Arc;
    use tempfile::TempDir;
    use unitpop_i18n::{DirLocaleSource, TranslationResolver};

    const FRENCH: &str = r#"{
        "extName": { "message": "Convertisseur" },
        "labelTheme": { "message": "Thème" },
        "category_length": { "message": "Longueur" },
        "unit_cm": { "message": "Centimètres" }
    }"#;

    /// Resolver whose default lookup serves `defaults`, with a `fr` table on disk
    pub fn resolver_with(defaults: &[(&str, &str)]) -> (TempDir, TranslationResolver) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("fr")).unwrap();
        std::fs::write(dir.path().join("fr").join("messages.json"), FRENCH).unwrap();

        let defaults: HashMap<String, String> =
            defaults.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        let lookup = move |key: &str| -> Option<String> { defaults.get(key).cloned() };

        let resolver = TranslationResolver::new(Arc::new(lookup), Arc::new(DirLocaleSource::new(dir.path())));
        (dir, resolver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::resolver_with;
    use unitpop_prefs::{MemoryStore, PrefMap};
    use unitpop_units::Category;

    fn store(pairs: &[(&str, &str)]) -> Arc<dyn PreferenceStore> {
        let values: PrefMap = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Arc::new(MemoryStore::with_values(values))
    }

    #[tokio::test]
    async fn test_load_with_system_preferences() {
        let (_dir, resolver) = resolver_with(&[("extName", "Unit Converter")]);
        let app = UnitPopup::load(store(&[]), Arc::new(resolver)).await.unwrap();

        let view = app.view().unwrap();
        assert_eq!(view.document, DocumentAttributes::default());
        let title = view.labels.iter().find(|l| l.id == "title").unwrap();
        assert_eq!(title.text.as_deref(), Some("Unit Converter"));
        assert_eq!(view.state.category, Category::Length);
        assert_eq!(view.units.len(), 3);
    }

    #[tokio::test]
    async fn test_load_applies_saved_language_before_render() {
        let (_dir, resolver) = resolver_with(&[("extName", "Unit Converter")]);
        let prefs = store(&[("language", "fr"), ("theme", "dark")]);
        let app = UnitPopup::load(prefs, Arc::new(resolver)).await.unwrap();

        let view = app.view().unwrap();
        assert_eq!(view.document.lang.as_deref(), Some("fr"));
        assert_eq!(view.document.data_theme.as_deref(), Some("dark"));
        assert_eq!(view.labels[0].text.as_deref(), Some("Convertisseur"));
        assert_eq!(view.categories[0].label, "Longueur");
        assert_eq!(view.units[0].label, "Centimètres");
        assert_eq!(view.units[1].label, "!!unit_m!!");
    }

    #[tokio::test]
    async fn test_options_change_then_refresh() {
        let (_dir, resolver) = resolver_with(&[]);
        let mut app = UnitPopup::load(store(&[]), Arc::new(resolver)).await.unwrap();

        app.options().save_theme(&Theme::parse("light")).await.unwrap();
        app.options().save_language(&Language::parse("fr")).await.unwrap();
        app.refresh_preferences().await.unwrap();

        assert_eq!(app.preferences().theme, Theme::parse("light"));
        assert_eq!(app.resolver().active_locale().as_deref(), Some("fr"));
    }

    #[tokio::test]
    async fn test_save_options() {
        let (_dir, resolver) = resolver_with(&[]);
        let mut app = UnitPopup::load(store(&[]), Arc::new(resolver)).await.unwrap();

        let outcome = app.save_options(Some(Theme::parse("dark")), None).await.unwrap();
        assert_eq!(outcome, None);
        assert_eq!(app.view().unwrap().document.data_theme.as_deref(), Some("dark"));

        let outcome = app.save_options(None, Some(Language::parse("fr"))).await.unwrap();
        assert!(matches!(outcome, Some(ReloadOutcome::Loaded { .. })));
        assert_eq!(app.preferences().language, Language::parse("fr"));
        assert_eq!(app.preferences().theme, Theme::parse("dark"));
        assert_eq!(app.view().unwrap().labels[0].text.as_deref(), Some("Convertisseur"));
    }

    #[tokio::test]
    async fn test_popup_events_through_app() {
        let (_dir, resolver) = resolver_with(&[]);
        let mut app = UnitPopup::load(store(&[]), Arc::new(resolver)).await.unwrap();

        app.popup_mut().select_category(Category::Speed).unwrap();
        app.popup_mut().set_from_unit("kmh").unwrap();
        app.popup_mut().set_to_unit("ms").unwrap();
        app.popup_mut().set_input("36").unwrap();
        assert_eq!(app.popup().state().result, "10");

        let view = app.view().unwrap();
        let ids: Vec<_> = view.units.iter().map(|u| u.value.as_str()).collect();
        assert_eq!(ids, ["ms", "kmh", "mph"]);
    }
}
