//! Options page: theme and language preferences

use tracing::info;
use unitpop_i18n::{Language, ReloadOutcome, TranslationResolver};
use unitpop_prefs::{PreferenceStore, Preferences, PrefsError, Theme};

use crate::render::{document_attributes, options_bindings, render_labels, DocumentAttributes, MissingLabel, RenderedLabel};

pub struct OptionsPage<'a> {
    store: &'a dyn PreferenceStore,
    resolver: &'a TranslationResolver,
}

impl<'a> OptionsPage<'a> {
    pub fn new(store: &'a dyn PreferenceStore, resolver: &'a TranslationResolver) -> Self {
        Self { store, resolver }
    }

    /// Saved preferences, `system` for anything unset
    pub async fn restore(&self) -> Result<Preferences, PrefsError> {
        Preferences::load(self.store).await
    }

    pub async fn save_theme(&self, theme: &Theme) -> Result<(), PrefsError> {
        Preferences::save_theme(self.store, theme).await
    }

    /// Persist the language, then switch translations before returning
    pub async fn save_language(&self, language: &Language) -> Result<ReloadOutcome, PrefsError> {
        Preferences::save_language(self.store, language).await?;
        let outcome = self.resolver.reload(language).await;
        info!(language = %language, ?outcome, "language changed");
        Ok(outcome)
    }

    /// Labels of the page; keys without a translation keep their markup text
    pub fn labels(&self) -> Vec<RenderedLabel> {
        render_labels(self.resolver, &options_bindings(), MissingLabel::Keep)
    }

    pub fn document(&self, theme: &Theme) -> DocumentAttributes {
        document_attributes(self.resolver, theme)
    }
}
