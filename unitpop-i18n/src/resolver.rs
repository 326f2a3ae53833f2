//! Translation resolution with a swappable custom table
//!
//! Resolution order for a key:
//! 1. a custom table is loaded and has the key: its message
//! 2. a custom table is loaded but lacks the key: the `!!key!!` marker
//! 3. no custom table: the host's default lookup, else the marker
//!
//! The table is replaced wholesale by `reload` and never edited in place,
//! so a reader sees either the previous table or the next one.

use std::sync::{Arc, PoisonError, RwLock};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::{DefaultLookup, Language, LocaleSource, TranslationTable};

/// Marker shown for a key no table could resolve
pub fn fallback_marker(key: &str) -> String {
    format!("!!{}!!", key)
}

/// What a reload ended up doing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ReloadOutcome {
    /// System language: default lookup only
    System,
    /// Custom table installed
    Loaded { locale: String, messages: usize },
    /// Custom table could not be loaded; default lookup only
    Fallback { locale: String, reason: String },
}

pub struct TranslationResolver {
    table: RwLock<Option<Arc<TranslationTable>>>,
    default_lookup: Arc<dyn DefaultLookup>,
    source: Arc<dyn LocaleSource>,
}

impl TranslationResolver {
    /// Starts in system mode (no custom table)
    pub fn new(default_lookup: Arc<dyn DefaultLookup>, source: Arc<dyn LocaleSource>) -> Self {
        Self {
            table: RwLock::new(None),
            default_lookup,
            source,
        }
    }

    /// Resolve a key to a display string. Never fails.
    pub fn resolve(&self, key: &str) -> String {
        match self.current_table() {
            Some(table) => match table.get(key) {
                Some(message) => message.to_string(),
                None => {
                    warn!(key, locale = table.locale(), "missing translation in custom locale");
                    fallback_marker(key)
                }
            },
            None => match self.default_message(key) {
                Some(message) => message,
                None => {
                    warn!(key, "missing translation in default locale");
                    fallback_marker(key)
                }
            },
        }
    }

    /// Resolve without the marker: `None` when nothing matches.
    pub fn try_resolve(&self, key: &str) -> Option<String> {
        match self.current_table() {
            Some(table) => table.get(key).map(str::to_string),
            None => self.default_message(key),
        }
    }

    /// Resolve, keeping `fallback` when nothing matches
    pub fn resolve_or(&self, key: &str, fallback: &str) -> String {
        self.try_resolve(key).unwrap_or_else(|| fallback.to_string())
    }

    /// Locale of the loaded custom table, `None` in system mode
    pub fn active_locale(&self) -> Option<String> {
        self.current_table().map(|t| t.locale().to_string())
    }

    pub fn has_custom_table(&self) -> bool {
        self.current_table().is_some()
    }

    /// Switch to `language`. Any failure falls back to system mode.
    pub async fn reload(&self, language: &Language) -> ReloadOutcome {
        let locale = match language {
            Language::System => {
                self.swap(None);
                debug!("using system language");
                return ReloadOutcome::System;
            }
            Language::Locale(locale) => locale,
        };

        match self.source.fetch(locale).await {
            Ok(table) => {
                let messages = table.len();
                self.swap(Some(Arc::new(table)));
                info!(locale = %locale, messages, "loaded custom translations");
                ReloadOutcome::Loaded { locale: locale.clone(), messages }
            }
            Err(e) => {
                self.swap(None);
                error!(locale = %locale, error = %e, "failed to load custom translations");
                ReloadOutcome::Fallback { locale: locale.clone(), reason: e.to_string() }
            }
        }
    }

    fn default_message(&self, key: &str) -> Option<String> {
        self.default_lookup.message(key).filter(|m| !m.is_empty())
    }

    fn current_table(&self) -> Option<Arc<TranslationTable>> {
        self.table.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn swap(&self, next: Option<Arc<TranslationTable>>) {
        *self.table.write().unwrap_or_else(PoisonError::into_inner) = next;
    }
}
