//! Translation tables parsed from `messages.json` resources

use std::collections::HashMap;
use serde::Deserialize;

use crate::I18nError;

/// One entry of a locale resource. Other fields (description, placeholders) are ignored.
#[derive(Debug, Clone, Deserialize)]
struct MessageEntry {
    message: String,
}

/// Message key → message string for one locale
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationTable {
    locale: String,
    messages: HashMap<String, String>,
}

impl TranslationTable {
    pub fn new(locale: impl Into<String>, messages: HashMap<String, String>) -> Self {
        Self { locale: locale.into(), messages }
    }

    /// Parse a resource shaped like `{"key": {"message": "..."}}`
    pub fn from_json(locale: &str, json: &str) -> Result<Self, I18nError> {
        let entries: HashMap<String, MessageEntry> = serde_json::from_str(json)
            .map_err(|source| I18nError::Parse { locale: locale.to_string(), source })?;

        let messages = entries
            .into_iter()
            .map(|(key, entry)| (key, entry.message))
            .collect();

        Ok(Self::new(locale, messages))
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
