//! Where locale resources come from

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use async_trait::async_trait;
use tracing::debug;

use crate::{I18nError, TranslationTable};

/// File name of a locale resource inside its locale directory
pub const MESSAGES_FILE: &str = "messages.json";

/// Asynchronous provider of locale resources
#[async_trait]
pub trait LocaleSource: Send + Sync {
    async fn fetch(&self, locale: &str) -> Result<TranslationTable, I18nError>;
}

/// Reads `<root>/<locale>/messages.json`
#[derive(Debug, Clone)]
pub struct DirLocaleSource {
    root: PathBuf,
}

impl DirLocaleSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a locale's resource, if the identifier is acceptable
    pub fn resource_path(&self, locale: &str) -> Result<PathBuf, I18nError> {
        if !is_valid_locale(locale) {
            return Err(I18nError::InvalidLocale(locale.to_string()));
        }
        Ok(self.root.join(locale).join(MESSAGES_FILE))
    }
}

#[async_trait]
impl LocaleSource for DirLocaleSource {
    async fn fetch(&self, locale: &str) -> Result<TranslationTable, I18nError> {
        let path = self.resource_path(locale)?;
        debug!(locale, path = %path.display(), "fetching locale resource");

        let json = tokio::fs::read_to_string(&path).await.map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                I18nError::NotFound { locale: locale.to_string(), path: path.clone() }
            } else {
                I18nError::Io { locale: locale.to_string(), source }
            }
        })?;

        TranslationTable::from_json(locale, &json)
    }
}

/// Locale identifiers look like `fr`, `pt_BR` or `zh-CN`; nothing that
/// could climb out of the locales directory.
pub fn is_valid_locale(locale: &str) -> bool {
    !locale.is_empty()
        && locale.len() <= 16
        && locale.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
