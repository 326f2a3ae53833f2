//! Host-provided default message lookup

use crate::{I18nError, LocaleSource, TranslationTable};

/// Synchronous key → message lookup supplied by the host environment
pub trait DefaultLookup: Send + Sync {
    fn message(&self, key: &str) -> Option<String>;
}

impl<F> DefaultLookup for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn message(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// Default lookup backed by a bundled catalog (the host's default locale)
#[derive(Debug, Clone, Default)]
pub struct CatalogLookup {
    table: TranslationTable,
}

impl CatalogLookup {
    pub fn new(table: TranslationTable) -> Self {
        Self { table }
    }

    /// Load the bundled catalog for `locale` from a source
    pub async fn load(source: &dyn LocaleSource, locale: &str) -> Result<Self, I18nError> {
        source.fetch(locale).await.map(Self::new)
    }

    pub fn locale(&self) -> &str {
        self.table.locale()
    }
}

impl DefaultLookup for CatalogLookup {
    fn message(&self, key: &str) -> Option<String> {
        self.table.get(key).map(str::to_string)
    }
}
