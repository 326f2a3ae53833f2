//! Locale loading errors
//!
//! None of these reach the renderer: the resolver logs them and falls back
//! to the default lookup.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("invalid locale identifier: {0:?}")]
    InvalidLocale(String),

    #[error("no messages for locale {locale} at {}", path.display())]
    NotFound { locale: String, path: PathBuf },

    #[error("could not read messages for locale {locale}: {source}")]
    Io {
        locale: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed messages for locale {locale}: {source}")]
    Parse {
        locale: String,
        #[source]
        source: serde_json::Error,
    },
}
