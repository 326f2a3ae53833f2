//! Language preference

use std::fmt;
use serde::{Deserialize, Serialize};

/// Sentinel meaning "follow the host's language"
pub const SYSTEM: &str = "system";

/// Language chosen on the options page
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    /// Use the host's default lookup only
    #[default]
    System,
    /// Load `<locale>/messages.json` and prefer it
    Locale(String),
}

impl Language {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == SYSTEM {
            Language::System
        } else {
            Language::Locale(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Language::System => SYSTEM,
            Language::Locale(locale) => locale,
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Language::System)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for Language {
    fn from(value: String) -> Self {
        Language::parse(&value)
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.as_str().to_string()
    }
}
