//! Host configuration from the environment

use std::env;
use std::path::PathBuf;

pub const DATA_PATH_VAR: &str = "UNITPOP_DATA_PATH";
pub const DEFAULT_LOCALE_VAR: &str = "UNITPOP_DEFAULT_LOCALE";
pub const PREFS_FILE_VAR: &str = "UNITPOP_PREFS_FILE";

/// Directory under the data path holding `<locale>/messages.json`
pub const LOCALES_DIR: &str = "_locales";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub data_path: PathBuf,
    /// Locale whose catalog acts as the default lookup
    pub default_locale: String,
    pub prefs_file: PathBuf,
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| var(name).filter(|v| !v.trim().is_empty());

        let data_path = non_empty(DATA_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./assets"));
        let default_locale = non_empty(DEFAULT_LOCALE_VAR).unwrap_or_else(|| "en".to_string());
        let prefs_file = non_empty(PREFS_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_path.join("prefs.json"));

        Self { data_path, default_locale, prefs_file }
    }

    pub fn locales_dir(&self) -> PathBuf {
        self.data_path.join(LOCALES_DIR)
    }
}
