//! Typed view of the recognized preference keys

use serde::{Deserialize, Serialize};
use tracing::info;
use unitpop_i18n::Language;

use crate::{PrefMap, PreferenceStore, PrefsError, Theme};

pub const THEME_KEY: &str = "theme";
pub const LANGUAGE_KEY: &str = "language";

/// Theme and language, both defaulting to `system`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub language: Language,
}

impl Preferences {
    /// Read both keys; missing ones take their defaults
    pub async fn load(store: &dyn PreferenceStore) -> Result<Self, PrefsError> {
        let values = store.get(&[THEME_KEY, LANGUAGE_KEY]).await?;
        Ok(Self::from_map(&values))
    }

    pub fn from_map(values: &PrefMap) -> Self {
        Self {
            theme: values.get(THEME_KEY).map(|v| Theme::parse(v)).unwrap_or_default(),
            language: values.get(LANGUAGE_KEY).map(|v| Language::parse(v)).unwrap_or_default(),
        }
    }

    pub async fn save_theme(store: &dyn PreferenceStore, theme: &Theme) -> Result<(), PrefsError> {
        info!(theme = %theme, "saving theme");
        store.set(single(THEME_KEY, theme.as_str())).await
    }

    pub async fn save_language(store: &dyn PreferenceStore, language: &Language) -> Result<(), PrefsError> {
        info!(language = %language, "saving language");
        store.set(single(LANGUAGE_KEY, language.as_str())).await
    }
}

fn single(key: &str, value: &str) -> PrefMap {
    let mut map = PrefMap::new();
    map.insert(key.to_string(), value.to_string());
    map
}
