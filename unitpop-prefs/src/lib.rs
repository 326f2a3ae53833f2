//! unitpop Prefs - Preferences Gateway
//!
//! Async key-value storage for the `theme` and `language` preferences, with
//! an in-memory store and a JSON-file store.

mod error;
mod preferences;
mod store;
mod theme;

pub use error::PrefsError;
pub use preferences::{Preferences, LANGUAGE_KEY, THEME_KEY};
pub use store::{JsonFileStore, MemoryStore, PrefMap, PreferenceStore};
pub use theme::Theme;
pub use unitpop_i18n::Language;
