//! unitpop i18n - Translation Resolver
//!
//! Overlays a custom locale table, loaded on demand from `messages.json`
//! resources, on top of the host's default message lookup. Missing keys show
//! up as `!!key!!` instead of blank text.

mod error;
mod language;
mod lookup;
mod resolver;
mod source;
mod table;

pub use error::I18nError;
pub use language::{Language, SYSTEM};
pub use lookup::{CatalogLookup, DefaultLookup};
pub use resolver::{fallback_marker, ReloadOutcome, TranslationResolver};
pub use source::{is_valid_locale, DirLocaleSource, LocaleSource, MESSAGES_FILE};
pub use table::TranslationTable;
