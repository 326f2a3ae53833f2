//! Label rendering for popup and options elements

use serde::{Deserialize, Serialize};
use unitpop_i18n::TranslationResolver;
use unitpop_prefs::Theme;
use unitpop_units::{Category, ConversionError, UNITS};

/// Kind of element a label is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Input,
    TextArea,
    Other,
}

impl ElementKind {
    /// Input-like elements take their text key as a placeholder
    pub fn takes_placeholder(&self) -> bool {
        matches!(self, ElementKind::Input | ElementKind::TextArea)
    }
}

/// An element carrying translation keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementBinding {
    pub id: String,
    pub kind: ElementKind,
    /// `data-i18n`
    #[serde(default)]
    pub text_key: Option<String>,
    /// `data-i18n-title`
    #[serde(default)]
    pub title_key: Option<String>,
}

impl ElementBinding {
    pub fn text(id: &str, key: &str) -> Self {
        Self::new(id, ElementKind::Other, Some(key), None)
    }

    pub fn placeholder(id: &str, key: &str) -> Self {
        Self::new(id, ElementKind::Input, Some(key), None)
    }

    pub fn title(id: &str, key: &str) -> Self {
        Self::new(id, ElementKind::Other, None, Some(key))
    }

    pub fn new(id: &str, kind: ElementKind, text_key: Option<&str>, title_key: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            kind,
            text_key: text_key.map(str::to_string),
            title_key: title_key.map(str::to_string),
        }
    }
}

/// Strings to apply to one element; `None` leaves the property untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedLabel {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// How a key with no translation is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingLabel {
    /// Show the `!!key!!` marker
    #[default]
    Marker,
    /// Leave the element's existing content in place
    Keep,
}

impl MissingLabel {
    fn lookup(&self, resolver: &TranslationResolver, key: &str) -> Option<String> {
        match self {
            MissingLabel::Marker => Some(resolver.resolve(key)),
            MissingLabel::Keep => resolver.try_resolve(key),
        }
    }
}

/// Resolve every binding's keys into element properties
pub fn render_labels(
    resolver: &TranslationResolver,
    bindings: &[ElementBinding],
    missing: MissingLabel,
) -> Vec<RenderedLabel> {
    bindings
        .iter()
        .map(|binding| {
            let mut label = RenderedLabel { id: binding.id.clone(), ..Default::default() };

            if let Some(key) = &binding.text_key {
                let message = missing.lookup(resolver, key);
                if binding.kind.takes_placeholder() {
                    label.placeholder = message;
                } else {
                    label.text = message;
                }
            }
            if let Some(key) = &binding.title_key {
                label.title = missing.lookup(resolver, key);
            }
            label
        })
        .collect()
}

/// Labelled elements of the popup page
pub fn popup_bindings() -> Vec<ElementBinding> {
    vec![
        ElementBinding::text("title", "extName"),
        ElementBinding::text("categoryLabel", "labelCategory"),
        ElementBinding::text("fromLabel", "labelFrom"),
        ElementBinding::text("toLabel", "labelTo"),
        ElementBinding::placeholder("inputValue", "inputPlaceholder"),
        ElementBinding::new("result", ElementKind::TextArea, Some("resultPlaceholder"), None),
        ElementBinding::title("swapButton", "swapTitle"),
        ElementBinding::title("optionsButton", "optionsTitle"),
    ]
}

/// Labelled elements of the options page
pub fn options_bindings() -> Vec<ElementBinding> {
    vec![
        ElementBinding::text("optionsHeading", "optionsHeading"),
        ElementBinding::text("themeLabel", "labelTheme"),
        ElementBinding::text("themeSystem", "themeSystem"),
        ElementBinding::text("themeLight", "themeLight"),
        ElementBinding::text("themeDark", "themeDark"),
        ElementBinding::text("languageLabel", "labelLanguage"),
        ElementBinding::text("languageSystem", "languageSystem"),
        ElementBinding::text("savedStatus", "optionsSaved"),
    ]
}

/// One `<option>` of a selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

pub fn category_options(resolver: &TranslationResolver) -> Vec<SelectOption> {
    UNITS
        .categories()
        .map(|category| SelectOption {
            value: category.id().to_string(),
            label: resolver.resolve(&category.message_key()),
        })
        .collect()
}

pub fn unit_options(
    resolver: &TranslationResolver,
    category: Category,
) -> Result<Vec<SelectOption>, ConversionError> {
    Ok(UNITS
        .units_of(category)?
        .iter()
        .map(|unit| SelectOption {
            value: unit.id.to_string(),
            label: resolver.resolve(&unit.message_key()),
        })
        .collect())
}

/// Attributes set on the document root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentAttributes {
    /// `lang`; `None` follows the host
    pub lang: Option<String>,
    /// `data-theme`; `None` removes the attribute
    pub data_theme: Option<String>,
}

pub fn document_attributes(resolver: &TranslationResolver, theme: &Theme) -> DocumentAttributes {
    DocumentAttributes {
        lang: resolver.active_locale(),
        data_theme: theme.data_attribute().map(str::to_string),
    }
}
