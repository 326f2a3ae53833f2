//! Theme preference

use std::fmt;
use serde::{Deserialize, Serialize};

/// Theme chosen on the options page
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Theme {
    /// Follow the host's color scheme
    #[default]
    System,
    /// A named theme such as "light" or "dark"
    Named(String),
}

impl Theme {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "system" => Theme::System,
            name => Theme::Named(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Theme::System => "system",
            Theme::Named(name) => name,
        }
    }

    /// Value of the root `data-theme` attribute; `None` means remove it
    pub fn data_attribute(&self) -> Option<&str> {
        match self {
            Theme::System => None,
            Theme::Named(name) => Some(name),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for Theme {
    fn from(value: String) -> Self {
        Theme::parse(&value)
    }
}

impl From<Theme> for String {
    fn from(value: Theme) -> Self {
        value.as_str().to_string()
    }
}
