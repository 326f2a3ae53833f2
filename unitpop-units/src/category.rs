//! Conversion categories

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::ConversionError;

/// A conversion domain. Every category has one base unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Length,
    Mass,
    Volume,
    CookingVolume,
    Speed,
    Temperature,
}

impl Category {
    /// Presentation order: linear categories as defined, temperature last
    pub const ALL: [Category; 6] = [
        Category::Length,
        Category::Mass,
        Category::Volume,
        Category::CookingVolume,
        Category::Speed,
        Category::Temperature,
    ];

    /// Stable identifier, also the suffix of the `category_<id>` message key
    pub fn id(&self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Mass => "mass",
            Category::Volume => "volume",
            Category::CookingVolume => "cooking_volume",
            Category::Speed => "speed",
            Category::Temperature => "temperature",
        }
    }

    /// Temperature is affine; everything else scales by a factor
    pub fn is_linear(&self) -> bool {
        !matches!(self, Category::Temperature)
    }

    /// Translation key of the category's display name
    pub fn message_key(&self) -> String {
        format!("category_{}", self.id())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.id() == s)
            .ok_or_else(|| ConversionError::UnknownCategory(s.to_string()))
    }
}
