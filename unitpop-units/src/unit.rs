//! Unit representation with conversion rules

use std::fmt;
use serde::Serialize;
use thiserror::Error;
use unitpop_core::NumberError;

use crate::Category;

/// Affine map to and from a category's pivot unit
///
/// `to_base(x) = (x - offset) * scale_num / scale_den`
/// `from_base(y) = y * scale_den / scale_num + offset`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Affine {
    pub offset: f64,
    pub scale_num: f64,
    pub scale_den: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine { offset: 0.0, scale_num: 1.0, scale_den: 1.0 };

    pub const fn new(offset: f64, scale_num: f64, scale_den: f64) -> Self {
        Affine { offset, scale_num, scale_den }
    }

    pub fn to_base(&self, value: f64) -> f64 {
        (value - self.offset) * self.scale_num / self.scale_den
    }

    pub fn from_base(&self, value: f64) -> f64 {
        value * self.scale_den / self.scale_num + self.offset
    }
}

/// How a unit relates to its category's base unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conversion {
    /// 1 unit = factor × base unit
    Linear { factor: f64 },
    /// Scale plus offset (temperature)
    Affine(Affine),
}

/// A unit scoped to one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Unit {
    /// Identifier inside the category (e.g. "cm", "tbsp", "kmh")
    pub id: &'static str,
    pub category: Category,
    pub conversion: Conversion,
}

impl Unit {
    pub const fn linear(id: &'static str, category: Category, factor: f64) -> Self {
        Unit { id, category, conversion: Conversion::Linear { factor } }
    }

    pub const fn affine(id: &'static str, category: Category, transform: Affine) -> Self {
        Unit { id, category, conversion: Conversion::Affine(transform) }
    }

    /// Factor to the base unit, for linear units only
    pub fn factor(&self) -> Option<f64> {
        match self.conversion {
            Conversion::Linear { factor } => Some(factor),
            Conversion::Affine(_) => None,
        }
    }

    /// Transform pair, for affine units only
    pub fn transform(&self) -> Option<Affine> {
        match self.conversion {
            Conversion::Affine(t) => Some(t),
            Conversion::Linear { .. } => None,
        }
    }

    /// Translation key of the unit's display name
    pub fn message_key(&self) -> String {
        format!("unit_{}", self.id)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Errors that can occur during unit conversion
///
/// The UI only ever offers registry-derived identifiers, so every variant
/// here marks a caller bug rather than bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown unit '{unit}' in category {category}")]
    UnknownUnit { category: Category, unit: String },

    #[error("unit '{unit}' in category {category} has no {expected} conversion")]
    WrongKind { category: Category, unit: String, expected: &'static str },

    #[error("value must be a finite number")]
    NonFinite,

    #[error("numeric error: {0}")]
    Number(#[from] NumberError),
}
