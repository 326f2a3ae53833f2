//! Conversion engine

use tracing::debug;
use unitpop_core::Number;

use crate::parse::parse_input;
use crate::units::UNITS;
use crate::{Category, Conversion, ConversionError};

/// Convert `value` between two units of one category.
///
/// Linear units go through the base unit: `value * factor(from) / factor(to)`.
/// Temperature goes through the Celsius pivot with the affine transforms.
pub fn convert(category: Category, from: &str, to: &str, value: f64) -> Result<f64, ConversionError> {
    if !value.is_finite() {
        return Err(ConversionError::NonFinite);
    }

    let from_unit = UNITS.get(category, from)?;
    let to_unit = UNITS.get(category, to)?;

    let result = match (from_unit.conversion, to_unit.conversion) {
        (Conversion::Linear { factor: from_factor }, Conversion::Linear { factor: to_factor }) => {
            let in_base = value * from_factor;
            in_base / to_factor
        }
        (Conversion::Affine(from_t), Conversion::Affine(to_t)) => {
            to_t.from_base(from_t.to_base(value))
        }
        (Conversion::Linear { .. }, Conversion::Affine(_)) => {
            return Err(ConversionError::WrongKind {
                category,
                unit: to.to_string(),
                expected: "linear",
            });
        }
        (Conversion::Affine(_), Conversion::Linear { .. }) => {
            return Err(ConversionError::WrongKind {
                category,
                unit: to.to_string(),
                expected: "affine",
            });
        }
    };

    Ok(result)
}

/// Round a result for display: half away from zero, trailing zeros dropped
pub fn round_display(value: f64, places: u32) -> Result<f64, ConversionError> {
    Ok(Number::round_f64(value, places)?)
}

/// Render a rounded result the way the result field shows it
pub fn format_result(value: f64, places: u32) -> Result<String, ConversionError> {
    Ok(Number::from_f64(value)?.round_half_away(places).to_string())
}

/// Parse user text, convert, and render.
///
/// Text that does not start with a number gives an empty string, never an error.
/// So does a number whose conversion overflows `f64`.
pub fn convert_text(
    category: Category,
    from: &str,
    to: &str,
    text: &str,
    places: u32,
) -> Result<String, ConversionError> {
    let Some(value) = parse_input(text) else {
        debug!(input = text, "no numeric input, empty result");
        return Ok(String::new());
    };

    let converted = convert(category, from, to, value)?;
    if !converted.is_finite() {
        debug!(%category, from, to, value, "conversion overflows, empty result");
        return Ok(String::new());
    }
    let rendered = format_result(converted, places)?;
    debug!(%category, from, to, value, result = %rendered, "converted");
    Ok(rendered)
}
