//! Exact decimal numbers for display rounding
//!
//! Conversions run in `f64`, but the value shown to the user is rounded in
//! decimal: the shortest decimal representation of the float is parsed into a
//! dashu `DBig`, rounded half away from zero at the requested number of
//! places, then turned back into an `f64`. This keeps `1.005` rounding to
//! `1.01` the way a reader of the digits expects.

use dashu_float::DBig;
use dashu_int::IBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Value is not finite")]
    NonFinite,

    #[error("Overflow: result does not fit in f64")]
    Overflow,
}

/// Working precision (decimal digits), far above what an f64 carries
const WORK_PRECISION: usize = 50;

/// Decimal number backed by dashu-float's DBig
#[derive(Debug, Clone)]
pub struct Number {
    inner: DBig,
}

impl Number {
    // ========== Construction ==========

    fn with_work_precision(val: DBig) -> DBig {
        val.with_precision(WORK_PRECISION).value()
    }

    /// Parse a plain decimal string ("12", "-3.25", "1.5e3")
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();
        let inner: DBig = s.parse()
            .map_err(|_| NumberError::ParseError(s.to_string()))?;
        Ok(Self { inner: Self::with_work_precision(inner) })
    }

    /// Create from an f64 through its shortest round-trip decimal form
    pub fn from_f64(f: f64) -> Result<Self, NumberError> {
        if !f.is_finite() {
            return Err(NumberError::NonFinite);
        }
        // `Display` for f64 never uses exponent notation
        Self::from_str(&format!("{}", f))
    }

    pub fn from_i64(n: i64) -> Self {
        Self { inner: Self::with_work_precision(DBig::from(n)) }
    }

    // ========== Predicates ==========

    pub fn is_zero(&self) -> bool {
        self.inner == DBig::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.inner < DBig::ZERO
    }

    // ========== Rounding ==========

    /// Round to `places` decimal places, ties away from zero
    pub fn round_half_away(&self, places: u32) -> Self {
        let shift = places as isize;
        let negative = self.is_negative();

        // Move the decimal point right by `places` digits (exact in base 10)
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();
        let magnitude = if negative { -significand } else { significand };
        let shifted = Self::with_work_precision(DBig::from_parts(magnitude, exponent + shift));

        let half = DBig::from_parts(IBig::from(5), -1);
        let floored = (shifted + half).floor();

        let (digits, digits_exp) = floored.into_repr().into_parts();
        let digits = if negative { -digits } else { digits };
        Self { inner: Self::with_work_precision(DBig::from_parts(digits, digits_exp - shift)) }
    }

    // ========== Conversion ==========

    /// Convert to the nearest f64; `None` when out of range
    pub fn to_f64(&self) -> Option<f64> {
        // significand * 10^exponent, parsed as one decimal literal
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();
        let result: f64 = format!("{}e{}", significand, exponent).parse().ok()?;

        if result.is_finite() {
            Some(result)
        } else {
            None
        }
    }

    /// Round and come back to f64 in one step
    pub fn round_f64(value: f64, places: u32) -> Result<f64, NumberError> {
        Self::from_f64(value)?
            .round_half_away(places)
            .to_f64()
            .ok_or(NumberError::Overflow)
    }
}

// ========== Trait Implementations ==========

/// Renders without trailing zeros: `5.00` shows as `5`, `-0` as `0`
impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_f64() {
            Some(v) if v == 0.0 => write!(f, "0"),
            Some(v) => write!(f, "{}", v),
            None => write!(f, "{}", self.inner),
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away_positive() {
        let n = Number::from_str("14.7868").unwrap();
        assert_eq!(n.round_half_away(3).to_string(), "14.787");
    }

    #[test]
    fn test_round_tie_goes_away_from_zero() {
        assert_eq!(Number::from_str("2.5").unwrap().round_half_away(0).to_string(), "3");
        assert_eq!(Number::from_str("-2.5").unwrap().round_half_away(0).to_string(), "-3");
        assert_eq!(Number::from_str("1.005").unwrap().round_half_away(2).to_string(), "1.01");
    }

    #[test]
    fn test_trailing_zeros_dropped() {
        let n = Number::from_str("5.0004").unwrap();
        assert_eq!(n.round_half_away(2).to_string(), "5");
    }

    #[test]
    fn test_negative_zero_renders_as_zero() {
        let n = Number::from_str("-0.0001").unwrap();
        assert_eq!(n.round_half_away(2).to_string(), "0");
    }

    #[test]
    fn test_round_f64() {
        assert_eq!(Number::round_f64(273.15, 3).unwrap(), 273.15);
        assert_eq!(Number::round_f64(1000.0000000001, 3).unwrap(), 1000.0);
        assert_eq!(Number::round_f64(-17.77777777, 2).unwrap(), -17.78);
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert_eq!(Number::from_f64(f64::NAN).unwrap_err(), NumberError::NonFinite);
        assert_eq!(Number::from_f64(f64::INFINITY).unwrap_err(), NumberError::NonFinite);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(Number::from_str("abc"), Err(NumberError::ParseError(_))));
    }

    #[test]
    fn test_to_f64_keeps_digits_of_large_values() {
        assert_eq!(Number::from_str("1e300").unwrap().to_f64(), Some(1e300));
        assert_eq!(Number::from_str("1e23").unwrap().to_f64(), Some(1e23));
        assert_eq!(Number::round_f64(1e300, 3).unwrap(), 1e300);
        assert_eq!(Number::from_f64(1e300).unwrap().round_half_away(3).to_string(), format!("1{}", "0".repeat(300)));
        assert_eq!(Number::from_str("1e400").unwrap().to_f64(), None);
    }

    #[test]
    fn test_to_f64_large() {
        let n = Number::from_i64(2_500_000);
        assert_eq!(n.to_f64(), Some(2_500_000.0));
    }
}
