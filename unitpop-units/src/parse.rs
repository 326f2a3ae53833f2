//! User input scanning

use regex::Regex;
use std::sync::LazyLock;

/// Leading decimal number, optionally signed, optionally with an exponent
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("leading number pattern is valid")
});

/// Read the number a user typed.
///
/// Leading whitespace is skipped and the longest numeric prefix is taken, so
/// `"12abc"` reads as 12. Text without a leading number, or whose number is
/// not finite, yields `None`: the caller shows an empty result.
pub fn parse_input(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let matched = LEADING_NUMBER.find(trimmed)?;
    let value: f64 = matched.as_str().parse().ok()?;
    value.is_finite().then_some(value)
}
