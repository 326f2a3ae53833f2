//! unitpop Units - Unit Registry and Conversion Engine
//!
//! Static categories and units with their conversion rules, plus the engine
//! that converts values between units of one category.
//!
//! Categories:
//! - Length (cm, m, km)
//! - Mass (g, kg, t)
//! - Volume (ml, cl, dl, l)
//! - Cooking volume (ml, tsp, tbsp; US spoons)
//! - Speed (m/s, km/h, mph)
//! - Temperature (°C, °F, K), affine through Celsius

mod category;
mod unit;
mod units;
mod convert;
mod parse;

pub use category::Category;
pub use unit::{Affine, Conversion, ConversionError, Unit};
pub use units::{UnitRegistry, UNITS};
pub use convert::{convert, convert_text, format_result, round_display};
pub use parse::parse_input;
