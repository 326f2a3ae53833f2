//! unitpop Core - Fundamental types
//!
//! This crate provides the types shared by the other unitpop crates:
//! - `Number`: exact decimal numbers used to round values for display
//! - `NumberError`: failures while parsing or rounding

mod number;

pub use number::{Number, NumberError};

/// Decimal places used for every displayed conversion result
pub const DEFAULT_PRECISION: u32 = 3;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Number, NumberError, DEFAULT_PRECISION};
}
