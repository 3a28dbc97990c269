//! # Curvesim Numeric - Fixed-Context Decimal Arithmetic
//!
//! ## Purpose
//!
//! Arbitrary-precision decimal arithmetic for the curve simulator. Trade sizes are
//! derived from nested square roots and quotients of large/small differences, so
//! every value carries [`PRECISION`] significant digits and every intermediate
//! result is rounded with the single [`ROUNDING`] rule.
//!
//! ## Integration Points
//!
//! - **Engine**: `curvesim-amm` does all curve, quote and trade math in [`Dec`]
//! - **Boundary**: [`codec`] parses/formats decimal strings and implements serde
//! - **Errors**: [`NumericError::IllegalValue`] for anything that is not a decimal string
//!
//! ## Precision Rules
//!
//! 1. **NO FLOATING POINT**: values never pass through `f32`/`f64`
//! 2. **Round Once**: each operation is computed exactly, then rounded once
//! 3. **Fixed Context**: [`NumericContext::STANDARD`] is a constant, never reconfigured
//!
//! ```rust
//! use curvesim_numeric::Dec;
//!
//! let price: Dec = "1.5".parse().unwrap();
//! assert_eq!((&price * Dec::from(2)).to_string(), "3");
//! assert_eq!(
//!     curvesim_numeric::format_decimal(&(Dec::one() / Dec::from(3))),
//!     "0.333333333333333333"
//! );
//! ```

pub mod codec;
pub mod context;
pub mod dec;
pub mod error;

pub use codec::{format_decimal, parse_decimal, MAX_INPUT_EXPONENT, OUTPUT_FRACTION_DIGITS};
pub use context::{NumericContext, PRECISION, ROUNDING};
pub use dec::Dec;
pub use error::NumericError;

pub use bigdecimal::RoundingMode;
