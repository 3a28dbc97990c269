//! Fixed arithmetic context: significant-digit precision plus one rounding rule
//!
//! Every operation computes its exact (or sticky-digit extended) result first and
//! then rounds exactly once, so results are correctly rounded for the context.
//! Two implementations sharing the same context therefore agree digit for digit
//! no matter how long the chain of dependent operations grows.

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};
use std::num::NonZeroU64;

/// Significant digits carried by every simulation value
pub const PRECISION: u64 = 100;

/// Rounding rule applied at every intermediate rounding point
pub const ROUNDING: RoundingMode = RoundingMode::HalfDown;

/// Significant-digit precision for decimal arithmetic, always rounding with
/// [`ROUNDING`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericContext {
    precision: NonZeroU64,
}

impl NumericContext {
    /// The context used for all simulation arithmetic
    pub const STANDARD: Self = Self::new(PRECISION);

    pub const fn new(precision: u64) -> Self {
        match NonZeroU64::new(precision) {
            Some(precision) => Self { precision },
            None => panic!("precision must be at least one digit"),
        }
    }

    pub fn precision(&self) -> u64 {
        self.precision.get()
    }

    /// Round a value to the context precision
    pub fn round(&self, value: &BigDecimal) -> BigDecimal {
        if value.digits() <= self.precision() {
            return value.clone();
        }
        value.with_precision_round(self.precision, ROUNDING)
    }

    /// Round a value to a fixed number of fractional digits (precision is not
    /// applied)
    pub fn quantize(&self, value: &BigDecimal, fraction_digits: i64) -> BigDecimal {
        let (_, scale) = value.as_bigint_and_exponent();
        if scale <= fraction_digits {
            return value.clone();
        }
        value.with_scale_round(fraction_digits, ROUNDING)
    }

    pub fn add(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> BigDecimal {
        self.round(&(lhs + rhs))
    }

    pub fn sub(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> BigDecimal {
        self.round(&(lhs - rhs))
    }

    pub fn mul(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> BigDecimal {
        self.round(&(lhs * rhs))
    }

    /// Correctly rounded quotient
    ///
    /// The integer quotient carries at least `precision + 1` digits plus a
    /// sticky digit that is non-zero iff the division left a remainder, so the
    /// single rounding step sees exact ties as ties.
    ///
    /// # Panics
    /// Panics if `rhs` is zero.
    pub fn div(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> BigDecimal {
        assert!(!rhs.is_zero(), "decimal division by zero");
        if lhs.is_zero() {
            return BigDecimal::zero();
        }

        let (lhs_mantissa, lhs_scale) = lhs.as_bigint_and_exponent();
        let (rhs_mantissa, rhs_scale) = rhs.as_bigint_and_exponent();
        let negative = (lhs_mantissa.sign() == Sign::Minus) != (rhs_mantissa.sign() == Sign::Minus);

        let shift = (self.precision() as i64 + 1 + rhs.digits() as i64 - lhs.digits() as i64)
            .max(0) as u64;
        let scaled = lhs_mantissa.magnitude() * pow10(shift);
        let denominator = rhs_mantissa.magnitude();
        let quotient = &scaled / denominator;
        let remainder = &scaled % denominator;

        let mut mantissa = quotient * 10u32;
        if !remainder.is_zero() {
            mantissa += 1u32;
        }
        let scale = lhs_scale - rhs_scale + shift as i64 + 1;
        self.round(&BigDecimal::new(signed(negative, mantissa), scale))
    }

    /// Correctly rounded square root, via an integer square root with a sticky
    /// digit
    ///
    /// # Panics
    /// Panics if `value` is negative.
    pub fn sqrt(&self, value: &BigDecimal) -> BigDecimal {
        assert!(
            value.sign() != Sign::Minus,
            "square root of a negative decimal"
        );
        if value.is_zero() {
            return BigDecimal::zero();
        }

        let (mantissa, scale) = value.as_bigint_and_exponent();
        let mut shift = (2 * (self.precision() as i64 + 1) - value.digits() as i64).max(0);
        if (scale + shift) % 2 != 0 {
            shift += 1;
        }

        let radicand = mantissa.magnitude() * pow10(shift as u64);
        let root = radicand.sqrt();
        let exact = &root * &root == radicand;

        let mut digits = root * 10u32;
        if !exact {
            digits += 1u32;
        }
        self.round(&BigDecimal::new(signed(false, digits), (scale + shift) / 2 + 1))
    }

    /// `value^exponent`, computed exactly and rounded once
    ///
    /// # Panics
    /// Panics if `value` is zero and `exponent` is negative.
    pub fn powi(&self, value: &BigDecimal, exponent: i32) -> BigDecimal {
        let mut exact = BigDecimal::one();
        for _ in 0..exponent.unsigned_abs() {
            exact = exact * value;
        }
        if exponent < 0 {
            self.div(&BigDecimal::one(), &exact)
        } else {
            self.round(&exact)
        }
    }
}

impl Default for NumericContext {
    fn default() -> Self {
        Self::STANDARD
    }
}

fn pow10(exponent: u64) -> BigUint {
    BigUint::from(10u32).pow(exponent as u32)
}

fn signed(negative: bool, magnitude: BigUint) -> BigInt {
    let sign = if negative { Sign::Minus } else { Sign::Plus };
    BigInt::from_biguint(sign, magnitude)
}
