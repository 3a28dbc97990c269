//! `Dec`: the simulation's decimal value type
//!
//! Wraps an exact `BigDecimal` and routes every arithmetic operator through
//! [`NumericContext::STANDARD`], so `a * b / c` in engine code carries the same
//! rounding semantics as an explicit context call.

use crate::context::NumericContext;
use bigdecimal::BigDecimal;
use num_bigint::Sign;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Arbitrary-precision decimal rounded to the standard context
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Dec(BigDecimal);

impl Dec {
    pub fn zero() -> Self {
        Self(BigDecimal::zero())
    }

    pub fn one() -> Self {
        Self(BigDecimal::one())
    }

    /// Wrap a value, rounding it to the standard context
    pub fn from_big_decimal(value: BigDecimal) -> Self {
        Self(NumericContext::STANDARD.round(&value))
    }

    /// Wrap a value exactly as given (used for parsed input, which is never rounded)
    pub(crate) fn exact(value: BigDecimal) -> Self {
        Self(value)
    }

    pub fn as_big_decimal(&self) -> &BigDecimal {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0.sign() == Sign::Plus
    }

    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Correctly rounded square root
    ///
    /// # Panics
    /// Panics on a negative value.
    pub fn sqrt(&self) -> Self {
        Self(NumericContext::STANDARD.sqrt(&self.0))
    }

    /// Integer power, rounded once
    pub fn powi(&self, exponent: i32) -> Self {
        Self(NumericContext::STANDARD.powi(&self.0, exponent))
    }

    pub fn square(&self) -> Self {
        self.powi(2)
    }

    /// Round to `fraction_digits` places after the point
    pub fn quantize(&self, fraction_digits: i64) -> Self {
        Self(NumericContext::STANDARD.quantize(&self.0, fraction_digits))
    }

    /// Plain (non-scientific) rendering with trailing zeros and point removed
    pub fn to_plain_string(&self) -> String {
        self.0.normalized().to_plain_string()
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_string())
    }
}

impl fmt::Debug for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dec({})", self.to_plain_string())
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Dec {
                fn from(value: $t) -> Self {
                    Self(BigDecimal::from(value))
                }
            }
        )*
    };
}

impl_from_int!(u32, u64, i32, i64);

macro_rules! impl_binop {
    ($imp:ident, $method:ident, $op:ident) => {
        impl $imp<&Dec> for &Dec {
            type Output = Dec;

            fn $method(self, rhs: &Dec) -> Dec {
                Dec(NumericContext::STANDARD.$op(&self.0, &rhs.0))
            }
        }

        impl $imp<Dec> for Dec {
            type Output = Dec;

            fn $method(self, rhs: Dec) -> Dec {
                (&self).$method(&rhs)
            }
        }

        impl $imp<&Dec> for Dec {
            type Output = Dec;

            fn $method(self, rhs: &Dec) -> Dec {
                (&self).$method(rhs)
            }
        }

        impl $imp<Dec> for &Dec {
            type Output = Dec;

            fn $method(self, rhs: Dec) -> Dec {
                self.$method(&rhs)
            }
        }
    };
}

impl_binop!(Add, add, add);
impl_binop!(Sub, sub, sub);
impl_binop!(Mul, mul, mul);
impl_binop!(Div, div, div);

impl AddAssign<&Dec> for Dec {
    fn add_assign(&mut self, rhs: &Dec) {
        *self = &*self + rhs;
    }
}

impl AddAssign<Dec> for Dec {
    fn add_assign(&mut self, rhs: Dec) {
        *self = &*self + &rhs;
    }
}

impl SubAssign<&Dec> for Dec {
    fn sub_assign(&mut self, rhs: &Dec) {
        *self = &*self - rhs;
    }
}

impl SubAssign<Dec> for Dec {
    fn sub_assign(&mut self, rhs: Dec) {
        *self = &*self - &rhs;
    }
}

impl Neg for Dec {
    type Output = Dec;

    fn neg(self) -> Dec {
        Dec(-self.0)
    }
}

impl Neg for &Dec {
    type Output = Dec;

    fn neg(self) -> Dec {
        Dec(-&self.0)
    }
}
