//! Decimal strings at the JSON boundary
//!
//! Values enter and leave the simulation only as decimal strings. Binary floats,
//! integers, booleans and malformed text are refused with
//! [`NumericError::IllegalValue`] so no value is ever silently rounded on the way in.

use crate::dec::Dec;
use crate::error::{NumericError, Result};
use bigdecimal::BigDecimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Fractional digits kept when a value is written out
pub const OUTPUT_FRACTION_DIGITS: i64 = 18;

/// Largest decimal exponent (in either direction) accepted on input
pub const MAX_INPUT_EXPONENT: u64 = 1_000;

/// Parse a decimal string exactly (no rounding is applied to input)
///
/// Values whose scale exceeds [`MAX_INPUT_EXPONENT`] are refused: plain
/// rendering spells out every one of those zeros.
pub fn parse_decimal(text: &str) -> Result<Dec> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(NumericError::illegal(text, "empty decimal string"));
    }
    let value =
        BigDecimal::from_str(trimmed).map_err(|e| NumericError::illegal(text, e.to_string()))?;
    let (_, scale) = value.as_bigint_and_exponent();
    if scale.unsigned_abs() > MAX_INPUT_EXPONENT {
        return Err(NumericError::illegal(
            text,
            format!("exponent beyond ±{MAX_INPUT_EXPONENT}"),
        ));
    }
    Ok(Dec::exact(value))
}

/// Format a value for output: rounded to [`OUTPUT_FRACTION_DIGITS`] places, with
/// trailing zeros and a trailing point removed
pub fn format_decimal(value: &Dec) -> String {
    value.quantize(OUTPUT_FRACTION_DIGITS).to_plain_string()
}

impl FromStr for Dec {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self> {
        parse_decimal(s)
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_decimal(self))
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(DecVisitor)
    }
}

struct DecVisitor;

impl DecVisitor {
    fn refuse<E: de::Error>(value: impl ToString, kind: &str) -> E {
        E::custom(NumericError::illegal(
            value.to_string(),
            format!("expected a decimal string, found {kind}"),
        ))
    }
}

impl<'de> Visitor<'de> for DecVisitor {
    type Value = Dec;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a decimal string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Dec, E> {
        parse_decimal(v).map_err(E::custom)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Dec, E> {
        Err(Self::refuse(v, "a boolean"))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Dec, E> {
        Err(Self::refuse(v, "an integer"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Dec, E> {
        Err(Self::refuse(v, "an integer"))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Dec, E> {
        Err(Self::refuse(v, "a binary float"))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Dec, E> {
        Err(Self::refuse("null", "null"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_plain_and_scientific() {
        assert_eq!(parse_decimal("1.5").unwrap(), Dec::from(3) / Dec::from(2));
        assert_eq!(parse_decimal(" 2e3 ").unwrap(), Dec::from(2000));
        assert_eq!(parse_decimal("-0.25").unwrap().to_plain_string(), "-0.25");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", "  ", "abc", "1.2.3", "NaN", "inf"] {
            assert!(
                matches!(parse_decimal(text), Err(NumericError::IllegalValue { .. })),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_oversized_exponents() {
        for text in ["1e1000000000", "1e-1000000000", "5e1001"] {
            assert!(
                matches!(parse_decimal(text), Err(NumericError::IllegalValue { .. })),
                "accepted {text:?}"
            );
        }
        let largest = parse_decimal("1e1000").unwrap();
        assert_eq!(largest.to_plain_string().len(), 1001);
        assert!(parse_decimal("1e-1000").unwrap().is_positive());
    }

    #[test]
    fn test_format_limits_fraction_digits() {
        let third = Dec::one() / Dec::from(3);
        assert_eq!(format_decimal(&third), "0.333333333333333333");
        let two_thirds = Dec::from(2) / Dec::from(3);
        assert_eq!(format_decimal(&two_thirds), "0.666666666666666667");
        assert_eq!(format_decimal(&parse_decimal("1000.000").unwrap()), "1000");
        assert_eq!(format_decimal(&parse_decimal("0.10").unwrap()), "0.1");
    }

    #[test]
    fn test_format_tie_rounds_down() {
        let tie = parse_decimal("0.0000000000000000125").unwrap();
        assert_eq!(format_decimal(&tie), "0.000000000000000012");
        let tiny = parse_decimal("0.0000000000000000001").unwrap();
        assert_eq!(format_decimal(&tiny), "0");
    }

    #[test]
    fn test_serde_string_roundtrip() {
        let value = parse_decimal("12.3400").unwrap();
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"12.34\"");
        let back: Dec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_deserialize_refuses_numbers() {
        for json in ["1.5", "3", "-2", "true", "null"] {
            let error = serde_json::from_str::<Dec>(json).unwrap_err();
            assert!(
                error.to_string().contains("Illegal value"),
                "unexpected error for {json}: {error}"
            );
        }
    }

    #[test]
    fn test_deserialize_refuses_malformed_string() {
        let error = serde_json::from_str::<Dec>("\"1.2.3\"").unwrap_err();
        assert!(error.to_string().contains("Illegal value"));
    }
}
