// 🔢 Numbers - Operand parsing and result formatting
// Everything stays in base-10 decimal; no binary float is ever involved

use rust_decimal::Decimal;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Non-integral results are rounded to this many fractional digits.
pub const MAX_FRACTION_DIGITS: u32 = 10;

// ============================================================================
// OPERAND PARSING
// ============================================================================

/// Integer digits that can still fit in a `Decimal` (max is ~7.9e28).
const MAX_INTEGER_DIGITS: i64 = 29;

/// Anything with its first significant digit further right than this
/// rounds to zero at `Decimal`'s 28 fractional digits.
const MIN_POINT_POSITION: i64 = -60;

/// Why operand text could not become a `Decimal`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OperandError {
    /// Not a decimal number at all
    #[error("not a decimal number")]
    Invalid,

    /// Well-formed, but too large for `Decimal`
    #[error("outside the representable decimal range")]
    OutOfRange,
}

/// Parse operand text as an exact decimal.
///
/// Surrounding whitespace is ignored. Plain (`-3.5`, `.5`) and scientific
/// (`2.5e-4`) notation are accepted; `NaN` and infinities are not. Digits
/// beyond 28 fractional places are rounded, whichever notation was used.
pub fn parse_operand(text: &str) -> Result<Decimal, OperandError> {
    let (negative, unsigned) = split_sign(text.trim());

    match unsigned.split_once(|c: char| c == 'e' || c == 'E') {
        Some((mantissa, exponent)) => {
            let (int, frac) = split_plain(mantissa).ok_or(OperandError::Invalid)?;
            let exponent = parse_exponent(exponent).ok_or(OperandError::Invalid)?;
            shift_point(negative, int, frac, exponent)
        }
        None => {
            let (int, frac) = split_plain(unsigned).ok_or(OperandError::Invalid)?;
            decimal_from_parts(negative, int, frac)
        }
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

/// `12.50` -> (`12`, `50`). At least one digit, no sign.
fn split_plain(text: &str) -> Option<(&str, &str)> {
    let (int, frac) = text.split_once('.').unwrap_or((text, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    if (int.is_empty() && frac.is_empty()) || !all_digits(int) || !all_digits(frac) {
        return None;
    }
    Some((int, frac))
}

/// Exponents too large for `i64` saturate; they are out of range either way.
fn parse_exponent(text: &str) -> Option<i64> {
    let (negative, digits) = split_sign(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Rewrite `int.frac * 10^exponent` as plain digits and parse that.
fn shift_point(negative: bool, int: &str, frac: &str, exponent: i64) -> Result<Decimal, OperandError> {
    let digits = format!("{}{}", int, frac);
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let leading_zeros = (digits.len() - significant.len()) as i64;
    let point = (int.len() as i64 - leading_zeros).saturating_add(exponent);

    if point > MAX_INTEGER_DIGITS {
        return Err(OperandError::OutOfRange);
    }
    if point < MIN_POINT_POSITION {
        return Ok(Decimal::ZERO);
    }

    let len = significant.len() as i64;
    let (new_int, new_frac) = if point <= 0 {
        (String::new(), format!("{}{}", "0".repeat(-point as usize), significant))
    } else if point >= len {
        (format!("{}{}", significant, "0".repeat((point - len) as usize)), String::new())
    } else {
        let (head, tail) = significant.split_at(point as usize);
        (head.to_string(), tail.to_string())
    };

    decimal_from_parts(negative, &new_int, &new_frac)
}

/// Parse validated digit groups. `Decimal::from_str` rounds excess
/// fractional digits and fails only when the integer part overflows.
fn decimal_from_parts(negative: bool, int: &str, frac: &str) -> Result<Decimal, OperandError> {
    let int = int.trim_start_matches('0');
    let int = if int.is_empty() { "0" } else { int };
    let sign = if negative { "-" } else { "" };

    let canonical = if frac.is_empty() {
        format!("{}{}", sign, int)
    } else {
        format!("{}{}.{}", sign, int, frac)
    };

    Decimal::from_str(&canonical).map_err(|_| OperandError::OutOfRange)
}

// ============================================================================
// RESULT VALUE
// ============================================================================

/// A calculation result ready for display.
///
/// Integral values carry no fractional part; everything else is rounded
/// (half to even) to at most [`MAX_FRACTION_DIGITS`] digits with trailing
/// zeros stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultValue(Decimal);

impl ResultValue {
    pub fn from_decimal(value: Decimal) -> Self {
        let rounded = if value.fract().is_zero() {
            value.trunc()
        } else {
            value.round_dp(MAX_FRACTION_DIGITS)
        };

        // normalize() also folds -0 into 0
        ResultValue(rounded.normalize())
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_integer(&self) -> bool {
        self.0.fract().is_zero()
    }
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Serialized as a bare JSON number with exactly the displayed digits.
impl Serialize for ResultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawValue::from_string(self.0.to_string()).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }
}

// ============================================================================
// TESTS
// ============================================================================
