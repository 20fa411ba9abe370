// ➗ Operators - The four accepted arithmetic symbols
// Symbol lookup and exact decimal application

use rust_decimal::Decimal;
use std::fmt;

// ============================================================================
// OPERATOR DEFINITION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Add,
    /// `−` (U+2212 MINUS SIGN)
    Subtract,
    /// `×` (U+00D7 MULTIPLICATION SIGN)
    Multiply,
    /// `÷` (U+00F7 DIVISION SIGN)
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// Look up an operator by its display symbol. No trimming, no aliases.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Operator::Add),
            "−" => Some(Operator::Subtract),
            "×" => Some(Operator::Multiply),
            "÷" => Some(Operator::Divide),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "−",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Subtract => "subtract",
            Operator::Multiply => "multiply",
            Operator::Divide => "divide",
        }
    }

    /// Apply the operation. `None` means the result is not representable
    /// (overflow, or a zero divisor).
    pub fn apply(&self, lhs: Decimal, rhs: Decimal) -> Option<Decimal> {
        match self {
            Operator::Add => lhs.checked_add(rhs),
            Operator::Subtract => lhs.checked_sub(rhs),
            Operator::Multiply => lhs.checked_mul(rhs),
            Operator::Divide => lhs.checked_div(rhs),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_symbol_lookup() {
        assert_eq!(Operator::from_symbol("+"), Some(Operator::Add));
        assert_eq!(Operator::from_symbol("−"), Some(Operator::Subtract));
        assert_eq!(Operator::from_symbol("×"), Some(Operator::Multiply));
        assert_eq!(Operator::from_symbol("÷"), Some(Operator::Divide));
    }

    #[test]
    fn test_ascii_lookalikes_rejected() {
        // Only the typographic symbols are accepted
        for symbol in ["-", "*", "/", "x", "", " +", "+ ", "add"] {
            assert_eq!(Operator::from_symbol(symbol), None, "symbol {:?}", symbol);
        }
    }

    #[test]
    fn test_symbol_is_inverse_of_lookup() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
            assert_eq!(op.to_string(), op.symbol());
        }
    }

    #[test]
    fn test_apply() {
        assert_eq!(Operator::Add.apply(dec("0.1"), dec("0.2")), Some(dec("0.3")));
        assert_eq!(Operator::Subtract.apply(dec("5"), dec("7.5")), Some(dec("-2.5")));
        assert_eq!(Operator::Multiply.apply(dec("1.5"), dec("4")), Some(dec("6.0")));
        assert_eq!(Operator::Divide.apply(dec("10"), dec("4")), Some(dec("2.5")));
    }

    #[test]
    fn test_apply_overflow_and_zero_divisor() {
        assert_eq!(Operator::Multiply.apply(Decimal::MAX, dec("2")), None);
        assert_eq!(Operator::Add.apply(Decimal::MAX, Decimal::MAX), None);
        assert_eq!(Operator::Divide.apply(dec("1"), Decimal::ZERO), None);
    }
}
