// 🧮 Evaluator - Single binary operation with exact decimal arithmetic
// Validates operator and operands, computes, formats, reports to an observer

use crate::number::{parse_operand, OperandError, ResultValue};
use crate::operator::Operator;
use rust_decimal::Decimal;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// RESULT TYPES
// ============================================================================

/// Every way a calculation can fail. The `Display` text is what users see.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Invalid operator: {0}")]
    InvalidOperator(String),

    #[error("Please enter valid numbers")]
    InvalidNumber,

    #[error("Cannot divide by zero")]
    DivisionByZero,

    /// Overflow or any other computational failure. Details stay in the logs.
    #[error("An unexpected error occurred")]
    Unexpected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalculationResult {
    Success { value: ResultValue },
    Failure { error: CalcError },
}

impl CalculationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CalculationResult::Success { .. })
    }

    pub fn value(&self) -> Option<ResultValue> {
        match self {
            CalculationResult::Success { value } => Some(*value),
            CalculationResult::Failure { .. } => None,
        }
    }

    /// Human-readable failure reason, if any
    pub fn message(&self) -> Option<String> {
        match self {
            CalculationResult::Success { .. } => None,
            CalculationResult::Failure { error } => Some(error.to_string()),
        }
    }

    pub fn into_result(self) -> Result<ResultValue, CalcError> {
        match self {
            CalculationResult::Success { value } => Ok(value),
            CalculationResult::Failure { error } => Err(error),
        }
    }
}

impl From<Result<ResultValue, CalcError>> for CalculationResult {
    fn from(result: Result<ResultValue, CalcError>) -> Self {
        match result {
            Ok(value) => CalculationResult::Success { value },
            Err(error) => CalculationResult::Failure { error },
        }
    }
}

// ============================================================================
// OBSERVABILITY
// ============================================================================

/// Diagnostic record of a completed calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationRecord {
    pub operand1: Decimal,
    pub operator: Operator,
    pub operand2: Decimal,
    pub result: ResultValue,
}

/// Sink for calculation diagnostics. Never influences the result.
pub trait CalculationObserver: Send + Sync {
    fn calculated(&self, record: &CalculationRecord);

    /// Called with the trimmed operand text when a well-formed operation
    /// could not be computed (e.g. overflow).
    fn failed(&self, _operand1: &str, _operator: Operator, _operand2: &str) {}
}

/// Default observer: structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CalculationObserver for TracingObserver {
    fn calculated(&self, record: &CalculationRecord) {
        tracing::info!(
            operand1 = %record.operand1,
            operator = %record.operator,
            operand2 = %record.operand2,
            result = %record.result,
            "Calculation: {} {} {} = {}",
            record.operand1,
            record.operator,
            record.operand2,
            record.result
        );
    }

    fn failed(&self, operand1: &str, operator: Operator, operand2: &str) {
        tracing::error!(
            operand1,
            operation = operator.name(),
            operand2,
            "Unexpected error: result not representable"
        );
    }
}

// ============================================================================
// EVALUATOR
// ============================================================================

/// Stateless apart from its observer; cheap to clone and share.
#[derive(Clone)]
pub struct Evaluator {
    observer: Arc<dyn CalculationObserver>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::with_observer(Arc::new(TracingObserver))
    }

    pub fn with_observer(observer: Arc<dyn CalculationObserver>) -> Self {
        Evaluator { observer }
    }

    /// Evaluate `operand1 <operator> operand2`.
    ///
    /// Checks run in a fixed order: operator, operands, zero divisor,
    /// then the computation itself. Never panics; a panicking observer
    /// turns the result into [`CalcError::Unexpected`].
    pub fn evaluate(&self, operand1: &str, operand2: &str, operator: &str) -> CalculationResult {
        self.try_evaluate(operand1, operand2, operator).into()
    }

    fn try_evaluate(
        &self,
        operand1: &str,
        operand2: &str,
        operator: &str,
    ) -> Result<ResultValue, CalcError> {
        let op = Operator::from_symbol(operator)
            .ok_or_else(|| CalcError::InvalidOperator(operator.to_string()))?;

        let (lhs, rhs) = match (parse_operand(operand1), parse_operand(operand2)) {
            (Ok(lhs), Ok(rhs)) => (lhs, rhs),
            (Err(OperandError::Invalid), _) | (_, Err(OperandError::Invalid)) => {
                return Err(CalcError::InvalidNumber)
            }
            // Well-formed but beyond the Decimal range
            _ => return Err(self.unexpected(operand1, op, operand2)),
        };

        if op == Operator::Divide && rhs.is_zero() {
            return Err(CalcError::DivisionByZero);
        }

        let Some(raw) = op.apply(lhs, rhs) else {
            return Err(self.unexpected(operand1, op, operand2));
        };

        let value = ResultValue::from_decimal(raw);
        let record = CalculationRecord {
            operand1: lhs,
            operator: op,
            operand2: rhs,
            result: value,
        };
        self.notify(|observer| observer.calculated(&record))?;

        Ok(value)
    }

    fn unexpected(&self, operand1: &str, op: Operator, operand2: &str) -> CalcError {
        let _ = self.notify(|observer| observer.failed(operand1.trim(), op, operand2.trim()));
        CalcError::Unexpected
    }

    /// Run an observer callback, keeping its panics inside the evaluator.
    fn notify<F>(&self, callback: F) -> Result<(), CalcError>
    where
        F: FnOnce(&dyn CalculationObserver),
    {
        let observer = self.observer.as_ref();
        panic::catch_unwind(AssertUnwindSafe(|| callback(observer))).map_err(|_| CalcError::Unexpected)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator").finish_non_exhaustive()
    }
}

/// Evaluate with the default tracing observer.
pub fn evaluate(operand1: &str, operand2: &str, operator: &str) -> CalculationResult {
    Evaluator::new().evaluate(operand1, operand2, operator)
}

// ============================================================================
// TESTS
// ============================================================================
