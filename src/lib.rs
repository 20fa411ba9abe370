// Decimal Calculator - Core Library
// Exposes the evaluator for use in the CLI, the TUI, the API server, and tests

pub mod config;
pub mod evaluator;
pub mod logging;
pub mod number;
pub mod operator;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use evaluator::{
    evaluate,
    CalcError, CalculationObserver, CalculationRecord, CalculationResult,
    Evaluator, TracingObserver,
};
pub use number::{parse_operand, OperandError, ResultValue, MAX_FRACTION_DIGITS};
pub use operator::Operator;
pub use config::ServerConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
