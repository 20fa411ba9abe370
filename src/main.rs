// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;
use std::process::ExitCode;

// Use library instead of local modules
use decimal_calculator::{logging, CalculationResult, Evaluator};

fn main() -> Result<ExitCode> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "eval" {
        // One-shot mode
        run_eval(&args[2..])
    } else {
        // UI mode (default)
        run_ui_mode()
    }
}

fn run_eval(args: &[String]) -> Result<ExitCode> {
    logging::init("warn");

    let [num1, operator, num2] = args else {
        eprintln!("Usage: decimal-calculator eval <num1> <operator> <num2>");
        eprintln!("   Operators: + − × ÷");
        return Ok(ExitCode::from(2));
    };

    match Evaluator::new().evaluate(num1, num2, operator) {
        CalculationResult::Success { value } => {
            println!("{}", value);
            Ok(ExitCode::SUCCESS)
        }
        CalculationResult::Failure { error } => {
            eprintln!("❌ {}", error);
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<ExitCode> {
    // No tracing subscriber here: log lines would draw over the UI
    let mut app = ui::App::new(Evaluator::new());
    ui::run_ui(&mut app)?;

    Ok(ExitCode::SUCCESS)
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<ExitCode> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or evaluate directly: decimal-calculator eval 10 ÷ 4");
    eprintln!("   Or use web UI: cargo run --bin calculator-server --features server");
    Ok(ExitCode::FAILURE)
}
