//! Calculator flow
//!
//! Each visit starts a fresh [`CalculatorSession`]; its history is gone
//! once the user goes back to the main menu.

use std::io::{BufRead, Write};

use super::console::Console;
use super::SessionError;
use crate::core::calculator::{parse_operand, CalculatorSession, Operation};
use crate::core::InputError;

/// Menu option 5
pub fn run<R: BufRead, W: Write>(con: &mut Console<R, W>) -> Result<(), SessionError> {
    con.heading("🧮 ENHANCED CALCULATOR", 40)?;
    let mut calc = CalculatorSession::new();

    loop {
        writeln!(con, "\nOptions:")?;
        writeln!(con, "1. ➕ Addition")?;
        writeln!(con, "2. ➖ Subtraction")?;
        writeln!(con, "3. ✖️  Multiplication")?;
        writeln!(con, "4. ➗ Division")?;
        writeln!(con, "5. 📜 View History")?;
        writeln!(con, "6. ↩️  Back to Menu")?;

        let operation = match con.prompt("\nSelect operation (1-6): ")?.trim() {
            "1" => Operation::Add,
            "2" => Operation::Subtract,
            "3" => Operation::Multiply,
            "4" => Operation::Divide,
            "5" => {
                show_history(con, &calc)?;
                continue;
            }
            "6" => break,
            other => {
                con.error(InputError::InvalidChoice {
                    input: other.to_string(),
                    max: 6,
                })?;
                continue;
            }
        };

        let Some(a) = read_operand(con, "Enter first number: ")? else {
            continue;
        };
        let Some(b) = read_operand(con, "Enter second number: ")? else {
            continue;
        };

        let record = calc.evaluate(operation, a, b).to_string();
        writeln!(con, "\n{} RESULT: {}", operation.emoji(), record)?;
    }

    tracing::debug!(calculations = calc.history().len(), "calculator session ended");
    Ok(())
}

fn show_history<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    calc: &CalculatorSession,
) -> Result<(), SessionError> {
    if calc.history().is_empty() {
        writeln!(con, "\nNo calculations yet!")?;
        return Ok(());
    }

    writeln!(con, "\n📜 CALCULATION HISTORY:")?;
    for (i, record) in calc.history().iter().enumerate() {
        writeln!(con, "{}. {}", i + 1, record)?;
    }
    Ok(())
}

fn read_operand<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    label: &str,
) -> Result<Option<f64>, SessionError> {
    let raw = con.prompt(label)?;
    match parse_operand(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            con.error(e)?;
            Ok(None)
        }
    }
}
