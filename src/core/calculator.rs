//! Calculator - four-operation arithmetic with per-session history
//!
//! A [`CalculatorSession`] lives only as long as one visit to the
//! calculator menu; nothing here is persisted.

use super::InputError;

/// Supported operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Operation::Add => "➕",
            Operation::Subtract => "➖",
            Operation::Multiply => "✖️",
            Operation::Divide => "➗",
        }
    }

    fn apply(&self, a: f64, b: f64) -> Outcome {
        match self {
            Operation::Add => Outcome::Value(a + b),
            Operation::Subtract => Outcome::Value(a - b),
            Operation::Multiply => Outcome::Value(a * b),
            Operation::Divide if b == 0.0 => Outcome::Undefined,
            Operation::Divide => Outcome::Value(a / b),
        }
    }
}

/// Result slot of a calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Value(f64),
    /// Division by zero
    Undefined,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Value(v) => write!(f, "{}", v),
            Outcome::Undefined => write!(f, "Undefined (division by zero)"),
        }
    }
}

/// One evaluated expression
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRecord {
    pub operand1: f64,
    pub operation: Operation,
    pub operand2: f64,
    pub result: Outcome,
}

impl std::fmt::Display for CalculationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.operand1,
            self.operation.symbol(),
            self.operand2,
            self.result
        )
    }
}

/// Append-only history of one calculator visit
#[derive(Debug, Default)]
pub struct CalculatorSession {
    history: Vec<CalculationRecord>,
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate and record. Division by zero is recorded as
    /// [`Outcome::Undefined`], not rejected.
    pub fn evaluate(&mut self, operation: Operation, a: f64, b: f64) -> &CalculationRecord {
        self.history.push(CalculationRecord {
            operand1: a,
            operation,
            operand2: b,
            result: operation.apply(a, b),
        });
        &self.history[self.history.len() - 1]
    }

    pub fn history(&self) -> &[CalculationRecord] {
        &self.history
    }
}

/// Parse an operand typed by the user. Only finite numbers are accepted.
pub fn parse_operand(input: &str) -> Result<f64, InputError> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InputError::InvalidNumber(trimmed.to_string())),
    }
}
