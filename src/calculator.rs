use crate::arithmetic::{self, ArithmeticError};
use meval::shunting_yard::to_rpn;
use meval::tokenizer::{tokenize, Operation, Token};
use thiserror::Error;

/// Text shown in the display after a failed evaluation.
pub const ERROR_MARKER: &str = "Error";

/// Keypad labels as `(label, row, column, column span)`. Row 0 is the display.
pub const KEYPAD: [(&str, i32, i32, i32); 17] = [
    ("7", 1, 0, 1), ("8", 1, 1, 1), ("9", 1, 2, 1), ("/", 1, 3, 1),
    ("4", 2, 0, 1), ("5", 2, 1, 1), ("6", 2, 2, 1), ("*", 2, 3, 1),
    ("1", 3, 0, 1), ("2", 3, 1, 1), ("3", 3, 2, 1), ("-", 3, 3, 1),
    ("0", 4, 0, 1), (".", 4, 1, 1), ("C", 4, 2, 1), ("+", 4, 3, 1),
    ("=", 5, 0, 4),
];

#[derive(Debug, Error, PartialEq)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,
    #[error("invalid expression: {0}")]
    Parse(String),
    #[error("unsupported token: {0}")]
    Unsupported(String),
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
    #[error("result is not a finite number")]
    NonFinite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Input(char),
    Clear,
    Equals,
}

impl Key {
    pub fn from_label(label: &str) -> Option<Self> {
        let mut chars = label.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::from_char(c)
    }

    /// Maps a typed character to a key. Anything the evaluator can't use is ignored.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '=' => Some(Key::Equals),
            'c' | 'C' => Some(Key::Clear),
            '0'..='9' | '.' | '+' | '-' | '*' | '/' | '(' | ')' => Some(Key::Input(c)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Edited { display: String },
    Cleared,
    Evaluated { display: String, value: f64 },
    Failed { reason: String },
}

/// The calculator's expression buffer.
#[derive(Debug, Default)]
pub struct Session {
    expression: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn press(&mut self, key: Key) -> Outcome {
        match key {
            Key::Input(c) => {
                self.expression.push(c);
                Outcome::Edited {
                    display: self.expression.clone(),
                }
            }
            Key::Clear => {
                self.expression.clear();
                Outcome::Cleared
            }
            Key::Equals => match Calculator::evaluate(&self.expression) {
                Ok(value) => {
                    let display = Calculator::format_result(value);
                    self.expression = display.clone();
                    Outcome::Evaluated { display, value }
                }
                Err(e) => {
                    tracing::debug!(expression = %self.expression, error = %e, "evaluation failed");
                    self.expression.clear();
                    Outcome::Failed {
                        reason: e.to_string(),
                    }
                }
            },
        }
    }
}

pub struct Calculator;

impl Calculator {
    pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
        let cleaned = expression
            .trim()
            .replace('×', "*")
            .replace('÷', "/");
        if cleaned.is_empty() {
            return Err(EvalError::Empty);
        }

        let tokens = tokenize(&cleaned).map_err(|e| EvalError::Parse(e.to_string()))?;
        let rpn = to_rpn(&tokens).map_err(|e| EvalError::Parse(e.to_string()))?;

        let mut stack: Vec<f64> = Vec::with_capacity(rpn.len());
        for token in rpn {
            match token {
                Token::Number(n) => stack.push(n),
                Token::Unary(op) => {
                    let a = pop(&mut stack)?;
                    match op {
                        Operation::Plus => stack.push(a),
                        Operation::Minus => stack.push(-a),
                        other => return Err(EvalError::Unsupported(format!("{:?}", other))),
                    }
                }
                Token::Binary(op) => {
                    let b = pop(&mut stack)?;
                    let a = pop(&mut stack)?;
                    let value = match op {
                        Operation::Plus => arithmetic::add(a, b),
                        Operation::Minus => arithmetic::subtract(a, b),
                        Operation::Times => arithmetic::multiply(a, b),
                        Operation::Div => arithmetic::divide(a, b)?,
                        other => return Err(EvalError::Unsupported(format!("{:?}", other))),
                    };
                    stack.push(value);
                }
                other => return Err(EvalError::Unsupported(format!("{:?}", other))),
            }
        }

        let result = pop(&mut stack)?;
        if !stack.is_empty() {
            return Err(EvalError::Parse("too many operands".to_string()));
        }
        if !result.is_finite() {
            return Err(EvalError::NonFinite);
        }
        Ok(result)
    }

    pub fn format_result(result: f64) -> String {
        if result == 0.0 {
            return "0".to_string();
        }
        // Whole numbers print without a fraction while they still fit an i64 exactly
        if result.fract() == 0.0 && result.abs() < 1e15 {
            return format!("{}", result as i64);
        }
        if result.fract() == 0.0 {
            return format!("{}", result);
        }

        let rounded = format!("{:.10}", result);
        let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
        // Too small for ten decimals; keep every digit so the buffer still holds the value
        if trimmed == "0" || trimmed == "-0" {
            format!("{}", result)
        } else {
            trimmed.to_string()
        }
    }
}

fn pop(stack: &mut Vec<f64>) -> Result<f64, EvalError> {
    stack
        .pop()
        .ok_or_else(|| EvalError::Parse("missing operand".to_string()))
}
