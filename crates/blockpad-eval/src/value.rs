//! Runtime values for the blockpad interpreter.

use std::fmt;

/// A runtime value in generated blockpad script.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The result of an effectful call; carries no data.
    Null,
    /// A string value.
    String(String),
    /// A numeric value (always f64).
    Number(f64),
    /// A boolean value.
    Boolean(bool),
}

impl Value {
    /// Coerce this value to a string, the way the output capability sees it.
    pub fn to_string_value(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::String(s) => s.clone(),
            Value::Number(n) => {
                if n.is_nan() {
                    "NaN".to_string()
                } else if n.is_infinite() {
                    if *n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
                } else if *n == n.trunc() && n.abs() < 1e15 {
                    // Integer-like numbers without decimal point
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            Value::Boolean(b) => if *b { "true" } else { "false" }.to_string(),
        }
    }

    /// Coerce this value to a number.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
            Value::Number(n) => *n,
            Value::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// `+`: string concatenation when either side is a string, numeric
    /// addition otherwise.
    pub fn add(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::String(_), _) | (_, Value::String(_)) => Value::String(format!(
                "{}{}",
                self.to_string_value(),
                other.to_string_value()
            )),
            _ => Value::Number(self.to_number() + other.to_number()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_value())
    }
}
