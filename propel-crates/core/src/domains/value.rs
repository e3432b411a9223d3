use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::Arc;

use super::INT_MINUS_INFINITY;
use super::INT_PLUS_INFINITY;

/// A single member of a [`Domain`](super::Domain).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Real(f64),
    Int(i64),
    Bool(bool),
    Symbol(Arc<str>),
}

impl Value {
    /// The numeric view of the value; booleans are `0` and `1`, and the integer infinities map
    /// onto the real ones.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Real(value) => Some(*value),
            Value::Int(value) => Some(int_to_f64(*value)),
            Value::Bool(value) => Some(if *value { 1.0 } else { 0.0 }),
            Value::Symbol(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            Value::Bool(value) => Some(i64::from(*value)),
            Value::Real(_) | Value::Symbol(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Value::Symbol(_))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Real(value) if *value == f64::INFINITY => write!(f, "+inf"),
            Value::Real(value) if *value == f64::NEG_INFINITY => write!(f, "-inf"),
            Value::Real(value) => write!(f, "{value}"),
            Value::Int(INT_PLUS_INFINITY) => write!(f, "+inf"),
            Value::Int(INT_MINUS_INFINITY) => write!(f, "-inf"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Symbol(symbol) => write!(f, "{symbol}"),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Symbol(value.into())
    }
}

pub(crate) fn int_to_f64(value: i64) -> f64 {
    match value {
        INT_PLUS_INFINITY => f64::INFINITY,
        INT_MINUS_INFINITY => f64::NEG_INFINITY,
        value => value as f64,
    }
}
