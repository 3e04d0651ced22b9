//! Native values and resolution outcomes.

use std::fmt;

use lesstree::Node;

/// A plain value a declaration materializes to.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    String(String),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Number(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// Outcome of resolving one expression.
///
/// Besides a native [`Value`], resolution can degrade: a reference to a
/// variable that has no value yet, or a node with no native form. Both are
/// kept explicit so callers decide whether to fail, warn or default.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved {
    Value(Value),
    /// Reference to a variable not declared (yet) at that point of the walk.
    Unresolved(String),
    /// A node passed through as-is.
    Unsupported(Node),
}

impl Resolved {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Resolved::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Resolved::Value(Value::String(_)))
    }

    pub fn is_degraded(&self) -> bool {
        !matches!(self, Resolved::Value(_))
    }
}

impl From<Value> for Resolved {
    fn from(value: Value) -> Self {
        Resolved::Value(value)
    }
}

impl From<f64> for Resolved {
    fn from(n: f64) -> Self {
        Resolved::Value(Value::Number(n))
    }
}

impl From<&str> for Resolved {
    fn from(s: &str) -> Self {
        Resolved::Value(Value::from(s))
    }
}

impl From<String> for Resolved {
    fn from(s: String) -> Self {
        Resolved::Value(Value::String(s))
    }
}
