//! Request/row value model
//!
//! A `Value` is what flows through form data, view arguments, row fields and
//! filter predicates. Symbolic values carry a concrete sample next to their
//! symbolic identifier; every comparison uses the sample, and nothing in this
//! module turns a symbolic value into a plain one except `concretize`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Symbolic identifier (the solver's variable name)
pub type SymbolId = String;

/// Which symbolic-value constructor rebuilds a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolicKind {
    Int,
    Str,
}

impl SymbolicKind {
    /// Tag used in transport tokens
    pub fn tag(&self) -> &'static str {
        match self {
            SymbolicKind::Int => "concolic_int",
            SymbolicKind::Str => "concolic_str",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "concolic_int" => Some(SymbolicKind::Int),
            "concolic_str" => Some(SymbolicKind::Str),
            _ => None,
        }
    }
}

impl fmt::Display for SymbolicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Symbolic value: identifier plus the concrete sample of the current run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SymbolicValue {
    Int { id: SymbolId, concrete: i64 },
    Str { id: SymbolId, concrete: String },
}

impl SymbolicValue {
    pub fn int(id: impl Into<SymbolId>, concrete: i64) -> Self {
        SymbolicValue::Int {
            id: id.into(),
            concrete,
        }
    }

    pub fn string(id: impl Into<SymbolId>, concrete: impl Into<String>) -> Self {
        SymbolicValue::Str {
            id: id.into(),
            concrete: concrete.into(),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            SymbolicValue::Int { id, .. } | SymbolicValue::Str { id, .. } => id,
        }
    }

    pub fn kind(&self) -> SymbolicKind {
        match self {
            SymbolicValue::Int { .. } => SymbolicKind::Int,
            SymbolicValue::Str { .. } => SymbolicKind::Str,
        }
    }

    /// Drop the symbolic part and keep the sample
    pub fn concretize(&self) -> Value {
        match self {
            SymbolicValue::Int { concrete, .. } => Value::Int(*concrete),
            SymbolicValue::Str { concrete, .. } => Value::Str(concrete.clone()),
        }
    }
}

/// A concrete or symbolic value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Symbolic(SymbolicValue),
}

impl Value {
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Value::Symbolic(_))
    }

    pub fn as_symbolic(&self) -> Option<&SymbolicValue> {
        match self {
            Value::Symbolic(sym) => Some(sym),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Concrete view of the value (symbolic values yield their sample)
    pub fn concrete(&self) -> Value {
        match self {
            Value::Symbolic(sym) => sym.concretize(),
            other => other.clone(),
        }
    }

    /// Render a concrete value for form transport.
    ///
    /// Symbolic values must be replaced by tokens before this point; if one
    /// slips through, its sample is rendered.
    pub fn to_form_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => if *b { "True" } else { "False" }.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Str(s) => s.clone(),
            Value::Symbolic(sym) => sym.concretize().to_form_string(),
        }
    }

    /// Total order over concrete samples of comparable types.
    ///
    /// Returns `None` for mismatched types, `Null`, and NaN.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self.concrete(), other.concrete()) {
            (Value::Int(l), Value::Int(r)) => Some(l.cmp(&r)),
            (Value::Int(l), Value::Float(r)) => (l as f64).partial_cmp(&r),
            (Value::Float(l), Value::Int(r)) => l.partial_cmp(&(r as f64)),
            (Value::Float(l), Value::Float(r)) => l.partial_cmp(&r),
            (Value::Str(l), Value::Str(r)) => Some(l.cmp(&r)),
            (Value::Bool(l), Value::Bool(r)) => Some(l.cmp(&r)),
            _ => None,
        }
    }

    /// Concrete sample read as the type of `like`.
    ///
    /// Form input arrives as strings; a string compared with a number or a
    /// boolean is parsed, and anything compared with a string is rendered.
    /// Values that do not parse are returned unchanged (and stay
    /// incomparable).
    pub fn coerced_like(&self, like: &Value) -> Value {
        let concrete = self.concrete();
        let converted = match (like, &concrete) {
            (_, Value::Null) | (Value::Null, _) => None,
            (Value::Int(_), Value::Str(s)) => Value::parse_int(s),
            (Value::Float(_), Value::Str(s)) => Value::parse_float(s),
            (Value::Bool(_), Value::Str(s)) => Value::parse_bool(s),
            (Value::Str(_), Value::Str(_)) => None,
            (Value::Str(_), other) => Some(Value::Str(other.to_form_string())),
            _ => None,
        };
        converted.unwrap_or(concrete)
    }

    /// Integer form input (`" 10 "` is 10, `"10.5"` is not an integer)
    pub fn parse_int(s: &str) -> Option<Value> {
        s.trim().parse().ok().map(Value::Int)
    }

    pub fn parse_float(s: &str) -> Option<Value> {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|f| !f.is_nan())
            .map(Value::Float)
    }

    /// Boolean form input: `True`/`False` as rendered, plus `1`/`0`
    pub fn parse_bool(s: &str) -> Option<Value> {
        match s.trim() {
            "True" | "true" | "1" => Some(Value::Bool(true)),
            "False" | "false" | "0" => Some(Value::Bool(false)),
            _ => None,
        }
    }

    /// Equality on concrete samples (`exact` lookup semantics)
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self.concrete(), other.concrete()) {
            (Value::Null, Value::Null) => true,
            (l, r) => l.compare(&r) == Some(Ordering::Equal),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "None"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Symbolic(sym) => write!(f, "{}({}={})", sym.kind(), sym.id(), sym.concretize()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<SymbolicValue> for Value {
    fn from(v: SymbolicValue) -> Self {
        Value::Symbolic(v)
    }
}
