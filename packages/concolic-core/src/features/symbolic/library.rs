//! Symbolic-value constructors

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::shared::models::{SymbolicKind, SymbolicValue, Value};

/// Constructors of the external symbolic-value library
pub trait SymbolicLibrary: Send + Sync {
    /// Rebuild the symbolic integer named `id`
    fn make_symbolic_int(&self, id: &str) -> Value;

    /// Rebuild the symbolic string named `id`
    fn make_symbolic_string(&self, id: &str) -> Value;

    /// Kind of `value` if it is symbolic
    fn is_symbolic(&self, value: &Value) -> Option<SymbolicKind> {
        value.as_symbolic().map(SymbolicValue::kind)
    }

    /// Symbolic identifier of `value` if it is symbolic
    fn symbolic_id<'a>(&self, value: &'a Value) -> Option<&'a str> {
        value.as_symbolic().map(SymbolicValue::id)
    }

    /// Dispatch to the constructor matching `kind`
    fn make(&self, kind: SymbolicKind, id: &str) -> Value {
        match kind {
            SymbolicKind::Int => self.make_symbolic_int(id),
            SymbolicKind::Str => self.make_symbolic_string(id),
        }
    }
}

/// Library backed by the concrete samples of the current run.
///
/// The driver records the solver's model here before each request; an
/// identifier without a sample gets `0` / `""`.
#[derive(Debug, Default)]
pub struct SampleLibrary {
    samples: RwLock<HashMap<String, Value>>,
}

impl SampleLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: preload a sample
    pub fn with_sample(self, id: impl Into<String>, sample: impl Into<Value>) -> Self {
        self.set_sample(id, sample);
        self
    }

    pub fn set_sample(&self, id: impl Into<String>, sample: impl Into<Value>) {
        self.samples.write().insert(id.into(), sample.into());
    }

    pub fn clear(&self) {
        self.samples.write().clear();
    }

    fn sample(&self, id: &str) -> Option<Value> {
        self.samples.read().get(id).map(Value::concrete)
    }
}

impl SymbolicLibrary for SampleLibrary {
    fn make_symbolic_int(&self, id: &str) -> Value {
        let concrete = match self.sample(id) {
            Some(Value::Int(i)) => i,
            Some(Value::Str(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        };
        Value::Symbolic(SymbolicValue::int(id, concrete))
    }

    fn make_symbolic_string(&self, id: &str) -> Value {
        let concrete = match self.sample(id) {
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_form_string(),
        };
        Value::Symbolic(SymbolicValue::string(id, concrete))
    }
}
