//! Filter predicates and filter-call arguments

use serde::{Deserialize, Serialize};
use std::fmt;

use super::lookup::Lookup;
use super::model::Row;
use crate::shared::models::Value;

/// One query condition: `column <lookup> value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPredicate {
    pub column: String,
    pub lookup: Lookup,
    pub value: Value,
}

impl FilterPredicate {
    pub fn new(column: impl Into<String>, lookup: Lookup, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            lookup,
            value: value.into(),
        }
    }

    /// Same column and value, different lookup
    pub fn with_lookup(&self, lookup: Lookup) -> Self {
        Self {
            column: self.column.clone(),
            lookup,
            value: self.value.clone(),
        }
    }

    /// Keyword form, e.g. `zoobars__gt`
    pub fn key(&self) -> String {
        format!("{}__{}", self.column, self.lookup)
    }

    pub fn matches(&self, row: &Row) -> bool {
        let field = row.get(&self.column).unwrap_or(&Value::Null);
        self.lookup.evaluate(field, &self.value)
    }
}

impl fmt::Display for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key(), self.value)
    }
}

/// Keyword arguments of one filter call, in call order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterArgs {
    args: Vec<(String, Value)>,
}

impl FilterArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-keyword call, e.g. `FilterArgs::single("zoobars__gt", 10)`
    pub fn single(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new().arg(key, value)
    }

    /// Builder: append a keyword
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.push((key.into(), value.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.args.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> Vec<&str> {
        self.args.iter().map(|(k, _)| k.as_str()).collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FilterArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            args: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
