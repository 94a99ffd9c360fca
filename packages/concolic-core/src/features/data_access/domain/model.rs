//! Model metadata and stored entities

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::lookup::Lookup;
use super::predicate::FilterPredicate;
use crate::errors::{ConcolicError, Result};
use crate::shared::models::Value;

/// Column type, used by SQL backends for DDL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Int,
    Float,
    Text,
    Bool,
}

impl FieldKind {
    /// Concrete value converted to this column type, `None` if it does not
    /// convert (`int("abc")`)
    pub fn convert(&self, value: &Value) -> Option<Value> {
        match (self, value) {
            (_, Value::Null) => Some(Value::Null),
            (FieldKind::Int, Value::Int(_))
            | (FieldKind::Float, Value::Float(_))
            | (FieldKind::Bool, Value::Bool(_))
            | (FieldKind::Text, Value::Str(_)) => Some(value.clone()),
            (FieldKind::Int, Value::Float(f)) if f.fract() == 0.0 => Some(Value::Int(*f as i64)),
            (FieldKind::Float, Value::Int(i)) => Some(Value::Float(*i as f64)),
            (FieldKind::Bool, Value::Int(0)) => Some(Value::Bool(false)),
            (FieldKind::Bool, Value::Int(1)) => Some(Value::Bool(true)),
            (FieldKind::Int, Value::Str(s)) => Value::parse_int(s),
            (FieldKind::Float, Value::Str(s)) => Value::parse_float(s),
            (FieldKind::Bool, Value::Str(s)) => Value::parse_bool(s),
            (FieldKind::Text, other) => Some(Value::Str(other.to_form_string())),
            _ => None,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            FieldKind::Int => "an integer",
            FieldKind::Float => "a number",
            FieldKind::Text => "a string",
            FieldKind::Bool => "a boolean",
        }
    }
}

/// One model column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMeta {
    pub name: String,
    pub kind: FieldKind,
    pub nullable: bool,
}

/// Model description: table name, primary key and columns.
///
/// The primary key is always an integer column named by `pk` and is not
/// listed in `fields`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMeta {
    pub name: String,
    pub table: String,
    pub pk: String,
    pub fields: Vec<FieldMeta>,
}

impl ModelMeta {
    /// New model with table `name.to_lowercase()` and primary key `id`
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            table: name.to_lowercase(),
            name,
            pk: "id".to_string(),
            fields: Vec::new(),
        }
    }

    /// Builder: add a non-null column
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldMeta {
            name: name.into(),
            kind,
            nullable: false,
        });
        self
    }

    /// Builder: add a nullable column
    pub fn nullable_field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldMeta {
            name: name.into(),
            kind,
            nullable: true,
        });
        self
    }

    /// Builder: override the table name
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn has_column(&self, column: &str) -> bool {
        column == self.pk || self.fields.iter().any(|f| f.name == column)
    }

    /// Every column name, primary key first
    pub fn column_names(&self) -> Vec<&str> {
        std::iter::once(self.pk.as_str())
            .chain(self.fields.iter().map(|f| f.name.as_str()))
            .collect()
    }

    /// Split a lookup key such as `zoobars__gt` into column and lookup.
    ///
    /// - a trailing known lookup name is the lookup, otherwise `exact`
    /// - `pk` aliases the primary key column
    /// - anything left besides exactly one column is a FieldError (models
    ///   carry no relations, so there is nothing to join through)
    pub fn solve_lookup(&self, key: &str) -> Result<(String, Lookup)> {
        let mut parts: Vec<&str> = key.split("__").collect();
        let mut lookup = Lookup::Exact;
        if parts.len() > 1 {
            if let Some(explicit) = parts.last().and_then(|last| Lookup::parse(last)) {
                lookup = explicit;
                parts.pop();
            }
        }

        let column = match parts.as_slice() {
            [single] => *single,
            [first, second, ..] => {
                return Err(if self.has_column(first) {
                    ConcolicError::field(format!(
                        "Unsupported lookup '{}' for field '{}' in '{}'",
                        second, first, key
                    ))
                } else {
                    self.unknown_column(first)
                })
            }
            [] => return Err(ConcolicError::field("Empty lookup key")),
        };

        let column = if column == "pk" { self.pk.as_str() } else { column };
        if !self.has_column(column) {
            return Err(self.unknown_column(column));
        }
        Ok((column.to_string(), lookup))
    }

    /// Type of `column`; the primary key is an integer
    pub fn field_kind(&self, column: &str) -> Option<FieldKind> {
        if column == self.pk {
            return Some(FieldKind::Int);
        }
        self.fields.iter().find(|f| f.name == column).map(|f| f.kind)
    }

    /// Convert `value` to the type of `column`.
    ///
    /// A concrete value is replaced by its converted form. A symbolic value
    /// is kept as is (its identifier must survive) once its sample is known
    /// to convert; lookups read the sample as the column type.
    pub fn coerce(&self, column: &str, value: Value) -> Result<Value> {
        let kind = self.field_kind(column).ok_or_else(|| self.unknown_column(column))?;
        let converted = kind.convert(&value.concrete()).ok_or_else(|| {
            ConcolicError::field(format!(
                "Field '{}' expected {} but got {}",
                column,
                kind.describe(),
                value
            ))
        })?;
        Ok(if value.is_symbolic() { value } else { converted })
    }

    /// Build a validated predicate from a lookup key and a value.
    ///
    /// Comparison values are converted to the column type, so form strings
    /// compare numerically against numeric columns on every backend.
    pub fn predicate(&self, key: &str, value: Value) -> Result<FilterPredicate> {
        let (column, lookup) = self.solve_lookup(key)?;
        if lookup == Lookup::IsNull && !matches!(value.concrete(), Value::Bool(_)) {
            return Err(ConcolicError::field(format!(
                "'{}' expects a boolean, got {}",
                key, value
            )));
        }
        let value = if lookup.is_mutable() {
            self.coerce(&column, value)?
        } else {
            value
        };
        Ok(FilterPredicate::new(column, lookup, value))
    }

    fn unknown_column(&self, column: &str) -> ConcolicError {
        ConcolicError::field(format!(
            "Cannot resolve keyword '{}' into field. Choices are: {}",
            column,
            self.column_names().join(", ")
        ))
    }
}

impl fmt::Display for ModelMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Stored entity. `fields` includes the primary key column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub pk: i64,
    pub fields: BTreeMap<String, Value>,
}

impl Row {
    pub fn new(pk: i64, fields: BTreeMap<String, Value>) -> Self {
        Self { pk, fields }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }
}
