//! Field lookups
//!
//! Lookup names follow the `column__lookup` keyword convention. Only the five
//! comparison lookups participate in mutation; the rest filter normally.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::shared::models::Value;

/// Field lookup applied by a filter predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lookup {
    /// Equal (==)
    #[default]
    Exact,
    /// Case-insensitive equality
    IExact,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Gte,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Lte,
    Contains,
    IContains,
    StartsWith,
    EndsWith,
    /// `column__isnull=True/False`
    IsNull,
}

impl Lookup {
    /// Operators mutation draws from, in reporting order
    pub const MUTABLE: [Lookup; 5] = [
        Lookup::Lte,
        Lookup::Gte,
        Lookup::Gt,
        Lookup::Lt,
        Lookup::Exact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Lookup::Exact => "exact",
            Lookup::IExact => "iexact",
            Lookup::Gt => "gt",
            Lookup::Gte => "gte",
            Lookup::Lt => "lt",
            Lookup::Lte => "lte",
            Lookup::Contains => "contains",
            Lookup::IContains => "icontains",
            Lookup::StartsWith => "startswith",
            Lookup::EndsWith => "endswith",
            Lookup::IsNull => "isnull",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let lookup = match name {
            "exact" => Lookup::Exact,
            "iexact" => Lookup::IExact,
            "gt" => Lookup::Gt,
            "gte" => Lookup::Gte,
            "lt" => Lookup::Lt,
            "lte" => Lookup::Lte,
            "contains" => Lookup::Contains,
            "icontains" => Lookup::IContains,
            "startswith" => Lookup::StartsWith,
            "endswith" => Lookup::EndsWith,
            "isnull" => Lookup::IsNull,
            _ => return None,
        };
        Some(lookup)
    }

    /// True for the comparison operators mutation may substitute
    pub fn is_mutable(&self) -> bool {
        Self::MUTABLE.contains(self)
    }

    /// Does a stored `field` value satisfy `field <lookup> arg`?
    ///
    /// Comparisons use concrete samples read as the stored value's type;
    /// `Null` never satisfies an ordering.
    pub fn evaluate(&self, field: &Value, arg: &Value) -> bool {
        match self {
            Lookup::Exact => field.loose_eq(&arg.coerced_like(field)),
            Lookup::Gt => field.compare(&arg.coerced_like(field)) == Some(Ordering::Greater),
            Lookup::Gte => matches!(
                field.compare(&arg.coerced_like(field)),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Lookup::Lt => field.compare(&arg.coerced_like(field)) == Some(Ordering::Less),
            Lookup::Lte => matches!(
                field.compare(&arg.coerced_like(field)),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Lookup::IsNull => match arg.concrete() {
                Value::Bool(want_null) => matches!(field, Value::Null) == want_null,
                _ => false,
            },
            Lookup::IExact
            | Lookup::Contains
            | Lookup::IContains
            | Lookup::StartsWith
            | Lookup::EndsWith => match (text_of(field), text_of(arg)) {
                (Some(haystack), Some(needle)) => match self {
                    Lookup::IExact => haystack.to_lowercase() == needle.to_lowercase(),
                    Lookup::Contains => haystack.contains(&needle),
                    Lookup::IContains => haystack.to_lowercase().contains(&needle.to_lowercase()),
                    Lookup::StartsWith => haystack.starts_with(&needle),
                    _ => haystack.ends_with(&needle),
                },
                _ => false,
            },
        }
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value.concrete() {
        Value::Null => None,
        other => Some(other.to_form_string()),
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
