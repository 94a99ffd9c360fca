//! Transport token format
//!
//! `TAG || KIND || ':' || SYMBOLIC_ID`, e.g. `CoNcOlIc::concolic_int:x1`.
//! The identifier is everything after the first `:` that follows the kind, so
//! identifiers may themselves contain `:`.

use std::fmt;

/// Parsed token (tag stripped)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: String,
    pub id: String,
}

impl Token {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Render with the given sentinel
    pub fn format(&self, tag: &str) -> String {
        format!("{}{}:{}", tag, self.kind, self.id)
    }

    /// Parse `raw` if it starts with `tag`.
    ///
    /// A tagged string without a `:` separator parses with an empty id; the
    /// kind check in the bridge rejects it.
    pub fn parse(tag: &str, raw: &str) -> Option<Self> {
        let body = raw.strip_prefix(tag)?;
        let (kind, id) = body.split_once(':').unwrap_or((body, ""));
        Some(Self::new(kind, id))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
