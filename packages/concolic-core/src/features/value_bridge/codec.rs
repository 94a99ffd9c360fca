//! Symbolic Value Bridge
//!
//! Smuggles symbolic values through string-only transport: `encode` swaps a
//! symbolic value for a token, `decode` rebuilds an equivalent symbolic value
//! (same identifier) from the token on the other side of the parse boundary.

use std::fmt;
use std::sync::Arc;

use super::token::Token;
use crate::errors::{ConcolicError, Result};
use crate::features::symbolic::SymbolicLibrary;
use crate::shared::models::{SymbolicKind, Value};

/// Token codec bound to one sentinel and one symbolic-value library
#[derive(Clone)]
pub struct SymbolicBridge {
    tag: String,
    library: Arc<dyn SymbolicLibrary>,
}

impl fmt::Debug for SymbolicBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolicBridge")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

impl SymbolicBridge {
    pub fn new(tag: impl Into<String>, library: Arc<dyn SymbolicLibrary>) -> Self {
        Self {
            tag: tag.into(),
            library,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn library(&self) -> &Arc<dyn SymbolicLibrary> {
        &self.library
    }

    /// True if `raw` carries the sentinel
    pub fn is_token(&self, raw: &str) -> bool {
        raw.starts_with(&self.tag)
    }

    /// Replace a symbolic value with its token; concrete values pass through.
    pub fn encode(&self, value: &Value) -> Value {
        match value.as_symbolic() {
            Some(sym) => Value::Str(Token::new(sym.kind().tag(), sym.id()).format(&self.tag)),
            None => value.clone(),
        }
    }

    /// Rebuild the symbolic value a token stands for.
    ///
    /// `Ok(None)` for untagged input, `Err(Decode)` for a tagged string whose
    /// kind the library cannot construct.
    pub fn try_decode(&self, raw: &str) -> Result<Option<Value>> {
        let Some(token) = Token::parse(&self.tag, raw) else {
            return Ok(None);
        };

        match SymbolicKind::from_tag(&token.kind) {
            Some(kind) if !token.id.is_empty() => Ok(Some(self.library.make(kind, &token.id))),
            _ => Err(ConcolicError::Decode {
                kind: token.kind,
                token: raw.to_string(),
            }),
        }
    }

    /// Lenient decode: unknown kinds are reported and passed through raw.
    pub fn decode(&self, raw: &str) -> Value {
        match self.try_decode(raw) {
            Ok(Some(value)) => {
                tracing::debug!("restored symbolic value from token {}", raw);
                value
            }
            Ok(None) => Value::Str(raw.to_string()),
            Err(err) => {
                tracing::warn!("{}; passing raw value through", err);
                Value::Str(raw.to_string())
            }
        }
    }
}
