//! Deduplicated operator diagnostics
//!
//! An unsupported filter shape inside a view is hit on every request; it is
//! reported once per run.

use dashmap::DashSet;

#[derive(Debug, Default)]
pub struct DiagnosticRegistry {
    seen: DashSet<String>,
}

impl DiagnosticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a warning for `shape` unless it was already reported.
    ///
    /// Returns true when the warning was emitted.
    pub fn warn_once(&self, shape: &str) -> bool {
        if self.seen.insert(shape.to_string()) {
            tracing::warn!("mutation skipped for unsupported filter shape: {}", shape);
            true
        } else {
            false
        }
    }

    pub fn seen(&self, shape: &str) -> bool {
        self.seen.contains(shape)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
