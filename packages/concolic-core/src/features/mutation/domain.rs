//! Mutation domain models

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::features::data_access::{FilterArgs, FilterPredicate};

/// How a filter call decomposes for mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Decomposition {
    /// One column, one mutable operator
    Supported(FilterPredicate),
    /// Anything else; carries the call shape used for deduplicated diagnostics
    Unsupported(String),
}

/// Sibling predicate whose result set differs from the original's
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveMutation {
    pub predicate: FilterPredicate,
    /// Primary keys the sibling selects and the original does not
    pub added: Vec<i64>,
    /// Primary keys the original selects and the sibling does not
    pub removed: Vec<i64>,
}

impl LiveMutation {
    pub fn new(predicate: FilterPredicate, original: &BTreeSet<i64>, mutated: &BTreeSet<i64>) -> Self {
        Self {
            predicate,
            added: mutated.difference(original).copied().collect(),
            removed: original.difference(mutated).copied().collect(),
        }
    }

    /// Size of the symmetric difference with the original result set
    pub fn divergence(&self) -> usize {
        self.added.len() + self.removed.len()
    }
}

/// Outcome of mutation testing one filter call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationReport {
    pub model: String,
    /// Keywords of the call, in call order
    pub keys: Vec<String>,
    /// Decomposed original predicate (absent when skipped)
    pub original: Option<FilterPredicate>,
    /// Size of the original result set
    pub original_count: usize,
    pub live: Vec<LiveMutation>,
    /// Number of siblings discarded as dead
    pub dead: usize,
    /// Why mutation was skipped, if it was
    pub skipped: Option<String>,
}

impl MutationReport {
    pub fn skipped(model: impl Into<String>, args: &FilterArgs, reason: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            keys: args.keys().into_iter().map(String::from).collect(),
            original: None,
            original_count: 0,
            live: Vec::new(),
            dead: 0,
            skipped: Some(reason.into()),
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.skipped.is_some()
    }

    pub fn live_predicates(&self) -> impl Iterator<Item = &FilterPredicate> {
        self.live.iter().map(|m| &m.predicate)
    }

    /// Siblings evaluated (live + dead)
    pub fn evaluated(&self) -> usize {
        self.live.len() + self.dead
    }
}
