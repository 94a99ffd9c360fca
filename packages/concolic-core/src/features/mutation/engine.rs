//! Mutation Testing Engine
//!
//! Mutation-based concolic DB testing (after ConSMutate, Sarkar/Basu/Wong 2012).
//! For a filter call such as `Transfer.objects.filter(zoobars__gt=10)`:
//!
//! 1. decompose into column `zoobars`, operator `gt`, value `10`
//! 2. build one sibling per other operator (`zoobars__lt=10`, `zoobars__gte=10`, ...)
//! 3. run the original against the base query
//! 4. run every sibling against the same base query and compare result sets:
//!    equal sets are dead mutations (discarded), different sets are live and
//!    reported with their symmetric difference
//!
//! The caller gets the original result; live mutations go to the sink.
//!
//! Only single-keyword calls on one column with a mutable operator are
//! mutated. Conjunctions over several columns (e.g. `recipient='alice'` and
//! `zoobars > 10`) are skipped, not approximated.

use std::sync::Arc;

use super::diagnostics::DiagnosticRegistry;
use super::domain::{Decomposition, LiveMutation, MutationReport};
use super::sink::MutationSink;
use crate::config::MutationConfig;
use crate::errors::{ConcolicError, Result};
use crate::features::data_access::{EmptyQuerySet, FilterArgs, FilterPredicate, ModelMeta, QuerySet};

/// Filtered query set plus the report of its mutations
#[derive(Debug)]
pub struct MutationOutcome {
    pub queryset: Box<dyn QuerySet>,
    pub report: MutationReport,
}

pub struct MutationEngine {
    config: MutationConfig,
    sink: Arc<dyn MutationSink>,
    diagnostics: Arc<DiagnosticRegistry>,
}

impl std::fmt::Debug for MutationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationEngine")
            .field("config", &self.config)
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

impl MutationEngine {
    pub fn new(
        config: MutationConfig,
        sink: Arc<dyn MutationSink>,
        diagnostics: Arc<DiagnosticRegistry>,
    ) -> Self {
        Self {
            config,
            sink,
            diagnostics,
        }
    }

    pub fn config(&self) -> &MutationConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &Arc<DiagnosticRegistry> {
        &self.diagnostics
    }

    /// Split a filter call into one mutable predicate, if it is one.
    ///
    /// Invalid keywords are a FieldError, not an unsupported shape.
    pub fn decompose(&self, model: &ModelMeta, args: &FilterArgs) -> Result<Decomposition> {
        let mut iter = args.iter();
        let (key, value) = match (iter.next(), iter.next()) {
            (Some(single), None) => single,
            _ => {
                return Ok(Decomposition::Unsupported(format!(
                    "{}: {} keywords [{}]",
                    model.name,
                    args.len(),
                    args.keys().join(", ")
                )))
            }
        };

        let predicate = model.predicate(key, value.clone())?;
        if !self.config.operators.contains(&predicate.lookup) {
            return Ok(Decomposition::Unsupported(format!(
                "{}: lookup '{}' on '{}'",
                model.name, predicate.lookup, predicate.column
            )));
        }
        Ok(Decomposition::Supported(predicate))
    }

    /// Strict form of `decompose`: an unsupported shape is an
    /// `UnsupportedPredicate` error instead of a skip.
    pub fn try_decompose(&self, model: &ModelMeta, args: &FilterArgs) -> Result<FilterPredicate> {
        match self.decompose(model, args)? {
            Decomposition::Supported(predicate) => Ok(predicate),
            Decomposition::Unsupported(shape) => Err(ConcolicError::UnsupportedPredicate(shape)),
        }
    }

    /// Siblings of `original`: every other configured operator, same column
    /// and value.
    pub fn mutation_set(&self, original: &FilterPredicate) -> Vec<FilterPredicate> {
        self.config
            .operators
            .iter()
            .filter(|op| **op != original.lookup)
            .map(|op| original.with_lookup(*op))
            .collect()
    }

    /// Apply `args` to `base`, mutation-testing it when the shape allows.
    pub fn run(&self, base: &dyn QuerySet, args: &FilterArgs) -> Result<MutationOutcome> {
        let outcome = match self.evaluate(base, args) {
            Err(err @ ConcolicError::Field(_)) if self.config.suppress_field_errors => {
                tracing::warn!("suppressed field error on {}: {}", base.model().name, err);
                MutationOutcome {
                    queryset: Box::new(EmptyQuerySet::new(base.model().clone(), base.db_alias())),
                    report: MutationReport::skipped(&base.model().name, args, err.to_string()),
                }
            }
            other => other?,
        };

        if !outcome.report.is_skipped() || self.config.record_skipped {
            self.sink.record(&outcome.report);
        }
        Ok(outcome)
    }

    fn evaluate(&self, base: &dyn QuerySet, args: &FilterArgs) -> Result<MutationOutcome> {
        let model = base.model().clone();
        let original = match self.decompose(&model, args)? {
            Decomposition::Supported(predicate) => predicate,
            Decomposition::Unsupported(shape) => {
                self.diagnostics.warn_once(&shape);
                return Ok(MutationOutcome {
                    queryset: base.filter(args)?,
                    report: MutationReport::skipped(&model.name, args, shape),
                });
            }
        };

        let queryset = base.filter_predicate(&original)?;
        let original_pks = queryset.pks()?;

        let mut live = Vec::new();
        let mut dead = 0;
        for sibling in self.mutation_set(&original) {
            let mutated_pks = base.filter_predicate(&sibling)?.pks()?;
            if mutated_pks == original_pks {
                tracing::debug!("dead mutation {} (original {})", sibling, original);
                dead += 1;
            } else {
                tracing::debug!("live mutation {} (original {})", sibling, original);
                live.push(LiveMutation::new(sibling, &original_pks, &mutated_pks));
            }
        }

        let report = MutationReport {
            model: model.name.clone(),
            keys: vec![original.key()],
            original: Some(original),
            original_count: original_pks.len(),
            live,
            dead,
            skipped: None,
        };
        Ok(MutationOutcome { queryset, report })
    }
}
