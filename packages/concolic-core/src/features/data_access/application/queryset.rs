//! Mutation-aware query set

use std::sync::Arc;

use crate::errors::Result;
use crate::features::data_access::domain::{FilterArgs, FilterPredicate, ModelMeta, Row};
use crate::features::data_access::ports::QuerySet;
use crate::features::mutation::{MutationEngine, MutationReport};

/// Query set whose keyword filters go through the Mutation Testing Engine.
///
/// Filtering returns another `MutationAwareQuerySet`, so chained filters on
/// the result are mutation-tested too, each against its own base.
#[derive(Debug)]
pub struct MutationAwareQuerySet {
    inner: Box<dyn QuerySet>,
    engine: Arc<MutationEngine>,
}

impl MutationAwareQuerySet {
    pub fn new(inner: Box<dyn QuerySet>, engine: Arc<MutationEngine>) -> Self {
        Self { inner, engine }
    }

    /// Filter and hand back the mutation report as well
    pub fn filter_with_report(&self, args: &FilterArgs) -> Result<(Self, MutationReport)> {
        let outcome = self.engine.run(self.inner.as_ref(), args)?;
        Ok((
            Self::new(outcome.queryset, self.engine.clone()),
            outcome.report,
        ))
    }

    /// The wrapped backend query set
    pub fn inner(&self) -> &dyn QuerySet {
        self.inner.as_ref()
    }
}

impl Clone for MutationAwareQuerySet {
    fn clone(&self) -> Self {
        Self::new(self.inner.boxed_clone(), self.engine.clone())
    }
}

impl QuerySet for MutationAwareQuerySet {
    fn model(&self) -> &Arc<ModelMeta> {
        self.inner.model()
    }

    fn db_alias(&self) -> &str {
        self.inner.db_alias()
    }

    /// Pre-built predicates bypass mutation (internal narrowing, e.g. by
    /// another layer); keyword filters from application code use `filter`.
    fn filter_predicate(&self, predicate: &FilterPredicate) -> Result<Box<dyn QuerySet>> {
        Ok(Box::new(Self::new(
            self.inner.filter_predicate(predicate)?,
            self.engine.clone(),
        )))
    }

    fn entities(&self) -> Result<Vec<Row>> {
        self.inner.entities()
    }

    fn pks(&self) -> Result<std::collections::BTreeSet<i64>> {
        self.inner.pks()
    }

    fn count(&self) -> Result<usize> {
        self.inner.count()
    }

    fn boxed_clone(&self) -> Box<dyn QuerySet> {
        Box::new(self.clone())
    }

    fn filter(&self, args: &FilterArgs) -> Result<Box<dyn QuerySet>> {
        let (filtered, _) = self.filter_with_report(args)?;
        Ok(Box::new(filtered))
    }
}
