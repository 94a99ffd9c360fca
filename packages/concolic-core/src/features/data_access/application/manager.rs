//! Mutation-aware manager wrapper
//!
//! Overrides `get_queryset` only. Writes go straight to the wrapped manager
//! through the `Manager` impl below; its inherent methods (e.g.
//! `MemoryManager::store`) stay reachable through `Deref`.

use std::ops::Deref;
use std::sync::Arc;

use super::queryset::MutationAwareQuerySet;
use crate::errors::Result;
use crate::features::data_access::domain::{FilterArgs, ModelMeta, Row};
use crate::features::data_access::ports::{Manager, QuerySet};
use crate::features::mutation::MutationEngine;

#[derive(Debug)]
pub struct MutationAwareManager<M> {
    inner: M,
    engine: Arc<MutationEngine>,
}

impl<M: Manager> MutationAwareManager<M> {
    pub fn new(inner: M, engine: Arc<MutationEngine>) -> Self {
        Self { inner, engine }
    }

    /// Query set bound to the wrapped manager's model and alias, filtering
    /// through the engine
    pub fn mutation_queryset(&self) -> MutationAwareQuerySet {
        MutationAwareQuerySet::new(self.inner.get_queryset(), self.engine.clone())
    }

    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M> Deref for MutationAwareManager<M> {
    type Target = M;

    fn deref(&self) -> &M {
        &self.inner
    }
}

impl<M: Manager> Manager for MutationAwareManager<M> {
    fn model(&self) -> &Arc<ModelMeta> {
        self.inner.model()
    }

    fn db_alias(&self) -> &str {
        self.inner.db_alias()
    }

    fn get_queryset(&self) -> Box<dyn QuerySet> {
        Box::new(self.mutation_queryset())
    }

    fn create(&self, fields: &FilterArgs) -> Result<Row> {
        self.inner.create(fields)
    }
}
