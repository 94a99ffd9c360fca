//! Data access ports
//!
//! `QuerySet` and `Manager` are the interface the core needs from the host's
//! data layer. Backends (in-memory here, SQLite in `concolic-storage`)
//! implement `filter_predicate` and `entities` (managers also `create`);
//! keyword decomposition, counting and `get` come from default methods so
//! every backend validates lookups the same way.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use super::domain::{FilterArgs, FilterPredicate, ModelMeta, Row};
use crate::errors::{ConcolicError, Result};

/// Lazily evaluated query over one model
pub trait QuerySet: Send + Sync + fmt::Debug {
    fn model(&self) -> &Arc<ModelMeta>;

    /// Connection alias the query runs against
    fn db_alias(&self) -> &str;

    /// Narrow by one validated predicate
    fn filter_predicate(&self, predicate: &FilterPredicate) -> Result<Box<dyn QuerySet>>;

    /// Evaluate against the store, ordered by primary key
    fn entities(&self) -> Result<Vec<Row>>;

    fn boxed_clone(&self) -> Box<dyn QuerySet>;

    /// Keyword filter: every keyword is validated before anything runs.
    fn filter(&self, args: &FilterArgs) -> Result<Box<dyn QuerySet>> {
        let predicates = args
            .iter()
            .map(|(key, value)| self.model().predicate(key, value.clone()))
            .collect::<Result<Vec<_>>>()?;

        let mut current = self.boxed_clone();
        for predicate in &predicates {
            current = current.filter_predicate(predicate)?;
        }
        Ok(current)
    }

    /// Primary keys of the result set (used for set comparison)
    fn pks(&self) -> Result<BTreeSet<i64>> {
        Ok(self.entities()?.into_iter().map(|row| row.pk).collect())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.entities()?.len())
    }

    fn exists(&self) -> Result<bool> {
        Ok(self.count()? > 0)
    }

    /// Exactly one matching entity
    fn get(&self, args: &FilterArgs) -> Result<Row> {
        let mut rows = self.filter(args)?.entities()?;
        match rows.len() {
            1 => Ok(rows.remove(0)),
            0 => Err(ConcolicError::DoesNotExist(self.model().name.clone())),
            count => Err(ConcolicError::MultipleObjectsReturned {
                model: self.model().name.clone(),
                count,
            }),
        }
    }
}

/// Per-model entry point handing out query sets
pub trait Manager: Send + Sync + fmt::Debug {
    fn model(&self) -> &Arc<ModelMeta>;

    fn db_alias(&self) -> &str;

    fn get_queryset(&self) -> Box<dyn QuerySet>;

    /// Insert one entity (`Model.objects.create(...)`). Keys are column
    /// names; values are stored concrete, in the column's type.
    fn create(&self, fields: &FilterArgs) -> Result<Row>;

    fn all(&self) -> Box<dyn QuerySet> {
        self.get_queryset()
    }

    fn filter(&self, args: &FilterArgs) -> Result<Box<dyn QuerySet>> {
        self.get_queryset().filter(args)
    }

    fn get(&self, args: &FilterArgs) -> Result<Row> {
        self.get_queryset().get(args)
    }
}

impl<M: Manager + ?Sized> Manager for Arc<M> {
    fn model(&self) -> &Arc<ModelMeta> {
        (**self).model()
    }

    fn db_alias(&self) -> &str {
        (**self).db_alias()
    }

    fn get_queryset(&self) -> Box<dyn QuerySet> {
        (**self).get_queryset()
    }

    fn create(&self, fields: &FilterArgs) -> Result<Row> {
        (**self).create(fields)
    }

    fn all(&self) -> Box<dyn QuerySet> {
        (**self).all()
    }

    fn filter(&self, args: &FilterArgs) -> Result<Box<dyn QuerySet>> {
        (**self).filter(args)
    }

    fn get(&self, args: &FilterArgs) -> Result<Row> {
        (**self).get(args)
    }
}
