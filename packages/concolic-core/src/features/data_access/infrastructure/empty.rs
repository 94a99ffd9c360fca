//! Query set that matches nothing
//!
//! Returned in place of a filter whose FieldError was suppressed on request.

use std::sync::Arc;

use crate::errors::Result;
use crate::features::data_access::domain::{FilterPredicate, ModelMeta, Row};
use crate::features::data_access::ports::QuerySet;

#[derive(Debug, Clone)]
pub struct EmptyQuerySet {
    model: Arc<ModelMeta>,
    alias: String,
}

impl EmptyQuerySet {
    pub fn new(model: Arc<ModelMeta>, alias: impl Into<String>) -> Self {
        Self {
            model,
            alias: alias.into(),
        }
    }
}

impl QuerySet for EmptyQuerySet {
    fn model(&self) -> &Arc<ModelMeta> {
        &self.model
    }

    fn db_alias(&self) -> &str {
        &self.alias
    }

    fn filter_predicate(&self, _predicate: &FilterPredicate) -> Result<Box<dyn QuerySet>> {
        Ok(self.boxed_clone())
    }

    fn entities(&self) -> Result<Vec<Row>> {
        Ok(Vec::new())
    }

    fn boxed_clone(&self) -> Box<dyn QuerySet> {
        Box::new(self.clone())
    }
}
