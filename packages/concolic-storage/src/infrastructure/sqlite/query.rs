//! Predicate compilation and the SQLite query set / manager

use rusqlite::types::Value as SqlValue;
use std::sync::Arc;

use concolic_core::features::data_access::{FilterArgs, FilterPredicate, Lookup, Manager, ModelMeta, QuerySet, Row};
use concolic_core::{ConcolicError, Value};

use super::store::{to_sql, SqliteStore, SQLITE_ALIAS};
use crate::error::{Result, StorageError};

/// Double-quoted SQL identifier
pub(crate) fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Literal GLOB pattern for `text`
fn glob_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '*' | '?' | '[' => {
                out.push('[');
                out.push(c);
                out.push(']');
            }
            _ => out.push(c),
        }
    }
    out
}

/// One predicate as an SQL condition plus its bind parameters
pub(crate) fn compile_predicate(meta: &ModelMeta, predicate: &FilterPredicate) -> Result<(String, Vec<SqlValue>)> {
    if !meta.has_column(&predicate.column) {
        return Err(StorageError::field(format!(
            "Cannot resolve keyword '{}' into field",
            predicate.column
        )));
    }
    let col = quote_ident(&predicate.column);
    let text = || predicate.value.to_form_string();
    // comparisons bind the sample in the column's type
    let typed = || -> Result<Vec<SqlValue>> {
        let value = meta.coerce(&predicate.column, predicate.value.concrete())?;
        Ok(vec![to_sql(&value)])
    };

    let compiled = match predicate.lookup {
        Lookup::Exact => (format!("{} IS ?", col), typed()?),
        Lookup::Gt => (format!("{} > ?", col), typed()?),
        Lookup::Gte => (format!("{} >= ?", col), typed()?),
        Lookup::Lt => (format!("{} < ?", col), typed()?),
        Lookup::Lte => (format!("{} <= ?", col), typed()?),
        Lookup::IExact => (
            format!("LOWER({}) = LOWER(?)", col),
            vec![SqlValue::Text(text())],
        ),
        Lookup::Contains => (
            format!("{} GLOB ?", col),
            vec![SqlValue::Text(format!("*{}*", glob_escape(&text())))],
        ),
        Lookup::IContains => (
            format!("LOWER({}) GLOB ?", col),
            vec![SqlValue::Text(format!("*{}*", glob_escape(&text().to_lowercase())))],
        ),
        Lookup::StartsWith => (
            format!("{} GLOB ?", col),
            vec![SqlValue::Text(format!("{}*", glob_escape(&text())))],
        ),
        Lookup::EndsWith => (
            format!("{} GLOB ?", col),
            vec![SqlValue::Text(format!("*{}", glob_escape(&text())))],
        ),
        Lookup::IsNull => match predicate.value.concrete() {
            Value::Bool(true) => (format!("{} IS NULL", col), Vec::new()),
            Value::Bool(false) => (format!("{} IS NOT NULL", col), Vec::new()),
            other => {
                return Err(StorageError::field(format!(
                    "'{}__isnull' expects a boolean, got {}",
                    predicate.column, other
                )))
            }
        },
    };
    Ok(compiled)
}

/// ` WHERE a AND b ...`, or empty for no predicates
pub(crate) fn compile_where(meta: &ModelMeta, predicates: &[FilterPredicate]) -> Result<(String, Vec<SqlValue>)> {
    if predicates.is_empty() {
        return Ok((String::new(), Vec::new()));
    }
    let mut conditions = Vec::with_capacity(predicates.len());
    let mut params = Vec::new();
    for predicate in predicates {
        let (condition, mut bound) = compile_predicate(meta, predicate)?;
        conditions.push(condition);
        params.append(&mut bound);
    }
    Ok((format!(" WHERE {}", conditions.join(" AND ")), params))
}

/// Manager over a `SqliteStore` model
#[derive(Debug, Clone)]
pub struct SqliteManager {
    store: Arc<SqliteStore>,
    model: Arc<ModelMeta>,
}

impl SqliteManager {
    pub fn new(store: Arc<SqliteStore>, model: Arc<ModelMeta>) -> Self {
        Self { store, model }
    }

    pub fn store(&self) -> &Arc<SqliteStore> {
        &self.store
    }
}

impl Manager for SqliteManager {
    fn model(&self) -> &Arc<ModelMeta> {
        &self.model
    }

    fn db_alias(&self) -> &str {
        SQLITE_ALIAS
    }

    fn get_queryset(&self) -> Box<dyn QuerySet> {
        Box::new(SqliteQuerySet {
            store: self.store.clone(),
            model: self.model.clone(),
            predicates: Vec::new(),
        })
    }

    fn create(&self, fields: &FilterArgs) -> concolic_core::Result<Row> {
        let pk = self.store.insert(
            &self.model.name,
            fields.iter().map(|(key, value)| (key, value.clone())),
        )?;
        let by_pk = FilterPredicate::new(self.model.pk.clone(), Lookup::Exact, pk);
        self.store
            .select(&self.model, &[by_pk])?
            .into_iter()
            .next()
            .ok_or_else(|| ConcolicError::DoesNotExist(self.model.name.clone()))
    }
}

/// Lazy `SELECT` over one table; compiled and run on `entities`
#[derive(Debug, Clone)]
pub struct SqliteQuerySet {
    store: Arc<SqliteStore>,
    model: Arc<ModelMeta>,
    predicates: Vec<FilterPredicate>,
}

impl SqliteQuerySet {
    /// `WHERE` clause and parameters this query set would run with
    pub fn to_sql(&self) -> Result<(String, Vec<SqlValue>)> {
        compile_where(&self.model, &self.predicates)
    }
}

impl QuerySet for SqliteQuerySet {
    fn model(&self) -> &Arc<ModelMeta> {
        &self.model
    }

    fn db_alias(&self) -> &str {
        SQLITE_ALIAS
    }

    fn filter_predicate(&self, predicate: &FilterPredicate) -> concolic_core::Result<Box<dyn QuerySet>> {
        // compile now so a bad predicate fails at filter time, not on evaluation
        compile_predicate(&self.model, predicate)?;
        let mut next = self.clone();
        next.predicates.push(predicate.clone());
        Ok(Box::new(next))
    }

    fn entities(&self) -> concolic_core::Result<Vec<Row>> {
        Ok(self.store.select(&self.model, &self.predicates)?)
    }

    fn boxed_clone(&self) -> Box<dyn QuerySet> {
        Box::new(self.clone())
    }

    fn count(&self) -> concolic_core::Result<usize> {
        let (clause, params) = self.to_sql()?;
        Ok(self.store.count(&self.model, &clause, params)?)
    }
}
