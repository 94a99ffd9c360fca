//! In-memory data store
//!
//! Tables live behind one `RwLock`; every evaluation takes a read lock, so a
//! filter and its mutated siblings see the same rows as long as nobody
//! inserts in between (one request at a time).

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::errors::{ConcolicError, Result};
use crate::features::data_access::domain::{FilterArgs, FilterPredicate, ModelMeta, Row};
use crate::features::data_access::ports::{Manager, QuerySet};
use crate::shared::models::Value;

pub const DEFAULT_ALIAS: &str = "default";

#[derive(Debug)]
struct MemoryTable {
    meta: Arc<ModelMeta>,
    rows: BTreeMap<i64, Row>,
    next_pk: i64,
}

/// Shared in-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<BTreeMap<String, MemoryTable>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a model; re-registering keeps existing rows only if the
    /// metadata is unchanged.
    pub fn create_model(&self, meta: ModelMeta) -> Arc<ModelMeta> {
        let mut tables = self.tables.write();
        if let Some(table) = tables.get(&meta.name) {
            if *table.meta == meta {
                return table.meta.clone();
            }
        }
        let meta = Arc::new(meta);
        tables.insert(
            meta.name.clone(),
            MemoryTable {
                meta: meta.clone(),
                rows: BTreeMap::new(),
                next_pk: 1,
            },
        );
        meta
    }

    /// Insert a row; the primary key is assigned unless given explicitly.
    pub fn insert<K, V>(&self, model: &str, fields: impl IntoIterator<Item = (K, V)>) -> Result<Row>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut tables = self.tables.write();
        let table = tables
            .get_mut(model)
            .ok_or_else(|| ConcolicError::store(format!("Unknown model '{}'", model)))?;

        let mut values: BTreeMap<String, Value> = BTreeMap::new();
        for (key, value) in fields {
            let key = key.into();
            if !table.meta.has_column(&key) {
                return Err(ConcolicError::field(format!(
                    "{} has no field named '{}'",
                    table.meta.name, key
                )));
            }
            // stored data is concrete, in the column's type
            let value = table.meta.coerce(&key, value.into().concrete())?;
            values.insert(key, value);
        }

        let pk = match values.get(&table.meta.pk) {
            Some(Value::Int(pk)) => *pk,
            Some(other) => {
                return Err(ConcolicError::field(format!(
                    "Primary key must be an integer, got {}",
                    other
                )))
            }
            None => table.next_pk,
        };
        if table.rows.contains_key(&pk) {
            return Err(ConcolicError::store(format!(
                "Duplicate primary key {} for {}",
                pk, table.meta.name
            )));
        }
        let after = pk.checked_add(1).ok_or_else(|| {
            ConcolicError::store(format!(
                "Primary key {} of {} leaves no room for the next row",
                pk, table.meta.name
            ))
        })?;
        table.next_pk = table.next_pk.max(after);

        for field in &table.meta.fields {
            values.entry(field.name.clone()).or_insert(Value::Null);
        }
        values.insert(table.meta.pk.clone(), Value::Int(pk));

        let row = Row::new(pk, values);
        table.rows.insert(pk, row.clone());
        Ok(row)
    }

    /// Manager for a registered model
    pub fn manager(self: &Arc<Self>, model: &str) -> Result<MemoryManager> {
        let meta = self
            .tables
            .read()
            .get(model)
            .map(|t| t.meta.clone())
            .ok_or_else(|| ConcolicError::store(format!("Unknown model '{}'", model)))?;
        Ok(MemoryManager {
            store: self.clone(),
            model: meta,
            alias: DEFAULT_ALIAS.to_string(),
        })
    }

    pub fn model_names(&self) -> Vec<String> {
        self.tables.read().keys().cloned().collect()
    }

    /// Every stored row of `model`, by primary key
    pub fn rows(&self, model: &str) -> Result<Vec<Row>> {
        self.select(model, &[])
    }

    fn select(&self, model: &str, predicates: &[FilterPredicate]) -> Result<Vec<Row>> {
        let tables = self.tables.read();
        let table = tables
            .get(model)
            .ok_or_else(|| ConcolicError::store(format!("Unknown model '{}'", model)))?;
        Ok(table
            .rows
            .values()
            .filter(|row| predicates.iter().all(|p| p.matches(row)))
            .cloned()
            .collect())
    }
}

/// Manager over a `MemoryStore` model
#[derive(Debug, Clone)]
pub struct MemoryManager {
    store: Arc<MemoryStore>,
    model: Arc<ModelMeta>,
    alias: String,
}

impl MemoryManager {
    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }
}

impl Manager for MemoryManager {
    fn model(&self) -> &Arc<ModelMeta> {
        &self.model
    }

    fn db_alias(&self) -> &str {
        &self.alias
    }

    fn get_queryset(&self) -> Box<dyn QuerySet> {
        Box::new(MemoryQuerySet {
            store: self.store.clone(),
            model: self.model.clone(),
            alias: self.alias.clone(),
            predicates: Vec::new(),
        })
    }

    fn create(&self, fields: &FilterArgs) -> Result<Row> {
        self.store.insert(
            &self.model.name,
            fields.iter().map(|(key, value)| (key, value.clone())),
        )
    }
}

/// Query over a `MemoryStore` model: a conjunction of predicates
#[derive(Debug, Clone)]
pub struct MemoryQuerySet {
    store: Arc<MemoryStore>,
    model: Arc<ModelMeta>,
    alias: String,
    predicates: Vec<FilterPredicate>,
}

impl MemoryQuerySet {
    pub fn predicates(&self) -> &[FilterPredicate] {
        &self.predicates
    }
}

impl QuerySet for MemoryQuerySet {
    fn model(&self) -> &Arc<ModelMeta> {
        &self.model
    }

    fn db_alias(&self) -> &str {
        &self.alias
    }

    fn filter_predicate(&self, predicate: &FilterPredicate) -> Result<Box<dyn QuerySet>> {
        if !self.model.has_column(&predicate.column) {
            return Err(ConcolicError::field(format!(
                "Cannot resolve keyword '{}' into field",
                predicate.column
            )));
        }
        let mut next = self.clone();
        next.predicates.push(predicate.clone());
        Ok(Box::new(next))
    }

    fn entities(&self) -> Result<Vec<Row>> {
        self.store.select(&self.model.name, &self.predicates)
    }

    fn boxed_clone(&self) -> Box<dyn QuerySet> {
        Box::new(self.clone())
    }
}
