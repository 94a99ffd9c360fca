//! SQLite-backed model store
//!
//! One connection per store, guarded by a mutex. Each model maps to one table
//! with an `INTEGER PRIMARY KEY` and one column per field.

use parking_lot::{Mutex, RwLock};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use concolic_core::features::data_access::{FieldKind, FilterPredicate, ModelMeta, Row};
use concolic_core::Value;

use super::query::{compile_where, quote_ident};
use super::SqliteManager;
use crate::error::{Result, StorageError};

/// Alias reported by SQLite query sets
pub const SQLITE_ALIAS: &str = "sqlite";

pub struct SqliteStore {
    conn: Mutex<Connection>,
    models: RwLock<BTreeMap<String, Arc<ModelMeta>>>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("models", &self.models.read().keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl SqliteStore {
    pub fn open_in_memory() -> Result<Arc<Self>> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Arc<Self>> {
        Ok(Self::from_connection(Connection::open(path)?))
    }

    fn from_connection(conn: Connection) -> Arc<Self> {
        Arc::new(Self {
            conn: Mutex::new(conn),
            models: RwLock::new(BTreeMap::new()),
        })
    }

    /// Register a model and create its table if missing
    pub fn create_model(&self, meta: ModelMeta) -> Result<Arc<ModelMeta>> {
        let mut columns = vec![format!("{} INTEGER PRIMARY KEY", quote_ident(&meta.pk))];
        for field in &meta.fields {
            let sql_type = match field.kind {
                FieldKind::Int | FieldKind::Bool => "INTEGER",
                FieldKind::Float => "REAL",
                FieldKind::Text => "TEXT",
            };
            let null = if field.nullable { "" } else { " NOT NULL" };
            columns.push(format!("{} {}{}", quote_ident(&field.name), sql_type, null));
        }
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote_ident(&meta.table),
            columns.join(", ")
        );
        self.conn.lock().execute(&ddl, [])?;
        tracing::debug!("created table {} for {}", meta.table, meta.name);

        let meta = Arc::new(meta);
        self.models.write().insert(meta.name.clone(), meta.clone());
        Ok(meta)
    }

    /// Insert a row and return its primary key. Symbolic values are stored
    /// as their concrete sample, converted to the column type.
    pub fn insert<K, V>(&self, model: &str, fields: impl IntoIterator<Item = (K, V)>) -> Result<i64>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let meta = self.model(model)?;
        let mut columns = Vec::new();
        let mut values = Vec::new();
        for (key, value) in fields {
            let key = key.into();
            if !meta.has_column(&key) {
                return Err(StorageError::field(format!(
                    "{} has no field named '{}'",
                    meta.name, key
                )));
            }
            let value = meta.coerce(&key, value.into().concrete())?;
            columns.push(quote_ident(&key));
            values.push(to_sql(&value));
        }

        let sql = if columns.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES", quote_ident(&meta.table))
        } else {
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                quote_ident(&meta.table),
                columns.join(", "),
                vec!["?"; columns.len()].join(", ")
            )
        };

        let conn = self.conn.lock();
        match conn.execute(&sql, params_from_iter(values)) {
            Ok(_) => Ok(conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(code, msg))
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StorageError::constraint(format!(
                    "{}: {}",
                    meta.name,
                    msg.unwrap_or_else(|| code.to_string())
                )))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Manager for a registered model
    pub fn manager(self: &Arc<Self>, model: &str) -> Result<SqliteManager> {
        Ok(SqliteManager::new(self.clone(), self.model(model)?))
    }

    pub fn model(&self, name: &str) -> Result<Arc<ModelMeta>> {
        self.models
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::model_not_found(name))
    }

    pub fn model_names(&self) -> Vec<String> {
        self.models.read().keys().cloned().collect()
    }

    /// Rows of `meta` matching every predicate, by primary key
    pub(crate) fn select(&self, meta: &ModelMeta, predicates: &[FilterPredicate]) -> Result<Vec<Row>> {
        let columns = meta.column_names();
        let (clause, params) = compile_where(meta, predicates)?;
        let sql = format!(
            "SELECT {} FROM {}{} ORDER BY {}",
            columns.iter().map(|c| quote_ident(c)).collect::<Vec<_>>().join(", "),
            quote_ident(&meta.table),
            clause,
            quote_ident(&meta.pk)
        );
        tracing::debug!("{}", sql);

        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(params))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let pk: i64 = row.get(0)?;
            let mut fields = BTreeMap::new();
            fields.insert(meta.pk.clone(), Value::Int(pk));
            for (i, field) in meta.fields.iter().enumerate() {
                let raw: SqlValue = row.get(i + 1)?;
                fields.insert(field.name.clone(), from_sql(raw, field.kind));
            }
            out.push(Row::new(pk, fields));
        }
        Ok(out)
    }

    /// `SELECT COUNT(*)` with an already compiled clause
    pub(crate) fn count(&self, meta: &ModelMeta, clause: &str, params: Vec<SqlValue>) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}{}", quote_ident(&meta.table), clause);
        let count: i64 = self
            .conn
            .lock()
            .query_row(&sql, params_from_iter(params), |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Bind form of a value; symbolic values bind their concrete sample
pub(crate) fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Int(i) => SqlValue::Integer(*i),
        Value::Float(f) => SqlValue::Real(*f),
        Value::Str(s) => SqlValue::Text(s.clone()),
        Value::Symbolic(sym) => to_sql(&sym.concretize()),
    }
}

fn from_sql(raw: SqlValue, kind: FieldKind) -> Value {
    match (raw, kind) {
        (SqlValue::Null, _) => Value::Null,
        (SqlValue::Integer(i), FieldKind::Bool) => Value::Bool(i != 0),
        (SqlValue::Integer(i), FieldKind::Float) => Value::Float(i as f64),
        (SqlValue::Integer(i), _) => Value::Int(i),
        (SqlValue::Real(f), _) => Value::Float(f),
        (SqlValue::Text(s), _) => Value::Str(s),
        (SqlValue::Blob(b), _) => Value::Str(String::from_utf8_lossy(&b).into_owned()),
    }
}
