//! SQLite storage for concolic runs
//!
//! Implements the `QuerySet` / `Manager` ports of `concolic-core` on top of
//! SQLite, so the mutation engine's sibling predicates execute as real
//! queries against the application's tables.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use concolic_core::{ModelMeta, FieldKind, ModelRegistry};
//! use concolic_storage::SqliteStore;
//!
//! let store = SqliteStore::open("zoobar.db")?;
//! store.create_model(ModelMeta::new("Person").field("zoobars", FieldKind::Int))?;
//! store.insert("Person", [("zoobars", 10)])?;
//!
//! let models = ModelRegistry::new().with(store.manager("Person")?);
//! // hand `models` to ConcolicContext::builder(..).models(models)
//! ```

pub mod error;

#[cfg(feature = "sqlite")]
pub mod infrastructure;

pub use error::{ErrorKind, Result, StorageError};

#[cfg(feature = "sqlite")]
pub use infrastructure::{SqliteManager, SqliteQuerySet, SqliteStore, SQLITE_ALIAS};
