//! Infrastructure layer - Storage adapters

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteManager, SqliteQuerySet, SqliteStore, SQLITE_ALIAS};
