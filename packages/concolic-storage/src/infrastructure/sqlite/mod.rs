//! SQLite adapter for the core data-access ports
//!
//! Filters and their mutated siblings run as real SQL: every predicate
//! compiles to a parameterised condition, and symbolic values bind their
//! concrete sample.

mod query;
mod store;

pub use query::{SqliteManager, SqliteQuerySet};
pub use store::{SqliteStore, SQLITE_ALIAS};
