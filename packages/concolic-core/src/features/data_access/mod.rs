//! Data-Access Substitution Layer
//!
//! ## Architecture
//!
//! ```text
//! data_access
//! ├── domain          # ModelMeta, Lookup, FilterPredicate, FilterArgs, Row
//! ├── ports           # QuerySet, Manager
//! ├── infrastructure  # MemoryStore backend, EmptyQuerySet
//! └── application     # MutationAwareManager, MutationAwareQuerySet, ModelRegistry
//! ```
//!
//! A backend only implements `QuerySet::filter_predicate` and `entities`.
//! Wrapping its manager in `MutationAwareManager` routes every keyword filter
//! through the mutation engine while leaving the rest of the manager as is.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{ModelRegistry, MutationAwareManager, MutationAwareQuerySet};
pub use domain::{FieldKind, FieldMeta, FilterArgs, FilterPredicate, Lookup, ModelMeta, Row};
pub use infrastructure::{EmptyQuerySet, MemoryManager, MemoryQuerySet, MemoryStore, DEFAULT_ALIAS};
pub use ports::{Manager, QuerySet};
