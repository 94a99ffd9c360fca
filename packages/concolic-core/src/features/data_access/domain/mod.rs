//! Data access domain models

pub mod lookup;
pub mod model;
pub mod predicate;

pub use lookup::Lookup;
pub use model::{FieldKind, FieldMeta, ModelMeta, Row};
pub use predicate::{FilterArgs, FilterPredicate};
