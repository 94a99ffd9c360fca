//! Shared models

pub mod value;

pub use value::{SymbolId, SymbolicKind, SymbolicValue, Value};
