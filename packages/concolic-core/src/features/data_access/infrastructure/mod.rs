//! Data access backends shipped with the core

pub mod empty;
pub mod memory;

pub use empty::EmptyQuerySet;
pub use memory::{MemoryManager, MemoryQuerySet, MemoryStore, DEFAULT_ALIAS};
