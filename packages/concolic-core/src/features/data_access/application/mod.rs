//! Mutation-aware substitution of managers and query sets

pub mod manager;
pub mod queryset;
pub mod registry;

pub use manager::MutationAwareManager;
pub use queryset::MutationAwareQuerySet;
pub use registry::ModelRegistry;
