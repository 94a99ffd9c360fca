//! Shared module - Common types
//!
//! Types shared by every feature: the value model that flows through forms,
//! view arguments, rows and filter predicates.

pub mod models;

// Re-exports for convenience
pub use models::*;
