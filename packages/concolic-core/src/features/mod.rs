//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains, as far as it needs them:
//! - domain/         - Pure models (no external dependencies)
//! - ports           - Interface definitions (traits)
//! - application/    - Use cases
//! - infrastructure/ - Backend implementations

/// Symbolic-value library port
pub mod symbolic;

/// Token encode/decode across string-only transport
pub mod value_bridge;

/// Simulated requests and form restoration
pub mod dispatch;

/// Path → view resolution from a static view map
pub mod routing;

/// Query sets, managers and their mutation-aware substitutes
pub mod data_access;

/// Operator mutation of filter predicates
pub mod mutation;
