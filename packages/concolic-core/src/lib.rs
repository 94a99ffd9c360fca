/*
 * Concolic Core - symbolic-value propagation and query mutation testing
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Value, SymbolicValue)
 * - features/    : Vertical slices (symbolic → value_bridge → dispatch → routing → data_access → mutation)
 * - config/      : Run configuration (YAML)
 * - context      : Per-run wiring of all features
 *
 * Request flow:
 *   SymClient ─► SymbolicFormParser ─► VirtualRouter ─► View
 *        View ─► MutationAwareManager ─► MutationEngine ─► MutationSink
 */

// Crate-level lint configuration
#![allow(clippy::type_complexity)] // Boxed view handlers
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models
pub mod shared;

/// Feature modules
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

/// Per-run context
pub mod context;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ConcolicConfig, ConfigError, MutationConfig};
pub use context::{ConcolicContext, ConcolicContextBuilder};
pub use errors::{ConcolicError, Result};
pub use shared::models::{SymbolicKind, SymbolicValue, Value};

pub use features::data_access::{
    FieldKind, FilterArgs, FilterPredicate, Lookup, Manager, MemoryStore, ModelMeta, ModelRegistry,
    MutationAwareManager, MutationAwareQuerySet, QuerySet, Row,
};
pub use features::dispatch::{
    build_post_data, parse_post_data, FormData, FormParser, Method, Request, Response, SymClient,
};
pub use features::mutation::{LiveMutation, MutationEngine, MutationLog, MutationReport, MutationSink};
pub use features::routing::{
    FnView, PathMatch, RegexView, ResolverMatch, UrlResolver, View, ViewArgs, ViewMap, VirtualRouter,
};
pub use features::symbolic::{SampleLibrary, SymbolicLibrary};
pub use features::value_bridge::SymbolicBridge;
