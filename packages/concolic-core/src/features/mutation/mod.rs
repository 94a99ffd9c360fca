//! Mutation Testing Engine
//!
//! ## Architecture
//!
//! ```text
//! mutation
//! ├── domain       # Decomposition, LiveMutation, MutationReport
//! ├── engine       # decompose → mutate → evaluate → classify
//! ├── sink         # MutationSink port + MutationLog
//! └── diagnostics  # one warning per unsupported filter shape
//! ```
//!
//! ## Usage
//!
//! ```text
//! let engine = MutationEngine::new(config.mutation, log.clone(), diagnostics);
//! let outcome = engine.run(base.as_ref(), &FilterArgs::single("zoobars__gt", 10))?;
//! // outcome.queryset: zoobars > 10, as the application asked
//! // outcome.report.live: siblings with a different result set
//! ```

pub mod diagnostics;
pub mod domain;
pub mod engine;
pub mod sink;

pub use diagnostics::DiagnosticRegistry;
pub use domain::{Decomposition, LiveMutation, MutationReport};
pub use engine::{MutationEngine, MutationOutcome};
pub use sink::{MutationLog, MutationSink};
