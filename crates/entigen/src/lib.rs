//! Entigen — entity/schema-driven CRUD scaffolding engine.
//!
//! ## Crate layout
//! - `schema`: metadata model, semantic types, naming rules, description
//!   validation.
//! - `core`: inference, schema comparator, UI configuration model,
//!   master/detail composition, artifact planner, snapshot persistence,
//!   and the external source boundaries.
//!
//! The `prelude` module mirrors the vocabulary used by configuration
//! front ends and renderers.

pub use entigen_core as core;
pub use entigen_schema as schema;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use entigen_core::{compare::compare, plan::plan};

///
/// Prelude
///

pub mod prelude {
    pub use entigen_core::prelude::*;
}
