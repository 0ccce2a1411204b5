//! Core engines for Entigen: type/format inference, schema comparison,
//! the operator-facing UI configuration model, master/detail composition,
//! artifact planning, and project snapshot persistence.

pub mod compare;
pub mod compose;
pub mod config;
pub mod infer;
pub mod plan;
pub mod project;
pub mod source;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Domain vocabulary only; engines and errors are imported from their
/// modules directly.
///

pub mod prelude {
    pub use crate::{
        compare::{ComparisonResult, Reason, Severity},
        config::{
            ConfigContext, DetailTabConfig, FormConfig, FormFieldConfig, GenerationConfig,
            GridColumnConfig, GridConfig, Toggles,
        },
        infer::{Alignment, DisplayFormat, InputKind},
        plan::{ArtifactDescriptor, ArtifactKind},
    };
    pub use entigen_schema::prelude::*;
}
