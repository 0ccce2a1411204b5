//! Metadata model for Entigen: semantic types, entity and table nodes,
//! canonical naming rules, and description validation.

pub mod error;
pub mod naming;
pub mod node;
pub mod types;
pub mod validate;

use crate::error::ErrorTree;
use thiserror::Error as ThisError;

/// Maximum length for entity identifiers.
pub const MAX_ENTITY_NAME_LEN: usize = 64;

/// Maximum length for property identifiers.
pub const MAX_PROPERTY_NAME_LEN: usize = 64;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        err,
        error::ErrorTree,
        naming,
        node::{
            ColumnSchema, EntityMetadata, ForeignKey, Navigation, PropertyList, PropertyMetadata,
            TableSchema,
        },
        types::{Cardinality, SemanticType},
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("entity description rejected: {0}")]
    Description(ErrorTree),
}
