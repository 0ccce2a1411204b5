//! External source boundaries.
//!
//! The engine never talks to a database or metadata service directly; it
//! consumes these trait contracts. Implementations cross the IO boundary
//! and should be cancellable and timeout-bounded by their host.

use entigen_schema::node::{EntityMetadata, TableSchema};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ModuleSummary
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ModuleSummary {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

///
/// EntitySummary
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntitySummary {
    pub name: String,
    pub module: String,
    pub table: String,
}

///
/// SourceError
///
/// Fetch failures always carry the underlying cause; the caller clears
/// its loading state and applies nothing.
///

#[derive(Debug, ThisError)]
pub enum SourceError {
    #[error("metadata source failed: {0}")]
    Metadata(String),

    #[error("schema source failed for table '{table}': {cause}")]
    Schema { table: String, cause: String },
}

///
/// MetadataSource
///
/// Entity metadata provider (remote service, file export, ...).
///

pub trait MetadataSource {
    fn list_modules(&self) -> Result<Vec<ModuleSummary>, SourceError>;

    fn list_entities(&self, module: &str) -> Result<Vec<EntitySummary>, SourceError>;

    fn entity(&self, name: &str) -> Result<EntityMetadata, SourceError>;
}

///
/// SchemaSource
///
/// Live schema snapshot provider, per table and optionally per named
/// database.
///

pub trait SchemaSource {
    fn table_schema(&self, table: &str, database: Option<&str>)
    -> Result<TableSchema, SourceError>;
}

///
/// FetchGate
///
/// Last-response-wins supersession for in-flight fetches. A new request
/// for the same resource takes a fresh token; a response presenting an
/// older token is stale and must be discarded, never merged.
///

#[derive(Clone, Debug, Default)]
pub struct FetchGate {
    generation: u64,
}

///
/// FetchToken
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FetchToken(u64);

impl FetchGate {
    #[must_use]
    pub const fn new() -> Self {
        Self { generation: 0 }
    }

    /// Start a request, superseding any in-flight one.
    pub const fn begin(&mut self) -> FetchToken {
        self.generation += 1;

        FetchToken(self.generation)
    }

    /// True if the token still belongs to the newest request.
    #[must_use]
    pub const fn is_current(&self, token: FetchToken) -> bool {
        token.0 == self.generation
    }
}
