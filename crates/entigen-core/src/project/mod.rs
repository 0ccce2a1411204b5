//! Project snapshot persistence.
//!
//! A snapshot is the serializable unit of durable state: entity
//! metadata, grid/form/tab configuration, and the toggle set, stamped
//! with a format version. A version mismatch on load forces a rebuild of
//! derived configuration from the embedded metadata; stale cached shapes
//! are never trusted.

use crate::config::{ConfigContext, GenerationConfig};
use entigen_schema::node::EntityMetadata;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// Bumped whenever the serialized configuration shapes change.
pub const FORMAT_VERSION: u32 = 3;

///
/// ProjectSnapshot
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ProjectSnapshot {
    pub format_version: u32,
    pub config: GenerationConfig,
}

impl ProjectSnapshot {
    /// Capture the current configuration at the current format version.
    #[must_use]
    pub fn capture(config: &GenerationConfig) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            config: config.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, ProjectError> {
        serde_json::to_string_pretty(self).map_err(ProjectError::Malformed)
    }
}

///
/// RestoreOutcome
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RestoreOutcome {
    /// The snapshot matched the current format and was installed as-is.
    Loaded,

    /// Format mismatch: configuration was rebuilt from entity metadata.
    Rebuilt,
}

///
/// ProjectError
///

#[derive(Debug, ThisError)]
pub enum ProjectError {
    #[error("malformed project snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("project snapshot carries no entity metadata")]
    MissingEntity,

    #[error(transparent)]
    Rejected(#[from] entigen_schema::Error),
}

// Envelope parsed ahead of the full snapshot so that a snapshot written
// by a different format version can still surrender its entity metadata.
#[derive(Deserialize)]
struct Envelope {
    format_version: u32,
    config: serde_json::Value,
}

/// Restore a serialized snapshot into the context.
///
/// A current-format snapshot is installed wholesale; any other version
/// falls back to loading the embedded entity metadata and rebuilding the
/// derived configuration (defaults), keeping only the toggle set.
pub fn restore(json: &str, ctx: &mut ConfigContext) -> Result<RestoreOutcome, ProjectError> {
    let envelope: Envelope = serde_json::from_str(json)?;

    if envelope.format_version == FORMAT_VERSION {
        let config: GenerationConfig = serde_json::from_value(envelope.config)?;
        ctx.import_config(config);

        return Ok(RestoreOutcome::Loaded);
    }

    let entity_value = envelope
        .config
        .get("entity")
        .cloned()
        .ok_or(ProjectError::MissingEntity)?;
    let entity: EntityMetadata = serde_json::from_value(entity_value)?;

    ctx.load_entity(entity)?;

    if let Some(toggles) = envelope.config.get("toggles").cloned()
        && let Ok(toggles) = serde_json::from_value(toggles)
    {
        ctx.set_toggles(toggles).ok();
    }

    Ok(RestoreOutcome::Rebuilt)
}
