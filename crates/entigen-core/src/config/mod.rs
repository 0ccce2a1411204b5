//! UI configuration model: grid columns, form fields, detail tabs, and
//! the context that owns them.

mod context;
mod form;
mod grid;
mod id;
mod tabs;


pub use context::ConfigContext;
pub use form::{Cascade, FormConfig, FormFieldConfig, LookupBinding, ValidationRule};
pub use grid::{GridColumnConfig, GridConfig};
pub use id::{FieldId, IdArena};
pub use tabs::DetailTabConfig;

use entigen_schema::node::EntityMetadata;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Toggles
///
/// Named generation switches. A closed struct rather than an open map:
/// every toggle the planner understands is enumerated here.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Toggles {
    pub records: bool,
    pub records_for_details: bool,
    pub transfer_objects: bool,
    pub transfer_objects_for_details: bool,
    pub services: bool,
    pub services_for_details: bool,
    pub endpoints: bool,
    pub endpoints_for_details: bool,

    /// Emit navigation properties on generated records.
    pub navigations: bool,

    pub list_view: bool,
    pub detail_partials: bool,
    pub client_script: bool,
}

impl Toggles {
    /// Everything on.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            records: true,
            records_for_details: true,
            transfer_objects: true,
            transfer_objects_for_details: true,
            services: true,
            services_for_details: true,
            endpoints: true,
            endpoints_for_details: true,
            navigations: true,
            list_view: true,
            detail_partials: true,
            client_script: true,
        }
    }
}

///
/// GenerationConfig
///
/// The finalized configuration the planner consumes: one master entity,
/// its grid and form, any detail tabs, and the toggle set. Self-contained
/// and serializable.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GenerationConfig {
    pub entity: EntityMetadata,
    pub grid: GridConfig,
    pub form: FormConfig,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tabs: Vec<DetailTabConfig>,

    #[serde(default)]
    pub toggles: Toggles,
}

///
/// ConfigError
///
/// Guard failures. Every variant is non-destructive: the configuration
/// that refused the action is left exactly as it was.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum ConfigError {
    #[error("no entity is loaded")]
    NoEntityLoaded,

    #[error("entity declares no property named '{0}'")]
    UnknownProperty(String),

    #[error("field '{0}' is already configured")]
    DuplicateField(String),

    #[error("property '{0}' is not addable (primary key, identity, or audit)")]
    FieldNotAddable(String),

    #[error("audit column '{0}' cannot be removed, only hidden")]
    AuditLocked(String),

    #[error("no configured field named '{0}'")]
    UnknownField(String),

    #[error("field '{0}' has no lookup binding")]
    NotASelect(String),

    #[error("reorder {from} -> {to} is out of bounds for {len} item(s)")]
    InvalidReorder { from: usize, to: usize, len: usize },

    #[error("tab '{0}' is already configured")]
    DuplicateTab(String),

    #[error("no tab configured for table '{0}'")]
    UnknownTab(String),

    #[error("cannot continue: no grid column is visible")]
    NoVisibleColumns,

    #[error("cannot continue: the form has no fields")]
    NoFormFields,
}
