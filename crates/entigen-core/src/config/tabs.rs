use crate::config::{form::FormConfig, grid::GridConfig};
use entigen_schema::node::EntityMetadata;
use serde::{Deserialize, Serialize};

///
/// DetailTabConfig
///
/// One dependent table rendered as a tab of the master form, linked by
/// the owning foreign-key column. Carries its own grid and form
/// configuration scoped to that table.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DetailTabConfig {
    pub table: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Explicit display order, set at append time and editable
    /// independently of list position.
    pub order: u32,

    /// Foreign-key column that binds rows to the master record. Supplied
    /// implicitly by the master key; excluded from the tab's own form.
    pub fk_column: String,

    pub allow_create: bool,
    pub allow_edit: bool,
    pub allow_delete: bool,

    /// Entity description derived from the tab's table schema; the pool
    /// the tab's own form draws from.
    pub entity: EntityMetadata,

    pub grid: GridConfig,
    pub form: FormConfig,
}
