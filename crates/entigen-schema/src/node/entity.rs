use crate::{
    naming,
    node::{PropertyList, PropertyMetadata},
    types::Cardinality,
};
use serde::{Deserialize, Serialize};

///
/// EntityMetadata
///
/// The declared shape of a data record, independent of the live database.
/// Replaced wholesale (never mutated field-by-field) when a different
/// description is loaded; replacement invalidates all dependent
/// configuration state.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityMetadata {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Owning module within the host system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Storage location.
    pub table: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_schema: Option<String>,

    /// API route the generated endpoints mount under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,

    pub properties: PropertyList,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub navigations: Vec<Navigation>,
}

impl EntityMetadata {
    /// Display name, falling back to a humanized entity name.
    #[must_use]
    pub fn resolved_display_name(&self) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| naming::humanize(&self.name))
    }

    /// First declared primary-key property, if any.
    #[must_use]
    pub fn pk_property(&self) -> Option<&PropertyMetadata> {
        self.properties.iter().find(|p| p.primary_key)
    }

    /// True if `other` describes the same entity.
    ///
    /// Identity is the entity name up to normalization; a differing name
    /// means dependent configuration must be discarded.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        naming::collides(&self.name, &other.name)
    }
}

///
/// Navigation
///
/// A declared relation to another entity, owned by a foreign-key column.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Navigation {
    pub name: String,
    pub target: String,

    #[serde(default)]
    pub cardinality: Cardinality,

    /// Foreign-key column that owns the relation.
    pub fk_column: String,
}
