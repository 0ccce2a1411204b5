use crate::{naming, types::SemanticType};
use serde::{Deserialize, Serialize};
use std::ops::Not;

///
/// ColumnSchema
///
/// One column as reported by the live data store; the ground-truth
/// counterpart to a declared property.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ColumnSchema {
    pub name: String,
    pub ty: SemanticType,

    /// Native type as reported by the store (varchar, smallint, ...).
    pub native_type: String,

    #[serde(default)]
    pub nullable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_len: Option<u32>,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub primary_key: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub foreign_key: bool,

    /// Referenced table, foreign-key columns only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
}

///
/// TableSchema
///
/// A point-in-time snapshot of a table's structure, supplied externally
/// per table name (optionally per named database).
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableSchema {
    pub table: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns
            .iter()
            .find(|c| naming::collides(&c.name, name))
    }

    /// Foreign-key columns with their referenced tables.
    pub fn foreign_keys(&self) -> impl Iterator<Item = &ColumnSchema> {
        self.columns.iter().filter(|c| c.foreign_key)
    }
}
