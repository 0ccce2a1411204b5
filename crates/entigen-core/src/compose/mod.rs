//! Master/detail composition.
//!
//! Discovers tables related to a master entity through their foreign
//! keys and assembles detail-tab configurations, each bound to the
//! owning foreign-key column.


use crate::{
    compare::property_from_column,
    config::{ConfigContext, ConfigError, DetailTabConfig, FormConfig, GridConfig, IdArena},
};
use entigen_schema::{
    naming,
    node::{EntityMetadata, PropertyList, TableSchema},
};
use serde::{Deserialize, Serialize};

///
/// RelatedTable
///
/// One candidate detail table: its name, the foreign-key column that
/// points back at the master, and the column count reported by the
/// schema provider.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RelatedTable {
    pub table: String,
    pub fk_column: String,
    pub column_count: usize,
}

/// Tables whose foreign keys reference the master's storage table.
#[must_use]
pub fn related_tables(master: &EntityMetadata, candidates: &[TableSchema]) -> Vec<RelatedTable> {
    candidates
        .iter()
        .filter_map(|schema| {
            let fk = schema.foreign_keys().find(|column| {
                column
                    .references
                    .as_ref()
                    .is_some_and(|table| naming::collides(table, &master.table))
            })?;

            Some(RelatedTable {
                table: schema.table.clone(),
                fk_column: fk.name.clone(),
                column_count: schema.column_count(),
            })
        })
        .collect()
}

/// Derive entity metadata for a detail table from its schema snapshot.
///
/// The owning foreign-key column is marked read-only: its value comes
/// from the master record's key, so it is never operator-editable.
#[must_use]
pub fn entity_from_table(schema: &TableSchema, fk_column: &str) -> EntityMetadata {
    let properties = schema
        .columns
        .iter()
        .map(|column| {
            let mut property = property_from_column(column);
            if naming::collides(&property.name, fk_column) {
                property.read_only = true;
            }
            property
        })
        .collect();

    EntityMetadata {
        name: schema.table.clone(),
        display_name: None,
        module: None,
        table: schema.table.clone(),
        db_schema: None,
        route: None,
        properties: PropertyList::new(properties),
        navigations: Vec::new(),
    }
}

/// Build a detail-tab configuration for a related table.
///
/// The tab gets default grid and form configurations scoped to its own
/// table; the owning foreign-key column is hidden in the grid and
/// excluded from the form's addable pool.
#[must_use]
pub fn build_tab(
    related: &RelatedTable,
    schema: &TableSchema,
    arena: &mut IdArena,
    order: u32,
) -> DetailTabConfig {
    let entity = entity_from_table(schema, &related.fk_column);

    let mut grid = GridConfig::build(&entity, arena);
    // The fk column mirrors the master key on every row.
    grid.set_visible(&related.fk_column, false).ok();

    DetailTabConfig {
        table: related.table.clone(),
        title: naming::humanize(&related.table),
        icon: None,
        order,
        fk_column: related.fk_column.clone(),
        allow_create: true,
        allow_edit: true,
        allow_delete: true,
        entity,
        grid,
        form: FormConfig::default(),
    }
}

/// Build and append a tab for a related table onto the loaded
/// configuration. Rejected if the table is already configured.
pub fn add_tab(
    ctx: &mut ConfigContext,
    related: &RelatedTable,
    schema: &TableSchema,
) -> Result<(), ConfigError> {
    ctx.generation_config()?;

    let order = ctx
        .tabs()
        .iter()
        .map(|t| t.order + 1)
        .max()
        .unwrap_or_default();

    let tab = build_tab(related, schema, ctx.arena_mut(), order);

    ctx.add_tab(tab)
}
