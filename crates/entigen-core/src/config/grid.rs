use crate::{
    config::{
        ConfigError,
        id::{FieldId, IdArena},
    },
    infer,
    infer::{Alignment, DisplayFormat},
};
use entigen_schema::{naming, node::EntityMetadata};
use serde::{Deserialize, Serialize};

///
/// GridColumnConfig
///
/// One list-view column for a property.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GridColumnConfig {
    pub id: FieldId,
    pub property: String,
    pub title: String,
    pub visible: bool,
    pub sortable: bool,
    pub searchable: bool,
    pub format: DisplayFormat,
    pub align: Alignment,
    pub width: u16,
    pub order: u32,

    /// Audit-category columns cannot be removed, only hidden.
    pub audit_locked: bool,
}

///
/// GridConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GridConfig {
    columns: Vec<GridColumnConfig>,
}

impl GridConfig {
    /// Project entity metadata into a default grid.
    ///
    /// Every declared property gets a column; primary keys and
    /// audit-category properties start hidden, and audit columns are
    /// locked against removal.
    #[must_use]
    pub fn build(entity: &EntityMetadata, arena: &mut IdArena) -> Self {
        let columns = entity
            .properties
            .iter()
            .enumerate()
            .map(|(index, property)| {
                let audit = property.is_audit();
                let format = infer::format(property.ty);

                GridColumnConfig {
                    id: arena.alloc(),
                    property: property.name.clone(),
                    title: naming::humanize(&property.name),
                    visible: !property.primary_key && !audit,
                    sortable: true,
                    searchable: property.ty.is_text(),
                    format,
                    align: infer::align(property.ty),
                    width: infer::default_width(format),
                    order: index as u32,
                    audit_locked: audit,
                }
            })
            .collect();

        Self { columns }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridColumnConfig> {
        self.columns.iter()
    }

    #[must_use]
    pub fn get(&self, property: &str) -> Option<&GridColumnConfig> {
        self.columns
            .iter()
            .find(|c| naming::collides(&c.property, property))
    }

    /// Visible columns in display order.
    #[must_use]
    pub fn visible_columns(&self) -> Vec<&GridColumnConfig> {
        let mut visible: Vec<_> = self.columns.iter().filter(|c| c.visible).collect();
        visible.sort_by_key(|c| c.order);

        visible
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.columns.iter().filter(|c| c.visible).count()
    }

    pub fn set_visible(&mut self, property: &str, visible: bool) -> Result<(), ConfigError> {
        let column = self.get_mut(property)?;
        column.visible = visible;

        Ok(())
    }

    pub fn set_title(&mut self, property: &str, title: impl Into<String>) -> Result<(), ConfigError> {
        let column = self.get_mut(property)?;
        column.title = title.into();

        Ok(())
    }

    pub fn set_width(&mut self, property: &str, width: u16) -> Result<(), ConfigError> {
        let column = self.get_mut(property)?;
        column.width = width;

        Ok(())
    }

    /// Delete a column from the configuration.
    ///
    /// Audit columns are locked: they can be hidden but never deleted.
    pub fn remove(&mut self, property: &str) -> Result<GridColumnConfig, ConfigError> {
        let index = self
            .columns
            .iter()
            .position(|c| naming::collides(&c.property, property))
            .ok_or_else(|| ConfigError::UnknownField(property.into()))?;

        if self.columns[index].audit_locked {
            return Err(ConfigError::AuditLocked(self.columns[index].property.clone()));
        }

        let removed = self.columns.remove(index);
        self.renumber();

        Ok(removed)
    }

    /// Move the column at `from` to `to`.
    ///
    /// A pure permutation: no column is duplicated or lost, and the order
    /// attribute is rewritten to match the new positions.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), ConfigError> {
        let len = self.columns.len();

        if from >= len || to >= len {
            return Err(ConfigError::InvalidReorder { from, to, len });
        }

        let column = self.columns.remove(from);
        self.columns.insert(to, column);
        self.renumber();

        Ok(())
    }

    fn renumber(&mut self) {
        for (index, column) in self.columns.iter_mut().enumerate() {
            column.order = index as u32;
        }
    }

    fn get_mut(&mut self, property: &str) -> Result<&mut GridColumnConfig, ConfigError> {
        self.columns
            .iter_mut()
            .find(|c| naming::collides(&c.property, property))
            .ok_or_else(|| ConfigError::UnknownField(property.into()))
    }
}
