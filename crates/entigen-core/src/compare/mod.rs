//! Schema comparator.
//!
//! Reconciles declared entity metadata against a live table snapshot.
//! Findings are data, never errors: every property gets a verdict and the
//! full result is always returned so the operator can act on each finding
//! independently.

#[cfg(test)]
mod tests;

use derive_more::Display;
use entigen_schema::{
    naming,
    node::{ColumnSchema, EntityMetadata, ForeignKey, PropertyMetadata, TableSchema},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Severity
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum Severity {
    Matched,
    Warning,
    Error,
}

///
/// Reason
///
/// Stable reason codes for non-matched verdicts.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum Reason {
    ColumnMissing,
    MaxLengthExceeds,
    NullableMismatch,
    TypeMismatch,
}

///
/// PropertyVerdict
///
/// Per-property outcome of a comparison.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PropertyVerdict {
    pub property: String,
    pub severity: Severity,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<Reason>,

    /// Human-readable detail; for type mismatches this records both type
    /// strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl PropertyVerdict {
    fn matched(property: &PropertyMetadata) -> Self {
        Self {
            property: property.name.clone(),
            severity: Severity::Matched,
            reason: None,
            detail: None,
        }
    }

    fn warning(property: &PropertyMetadata, reason: Reason, detail: String) -> Self {
        Self {
            property: property.name.clone(),
            severity: Severity::Warning,
            reason: Some(reason),
            detail: Some(detail),
        }
    }

    fn error(property: &PropertyMetadata, reason: Reason, detail: String) -> Self {
        Self {
            property: property.name.clone(),
            severity: Severity::Error,
            reason: Some(reason),
            detail: Some(detail),
        }
    }
}

///
/// ComparisonResult
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub verdicts: Vec<PropertyVerdict>,

    /// Schema columns with no corresponding property, in schema order.
    pub undeclared: Vec<ColumnSchema>,
}

impl ComparisonResult {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.verdicts.iter().any(|v| v.severity == Severity::Error)
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.verdicts
            .iter()
            .filter(|v| v.severity == Severity::Warning)
            .count()
    }

    #[must_use]
    pub fn verdict_for(&self, property: &str) -> Option<&PropertyVerdict> {
        self.verdicts
            .iter()
            .find(|v| naming::collides(&v.property, property))
    }
}

///
/// AdoptError
///

#[derive(Debug, ThisError)]
pub enum AdoptError {
    #[error("column '{0}' collides with an existing property")]
    NameCollision(String),
}

/// Compare declared metadata against a table snapshot.
///
/// Pure over its inputs; safe to run concurrently for different
/// configurations.
#[must_use]
pub fn compare(entity: &EntityMetadata, schema: &TableSchema) -> ComparisonResult {
    let verdicts = entity
        .properties
        .iter()
        .map(|property| verdict_for(property, schema))
        .collect();

    let undeclared = schema
        .columns
        .iter()
        .filter(|column| !entity.properties.contains(&column.name))
        .cloned()
        .collect();

    ComparisonResult {
        verdicts,
        undeclared,
    }
}

fn verdict_for(property: &PropertyMetadata, schema: &TableSchema) -> PropertyVerdict {
    let Some(column) = schema.get(&property.name) else {
        return PropertyVerdict::error(
            property,
            Reason::ColumnMissing,
            format!("no column '{}' in table '{}'", property.name, schema.table),
        );
    };

    if !property.ty.accepts_column(column.ty) {
        return PropertyVerdict::warning(
            property,
            Reason::TypeMismatch,
            format!(
                "property is {} ({}), column is {} ({})",
                property.ty,
                property.native_type_label(),
                column.ty,
                column.native_type
            ),
        );
    }

    // Only the unsafe direction is flagged: a nullable property over a
    // NOT NULL column can attempt to store a null. The opposite is
    // accepted as declared policy.
    if property.nullable && !column.nullable {
        return PropertyVerdict::warning(
            property,
            Reason::NullableMismatch,
            format!("property '{}' is nullable but the column is NOT NULL", property.name),
        );
    }

    if property.ty.is_text()
        && let (Some(declared), Some(actual)) = (property.max_len, column.max_len)
        && declared > actual
    {
        return PropertyVerdict::warning(
            property,
            Reason::MaxLengthExceeds,
            format!("declared max length {declared} exceeds column max length {actual}"),
        );
    }

    PropertyVerdict::matched(property)
}

/// Convert an undeclared column into a new property on the entity.
///
/// This is the only way new properties enter an already-loaded entity.
/// Nullability, max length, and key flags are copied verbatim; a
/// case-insensitive name collision is refused.
pub fn adopt_column(
    entity: &mut EntityMetadata,
    column: &ColumnSchema,
) -> Result<(), AdoptError> {
    let property = property_from_column(column);

    entity
        .properties
        .push_unique(property)
        .map_err(|p| AdoptError::NameCollision(p.name))
}

/// Project a schema column into property metadata.
#[must_use]
pub fn property_from_column(column: &ColumnSchema) -> PropertyMetadata {
    PropertyMetadata {
        name: column.name.clone(),
        ty: column.ty,
        native_type: Some(column.native_type.clone()),
        nullable: column.nullable,
        max_len: column.max_len,
        primary_key: column.primary_key,
        identity: false,
        foreign_key: column
            .references
            .as_ref()
            .map(|table| ForeignKey {
                entity: table.clone(),
            }),
        read_only: false,
        exclude_from_transfer: false,
    }
}
