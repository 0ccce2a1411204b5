//! Type and format inference.
//!
//! Pure, total functions from a semantic type (and, where it matters, the
//! property name) to UI defaults. Identical inputs always yield identical
//! outputs; configuration defaults and tests depend on that.

use derive_more::{Display, FromStr};
use entigen_schema::{naming, types::SemanticType};
use serde::{Deserialize, Serialize};

///
/// DisplayFormat
///
/// How a grid cell renders a value.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize,
)]
#[remain::sorted]
pub enum DisplayFormat {
    Boolean,
    Currency,
    Date,
    DateTime,
    Number,
    Text,
}

///
/// Alignment
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize,
)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

///
/// InputKind
///
/// The form control a property edits through.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize,
)]
#[remain::sorted]
pub enum InputKind {
    Checkbox,
    Date,
    DateTime,
    Email,
    Hidden,
    Number,
    Password,
    Select,
    Text,
    TextArea,
}

/// Grid display format for a semantic type.
#[must_use]
pub const fn format(ty: SemanticType) -> DisplayFormat {
    match ty {
        SemanticType::Boolean => DisplayFormat::Boolean,
        SemanticType::Date => DisplayFormat::Date,
        SemanticType::DateTime => DisplayFormat::DateTime,
        SemanticType::Decimal => DisplayFormat::Currency,
        SemanticType::Integer => DisplayFormat::Number,
        SemanticType::Binary | SemanticType::Guid | SemanticType::Text => DisplayFormat::Text,
    }
}

/// Cell alignment for a semantic type: numbers right, booleans and
/// temporals center, everything else left.
#[must_use]
pub const fn align(ty: SemanticType) -> Alignment {
    match ty {
        SemanticType::Decimal | SemanticType::Integer => Alignment::Right,
        SemanticType::Boolean | SemanticType::Date | SemanticType::DateTime => Alignment::Center,
        SemanticType::Binary | SemanticType::Guid | SemanticType::Text => Alignment::Left,
    }
}

/// Default column width in pixels for a display format.
#[must_use]
pub const fn default_width(format: DisplayFormat) -> u16 {
    match format {
        DisplayFormat::Boolean => 80,
        DisplayFormat::Currency | DisplayFormat::Number => 110,
        DisplayFormat::Date => 100,
        DisplayFormat::DateTime => 140,
        DisplayFormat::Text => 180,
    }
}

/// Form control for a property.
///
/// Name-based overrides win over type rules: email addresses, secrets,
/// and free-text description/notes fields are recognized by name.
/// Foreign-key intent is signalled by the caller through `is_foreign_key`
/// and maps to a lookup select.
#[must_use]
pub fn input_kind(ty: SemanticType, name: &str, is_foreign_key: bool) -> InputKind {
    let normalized = naming::normalize(name);

    if normalized.contains("email") {
        return InputKind::Email;
    }

    if normalized.contains("senha") || normalized.contains("password") || normalized.contains("secret") {
        return InputKind::Password;
    }

    if is_free_text(&normalized) {
        return InputKind::TextArea;
    }

    if is_foreign_key {
        return InputKind::Select;
    }

    match ty {
        SemanticType::Boolean => InputKind::Checkbox,
        SemanticType::Date => InputKind::Date,
        SemanticType::DateTime => InputKind::DateTime,
        SemanticType::Decimal | SemanticType::Integer => InputKind::Number,
        SemanticType::Binary => InputKind::Hidden,
        SemanticType::Guid | SemanticType::Text => InputKind::Text,
    }
}

/// Column span on a 12-column form grid.
#[must_use]
pub fn column_span(ty: SemanticType, name: &str) -> u8 {
    if is_free_text(&naming::normalize(name)) {
        return 12;
    }

    match ty {
        SemanticType::Boolean => 3,
        SemanticType::Date => 4,
        _ => 6,
    }
}

// Free-text fields get a textarea and the full row.
fn is_free_text(normalized: &str) -> bool {
    normalized.contains("descricao")
        || normalized.contains("observacao")
        || normalized.contains("description")
        || normalized.contains("notes")
}
