use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

///
/// SemanticType
///
/// Database-independent classification of a property or column.
/// Native type strings (varchar, smallint, ...) are carried alongside the
/// semantic type and collapse into one of these categories.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[remain::sorted]
pub enum SemanticType {
    Binary,
    Boolean,
    Date,
    DateTime,
    Decimal,
    Guid,
    Integer,
    Text,
}

impl SemanticType {
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Decimal | Self::Integer)
    }

    #[must_use]
    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }

    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Text)
    }

    /// True if a property of this type can be backed by a column of
    /// `column` type.
    ///
    /// Exact equality is always compatible. The only cross-type pairings
    /// accepted are widenings that lose nothing on read: a Decimal property
    /// over an Integer column, and a Date property over a DateTime column.
    #[must_use]
    pub const fn accepts_column(self, column: Self) -> bool {
        match (self, column) {
            (Self::Decimal, Self::Integer) | (Self::Date, Self::DateTime) => true,
            _ => self as u8 == column as u8,
        }
    }
}

///
/// Cardinality
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, PartialEq, Serialize,
)]
pub enum Cardinality {
    #[default]
    One,
    Opt,
    Many,
}
