//! Node wiring; metadata structure lives in the submodules.

mod entity;
mod property;
mod table;

pub use entity::{EntityMetadata, Navigation};
pub use property::{ForeignKey, PropertyList, PropertyMetadata};
pub use table::{ColumnSchema, TableSchema};
