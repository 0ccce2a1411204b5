use crate::{naming, types::SemanticType};
use serde::{Deserialize, Serialize};
use std::ops::Not;

///
/// PropertyMetadata
///
/// One declared attribute of an entity. Immutable once loaded from a
/// description; the owning entity is replaced wholesale when its
/// description changes.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PropertyMetadata {
    pub name: String,
    pub ty: SemanticType,

    /// Native type string as declared (varchar, smallint, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_type: Option<String>,

    #[serde(default)]
    pub nullable: bool,

    /// Declared maximum length, text properties only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_len: Option<u32>,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub primary_key: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub identity: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<ForeignKey>,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub read_only: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub exclude_from_transfer: bool,
}

impl PropertyMetadata {
    /// Minimal constructor; flags default to off.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: SemanticType) -> Self {
        Self {
            name: name.into(),
            ty,
            native_type: None,
            nullable: false,
            max_len: None,
            primary_key: false,
            identity: false,
            foreign_key: None,
            read_only: false,
            exclude_from_transfer: false,
        }
    }

    /// True for bookkeeping properties (tenant, audit timestamps/actors,
    /// row version).
    #[must_use]
    pub fn is_audit(&self) -> bool {
        naming::is_audit_field(&self.name)
    }

    #[must_use]
    pub const fn is_foreign_key(&self) -> bool {
        self.foreign_key.is_some()
    }

    /// Native type string, falling back to the semantic type name.
    #[must_use]
    pub fn native_type_label(&self) -> String {
        self.native_type
            .clone()
            .unwrap_or_else(|| self.ty.to_string())
    }
}

///
/// ForeignKey
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ForeignKey {
    /// Referenced entity name.
    pub entity: String,
}

///
/// PropertyList
///
/// Ordered property set with case-insensitive lookup.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PropertyList {
    properties: Vec<PropertyMetadata>,
}

impl PropertyList {
    #[must_use]
    pub const fn new(properties: Vec<PropertyMetadata>) -> Self {
        Self { properties }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyMetadata> {
        self.properties
            .iter()
            .find(|p| naming::collides(&p.name, name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyMetadata> {
        self.properties.iter()
    }

    /// Append a property, refusing a case-insensitive name collision.
    /// Schema-adopted columns are the only callers.
    pub fn push_unique(&mut self, property: PropertyMetadata) -> Result<(), PropertyMetadata> {
        if self.contains(&property.name) {
            return Err(property);
        }

        self.properties.push(property);

        Ok(())
    }
}

impl<'a> IntoIterator for &'a PropertyList {
    type Item = &'a PropertyMetadata;
    type IntoIter = std::slice::Iter<'a, PropertyMetadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> PropertyList {
        PropertyList::new(vec![
            PropertyMetadata::new("Id", SemanticType::Integer),
            PropertyMetadata::new("Nome", SemanticType::Text),
        ])
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let list = list();
        assert!(list.contains("nome"));
        assert_eq!(list.get("NOME").map(|p| p.name.as_str()), Some("Nome"));
        assert!(!list.contains("Email"));
    }

    #[test]
    fn push_unique_rejects_collision() {
        let mut list = list();
        let dup = PropertyMetadata::new("nome", SemanticType::Text);
        assert!(list.push_unique(dup).is_err());
        assert_eq!(list.len(), 2);

        let fresh = PropertyMetadata::new("Email", SemanticType::Text);
        assert!(list.push_unique(fresh).is_ok());
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn audit_flag_follows_canonical_list() {
        let audit = PropertyMetadata::new("DataCriacao", SemanticType::DateTime);
        assert!(audit.is_audit());

        let business = PropertyMetadata::new("DataNascimento", SemanticType::Date);
        assert!(!business.is_audit());
    }
}
