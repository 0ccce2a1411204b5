use crate::{
    config::{
        ConfigError,
        id::{FieldId, IdArena},
    },
    infer,
    infer::InputKind,
};
use entigen_schema::{
    naming,
    node::{EntityMetadata, PropertyMetadata},
};
use serde::{Deserialize, Serialize};
use std::ops::Not;

///
/// ValidationRule
///
/// Closed set of field validations; semantic national-id formats are
/// first-class variants rather than stringly-typed tags.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ValidationRule {
    Cnpj,
    Cpf,
    Range { min: i64, max: i64 },
    Regex(String),
}

///
/// LookupBinding
///
/// Remote source for a select field, with an optional single-level
/// cascade gated by a parent field.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LookupBinding {
    pub endpoint: String,
    pub value_field: String,
    pub text_field: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cascade: Option<Cascade>,
}

///
/// Cascade
///
/// Parent field whose value feeds a filter parameter on the lookup
/// request. Set and cleared as a unit; a half-configured cascade is
/// unrepresentable.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Cascade {
    pub parent_field: String,
    pub filter_param: String,
}

///
/// FormFieldConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FormFieldConfig {
    pub id: FieldId,
    pub property: String,
    pub kind: InputKind,
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    pub required: bool,

    /// Span on a 12-column grid.
    pub span: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<ValidationRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup: Option<LookupBinding>,

    pub order: u32,
}

///
/// FormConfig
///
/// Operator-assembled field list. Starts empty; fields are drawn from the
/// addable pool (never primary keys, identity columns, or audit
/// properties).
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FormConfig {
    fields: Vec<FormFieldConfig>,
}

impl FormConfig {
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormFieldConfig> {
        self.fields.iter()
    }

    #[must_use]
    pub fn get(&self, property: &str) -> Option<&FormFieldConfig> {
        self.fields
            .iter()
            .find(|f| naming::collides(&f.property, property))
    }

    #[must_use]
    pub fn contains(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    /// Properties still offered for adding: declared, not a primary key,
    /// not identity, not read-only, not audit, and not already present.
    #[must_use]
    pub fn addable_pool<'a>(&self, entity: &'a EntityMetadata) -> Vec<&'a PropertyMetadata> {
        entity
            .properties
            .iter()
            .filter(|p| Self::is_addable(p) && !self.contains(&p.name))
            .collect()
    }

    /// Add one property as a form field.
    ///
    /// The same guard covers operator adds, "add all remaining", and a
    /// double-fired drop: a case/separator-insensitive match against the
    /// present fields or the audit blocklist is rejected.
    pub fn add(
        &mut self,
        entity: &EntityMetadata,
        property: &str,
        arena: &mut IdArena,
    ) -> Result<FieldId, ConfigError> {
        let Some(declared) = entity.properties.get(property) else {
            return Err(ConfigError::UnknownProperty(property.into()));
        };

        if !Self::is_addable(declared) {
            return Err(ConfigError::FieldNotAddable(declared.name.clone()));
        }

        if self.contains(&declared.name) {
            return Err(ConfigError::DuplicateField(declared.name.clone()));
        }

        let field = Self::field_from_property(declared, arena.alloc(), self.fields.len() as u32);
        let id = field.id;
        self.fields.push(field);

        Ok(id)
    }

    /// Add every remaining addable property; returns how many were added.
    pub fn add_all_remaining(&mut self, entity: &EntityMetadata, arena: &mut IdArena) -> usize {
        let remaining: Vec<String> = self
            .addable_pool(entity)
            .into_iter()
            .map(|p| p.name.clone())
            .collect();

        let mut added = 0;
        for name in remaining {
            if self.add(entity, &name, arena).is_ok() {
                added += 1;
            }
        }

        added
    }

    pub fn remove(&mut self, property: &str) -> Result<FormFieldConfig, ConfigError> {
        let index = self
            .fields
            .iter()
            .position(|f| naming::collides(&f.property, property))
            .ok_or_else(|| ConfigError::UnknownField(property.into()))?;

        let removed = self.fields.remove(index);
        self.renumber();

        Ok(removed)
    }

    /// Empty the field list.
    ///
    /// The id arena is deliberately not touched: ids freed here must not
    /// be handed out again within the session.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Move the field at `from` to `to`; a pure permutation that rewrites
    /// the order attribute.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), ConfigError> {
        let len = self.fields.len();

        if from >= len || to >= len {
            return Err(ConfigError::InvalidReorder { from, to, len });
        }

        let field = self.fields.remove(from);
        self.fields.insert(to, field);
        self.renumber();

        Ok(())
    }

    pub fn set_required(&mut self, property: &str, required: bool) -> Result<(), ConfigError> {
        self.get_mut(property)?.required = required;

        Ok(())
    }

    pub fn set_label(&mut self, property: &str, label: impl Into<String>) -> Result<(), ConfigError> {
        self.get_mut(property)?.label = label.into();

        Ok(())
    }

    pub fn push_rule(&mut self, property: &str, rule: ValidationRule) -> Result<(), ConfigError> {
        self.get_mut(property)?.rules.push(rule);

        Ok(())
    }

    /// Gate a select field's lookup on a parent field.
    ///
    /// The parent must itself be a configured field.
    pub fn set_cascade(
        &mut self,
        property: &str,
        parent_field: &str,
        filter_param: impl Into<String>,
    ) -> Result<(), ConfigError> {
        if !self.contains(parent_field) {
            return Err(ConfigError::UnknownField(parent_field.into()));
        }

        let parent_field = parent_field.to_string();
        let field = self.get_mut(property)?;
        let Some(lookup) = field.lookup.as_mut() else {
            return Err(ConfigError::NotASelect(field.property.clone()));
        };

        lookup.cascade = Some(Cascade {
            parent_field,
            filter_param: filter_param.into(),
        });

        Ok(())
    }

    /// Drop the cascade: parent reference and filter parameter go
    /// together, atomically.
    pub fn clear_cascade(&mut self, property: &str) -> Result<(), ConfigError> {
        let field = self.get_mut(property)?;
        let Some(lookup) = field.lookup.as_mut() else {
            return Err(ConfigError::NotASelect(field.property.clone()));
        };

        lookup.cascade = None;

        Ok(())
    }

    /// Drop fields that no longer reference a declared property, after a
    /// same-entity description reload.
    pub(crate) fn retain_declared(&mut self, entity: &EntityMetadata) {
        self.fields.retain(|f| entity.properties.contains(&f.property));
        self.renumber();
    }

    // Read-only covers properties supplied by the system rather than the
    // operator, including a detail tab's owning foreign-key column.
    fn is_addable(property: &PropertyMetadata) -> bool {
        property.primary_key.not()
            && property.identity.not()
            && property.read_only.not()
            && !property.is_audit()
    }

    fn field_from_property(
        property: &PropertyMetadata,
        id: FieldId,
        order: u32,
    ) -> FormFieldConfig {
        let kind = infer::input_kind(property.ty, &property.name, property.is_foreign_key());

        let lookup = if kind == InputKind::Select {
            Some(LookupBinding {
                endpoint: property
                    .foreign_key
                    .as_ref()
                    .map_or_else(|| naming::normalize(&property.name), |fk| {
                        naming::normalize(&fk.entity)
                    }),
                value_field: "Id".into(),
                text_field: "Nome".into(),
                cascade: None,
            })
        } else {
            None
        };

        FormFieldConfig {
            id,
            property: property.name.clone(),
            kind,
            label: naming::humanize(&property.name),
            placeholder: None,
            help: None,
            required: !property.nullable,
            span: infer::column_span(property.ty, &property.name),
            group: None,
            rules: Vec::new(),
            lookup,
            order,
        }
    }

    fn renumber(&mut self) {
        for (index, field) in self.fields.iter_mut().enumerate() {
            field.order = index as u32;
        }
    }

    fn get_mut(&mut self, property: &str) -> Result<&mut FormFieldConfig, ConfigError> {
        self.fields
            .iter_mut()
            .find(|f| naming::collides(&f.property, property))
            .ok_or_else(|| ConfigError::UnknownField(property.into()))
    }
}
