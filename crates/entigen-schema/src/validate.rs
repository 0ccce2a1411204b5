//! Entity-description validation.
//!
//! Runs in one deterministic pass and collects every problem into an
//! [`ErrorTree`] so the caller can surface all of them at once. A failed
//! validation blocks loading; the previous configuration state is left
//! untouched by the caller.

use crate::{
    MAX_ENTITY_NAME_LEN, MAX_PROPERTY_NAME_LEN, err,
    error::ErrorTree,
    naming,
    node::EntityMetadata,
};
use std::collections::BTreeSet;

/// Validate a freshly loaded entity description.
pub fn validate_entity(entity: &EntityMetadata) -> Result<(), ErrorTree> {
    let mut errs = ErrorTree::new();

    validate_names(entity, &mut errs);
    validate_properties(entity, &mut errs);
    validate_navigations(entity, &mut errs);

    errs.result()
}

fn validate_names(entity: &EntityMetadata, errs: &mut ErrorTree) {
    if entity.name.trim().is_empty() {
        err!(errs, "entity name is missing");
    } else if entity.name.len() > MAX_ENTITY_NAME_LEN {
        err!(
            errs,
            "entity name '{}' exceeds {MAX_ENTITY_NAME_LEN} characters",
            entity.name
        );
    }

    if entity.table.trim().is_empty() {
        err!(errs, "entity '{}' has no storage table", entity.name);
    }
}

fn validate_properties(entity: &EntityMetadata, errs: &mut ErrorTree) {
    if entity.properties.is_empty() {
        err!(errs, "entity '{}' declares no properties", entity.name);
        return;
    }

    let mut seen = BTreeSet::new();

    for (index, property) in entity.properties.iter().enumerate() {
        let route = format!("properties.{index}");

        if property.name.trim().is_empty() {
            errs.add_at(route, "property name is missing");
            continue;
        }

        if property.name.len() > MAX_PROPERTY_NAME_LEN {
            errs.add_at(
                route.clone(),
                format!(
                    "property name '{}' exceeds {MAX_PROPERTY_NAME_LEN} characters",
                    property.name
                ),
            );
        }

        if property.max_len.is_some() && !property.ty.is_text() {
            errs.add_at(
                route.clone(),
                format!("property '{}' declares a max length but is not text", property.name),
            );
        }

        if !seen.insert(naming::normalize(&property.name)) {
            errs.add_at(route, format!("duplicate property name '{}'", property.name));
        }
    }
}

fn validate_navigations(entity: &EntityMetadata, errs: &mut ErrorTree) {
    for (index, navigation) in entity.navigations.iter().enumerate() {
        let route = format!("navigations.{index}");

        if navigation.target.trim().is_empty() {
            errs.add_at(route.clone(), format!("navigation '{}' has no target", navigation.name));
        }

        if !entity.properties.contains(&navigation.fk_column) {
            errs.add_at(
                route,
                format!(
                    "navigation '{}' references unknown column '{}'",
                    navigation.name, navigation.fk_column
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        node::{Navigation, PropertyList, PropertyMetadata},
        types::{Cardinality, SemanticType},
    };

    fn valid_entity() -> EntityMetadata {
        EntityMetadata {
            name: "Funcionario".into(),
            display_name: None,
            module: Some("Rh".into()),
            table: "Funcionario".into(),
            db_schema: None,
            route: Some("rh/funcionarios".into()),
            properties: PropertyList::new(vec![
                PropertyMetadata {
                    primary_key: true,
                    identity: true,
                    ..PropertyMetadata::new("Id", SemanticType::Integer)
                },
                PropertyMetadata {
                    max_len: Some(60),
                    ..PropertyMetadata::new("Nome", SemanticType::Text)
                },
            ]),
            navigations: Vec::new(),
        }
    }

    #[test]
    fn valid_entity_passes() {
        assert!(validate_entity(&valid_entity()).is_ok());
    }

    #[test]
    fn missing_name_and_empty_properties_are_both_reported() {
        let mut entity = valid_entity();
        entity.name = " ".into();
        entity.properties = PropertyList::default();

        let errs = validate_entity(&entity).unwrap_err();
        assert_eq!(errs.len(), 2);
    }

    #[test]
    fn duplicate_property_names_are_rejected_up_to_normalization() {
        let mut entity = valid_entity();
        entity.properties = PropertyList::new(vec![
            PropertyMetadata::new("Nome", SemanticType::Text),
            PropertyMetadata::new("nome", SemanticType::Text),
        ]);

        let errs = validate_entity(&entity).unwrap_err();
        let messages: Vec<_> = errs.iter().map(|(_, m)| m.to_string()).collect();
        assert!(messages.iter().any(|m| m.contains("duplicate property name")));
    }

    #[test]
    fn max_length_on_non_text_is_reported() {
        let mut entity = valid_entity();
        entity.properties = PropertyList::new(vec![PropertyMetadata {
            max_len: Some(10),
            ..PropertyMetadata::new("Salario", SemanticType::Decimal)
        }]);

        let errs = validate_entity(&entity).unwrap_err();
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn navigation_with_unknown_fk_column_is_reported() {
        let mut entity = valid_entity();
        entity.navigations = vec![Navigation {
            name: "Cargo".into(),
            target: "Cargo".into(),
            cardinality: Cardinality::One,
            fk_column: "CargoId".into(),
        }];

        let errs = validate_entity(&entity).unwrap_err();
        let routes: Vec<_> = errs.iter().map(|(r, _)| r.to_string()).collect();
        assert_eq!(routes, vec!["navigations.0"]);
    }
}
