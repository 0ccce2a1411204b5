use crate::{
    compare::{AdoptError, Reason, Severity, adopt_column, compare},
    test_fixtures::{funcionario, funcionario_table},
};
use entigen_schema::{
    node::{ColumnSchema, PropertyList, PropertyMetadata},
    types::SemanticType,
};

#[test]
fn matching_entity_produces_only_matched_verdicts() {
    let entity = funcionario();
    let result = compare(&entity, &funcionario_table());

    assert!(!result.has_errors());
    assert_eq!(result.warning_count(), 0);
    assert!(
        result
            .verdicts
            .iter()
            .all(|v| v.severity == Severity::Matched)
    );
}

#[test]
fn missing_column_is_an_error() {
    let mut entity = funcionario();
    let mut properties: Vec<_> = entity.properties.iter().cloned().collect();
    properties.push(PropertyMetadata::new("Telefone", SemanticType::Text));
    entity.properties = PropertyList::new(properties);

    let result = compare(&entity, &funcionario_table());
    let verdict = result.verdict_for("Telefone").unwrap();

    assert_eq!(verdict.severity, Severity::Error);
    assert_eq!(verdict.reason, Some(Reason::ColumnMissing));
}

#[test]
fn incompatible_type_is_a_warning_with_both_types_recorded() {
    let mut entity = funcionario();
    let properties: Vec<_> = entity
        .properties
        .iter()
        .cloned()
        .map(|mut p| {
            if p.name == "Nome" {
                p.ty = SemanticType::Integer;
            }
            p
        })
        .collect();
    entity.properties = PropertyList::new(properties);

    let result = compare(&entity, &funcionario_table());
    let verdict = result.verdict_for("Nome").unwrap();

    assert_eq!(verdict.severity, Severity::Warning);
    assert_eq!(verdict.reason, Some(Reason::TypeMismatch));

    let detail = verdict.detail.as_deref().unwrap();
    assert!(detail.contains("Integer"));
    assert!(detail.contains("varchar"));
}

#[test]
fn nullable_property_over_not_null_column_warns() {
    let mut entity = funcionario();
    let properties: Vec<_> = entity
        .properties
        .iter()
        .cloned()
        .map(|mut p| {
            if p.name == "Nome" {
                p.nullable = true;
            }
            p
        })
        .collect();
    entity.properties = PropertyList::new(properties);

    let result = compare(&entity, &funcionario_table());
    let verdict = result.verdict_for("Nome").unwrap();

    assert_eq!(verdict.severity, Severity::Warning);
    assert_eq!(verdict.reason, Some(Reason::NullableMismatch));
}

#[test]
fn not_null_property_over_nullable_column_is_safe() {
    // The adopted Email column is nullable; declare it NOT NULL.
    let mut entity = funcionario();
    let mut properties: Vec<_> = entity.properties.iter().cloned().collect();
    properties.push(PropertyMetadata {
        max_len: Some(80),
        ..PropertyMetadata::new("Email", SemanticType::Text)
    });
    entity.properties = PropertyList::new(properties);

    let result = compare(&entity, &funcionario_table());
    let verdict = result.verdict_for("Email").unwrap();

    assert_eq!(verdict.severity, Severity::Matched);
}

#[test]
fn declared_max_length_beyond_column_warns() {
    let mut entity = funcionario();
    let properties: Vec<_> = entity
        .properties
        .iter()
        .cloned()
        .map(|mut p| {
            if p.name == "Nome" {
                p.max_len = Some(120);
            }
            p
        })
        .collect();
    entity.properties = PropertyList::new(properties);

    let result = compare(&entity, &funcionario_table());
    let verdict = result.verdict_for("Nome").unwrap();

    assert_eq!(verdict.severity, Severity::Warning);
    assert_eq!(verdict.reason, Some(Reason::MaxLengthExceeds));
}

#[test]
fn column_lookup_is_case_insensitive() {
    let mut entity = funcionario();
    let properties: Vec<_> = entity
        .properties
        .iter()
        .cloned()
        .map(|mut p| {
            p.name = p.name.to_uppercase();
            p
        })
        .collect();
    entity.properties = PropertyList::new(properties);

    let result = compare(&entity, &funcionario_table());
    assert!(!result.has_errors());
}

#[test]
fn extra_schema_column_is_undeclared() {
    let entity = funcionario();
    let result = compare(&entity, &funcionario_table());

    let names: Vec<_> = result.undeclared.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Email"]);
}

#[test]
fn adopting_an_undeclared_column_copies_its_shape() {
    let mut entity = funcionario();
    let result = compare(&entity, &funcionario_table());
    let email: ColumnSchema = result.undeclared[0].clone();

    adopt_column(&mut entity, &email).unwrap();

    let adopted = entity.properties.get("Email").unwrap();
    assert_eq!(adopted.ty, SemanticType::Text);
    assert!(adopted.nullable);
    assert_eq!(adopted.max_len, Some(80));
    assert!(!adopted.primary_key);

    // A second comparison now reports nothing undeclared.
    let again = compare(&entity, &funcionario_table());
    assert!(again.undeclared.is_empty());
}

#[test]
fn adoption_refuses_a_case_insensitive_collision() {
    let mut entity = funcionario();
    let collision = ColumnSchema {
        name: "NOME".into(),
        ty: SemanticType::Text,
        native_type: "varchar".into(),
        nullable: true,
        max_len: Some(60),
        primary_key: false,
        foreign_key: false,
        references: None,
    };

    let err = adopt_column(&mut entity, &collision).unwrap_err();
    assert!(matches!(err, AdoptError::NameCollision(name) if name == "NOME"));
    assert_eq!(entity.properties.len(), 3);
}

#[test]
fn adopted_foreign_key_records_the_referenced_table() {
    let mut entity = funcionario();
    let fk = ColumnSchema {
        name: "CargoId".into(),
        ty: SemanticType::Integer,
        native_type: "int".into(),
        nullable: true,
        max_len: None,
        primary_key: false,
        foreign_key: true,
        references: Some("Cargo".into()),
    };

    adopt_column(&mut entity, &fk).unwrap();

    let adopted = entity.properties.get("CargoId").unwrap();
    let reference = adopted.foreign_key.as_ref().unwrap();
    assert_eq!(reference.entity, "Cargo");
}

#[test]
fn comparison_is_deterministic() {
    let entity = funcionario();
    let schema = funcionario_table();

    assert_eq!(compare(&entity, &schema), compare(&entity, &schema));
}
