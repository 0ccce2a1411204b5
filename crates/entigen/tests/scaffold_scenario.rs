//! End-to-end scenario: load `Funcionario`, reconcile against the live
//! table, adopt an undeclared column, configure the UI, and plan.

use entigen::{
    core::{
        compare::{Severity, adopt_column, compare},
        compose,
        config::{ConfigContext, Toggles},
        plan::{ArtifactKind, plan},
        project::{self, ProjectSnapshot},
    },
    schema::{
        node::{ColumnSchema, EntityMetadata, PropertyList, PropertyMetadata, TableSchema},
        types::SemanticType,
    },
};

fn funcionario() -> EntityMetadata {
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
            PropertyMetadata::new("DataCriacao", SemanticType::DateTime),
        ]),
        navigations: Vec::new(),
    }
}

fn funcionario_table() -> TableSchema {
    let column = |name: &str, ty, native: &str, nullable, max_len, pk| ColumnSchema {
        name: name.into(),
        ty,
        native_type: native.into(),
        nullable,
        max_len,
        primary_key: pk,
        foreign_key: false,
        references: None,
    };

    TableSchema {
        table: "Funcionario".into(),
        database: None,
        columns: vec![
            column("Id", SemanticType::Integer, "int", false, None, true),
            column("Nome", SemanticType::Text, "varchar", false, Some(60), false),
            column("DataCriacao", SemanticType::DateTime, "datetime", false, None, false),
            column("Email", SemanticType::Text, "varchar", true, Some(80), false),
        ],
    }
}

#[test]
fn scaffold_a_simple_crud_feature() {
    let mut ctx = ConfigContext::new();
    ctx.load_entity(funcionario()).unwrap();

    // Default grid: Nome visible; Id and DataCriacao present but hidden.
    let grid = ctx.grid().unwrap();
    assert_eq!(grid.len(), 3);
    assert!(grid.get("Nome").unwrap().visible);
    assert!(!grid.get("Id").unwrap().visible);
    assert!(!grid.get("DataCriacao").unwrap().visible);

    // Default form pool offers only Nome.
    let pool: Vec<_> = ctx
        .form()
        .unwrap()
        .addable_pool(ctx.entity().unwrap())
        .iter()
        .map(|p| p.name.clone())
        .collect();
    assert_eq!(pool, vec!["Nome"]);

    // Schema drift: the live table carries an extra nullable Email column.
    let schema = funcionario_table();
    let result = compare(ctx.entity().unwrap(), &schema);
    assert!(result.verdicts.iter().all(|v| v.severity == Severity::Matched));
    assert_eq!(result.undeclared.len(), 1);
    assert_eq!(result.undeclared[0].name, "Email");

    // Adopt the column, reload the enriched description.
    let mut enriched = ctx.entity().unwrap().clone();
    adopt_column(&mut enriched, &result.undeclared[0]).unwrap();
    ctx.load_entity(enriched).unwrap();

    let email = ctx.entity().unwrap().properties.get("Email").unwrap();
    assert_eq!(email.ty, SemanticType::Text);
    assert!(email.nullable);

    // Configure the form and plan.
    ctx.add_all_form_fields().unwrap();
    ctx.ensure_ready().unwrap();
    ctx.set_toggles(Toggles {
        records: true,
        transfer_objects: true,
        services: true,
        endpoints: true,
        list_view: true,
        client_script: true,
        ..Toggles::default()
    })
    .unwrap();

    let artifacts = plan(ctx.generation_config().unwrap());
    let kinds: Vec<_> = artifacts.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ArtifactKind::Record,
            ArtifactKind::TransferObject,
            ArtifactKind::Service,
            ArtifactKind::EndpointHandler,
            ArtifactKind::ListView,
            ArtifactKind::ClientScript,
        ]
    );

    // Every descriptor is self-contained.
    let list = artifacts
        .iter()
        .find(|a| a.kind == ArtifactKind::ListView)
        .unwrap();
    assert_eq!(list.params.table, "Funcionario");
    assert_eq!(list.params.grid_fields, vec!["Nome", "Email"]);
    assert_eq!(list.params.form_fields, vec!["Nome", "Email"]);

    // Export/import reproduces the configuration.
    let json = ProjectSnapshot::capture(ctx.generation_config().unwrap())
        .to_json()
        .unwrap();
    let mut reloaded = ConfigContext::new();
    project::restore(&json, &mut reloaded).unwrap();

    assert_eq!(
        reloaded.generation_config().unwrap(),
        ctx.generation_config().unwrap()
    );
    assert_eq!(plan(reloaded.generation_config().unwrap()), artifacts);
}

#[test]
fn master_detail_composition_round_trip() {
    let mut ctx = ConfigContext::new();
    ctx.load_entity(funcionario()).unwrap();
    ctx.add_form_field("Nome").unwrap();

    let dependente = TableSchema {
        table: "FuncionarioDependente".into(),
        database: None,
        columns: vec![
            ColumnSchema {
                name: "Id".into(),
                ty: SemanticType::Integer,
                native_type: "int".into(),
                nullable: false,
                max_len: None,
                primary_key: true,
                foreign_key: false,
                references: None,
            },
            ColumnSchema {
                name: "FuncionarioId".into(),
                ty: SemanticType::Integer,
                native_type: "int".into(),
                nullable: false,
                max_len: None,
                primary_key: false,
                foreign_key: true,
                references: Some("Funcionario".into()),
            },
            ColumnSchema {
                name: "Nome".into(),
                ty: SemanticType::Text,
                native_type: "varchar".into(),
                nullable: false,
                max_len: Some(60),
                primary_key: false,
                foreign_key: false,
                references: None,
            },
        ],
    };

    let related = compose::related_tables(ctx.entity().unwrap(), std::slice::from_ref(&dependente));
    compose::add_tab(&mut ctx, &related[0], &dependente).unwrap();

    ctx.set_toggles(Toggles::all()).unwrap();

    let artifacts = plan(ctx.generation_config().unwrap());
    let partial = artifacts
        .iter()
        .find(|a| a.kind == ArtifactKind::DetailPartial)
        .unwrap();

    assert_eq!(partial.entity, "FuncionarioDependente");
    assert_eq!(partial.params.fk_column.as_deref(), Some("FuncionarioId"));

    // Round trip keeps the tab configuration.
    let json = ProjectSnapshot::capture(ctx.generation_config().unwrap())
        .to_json()
        .unwrap();
    let mut reloaded = ConfigContext::new();
    project::restore(&json, &mut reloaded).unwrap();

    assert_eq!(reloaded.tabs().len(), 1);
    assert_eq!(plan(reloaded.generation_config().unwrap()), artifacts);
}
