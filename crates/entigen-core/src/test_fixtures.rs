//! Shared fixtures: the `Funcionario` entity and its table snapshots.

use entigen_schema::{
    node::{ColumnSchema, EntityMetadata, Navigation, PropertyList, PropertyMetadata, TableSchema},
    types::{Cardinality, SemanticType},
};

pub fn funcionario() -> EntityMetadata {
    EntityMetadata {
        name: "Funcionario".into(),
        display_name: Some("Funcionário".into()),
        module: Some("Rh".into()),
        table: "Funcionario".into(),
        db_schema: Some("dbo".into()),
        route: Some("rh/funcionarios".into()),
        properties: PropertyList::new(vec![
            PropertyMetadata {
                primary_key: true,
                identity: true,
                native_type: Some("int".into()),
                ..PropertyMetadata::new("Id", SemanticType::Integer)
            },
            PropertyMetadata {
                max_len: Some(60),
                native_type: Some("varchar".into()),
                ..PropertyMetadata::new("Nome", SemanticType::Text)
            },
            PropertyMetadata {
                read_only: true,
                exclude_from_transfer: true,
                native_type: Some("datetime".into()),
                ..PropertyMetadata::new("DataCriacao", SemanticType::DateTime)
            },
        ]),
        navigations: vec![Navigation {
            name: "Dependentes".into(),
            target: "FuncionarioDependente".into(),
            cardinality: Cardinality::Many,
            fk_column: "Id".into(),
        }],
    }
}

/// Table snapshot matching [`funcionario`] plus an extra `Email` column.
pub fn funcionario_table() -> TableSchema {
    TableSchema {
        table: "Funcionario".into(),
        database: None,
        columns: vec![
            column("Id", SemanticType::Integer, "int", false, None, true, false, None),
            column("Nome", SemanticType::Text, "varchar", false, Some(60), false, false, None),
            column(
                "DataCriacao",
                SemanticType::DateTime,
                "datetime",
                false,
                None,
                false,
                false,
                None,
            ),
            column("Email", SemanticType::Text, "varchar", true, Some(80), false, false, None),
        ],
    }
}

/// Detail table owned by `Funcionario.Id`.
pub fn dependente_table() -> TableSchema {
    TableSchema {
        table: "FuncionarioDependente".into(),
        database: None,
        columns: vec![
            column("Id", SemanticType::Integer, "int", false, None, true, false, None),
            column(
                "FuncionarioId",
                SemanticType::Integer,
                "int",
                false,
                None,
                false,
                true,
                Some("Funcionario"),
            ),
            column("Nome", SemanticType::Text, "varchar", false, Some(60), false, false, None),
            column(
                "DataNascimento",
                SemanticType::Date,
                "date",
                true,
                None,
                false,
                false,
                None,
            ),
        ],
    }
}

#[allow(clippy::too_many_arguments)]
fn column(
    name: &str,
    ty: SemanticType,
    native: &str,
    nullable: bool,
    max_len: Option<u32>,
    primary_key: bool,
    foreign_key: bool,
    references: Option<&str>,
) -> ColumnSchema {
    ColumnSchema {
        name: name.into(),
        ty,
        native_type: native.into(),
        nullable,
        max_len,
        primary_key,
        foreign_key,
        references: references.map(Into::into),
    }
}
