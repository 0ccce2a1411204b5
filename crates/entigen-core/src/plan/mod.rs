//! Artifact planning.
//!
//! Deterministic, side-effect-free mapping from a finalized configuration
//! and its toggle set to the ordered list of artifacts a renderer will
//! produce. Re-planning an unchanged configuration yields a byte-identical
//! list; downstream packaging keys progress off plan position.


use crate::config::{DetailTabConfig, GenerationConfig};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// ArtifactKind
///
/// Classified role of one generated file.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Ord, PartialEq, PartialOrd, Serialize,
)]
#[remain::sorted]
pub enum ArtifactKind {
    ClientScript,
    DetailPartial,
    EndpointHandler,
    ListView,
    Record,
    Service,
    TransferObject,
}

///
/// ArtifactDescriptor
///
/// One planned file: role, owning entity (the master or a tab table),
/// and parameters sufficient for a renderer to produce the file without
/// reading any other state.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ArtifactDescriptor {
    pub kind: ArtifactKind,
    pub entity: String,
    pub params: ArtifactParams,
}

///
/// ArtifactParams
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ArtifactParams {
    pub table: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,

    pub display_name: String,

    /// Declared property names in order (record-shaped artifacts).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,

    /// Visible grid columns in configured order (list-shaped artifacts).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grid_fields: Vec<String>,

    /// Form fields in configured order (form-shaped artifacts).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub form_fields: Vec<String>,

    /// Owning foreign-key column (detail artifacts only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fk_column: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub include_navigations: bool,

    /// Tab metadata (master frontend artifacts).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tabs: Vec<TabSummary>,
}

///
/// TabSummary
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TabSummary {
    pub table: String,
    pub title: String,
    pub order: u32,
    pub fk_column: String,
    pub allow_create: bool,
    pub allow_edit: bool,
    pub allow_delete: bool,
}

impl TabSummary {
    fn of(tab: &DetailTabConfig) -> Self {
        Self {
            table: tab.table.clone(),
            title: tab.title.clone(),
            order: tab.order,
            fk_column: tab.fk_column.clone(),
            allow_create: tab.allow_create,
            allow_edit: tab.allow_edit,
            allow_delete: tab.allow_delete,
        }
    }
}

/// Plan the artifact list for a finalized configuration.
///
/// Pure over its input: no global state is consulted, so concurrent
/// plans for different configurations are safe. Each toggle contributes
/// a disjoint, contiguous slice of the output; a toggle with no
/// applicable entity (detail toggles without tabs) contributes nothing.
#[must_use]
pub fn plan(config: &GenerationConfig) -> Vec<ArtifactDescriptor> {
    let toggles = &config.toggles;
    let tabs = ordered_tabs(config);
    let mut artifacts = Vec::new();

    // backend, master before details for each role
    if toggles.records {
        artifacts.push(record(config));
    }
    if toggles.records_for_details {
        artifacts.extend(tabs.iter().map(|tab| tab_record(tab)));
    }

    if toggles.transfer_objects {
        artifacts.push(transfer_object(config));
    }
    if toggles.transfer_objects_for_details {
        artifacts.extend(tabs.iter().map(|tab| tab_transfer_object(tab)));
    }

    if toggles.services {
        artifacts.push(backend(config, ArtifactKind::Service));
    }
    if toggles.services_for_details {
        artifacts.extend(tabs.iter().map(|tab| tab_backend(tab, ArtifactKind::Service)));
    }

    if toggles.endpoints {
        artifacts.push(backend(config, ArtifactKind::EndpointHandler));
    }
    if toggles.endpoints_for_details {
        artifacts.extend(
            tabs.iter()
                .map(|tab| tab_backend(tab, ArtifactKind::EndpointHandler)),
        );
    }

    // frontend
    if toggles.list_view {
        artifacts.push(list_view(config, &tabs));
    }
    if toggles.detail_partials {
        artifacts.extend(tabs.iter().map(|tab| detail_partial(tab)));
    }
    if toggles.client_script {
        artifacts.push(client_script(config, &tabs));
    }

    artifacts
}

// Tabs in explicit order, table name as tiebreak, for a stable plan.
fn ordered_tabs(config: &GenerationConfig) -> Vec<&DetailTabConfig> {
    let mut tabs: Vec<_> = config.tabs.iter().collect();
    tabs.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.table.cmp(&b.table)));

    tabs
}

fn master_params(config: &GenerationConfig) -> ArtifactParams {
    ArtifactParams {
        table: config.entity.table.clone(),
        route: config.entity.route.clone(),
        display_name: config.entity.resolved_display_name(),
        ..ArtifactParams::default()
    }
}

fn record(config: &GenerationConfig) -> ArtifactDescriptor {
    ArtifactDescriptor {
        kind: ArtifactKind::Record,
        entity: config.entity.name.clone(),
        params: ArtifactParams {
            fields: config.entity.properties.iter().map(|p| p.name.clone()).collect(),
            include_navigations: config.toggles.navigations,
            ..master_params(config)
        },
    }
}

fn transfer_object(config: &GenerationConfig) -> ArtifactDescriptor {
    ArtifactDescriptor {
        kind: ArtifactKind::TransferObject,
        entity: config.entity.name.clone(),
        params: ArtifactParams {
            fields: config
                .entity
                .properties
                .iter()
                .filter(|p| !p.exclude_from_transfer)
                .map(|p| p.name.clone())
                .collect(),
            ..master_params(config)
        },
    }
}

fn backend(config: &GenerationConfig, kind: ArtifactKind) -> ArtifactDescriptor {
    ArtifactDescriptor {
        kind,
        entity: config.entity.name.clone(),
        params: master_params(config),
    }
}

fn list_view(config: &GenerationConfig, tabs: &[&DetailTabConfig]) -> ArtifactDescriptor {
    ArtifactDescriptor {
        kind: ArtifactKind::ListView,
        entity: config.entity.name.clone(),
        params: ArtifactParams {
            grid_fields: config
                .grid
                .visible_columns()
                .iter()
                .map(|c| c.property.clone())
                .collect(),
            form_fields: config.form.iter().map(|f| f.property.clone()).collect(),
            tabs: tabs.iter().map(|tab| TabSummary::of(tab)).collect(),
            ..master_params(config)
        },
    }
}

fn client_script(config: &GenerationConfig, tabs: &[&DetailTabConfig]) -> ArtifactDescriptor {
    ArtifactDescriptor {
        kind: ArtifactKind::ClientScript,
        entity: config.entity.name.clone(),
        params: ArtifactParams {
            form_fields: config.form.iter().map(|f| f.property.clone()).collect(),
            tabs: tabs.iter().map(|tab| TabSummary::of(tab)).collect(),
            ..master_params(config)
        },
    }
}

fn tab_params(tab: &DetailTabConfig) -> ArtifactParams {
    ArtifactParams {
        table: tab.table.clone(),
        display_name: tab.title.clone(),
        fk_column: Some(tab.fk_column.clone()),
        ..ArtifactParams::default()
    }
}

fn tab_record(tab: &DetailTabConfig) -> ArtifactDescriptor {
    ArtifactDescriptor {
        kind: ArtifactKind::Record,
        entity: tab.table.clone(),
        params: ArtifactParams {
            fields: tab.grid.iter().map(|c| c.property.clone()).collect(),
            ..tab_params(tab)
        },
    }
}

fn tab_transfer_object(tab: &DetailTabConfig) -> ArtifactDescriptor {
    ArtifactDescriptor {
        kind: ArtifactKind::TransferObject,
        entity: tab.table.clone(),
        params: ArtifactParams {
            fields: tab.grid.iter().map(|c| c.property.clone()).collect(),
            ..tab_params(tab)
        },
    }
}

fn tab_backend(tab: &DetailTabConfig, kind: ArtifactKind) -> ArtifactDescriptor {
    ArtifactDescriptor {
        kind,
        entity: tab.table.clone(),
        params: tab_params(tab),
    }
}

fn detail_partial(tab: &DetailTabConfig) -> ArtifactDescriptor {
    ArtifactDescriptor {
        kind: ArtifactKind::DetailPartial,
        entity: tab.table.clone(),
        params: ArtifactParams {
            grid_fields: tab
                .grid
                .visible_columns()
                .iter()
                .map(|c| c.property.clone())
                .collect(),
            form_fields: tab.form.iter().map(|f| f.property.clone()).collect(),
            tabs: vec![TabSummary::of(tab)],
            ..tab_params(tab)
        },
    }
}
