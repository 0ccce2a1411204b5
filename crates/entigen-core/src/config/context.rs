use crate::{
    compare::ComparisonResult,
    config::{
        ConfigError, DetailTabConfig, FieldId, FormConfig, GenerationConfig, GridConfig, IdArena,
        Toggles, ValidationRule,
    },
};
use entigen_schema::{naming, node::EntityMetadata, validate::validate_entity};

///
/// ConfigContext
///
/// Single owner of the live configuration. All mutation funnels through
/// this type so the invalidation rules hold everywhere: loading a
/// different entity discards grid, form, tab, and comparison state after
/// keeping one snapshot for undo.
///

#[derive(Clone, Debug, Default)]
pub struct ConfigContext {
    state: Option<State>,
    undo: Option<GenerationConfig>,
    arena: IdArena,
}

#[derive(Clone, Debug)]
struct State {
    config: GenerationConfig,
    comparison: Option<ComparisonResult>,
    focused_tab: Option<usize>,
}

impl ConfigContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    //
    // loading
    //

    /// Load an entity description, replacing the previous one wholesale.
    ///
    /// A description that fails validation is refused and the previous
    /// state is left untouched. Loading a different entity resets all
    /// dependent configuration (the outgoing configuration is kept as a
    /// single undo snapshot); reloading the same entity rebuilds the grid
    /// defaults and prunes form fields whose property disappeared.
    ///
    /// The reload asymmetry is deliberate: grid columns mirror property
    /// shape, so operator edits (visibility, title, width) are rebuilt
    /// from the new description, while form fields only reference a
    /// property by name and survive as long as it is still declared.
    pub fn load_entity(&mut self, entity: EntityMetadata) -> Result<(), entigen_schema::Error> {
        validate_entity(&entity).map_err(entigen_schema::Error::Description)?;

        match self.state.take() {
            Some(state) if state.config.entity.same_identity(&entity) => {
                // The arena keeps advancing: surviving form fields retain
                // their ids, so rebuilt grid columns must not collide.
                let mut config = state.config;
                config.entity = entity;
                config.grid = GridConfig::build(&config.entity, &mut self.arena);
                config.form.retain_declared(&config.entity);

                self.state = Some(State {
                    config,
                    comparison: None,
                    focused_tab: state.focused_tab,
                });
            }
            previous => {
                self.undo = previous.map(|s| s.config);
                self.arena.reset();

                let grid = GridConfig::build(&entity, &mut self.arena);

                self.state = Some(State {
                    config: GenerationConfig {
                        entity,
                        grid,
                        form: FormConfig::default(),
                        tabs: Vec::new(),
                        toggles: Toggles::default(),
                    },
                    comparison: None,
                    focused_tab: None,
                });
            }
        }

        Ok(())
    }

    /// Restore the configuration discarded by the last entity change.
    pub fn undo_entity_change(&mut self) -> Result<(), ConfigError> {
        let config = self.undo.take().ok_or(ConfigError::NoEntityLoaded)?;

        self.import_config(config);

        Ok(())
    }

    /// Install a complete configuration (snapshot import, undo restore).
    ///
    /// The id arena is advanced past every id the configuration carries
    /// so later allocations cannot collide.
    pub fn import_config(&mut self, config: GenerationConfig) {
        self.arena.reset();
        self.seed_arena(&config);

        self.state = Some(State {
            config,
            comparison: None,
            focused_tab: None,
        });
    }

    //
    // accessors
    //

    #[must_use]
    pub fn entity(&self) -> Option<&EntityMetadata> {
        self.state.as_ref().map(|s| &s.config.entity)
    }

    #[must_use]
    pub fn grid(&self) -> Option<&GridConfig> {
        self.state.as_ref().map(|s| &s.config.grid)
    }

    #[must_use]
    pub fn form(&self) -> Option<&FormConfig> {
        self.state.as_ref().map(|s| &s.config.form)
    }

    #[must_use]
    pub fn tabs(&self) -> &[DetailTabConfig] {
        self.state.as_ref().map_or(&[], |s| &s.config.tabs)
    }

    #[must_use]
    pub fn comparison(&self) -> Option<&ComparisonResult> {
        self.state.as_ref().and_then(|s| s.comparison.as_ref())
    }

    /// The finalized configuration, for the planner and for export.
    pub fn generation_config(&self) -> Result<&GenerationConfig, ConfigError> {
        self.state
            .as_ref()
            .map(|s| &s.config)
            .ok_or(ConfigError::NoEntityLoaded)
    }

    /// Refuse to advance past configuration with nothing to show or edit.
    pub fn ensure_ready(&self) -> Result<(), ConfigError> {
        let state = self.require_state()?;

        if state.config.grid.visible_count() == 0 {
            return Err(ConfigError::NoVisibleColumns);
        }

        if state.config.form.is_empty() {
            return Err(ConfigError::NoFormFields);
        }

        Ok(())
    }

    //
    // comparison cache
    //

    pub fn set_comparison(&mut self, result: ComparisonResult) -> Result<(), ConfigError> {
        self.require_state_mut()?.comparison = Some(result);

        Ok(())
    }

    //
    // grid operations
    //

    pub fn set_column_visible(&mut self, property: &str, visible: bool) -> Result<(), ConfigError> {
        self.require_state_mut()?.config.grid.set_visible(property, visible)
    }

    pub fn set_column_title(&mut self, property: &str, title: &str) -> Result<(), ConfigError> {
        self.require_state_mut()?.config.grid.set_title(property, title)
    }

    pub fn set_column_width(&mut self, property: &str, width: u16) -> Result<(), ConfigError> {
        self.require_state_mut()?.config.grid.set_width(property, width)
    }

    pub fn remove_column(&mut self, property: &str) -> Result<(), ConfigError> {
        self.require_state_mut()?
            .config
            .grid
            .remove(property)
            .map(|_| ())
    }

    pub fn reorder_columns(&mut self, from: usize, to: usize) -> Result<(), ConfigError> {
        self.require_state_mut()?.config.grid.reorder(from, to)
    }

    //
    // form operations
    //

    pub fn add_form_field(&mut self, property: &str) -> Result<FieldId, ConfigError> {
        let state = self.state.as_mut().ok_or(ConfigError::NoEntityLoaded)?;

        state
            .config
            .form
            .add(&state.config.entity, property, &mut self.arena)
    }

    pub fn add_all_form_fields(&mut self) -> Result<usize, ConfigError> {
        let state = self.state.as_mut().ok_or(ConfigError::NoEntityLoaded)?;

        Ok(state
            .config
            .form
            .add_all_remaining(&state.config.entity, &mut self.arena))
    }

    pub fn remove_form_field(&mut self, property: &str) -> Result<(), ConfigError> {
        self.require_state_mut()?
            .config
            .form
            .remove(property)
            .map(|_| ())
    }

    pub fn clear_form(&mut self) -> Result<(), ConfigError> {
        self.require_state_mut()?.config.form.clear();

        Ok(())
    }

    pub fn reorder_form_fields(&mut self, from: usize, to: usize) -> Result<(), ConfigError> {
        self.require_state_mut()?.config.form.reorder(from, to)
    }

    pub fn set_field_required(&mut self, property: &str, required: bool) -> Result<(), ConfigError> {
        self.require_state_mut()?.config.form.set_required(property, required)
    }

    pub fn push_field_rule(&mut self, property: &str, rule: ValidationRule) -> Result<(), ConfigError> {
        self.require_state_mut()?.config.form.push_rule(property, rule)
    }

    pub fn set_field_cascade(
        &mut self,
        property: &str,
        parent_field: &str,
        filter_param: &str,
    ) -> Result<(), ConfigError> {
        self.require_state_mut()?
            .config
            .form
            .set_cascade(property, parent_field, filter_param)
    }

    pub fn clear_field_cascade(&mut self, property: &str) -> Result<(), ConfigError> {
        self.require_state_mut()?.config.form.clear_cascade(property)
    }

    //
    // tab operations
    //

    /// Append a detail tab; rejected if its table is already present.
    pub fn add_tab(&mut self, tab: DetailTabConfig) -> Result<(), ConfigError> {
        let state = self.require_state_mut()?;

        if state
            .config
            .tabs
            .iter()
            .any(|t| naming::collides(&t.table, &tab.table))
        {
            return Err(ConfigError::DuplicateTab(tab.table));
        }

        state.config.tabs.push(tab);

        if state.focused_tab.is_none() {
            state.focused_tab = Some(state.config.tabs.len() - 1);
        }

        Ok(())
    }

    /// Remove a tab; any focus on it is repointed to the first remaining
    /// tab, never left dangling.
    pub fn remove_tab(&mut self, table: &str) -> Result<DetailTabConfig, ConfigError> {
        let state = self.require_state_mut()?;

        let index = state
            .config
            .tabs
            .iter()
            .position(|t| naming::collides(&t.table, table))
            .ok_or_else(|| ConfigError::UnknownTab(table.into()))?;

        let removed = state.config.tabs.remove(index);

        state.focused_tab = if state.config.tabs.is_empty() {
            None
        } else {
            match state.focused_tab {
                Some(focused) if focused == index => Some(0),
                Some(focused) if focused > index => Some(focused - 1),
                other => other,
            }
        };

        Ok(removed)
    }

    pub fn focus_tab(&mut self, table: &str) -> Result<(), ConfigError> {
        let state = self.require_state_mut()?;

        let index = state
            .config
            .tabs
            .iter()
            .position(|t| naming::collides(&t.table, table))
            .ok_or_else(|| ConfigError::UnknownTab(table.into()))?;

        state.focused_tab = Some(index);

        Ok(())
    }

    #[must_use]
    pub fn focused_tab(&self) -> Option<&DetailTabConfig> {
        let state = self.state.as_ref()?;

        state.focused_tab.and_then(|i| state.config.tabs.get(i))
    }

    /// Explicit tab order, editable independently of list position.
    pub fn set_tab_order(&mut self, table: &str, order: u32) -> Result<(), ConfigError> {
        self.tab_mut(table)?.order = order;

        Ok(())
    }

    /// Per-tab create/edit/delete permissions, editable after append.
    pub fn set_tab_allows(
        &mut self,
        table: &str,
        create: bool,
        edit: bool,
        delete: bool,
    ) -> Result<(), ConfigError> {
        let tab = self.tab_mut(table)?;
        tab.allow_create = create;
        tab.allow_edit = edit;
        tab.allow_delete = delete;

        Ok(())
    }

    pub fn set_tab_column_visible(
        &mut self,
        table: &str,
        property: &str,
        visible: bool,
    ) -> Result<(), ConfigError> {
        self.tab_mut(table)?.grid.set_visible(property, visible)
    }

    pub fn set_tab_column_title(
        &mut self,
        table: &str,
        property: &str,
        title: &str,
    ) -> Result<(), ConfigError> {
        self.tab_mut(table)?.grid.set_title(property, title)
    }

    /// Add a field to a tab's own form, drawing from the tab's derived
    /// entity. Same guards and id arena as the master form.
    pub fn add_tab_form_field(
        &mut self,
        table: &str,
        property: &str,
    ) -> Result<FieldId, ConfigError> {
        let state = self.state.as_mut().ok_or(ConfigError::NoEntityLoaded)?;
        let tab = Self::find_tab(&mut state.config.tabs, table)?;

        tab.form.add(&tab.entity, property, &mut self.arena)
    }

    pub fn remove_tab_form_field(&mut self, table: &str, property: &str) -> Result<(), ConfigError> {
        self.tab_mut(table)?.form.remove(property).map(|_| ())
    }

    //
    // toggles
    //

    pub fn set_toggles(&mut self, toggles: Toggles) -> Result<(), ConfigError> {
        self.require_state_mut()?.config.toggles = toggles;

        Ok(())
    }

    //
    // internals
    //

    pub(crate) fn arena_mut(&mut self) -> &mut IdArena {
        &mut self.arena
    }

    fn tab_mut(&mut self, table: &str) -> Result<&mut DetailTabConfig, ConfigError> {
        let state = self.require_state_mut()?;

        Self::find_tab(&mut state.config.tabs, table)
    }

    fn find_tab<'a>(
        tabs: &'a mut [DetailTabConfig],
        table: &str,
    ) -> Result<&'a mut DetailTabConfig, ConfigError> {
        tabs.iter_mut()
            .find(|t| naming::collides(&t.table, table))
            .ok_or_else(|| ConfigError::UnknownTab(table.into()))
    }

    fn seed_arena(&mut self, config: &GenerationConfig) {
        for column in config.grid.iter() {
            self.arena.seed_past(column.id);
        }

        for field in config.form.iter() {
            self.arena.seed_past(field.id);
        }

        for tab in &config.tabs {
            for column in tab.grid.iter() {
                self.arena.seed_past(column.id);
            }

            for field in tab.form.iter() {
                self.arena.seed_past(field.id);
            }
        }
    }

    fn require_state(&self) -> Result<&State, ConfigError> {
        self.state.as_ref().ok_or(ConfigError::NoEntityLoaded)
    }

    fn require_state_mut(&mut self) -> Result<&mut State, ConfigError> {
        self.state.as_mut().ok_or(ConfigError::NoEntityLoaded)
    }
}
