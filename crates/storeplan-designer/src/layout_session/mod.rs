//! Layout session: the editor state a UI drives.
//!
//! The session owns the fixture store, the selection, the undo history and
//! the item map. It is the only writer of any of them. Submodules split the
//! operations by concern:
//! - `fixtures`: create, delete and edit whole fixtures
//! - `selection`: selection state machine, hit-testing and render views
//! - `nodes`: edge/node edits on the selected fixture
//! - `drag`: drag gesture dispatch
//! - `history`: undo/redo
//! - `file_io`: snapshot, restore, save, load

mod drag;
mod file_io;
mod fixtures;
mod history;
mod nodes;
mod selection;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use storeplan_core::{AppEvent, EditorFlavor, EventBus, FixtureId, LayoutError};

use crate::commands::{EdgeItems, History, LayoutCommand};
use crate::fixture::{Fixture, DEFAULT_SPAWN};
use crate::fixture_store::FixtureStore;
use crate::geometry::Point;
use crate::item_map::ItemMap;
use crate::selection_manager::SelectionManager;

pub use drag::{DragInput, DragPhase};

/// Session-wide editor settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    /// Template used by `add_fixture`.
    pub flavor: EditorFlavor,
    /// Where new fixtures are placed.
    pub spawn: Point,
    /// Select a fixture as soon as it is created.
    pub auto_select_new: bool,
    /// Storage key used by `save`.
    pub store_name: String,
    pub history_depth: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            flavor: EditorFlavor::default(),
            spawn: DEFAULT_SPAWN,
            auto_select_new: false,
            store_name: "default".to_string(),
            history_depth: History::DEFAULT_DEPTH,
        }
    }
}

/// Display mirror of the selected fixture's position and name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditingProjection {
    pub x: f64,
    pub y: f64,
    pub name: String,
}

impl From<&Fixture> for EditingProjection {
    fn from(fixture: &Fixture) -> Self {
        Self {
            x: fixture.x,
            y: fixture.y,
            name: fixture.name.clone(),
        }
    }
}

/// An in-progress drag: the fixture as it was when the drag started.
#[derive(Debug, Clone)]
pub(crate) struct ActiveDrag {
    before: Fixture,
    label: &'static str,
}

/// Editor state for one store layout.
pub struct LayoutSession {
    store: FixtureStore,
    selection: SelectionManager,
    projection: Option<EditingProjection>,
    history: History,
    item_map: ItemMap,
    options: SessionOptions,
    events: Option<Arc<EventBus>>,
    drag: Option<ActiveDrag>,
    created: Option<DateTime<Utc>>,
    is_modified: bool,
}

impl LayoutSession {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            store: FixtureStore::new(),
            selection: SelectionManager::new(),
            projection: None,
            history: History::new(options.history_depth),
            item_map: ItemMap::new(),
            options,
            events: None,
            drag: None,
            created: None,
            is_modified: false,
        }
    }

    /// Publishes layout, selection and persistence events to `bus`.
    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn set_flavor(&mut self, flavor: EditorFlavor) {
        self.options.flavor = flavor;
    }

    pub fn store_name(&self) -> &str {
        &self.options.store_name
    }

    pub fn fixtures(&self) -> &FixtureStore {
        &self.store
    }

    pub fn fixture(&self, id: &FixtureId) -> Option<&Fixture> {
        self.store.get(id)
    }

    pub fn fixture_count(&self) -> usize {
        self.store.len()
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    /// Position and name of the selected fixture, for the property panel.
    pub fn projection(&self) -> Option<&EditingProjection> {
        self.projection.as_ref()
    }

    pub fn item_map(&self) -> &ItemMap {
        &self.item_map
    }

    pub fn item_map_mut(&mut self) -> &mut ItemMap {
        self.is_modified = true;
        &mut self.item_map
    }

    /// Unsaved changes since the last save or load.
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn publish(&self, event: impl Into<AppEvent>) {
        if let Some(bus) = &self.events {
            bus.publish(event.into());
        }
    }

    fn fixture_or_err(&self, id: &FixtureId) -> Result<&Fixture, LayoutError> {
        self.store
            .get(id)
            .ok_or_else(|| LayoutError::FixtureNotFound { id: id.clone() })
    }

    fn selected_or_err(&self) -> Result<&Fixture, LayoutError> {
        let id = self
            .selection
            .selected_fixture()
            .ok_or(LayoutError::NoSelection)?;
        self.fixture_or_err(id)
    }

    fn sync_projection(&mut self) {
        self.projection = self
            .selection
            .selected_fixture()
            .and_then(|id| self.store.get(id))
            .map(EditingProjection::from);
    }

    /// Brings the selection back to a valid state after the store changed
    /// underneath it.
    fn reconcile_selection(&mut self) {
        match self.selection.selected_fixture().cloned() {
            Some(id) => match self.store.get(&id) {
                Some(fixture) => {
                    let node_count = fixture.node_count();
                    if self.selection.clamp_to_node_count(node_count) {
                        tracing::debug!("Selection on {} clamped to {} nodes", id, node_count);
                    }
                }
                None => self.selection.clear_all(),
            },
            None => self.selection.clear_all(),
        }
        self.sync_projection();
    }

    /// Records `before` -> current state of the same fixture, if it changed.
    fn record_update(&mut self, name: &str, before: Fixture) {
        self.record_update_with_items(name, before, None);
    }

    /// Like `record_update`, also capturing the fixture's item-map entries.
    fn record_update_with_items(&mut self, name: &str, before: Fixture, items: Option<EdgeItems>) {
        let Some(after) = self.store.get(&before.id).cloned() else {
            return;
        };
        if let Some(mut cmd) = LayoutCommand::update(name, before, after) {
            if let Some(items) = items {
                cmd = cmd.with_items(items);
            }
            self.history.record(cmd);
            self.is_modified = true;
        }
    }
}

impl Default for LayoutSession {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

impl std::fmt::Debug for LayoutSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutSession")
            .field("store_name", &self.options.store_name)
            .field("fixtures", &self.store.len())
            .field("selection", &self.selection.state())
            .field("is_modified", &self.is_modified)
            .finish()
    }
}
