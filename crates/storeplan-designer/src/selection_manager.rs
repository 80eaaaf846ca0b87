use serde::{Deserialize, Serialize};
use storeplan_core::{FixtureId, SelectionError};

/// Top-level interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditMode {
    /// Whole fixtures are selected and dragged.
    #[default]
    Object,
    /// Edges and nodes of the selected fixture can be picked.
    Edit,
}

/// Derived view of the selection for callers that want to match on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    FixtureSelected(FixtureId),
    EdgeSelected(FixtureId, usize),
    NodeSelected(FixtureId, usize),
}

/// Tracks the selected fixture, edge and node.
///
/// `SelectionManager` is responsible for:
/// - Holding at most one selected fixture
/// - Holding at most one of {edge, node} for that fixture, never both
/// - Refusing edge/node picks outside edit mode or without a fixture
///
/// # Selection Model
///
/// ```text
/// Idle ──select_fixture──▶ FixtureSelected ──select_edge──▶ EdgeSelected
///   ▲                         │      ▲      ──select_node──▶ NodeSelected
///   └──────clear_all──────────┘      └──deselect_edge / deselect_node──┘
/// ```
///
/// The manager does not own fixtures, so range checks take the current node
/// count from the caller. Failed transitions leave the state untouched.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    selected_fixture: Option<FixtureId>,
    selected_edge: Option<usize>,
    selected_node: Option<usize>,
    mode: EditMode,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection, in object mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use storeplan_designer::selection_manager::{EditMode, SelectionManager};
    ///
    /// let manager = SelectionManager::new();
    /// assert_eq!(manager.selected_fixture(), None);
    /// assert_eq!(manager.mode(), EditMode::Object);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_fixture(&self) -> Option<&FixtureId> {
        self.selected_fixture.as_ref()
    }

    pub fn selected_edge(&self) -> Option<usize> {
        self.selected_edge
    }

    pub fn selected_node(&self) -> Option<usize> {
        self.selected_node
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_selected(&self, id: &FixtureId) -> bool {
        self.selected_fixture.as_ref() == Some(id)
    }

    pub fn state(&self) -> SelectionState {
        match (&self.selected_fixture, self.selected_edge, self.selected_node) {
            (None, _, _) => SelectionState::Idle,
            (Some(id), Some(edge), _) => SelectionState::EdgeSelected(id.clone(), edge),
            (Some(id), None, Some(node)) => SelectionState::NodeSelected(id.clone(), node),
            (Some(id), None, None) => SelectionState::FixtureSelected(id.clone()),
        }
    }

    /// Selects a fixture, dropping any edge or node selection.
    pub fn select_fixture(&mut self, id: FixtureId) {
        self.selected_fixture = Some(id);
        self.selected_edge = None;
        self.selected_node = None;
    }

    fn check_pickable(&self) -> Result<(), SelectionError> {
        if self.selected_fixture.is_none() {
            return Err(SelectionError::NoFixtureSelected);
        }
        if self.mode != EditMode::Edit {
            return Err(SelectionError::NotInEditMode);
        }
        Ok(())
    }

    /// Selects edge `index` of the selected fixture and clears the node.
    ///
    /// # Arguments
    ///
    /// * `index` - Edge index, connecting node `index` and node `index + 1`
    /// * `edge_count` - Edge count of the selected fixture
    pub fn select_edge(&mut self, index: usize, edge_count: usize) -> Result<(), SelectionError> {
        self.check_pickable()?;
        if index >= edge_count {
            return Err(SelectionError::EdgeOutOfRange { index, edge_count });
        }
        self.selected_edge = Some(index);
        self.selected_node = None;
        Ok(())
    }

    /// Selects node `index` of the selected fixture and clears the edge.
    pub fn select_node(&mut self, index: usize, node_count: usize) -> Result<(), SelectionError> {
        self.check_pickable()?;
        if index >= node_count {
            return Err(SelectionError::NodeOutOfRange { index, node_count });
        }
        self.selected_node = Some(index);
        self.selected_edge = None;
        Ok(())
    }

    pub fn deselect_edge(&mut self) {
        self.selected_edge = None;
    }

    pub fn deselect_node(&mut self) {
        self.selected_node = None;
    }

    /// Clears edge and node but keeps the fixture.
    pub fn deselect_parts(&mut self) {
        self.selected_edge = None;
        self.selected_node = None;
    }

    /// Back to idle.
    pub fn clear_all(&mut self) {
        self.selected_fixture = None;
        self.selected_edge = None;
        self.selected_node = None;
    }

    /// Switches mode. Edge and node selection never survive a mode switch;
    /// the fixture selection does.
    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
        self.deselect_parts();
    }

    /// Drops edge/node references that no longer exist after the selected
    /// outline shrank to `node_count` nodes. Returns true if anything was
    /// cleared.
    pub fn clamp_to_node_count(&mut self, node_count: usize) -> bool {
        let mut cleared = false;
        if self.selected_edge.is_some_and(|e| e >= node_count) {
            self.selected_edge = None;
            cleared = true;
        }
        if self.selected_node.is_some_and(|n| n >= node_count) {
            self.selected_node = None;
            cleared = true;
        }
        cleared
    }
}
