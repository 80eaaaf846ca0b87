//! Selection operations, hit-testing and render views.

use storeplan_core::{FixtureId, LayoutError, SelectionError, SelectionEvent};

use super::LayoutSession;
use crate::geometry::Point;
use crate::item_map::edge_item_key;
use crate::render::{self, FixtureView, HitTarget, HANDLE_TOLERANCE};
use crate::selection_manager::EditMode;

impl LayoutSession {
    /// Selects a fixture and loads its position and name into the projection.
    pub fn select_fixture(&mut self, id: &FixtureId) -> Result<(), SelectionError> {
        if !self.store.contains(id) {
            tracing::warn!("Cannot select unknown fixture {}", id);
            return Err(SelectionError::UnknownFixture { id: id.clone() });
        }
        self.selection.select_fixture(id.clone());
        self.sync_projection();
        tracing::debug!("Selected fixture {}", id);
        self.publish(SelectionEvent::FixtureSelected {
            id: Some(id.clone()),
        });
        Ok(())
    }

    fn selected_node_count(&self) -> Result<usize, SelectionError> {
        let id = self
            .selection
            .selected_fixture()
            .ok_or(SelectionError::NoFixtureSelected)?;
        self.store
            .get(id)
            .map(|f| f.node_count())
            .ok_or_else(|| SelectionError::UnknownFixture { id: id.clone() })
    }

    pub fn select_edge(&mut self, index: usize) -> Result<(), SelectionError> {
        let edge_count = self.selected_node_count()?;
        if let Err(err) = self.selection.select_edge(index, edge_count) {
            tracing::warn!("Edge selection rejected: {}", err);
            return Err(err);
        }
        self.publish(SelectionEvent::EdgeSelected {
            index: Some(index),
            item_key: self.selected_edge_item_key(),
        });
        Ok(())
    }

    pub fn select_node(&mut self, index: usize) -> Result<(), SelectionError> {
        let node_count = self.selected_node_count()?;
        if let Err(err) = self.selection.select_node(index, node_count) {
            tracing::warn!("Node selection rejected: {}", err);
            return Err(err);
        }
        self.publish(SelectionEvent::NodeSelected { index: Some(index) });
        Ok(())
    }

    pub fn deselect_edge(&mut self) {
        if self.selection.selected_edge().is_some() {
            self.selection.deselect_edge();
            self.publish(SelectionEvent::EdgeSelected {
                index: None,
                item_key: None,
            });
        }
    }

    pub fn deselect_node(&mut self) {
        if self.selection.selected_node().is_some() {
            self.selection.deselect_node();
            self.publish(SelectionEvent::NodeSelected { index: None });
        }
    }

    /// Back to idle.
    pub fn clear_selection(&mut self) {
        self.selection.clear_all();
        self.projection = None;
        self.publish(SelectionEvent::FixtureSelected { id: None });
    }

    pub fn mode(&self) -> EditMode {
        self.selection.mode()
    }

    /// Switches between object and edit mode. Edge and node selection are
    /// dropped; the fixture stays selected.
    pub fn set_mode(&mut self, mode: EditMode) {
        self.selection.set_mode(mode);
        tracing::debug!("Mode set to {:?}", mode);
        self.publish(SelectionEvent::ModeChanged {
            edit: mode == EditMode::Edit,
        });
    }

    /// Item-map key of the selected edge, e.g. `"{fixtureId}-edge-2"`.
    pub fn selected_edge_item_key(&self) -> Option<String> {
        let id = self.selection.selected_fixture()?;
        let edge = self.selection.selected_edge()?;
        Some(edge_item_key(id, edge))
    }

    /// What lies under `point` on the floor plan.
    pub fn hit_test(&self, point: Point) -> Option<HitTarget> {
        render::hit_test(&self.store, &self.selection, point, HANDLE_TOLERANCE)
    }

    /// Click at `point`: picks a node, edge or fixture, or clears the
    /// selection on empty floor.
    pub fn click_at(&mut self, point: Point) -> Result<Option<HitTarget>, LayoutError> {
        let target = self.hit_test(point);
        match &target {
            Some(HitTarget::Node { index, .. }) => self.select_node(*index)?,
            Some(HitTarget::Edge { index, .. }) => self.select_edge(*index)?,
            Some(HitTarget::Fixture { id }) => {
                if !self.selection.is_selected(id) {
                    self.select_fixture(id)?;
                }
            }
            None => self.clear_selection(),
        }
        Ok(target)
    }

    /// One view per fixture, bottom to top.
    pub fn render_views(&self) -> Vec<FixtureView> {
        render::build_views(&self.store, &self.selection)
    }
}
