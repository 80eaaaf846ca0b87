//! Edge and node edits routed through the mutation engine.

use storeplan_core::{FixtureId, LayoutError, LayoutEvent, SelectionEvent};

use super::LayoutSession;
use crate::commands::EdgeItems;
use crate::item_map;
use crate::node_editing;

impl LayoutSession {
    /// Writes a new outline for `id`, publishing the change.
    fn commit_points(&mut self, id: &FixtureId, points: Vec<f64>) -> Result<usize, LayoutError> {
        self.store.set_points(id, points)?;
        let node_count = self.fixture_or_err(id)?.node_count();
        self.publish(LayoutEvent::PointsChanged {
            id: id.clone(),
            node_count,
        });
        Ok(node_count)
    }

    /// Splits the selected edge at its midpoint.
    ///
    /// Returns the index of the new node. Edge and node selection are cleared
    /// afterwards since every later index has shifted; item-map entries of
    /// later edges move up by one.
    pub fn add_node_to_selected_edge(&mut self) -> Result<usize, LayoutError> {
        let fixture = self.selected_or_err()?.clone();
        let edge = self
            .selection
            .selected_edge()
            .ok_or(LayoutError::NoEdgeSelected)?;

        let points = node_editing::add_node_to_edge(&fixture, edge).inspect_err(|err| {
            tracing::warn!("Add node on {} rejected: {}", fixture.id, err);
        })?;
        let node_count = self.commit_points(&fixture.id, points)?;
        let items_before = item_map::fixture_entries(&self.item_map, &fixture.id);
        item_map::shift_after_edge_split(&mut self.item_map, &fixture.id, edge);
        let items = EdgeItems {
            before: items_before,
            after: item_map::fixture_entries(&self.item_map, &fixture.id),
        };
        self.record_update_with_items("Add Node", fixture.clone(), Some(items));

        self.selection.deselect_parts();
        self.publish(SelectionEvent::EdgeSelected {
            index: None,
            item_key: None,
        });
        tracing::debug!("Fixture {} now has {} nodes", fixture.id, node_count);
        Ok(edge + 1)
    }

    /// Removes the selected node. A triangle keeps all three of its nodes.
    ///
    /// Item-map entries of the two edges meeting at the node are merged onto
    /// the edge that replaces them; later edges move down by one.
    pub fn delete_selected_node(&mut self) -> Result<(), LayoutError> {
        let fixture = self.selected_or_err()?.clone();
        let node = self
            .selection
            .selected_node()
            .ok_or(LayoutError::NoNodeSelected)?;

        let points = node_editing::delete_node(&fixture.points, node).inspect_err(|err| {
            tracing::warn!("Delete node on {} rejected: {}", fixture.id, err);
        })?;
        self.commit_points(&fixture.id, points)?;
        let items_before = item_map::fixture_entries(&self.item_map, &fixture.id);
        item_map::merge_after_node_delete(
            &mut self.item_map,
            &fixture.id,
            node,
            fixture.node_count(),
        );
        let items = EdgeItems {
            before: items_before,
            after: item_map::fixture_entries(&self.item_map, &fixture.id),
        };
        self.record_update_with_items("Delete Node", fixture, Some(items));

        self.selection.deselect_node();
        self.publish(SelectionEvent::NodeSelected { index: None });
        Ok(())
    }

    /// Moves node `index` of `id` so it is drawn at `(x, y)`.
    pub fn move_node(&mut self, id: &FixtureId, index: usize, x: f64, y: f64) -> Result<(), LayoutError> {
        let before = self.fixture_or_err(id)?.clone();
        self.apply_node_move(id, index, x, y)?;
        self.record_update("Move Node", before);
        Ok(())
    }

    pub(super) fn apply_node_move(
        &mut self,
        id: &FixtureId,
        index: usize,
        x: f64,
        y: f64,
    ) -> Result<(), LayoutError> {
        let fixture = self.fixture_or_err(id)?;
        let points = node_editing::move_node(fixture, index, x, y).inspect_err(|err| {
            tracing::warn!("Move node on {} rejected: {}", id, err);
        })?;
        self.commit_points(id, points)?;
        Ok(())
    }
}
