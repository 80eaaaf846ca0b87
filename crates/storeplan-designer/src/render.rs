//! Render view model for the floor-plan canvas.
//!
//! The drawing layer is not part of this crate. It receives one
//! [`FixtureView`] per fixture, bottom to top, and sends gestures back as
//! session calls. Node and edge hit regions exist only for the selected
//! fixture in edit mode.

use serde::Serialize;
use storeplan_core::FixtureId;

use crate::fixture::Fixture;
use crate::fixture_store::FixtureStore;
use crate::geometry::{self, Point};
use crate::item_map::edge_item_key;
use crate::selection_manager::{EditMode, SelectionManager};

/// Pick radius for node handles and edges, in floor-plan units.
pub const HANDLE_TOLERANCE: f64 = 8.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeHandle {
    pub index: usize,
    /// Absolute position as drawn.
    pub position: Point,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeHandle {
    pub index: usize,
    pub start: Point,
    pub end: Point,
    pub item_key: String,
    pub is_selected: bool,
}

/// Everything the canvas needs to draw one fixture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureView {
    pub id: FixtureId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub points: Vec<f64>,
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation: f64,
    pub fill: String,
    pub is_selected: bool,
    pub nodes: Vec<NodeHandle>,
    pub edges: Vec<EdgeHandle>,
}

/// What lies under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Node { id: FixtureId, index: usize },
    Edge { id: FixtureId, index: usize },
    Fixture { id: FixtureId },
}

fn shows_handles(selection: &SelectionManager, fixture: &Fixture) -> bool {
    selection.mode() == EditMode::Edit && selection.is_selected(&fixture.id)
}

fn node_handles(fixture: &Fixture, selection: &SelectionManager) -> Vec<NodeHandle> {
    fixture
        .absolute_nodes()
        .into_iter()
        .enumerate()
        .map(|(index, position)| NodeHandle {
            index,
            position,
            is_selected: selection.selected_node() == Some(index),
        })
        .collect()
}

fn edge_handles(fixture: &Fixture, selection: &SelectionManager) -> Vec<EdgeHandle> {
    let nodes = fixture.absolute_nodes();
    let n = nodes.len();
    (0..n)
        .map(|index| EdgeHandle {
            index,
            start: nodes[index],
            end: nodes[(index + 1) % n],
            item_key: edge_item_key(&fixture.id, index),
            is_selected: selection.selected_edge() == Some(index),
        })
        .collect()
}

pub fn fixture_view(fixture: &Fixture, selection: &SelectionManager) -> FixtureView {
    let handles = shows_handles(selection, fixture);
    FixtureView {
        id: fixture.id.clone(),
        name: fixture.name.clone(),
        x: fixture.x,
        y: fixture.y,
        points: fixture.points.clone(),
        scale_x: fixture.scale_x,
        scale_y: fixture.scale_y,
        rotation: fixture.rotation,
        fill: fixture.fill.clone(),
        is_selected: selection.is_selected(&fixture.id),
        nodes: if handles {
            node_handles(fixture, selection)
        } else {
            Vec::new()
        },
        edges: if handles {
            edge_handles(fixture, selection)
        } else {
            Vec::new()
        },
    }
}

/// Views for every fixture, bottom to top.
pub fn build_views(store: &FixtureStore, selection: &SelectionManager) -> Vec<FixtureView> {
    store.iter().map(|f| fixture_view(f, selection)).collect()
}

/// Resolves a pointer position. Node handles win over edges, edges over
/// fixture bodies; among bodies the topmost wins.
pub fn hit_test(
    store: &FixtureStore,
    selection: &SelectionManager,
    point: Point,
    tolerance: f64,
) -> Option<HitTarget> {
    if let Some(fixture) = selection
        .selected_fixture()
        .and_then(|id| store.get(id))
        .filter(|f| shows_handles(selection, f))
    {
        let nodes = fixture.absolute_nodes();
        if let Some(index) = nodes
            .iter()
            .position(|node| node.distance_to(&point) <= tolerance)
        {
            return Some(HitTarget::Node {
                id: fixture.id.clone(),
                index,
            });
        }
        let n = nodes.len();
        if let Some(index) = (0..n).find(|&i| {
            geometry::distance_to_segment(point, nodes[i], nodes[(i + 1) % n]) <= tolerance
        }) {
            return Some(HitTarget::Edge {
                id: fixture.id.clone(),
                index,
            });
        }
    }

    store
        .fixture_at(point)
        .map(|f| HitTarget::Fixture { id: f.id.clone() })
}
