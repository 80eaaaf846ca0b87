//! Edge/node mutation engine.
//!
//! Each operation reads a fixture (or its point list) and returns a fresh
//! point list; the input is never modified, so a rejected edit cannot leave a
//! half-applied outline behind. All indices are node indices; the flat
//! `2 * i` offsets stay inside this module.

use storeplan_core::error::MIN_NODES;
use storeplan_core::EditError;

use crate::fixture::Fixture;
use crate::geometry::{self, Point};

/// Inserts the midpoint of edge `edge` as a new node right after the edge's
/// first node.
///
/// The endpoints are taken in absolute coordinates (local + fixture
/// position), averaged, and mapped back to local space. Every node after
/// the insertion point shifts up by one index.
pub fn add_node_to_edge(fixture: &Fixture, edge: usize) -> Result<Vec<f64>, EditError> {
    let edge_count = fixture.edge_count();
    let (a, b) = fixture.edge(edge).ok_or(EditError::EdgeOutOfRange {
        index: edge,
        edge_count,
    })?;

    let origin = fixture.position();
    let abs_a = Point::new(a.x + origin.x, a.y + origin.y);
    let abs_b = Point::new(b.x + origin.x, b.y + origin.y);
    let mid = geometry::midpoint(abs_a, abs_b);
    let local = Point::new(mid.x - origin.x, mid.y - origin.y);

    let at = edge * 2 + 2;
    let mut points = Vec::with_capacity(fixture.points.len() + 2);
    points.extend_from_slice(&fixture.points[..at]);
    points.push(local.x);
    points.push(local.y);
    points.extend_from_slice(&fixture.points[at..]);
    Ok(points)
}

/// Removes node `node`. Refuses to go below three nodes.
pub fn delete_node(points: &[f64], node: usize) -> Result<Vec<f64>, EditError> {
    let node_count = geometry::node_count(points);
    if node >= node_count {
        return Err(EditError::NodeOutOfRange {
            index: node,
            node_count,
        });
    }
    if node_count <= MIN_NODES {
        return Err(EditError::TooFewNodes { node_count });
    }

    let mut out = Vec::with_capacity(points.len() - 2);
    out.extend_from_slice(&points[..node * 2]);
    out.extend_from_slice(&points[node * 2 + 2..]);
    Ok(out)
}

/// Moves node `node` so that it is drawn at the absolute position
/// `(abs_x, abs_y)`.
///
/// The drop position is translated into fixture space and, for rotated
/// fixtures, inverse-rotated around the centroid the fixture had before the
/// move. Scale is undone last.
pub fn move_node(
    fixture: &Fixture,
    node: usize,
    abs_x: f64,
    abs_y: f64,
) -> Result<Vec<f64>, EditError> {
    let node_count = fixture.node_count();
    if node >= node_count {
        return Err(EditError::NodeOutOfRange {
            index: node,
            node_count,
        });
    }
    let target = Point::new(abs_x, abs_y);
    if !target.is_finite() {
        return Err(EditError::NonFiniteCoordinate { x: abs_x, y: abs_y });
    }

    let local = fixture.transform().absolute_to_local(target);
    let mut points = fixture.points.clone();
    points[node * 2] = local.x;
    points[node * 2 + 1] = local.y;
    Ok(points)
}
