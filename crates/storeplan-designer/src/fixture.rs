//! Fixture model: a polygon placed on the store floor plan.

use serde::{Deserialize, Serialize};
use storeplan_core::{EditorFlavor, FixtureId};

use crate::geometry::{self, FixtureTransform, Point};

/// Where new fixtures are dropped on the floor plan.
pub const DEFAULT_SPAWN: Point = Point { x: 500.0, y: 500.0 };

/// Starting outline and color for a new fixture.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureTemplate {
    pub name: &'static str,
    pub points: &'static [f64],
    pub color: &'static str,
}

impl FixtureTemplate {
    pub const TRIANGLE: FixtureTemplate = FixtureTemplate {
        name: "Fixture",
        points: &[0.0, 0.0, 60.0, 200.0, 200.0, 0.0],
        color: "lightgreen",
    };

    pub const RECTANGLE: FixtureTemplate = FixtureTemplate {
        name: "Shelf",
        points: &[0.0, 0.0, 0.0, 300.0, 50.0, 300.0, 50.0, 0.0],
        color: "#f5a051",
    };

    pub fn for_flavor(flavor: EditorFlavor) -> &'static FixtureTemplate {
        match flavor {
            EditorFlavor::Triangle => &Self::TRIANGLE,
            EditorFlavor::Rectangle => &Self::RECTANGLE,
        }
    }
}

/// A shelf, rack or display unit.
///
/// Serializes with exactly the persisted field names
/// `id, x, y, points, fill, name, scaleX, scaleY, rotation, color`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub id: FixtureId,
    pub x: f64,
    pub y: f64,
    /// Flat `[x0, y0, x1, y1, ...]` in local coordinates relative to `x, y`.
    pub points: Vec<f64>,
    pub fill: String,
    pub name: String,
    #[serde(default = "unit_scale")]
    pub scale_x: f64,
    #[serde(default = "unit_scale")]
    pub scale_y: f64,
    /// Degrees, applied around the polygon centroid.
    #[serde(default)]
    pub rotation: f64,
    pub color: String,
}

fn unit_scale() -> f64 {
    1.0
}

impl Fixture {
    /// Builds a fixture from a template, with its outline recentred so the
    /// local origin coincides with the centroid.
    pub fn from_template(id: FixtureId, template: &FixtureTemplate, position: Point) -> Self {
        Self {
            id,
            x: position.x,
            y: position.y,
            points: geometry::recenter(template.points),
            fill: template.color.to_string(),
            name: template.name.to_string(),
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            color: template.color.to_string(),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn node_count(&self) -> usize {
        geometry::node_count(&self.points)
    }

    /// Edges wrap around, so a polygon has as many edges as nodes.
    pub fn edge_count(&self) -> usize {
        self.node_count()
    }

    pub fn node(&self, index: usize) -> Option<Point> {
        geometry::node_at(&self.points, index)
    }

    /// Local endpoints of edge `index`: node `index` and node `index + 1`
    /// (wrapping to node 0).
    pub fn edge(&self, index: usize) -> Option<(Point, Point)> {
        let n = self.node_count();
        if index >= n {
            return None;
        }
        Some((self.node(index)?, self.node((index + 1) % n)?))
    }

    pub fn centroid(&self) -> Point {
        geometry::centroid(&self.points)
    }

    pub fn transform(&self) -> FixtureTransform {
        FixtureTransform::for_polygon(
            &self.points,
            self.position(),
            self.scale_x,
            self.scale_y,
            self.rotation,
        )
    }

    /// Nodes as drawn on the floor plan (scale and rotation applied).
    pub fn absolute_nodes(&self) -> Vec<Point> {
        self.transform().absolute_nodes(&self.points)
    }

    /// Whether an absolute floor-plan point falls inside the drawn polygon.
    pub fn contains_point(&self, p: Point) -> bool {
        let local = self.transform().absolute_to_local(p);
        geometry::point_in_polygon(&self.points, local)
    }

    /// Axis-aligned bounds of the drawn polygon as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.absolute_nodes().iter().fold(
            (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |(x1, y1, x2, y2), p| (x1.min(p.x), y1.min(p.y), x2.max(p.x), y2.max(p.y)),
        )
    }
}
