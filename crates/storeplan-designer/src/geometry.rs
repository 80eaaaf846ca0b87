//! Geometry helpers for fixture polygons.
//!
//! Point lists are flat `[x0, y0, x1, y1, ...]` slices in fixture-local
//! coordinates. Everything here is a pure function; the fixture store and the
//! node editing engine are the only callers that write point lists back.

use serde::{Deserialize, Serialize};

/// A 2D point on the floor plan or in fixture-local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Number of nodes in a flat point list.
pub fn node_count(points: &[f64]) -> usize {
    debug_assert!(
        points.len() % 2 == 0,
        "point list must have even length, got {}",
        points.len()
    );
    points.len() / 2
}

/// Node `index` of a flat point list, if present.
pub fn node_at(points: &[f64], index: usize) -> Option<Point> {
    let i = index.checked_mul(2)?;
    match (points.get(i), points.get(i + 1)) {
        (Some(&x), Some(&y)) => Some(Point::new(x, y)),
        _ => None,
    }
}

/// Iterate over the nodes of a flat point list.
pub fn nodes(points: &[f64]) -> impl Iterator<Item = Point> + '_ {
    points.chunks_exact(2).map(|p| Point::new(p[0], p[1]))
}

/// Mean of the node coordinates.
///
/// Divides by the node count, not the number of scalars. An empty list has
/// its centroid at the origin.
pub fn centroid(points: &[f64]) -> Point {
    let n = node_count(points);
    if n == 0 {
        return Point::default();
    }
    let (sx, sy) = nodes(points).fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n as f64, sy / n as f64)
}

/// Rotate `p` around `c` by `angle_deg` degrees.
///
/// Positive angles turn +x toward +y (clockwise on a y-down screen).
pub fn rotate_point(p: Point, c: Point, angle_deg: f64) -> Point {
    let theta = angle_deg.to_radians();
    let (sin, cos) = theta.sin_cos();
    let dx = p.x - c.x;
    let dy = p.y - c.y;
    Point::new(c.x + dx * cos - dy * sin, c.y + dx * sin + dy * cos)
}

/// Undo [`rotate_point`] with the same centre and angle.
pub fn inverse_rotate_point(p: Point, c: Point, angle_deg: f64) -> Point {
    rotate_point(p, c, -angle_deg)
}

pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Translate a point list so that its centroid sits at the local origin.
pub fn recenter(points: &[f64]) -> Vec<f64> {
    let c = centroid(points);
    points
        .chunks_exact(2)
        .flat_map(|p| [p[0] - c.x, p[1] - c.y])
        .collect()
}

/// Ray-casting point-in-polygon test over local nodes.
pub fn point_in_polygon(points: &[f64], p: Point) -> bool {
    let n = node_count(points);
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (Some(a), Some(b)) = (node_at(points, i), node_at(points, j)) else {
            break;
        };
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Shortest distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq < f64::EPSILON {
        return p.distance_to(&a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&Point::new(a.x + t * dx, a.y + t * dy))
}

/// Placement of a fixture's local space on the floor plan.
///
/// Local nodes are scaled about the local origin, rotated around the scaled
/// centroid, then translated by the fixture position. With unit scale this is
/// plain `rotate_point` around the centroid followed by a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixtureTransform {
    pub position: Point,
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation: f64,
    /// Rotation pivot in unscaled local coordinates.
    pub pivot: Point,
}

impl FixtureTransform {
    /// Transform for a polygon, pivoting around its current centroid.
    pub fn for_polygon(
        points: &[f64],
        position: Point,
        scale_x: f64,
        scale_y: f64,
        rotation: f64,
    ) -> Self {
        Self {
            position,
            scale_x,
            scale_y,
            rotation,
            pivot: centroid(points),
        }
    }

    fn scaled_pivot(&self) -> Point {
        Point::new(self.pivot.x * self.scale_x, self.pivot.y * self.scale_y)
    }

    /// Fixture-local point to absolute floor-plan coordinates.
    pub fn local_to_absolute(&self, local: Point) -> Point {
        let scaled = Point::new(local.x * self.scale_x, local.y * self.scale_y);
        let rotated = if self.rotation != 0.0 {
            rotate_point(scaled, self.scaled_pivot(), self.rotation)
        } else {
            scaled
        };
        Point::new(rotated.x + self.position.x, rotated.y + self.position.y)
    }

    /// Absolute floor-plan point back to fixture-local coordinates.
    ///
    /// A zero scale factor collapses the fixture; that axis maps to 0.
    pub fn absolute_to_local(&self, absolute: Point) -> Point {
        let offset = Point::new(absolute.x - self.position.x, absolute.y - self.position.y);
        let unrotated = if self.rotation != 0.0 {
            inverse_rotate_point(offset, self.scaled_pivot(), self.rotation)
        } else {
            offset
        };
        let unscale = |v: f64, s: f64| if s.abs() > f64::EPSILON { v / s } else { 0.0 };
        Point::new(
            unscale(unrotated.x, self.scale_x),
            unscale(unrotated.y, self.scale_y),
        )
    }

    /// All nodes of `points` in absolute coordinates.
    pub fn absolute_nodes(&self, points: &[f64]) -> Vec<Point> {
        nodes(points).map(|p| self.local_to_absolute(p)).collect()
    }
}
