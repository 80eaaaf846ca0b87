//! Owned collection of fixtures keyed by id.
//!
//! `FixtureStore` is the only place point lists and fixture fields are
//! written. It keeps a draw order alongside the map so hit-testing can find
//! the topmost fixture.

use std::collections::{BTreeMap, HashMap};

use storeplan_core::{Axis, FixtureId, LayoutError};

use crate::fixture::{Fixture, FixtureTemplate};
use crate::geometry::{self, Point};

/// Persisted form of the fixture collection.
pub type FixtureSnapshot = BTreeMap<FixtureId, Fixture>;

#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    fixtures: HashMap<FixtureId, Fixture>,
    draw_order: Vec<FixtureId>,
}

fn finite(field: &str, value: f64) -> Result<f64, LayoutError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LayoutError::NonFiniteValue {
            field: field.to_string(),
            value,
        })
    }
}

impl FixtureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    pub fn contains(&self, id: &FixtureId) -> bool {
        self.fixtures.contains_key(id)
    }

    pub fn get(&self, id: &FixtureId) -> Option<&Fixture> {
        self.fixtures.get(id)
    }

    fn get_mut(&mut self, id: &FixtureId) -> Result<&mut Fixture, LayoutError> {
        self.fixtures
            .get_mut(id)
            .ok_or_else(|| LayoutError::FixtureNotFound { id: id.clone() })
    }

    /// Fixtures bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Fixture> + '_ {
        self.draw_order.iter().filter_map(|id| self.fixtures.get(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = &FixtureId> + '_ {
        self.draw_order.iter()
    }

    /// Creates a fixture from `template` at `position` and returns its id.
    pub fn add_fixture(&mut self, template: &FixtureTemplate, position: Point) -> FixtureId {
        let id = FixtureId::generate();
        let fixture = Fixture::from_template(id.clone(), template, position);
        self.insert(fixture);
        id
    }

    /// Inserts or replaces a fixture. A replaced fixture keeps its draw slot.
    pub fn insert(&mut self, fixture: Fixture) {
        debug_assert!(fixture.points.len() % 2 == 0, "odd point list for {}", fixture.id);
        let id = fixture.id.clone();
        if self.fixtures.insert(id.clone(), fixture).is_none() {
            self.draw_order.push(id);
        }
    }

    pub fn remove(&mut self, id: &FixtureId) -> Option<Fixture> {
        let removed = self.fixtures.remove(id)?;
        self.draw_order.retain(|other| other != id);
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.fixtures.clear();
        self.draw_order.clear();
    }

    pub fn set_name(&mut self, id: &FixtureId, name: &str) -> Result<(), LayoutError> {
        self.get_mut(id)?.name = name.to_string();
        Ok(())
    }

    /// Sets both the fill and the display color.
    pub fn set_color(&mut self, id: &FixtureId, color: &str) -> Result<(), LayoutError> {
        let fixture = self.get_mut(id)?;
        fixture.fill = color.to_string();
        fixture.color = color.to_string();
        Ok(())
    }

    pub fn set_position(&mut self, id: &FixtureId, axis: Axis, value: f64) -> Result<(), LayoutError> {
        let value = finite(&axis.to_string(), value)?;
        let fixture = self.get_mut(id)?;
        match axis {
            Axis::X => fixture.x = value,
            Axis::Y => fixture.y = value,
        }
        Ok(())
    }

    pub fn move_fixture(&mut self, id: &FixtureId, x: f64, y: f64) -> Result<(), LayoutError> {
        let x = finite("x", x)?;
        let y = finite("y", y)?;
        let fixture = self.get_mut(id)?;
        fixture.x = x;
        fixture.y = y;
        Ok(())
    }

    pub fn set_rotation(&mut self, id: &FixtureId, degrees: f64) -> Result<(), LayoutError> {
        let degrees = finite("rotation", degrees)?.rem_euclid(360.0);
        self.get_mut(id)?.rotation = degrees;
        Ok(())
    }

    pub fn set_scale(&mut self, id: &FixtureId, scale_x: f64, scale_y: f64) -> Result<(), LayoutError> {
        let scale_x = finite("scaleX", scale_x)?;
        let scale_y = finite("scaleY", scale_y)?;
        let fixture = self.get_mut(id)?;
        fixture.scale_x = scale_x;
        fixture.scale_y = scale_y;
        Ok(())
    }

    /// Replaces a fixture's outline. Callers get new lists from the node
    /// editing engine, which never produces an odd-length list.
    pub fn set_points(&mut self, id: &FixtureId, points: Vec<f64>) -> Result<(), LayoutError> {
        debug_assert!(
            points.len() % 2 == 0,
            "point list for {} must have even length, got {}",
            id,
            points.len()
        );
        self.get_mut(id)?.points = points;
        Ok(())
    }

    /// Topmost fixture whose drawn polygon contains `p`.
    pub fn fixture_at(&self, p: Point) -> Option<&Fixture> {
        self.iter().rev().find(|f| f.contains_point(p))
    }

    /// Snapshot of the collection keyed by id.
    pub fn serialize(&self) -> FixtureSnapshot {
        self.fixtures
            .iter()
            .map(|(id, f)| (id.clone(), f.clone()))
            .collect()
    }

    /// Replaces the collection with `snapshot`.
    ///
    /// Entries whose point list has odd length are dropped with a warning;
    /// a map key that disagrees with the record's own id is resolved in
    /// favour of the key.
    pub fn restore(&mut self, snapshot: FixtureSnapshot) {
        self.clear();
        for (id, mut fixture) in snapshot {
            if fixture.points.len() % 2 != 0 {
                tracing::warn!("Dropping fixture {} with odd point list ({})", id, fixture.points.len());
                continue;
            }
            if geometry::node_count(&fixture.points) < storeplan_core::error::MIN_NODES {
                tracing::warn!("Fixture {} has fewer than 3 nodes", id);
            }
            if fixture.id != id {
                tracing::warn!("Fixture record {} stored under key {}", fixture.id, id);
                fixture.id = id;
            }
            self.insert(fixture);
        }
    }
}
