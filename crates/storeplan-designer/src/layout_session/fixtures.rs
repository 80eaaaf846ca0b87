//! Whole-fixture operations: add, delete, and field edits.

use storeplan_core::{Axis, EditorFlavor, FixtureId, LayoutError, LayoutEvent, SelectionEvent};

use super::LayoutSession;
use crate::commands::{AddFixture, LayoutCommand, RemoveFixture};
use crate::fixture::{Fixture, FixtureTemplate};
use crate::fixture_store::FixtureStore;

impl LayoutSession {
    /// Adds a fixture of the session's flavor at the spawn point.
    pub fn add_fixture(&mut self) -> FixtureId {
        self.add_fixture_of(self.options.flavor)
    }

    pub fn add_fixture_of(&mut self, flavor: EditorFlavor) -> FixtureId {
        let template = FixtureTemplate::for_flavor(flavor);
        let id = self.store.add_fixture(template, self.options.spawn);
        if let Some(fixture) = self.store.get(&id).cloned() {
            self.history
                .record(LayoutCommand::AddFixture(AddFixture { fixture }));
        }
        self.is_modified = true;
        tracing::info!("Added {} fixture {}", template.name, id);
        self.publish(LayoutEvent::FixtureAdded { id: id.clone() });

        if self.options.auto_select_new {
            self.selection.select_fixture(id.clone());
            self.sync_projection();
            self.publish(SelectionEvent::FixtureSelected {
                id: Some(id.clone()),
            });
        }
        id
    }

    /// Deletes `id`, or the selected fixture when `id` is `None`.
    ///
    /// Deleting the selected fixture returns the selection to idle.
    pub fn delete_fixture(&mut self, id: Option<&FixtureId>) -> Result<Fixture, LayoutError> {
        let id = match id.or(self.selection.selected_fixture()) {
            Some(id) => id.clone(),
            None => {
                tracing::warn!("Delete requested with no fixture selected");
                return Err(LayoutError::NoSelection);
            }
        };
        let fixture = self
            .store
            .remove(&id)
            .ok_or_else(|| LayoutError::FixtureNotFound { id: id.clone() })?;

        if self.drag.as_ref().is_some_and(|d| d.before.id == id) {
            self.drag = None;
        }
        self.history
            .record(LayoutCommand::RemoveFixture(RemoveFixture {
                fixture: fixture.clone(),
            }));
        self.is_modified = true;
        tracing::info!("Deleted fixture {}", id);
        self.publish(LayoutEvent::FixtureRemoved { id: id.clone() });

        if self.selection.is_selected(&id) {
            self.selection.clear_all();
            self.projection = None;
            self.publish(SelectionEvent::FixtureSelected { id: None });
        }
        Ok(fixture)
    }

    /// Applies one field edit through `edit`, recording it for undo.
    fn edit_fixture<F>(&mut self, id: &FixtureId, label: &str, edit: F) -> Result<(), LayoutError>
    where
        F: FnOnce(&mut FixtureStore) -> Result<(), LayoutError>,
    {
        let before = self.fixture_or_err(id)?.clone();
        if let Err(err) = edit(&mut self.store) {
            tracing::warn!("{} on {} rejected: {}", label, id, err);
            return Err(err);
        }
        self.record_update(label, before);
        if self.selection.is_selected(id) {
            self.sync_projection();
        }
        self.publish(LayoutEvent::FixtureUpdated { id: id.clone() });
        Ok(())
    }

    pub fn set_name(&mut self, id: &FixtureId, name: &str) -> Result<(), LayoutError> {
        self.edit_fixture(id, "Rename Fixture", |store| store.set_name(id, name))
    }

    /// Sets fill and display color together.
    pub fn set_color(&mut self, id: &FixtureId, color: &str) -> Result<(), LayoutError> {
        self.edit_fixture(id, "Change Color", |store| store.set_color(id, color))
    }

    /// Sets one coordinate of the fixture position, as typed into a field.
    pub fn set_position(&mut self, id: &FixtureId, axis: Axis, value: f64) -> Result<(), LayoutError> {
        self.edit_fixture(id, "Move Fixture", |store| store.set_position(id, axis, value))
    }

    pub fn move_fixture(&mut self, id: &FixtureId, x: f64, y: f64) -> Result<(), LayoutError> {
        self.edit_fixture(id, "Move Fixture", |store| store.move_fixture(id, x, y))
    }

    pub fn set_rotation(&mut self, id: &FixtureId, degrees: f64) -> Result<(), LayoutError> {
        self.edit_fixture(id, "Rotate Fixture", |store| store.set_rotation(id, degrees))
    }

    pub fn set_scale(&mut self, id: &FixtureId, scale_x: f64, scale_y: f64) -> Result<(), LayoutError> {
        self.edit_fixture(id, "Scale Fixture", |store| {
            store.set_scale(id, scale_x, scale_y)
        })
    }
}
