//! Snapshot, restore and backend save/load for the layout session.

use storeplan_core::{FixtureId, LayoutEvent, PersistenceError, PersistenceEvent, SelectionEvent};

use super::LayoutSession;
use crate::fixture_store::{FixtureSnapshot, FixtureStore};
use crate::item_map::{self, ItemMap};
use crate::persistence::LayoutBackend;
use crate::serialization::LayoutFile;

impl LayoutSession {
    /// Fixture collection keyed by id.
    pub fn serialize(&self) -> FixtureSnapshot {
        self.store.serialize()
    }

    /// Replaces every fixture with `snapshot`.
    ///
    /// Selection, projection, history and any drag in progress are reset;
    /// none of them can refer to the old collection.
    pub fn restore(&mut self, snapshot: FixtureSnapshot) {
        self.store.restore(snapshot);
        self.history.clear();
        self.drag = None;
        let had_selection = self.selection.selected_fixture().is_some();
        self.selection.clear_all();
        self.projection = None;

        let fixture_count = self.store.len();
        tracing::info!("Restored layout with {} fixtures", fixture_count);
        self.publish(LayoutEvent::Restored { fixture_count });
        if had_selection {
            self.publish(SelectionEvent::FixtureSelected { id: None });
        }
    }

    /// Drops item-map entries for fixtures or edges that no longer exist.
    pub fn prune_item_map(&mut self) -> usize {
        let removed = prune_stale_items(&mut self.item_map, &self.store);
        if removed > 0 {
            self.is_modified = true;
        }
        removed
    }

    /// Current state as a layout document.
    pub fn to_layout_file(&self) -> LayoutFile {
        let mut file = LayoutFile::new(self.options.store_name.clone());
        if let Some(created) = self.created {
            file.metadata.created = created;
        }
        file.fixtures = self.serialize();
        file.item_map = self.item_map.clone();
        file
    }

    /// Saves under the session's store name. Stale item-map entries are left
    /// out of the file and dropped from the session once the save succeeds.
    ///
    /// A failed save is reported and published; the session is unchanged.
    pub fn save(&mut self, backend: &dyn LayoutBackend) -> Result<(), PersistenceError> {
        let mut file = self.to_layout_file();
        prune_stale_items(&mut file.item_map, &self.store);
        let store = self.options.store_name.clone();
        match backend.save_layout(&file) {
            Ok(()) => {
                let fixture_count = file.fixtures.len();
                self.created = Some(file.metadata.created);
                self.item_map = file.item_map;
                self.is_modified = false;
                tracing::info!("Saved layout '{}' ({} fixtures)", store, fixture_count);
                self.publish(PersistenceEvent::Saved { store });
                Ok(())
            }
            Err(err) => Err(self.persistence_failed(store, err)),
        }
    }

    /// Loads `store` from `backend`, replacing the current layout.
    ///
    /// On failure nothing in the session changes.
    pub fn load(&mut self, backend: &dyn LayoutBackend, store: &str) -> Result<(), PersistenceError> {
        let file = match backend.load_layout(store) {
            Ok(file) => file,
            Err(err) => return Err(self.persistence_failed(store.to_string(), err)),
        };

        self.options.store_name = store.to_string();
        self.created = Some(file.metadata.created);
        self.restore(file.fixtures);
        self.item_map = file.item_map;
        self.is_modified = false;
        tracing::info!("Loaded layout '{}'", store);
        self.publish(PersistenceEvent::Loaded {
            store: store.to_string(),
        });
        Ok(())
    }

    /// Deletes the saved layout for the session's store. The in-memory
    /// layout is kept, so it can still be saved again.
    pub fn clear(&mut self, backend: &dyn LayoutBackend) -> Result<(), PersistenceError> {
        let store = self.options.store_name.clone();
        match backend.clear_layout(&store) {
            Ok(()) => {
                self.created = None;
                self.is_modified = true;
                tracing::info!("Cleared saved layout '{}'", store);
                self.publish(PersistenceEvent::Cleared { store });
                Ok(())
            }
            Err(err) => Err(self.persistence_failed(store, err)),
        }
    }

    fn persistence_failed(&self, store: String, err: PersistenceError) -> PersistenceError {
        tracing::warn!("Layout '{}' persistence failed: {}", store, err);
        self.publish(PersistenceEvent::Failed {
            store,
            message: err.to_string(),
        });
        err
    }
}

/// Removes entries of `map` whose fixture or edge is not in `store`.
fn prune_stale_items(map: &mut ItemMap, store: &FixtureStore) -> usize {
    let mut removed = 0;
    let orphaned: Vec<FixtureId> = map
        .keys()
        .filter_map(|key| key.rsplit_once("-edge-").map(|(id, _)| FixtureId::from(id)))
        .filter(|id| !store.contains(id))
        .collect();
    for id in &orphaned {
        removed += item_map::remove_fixture(map, id);
    }
    for fixture in store.iter() {
        removed += item_map::prune_edges(map, &fixture.id, fixture.edge_count()).len();
    }
    if removed > 0 {
        tracing::debug!("Pruned {} stale item-map entries", removed);
    }
    removed
}
