use storeplan_core::FixtureId;

use crate::fixture::Fixture;
use crate::fixture_store::FixtureStore;
use crate::item_map::{self, ItemMap};

/// A reversible change to the fixture collection.
///
/// Commands capture whole fixture records rather than deltas: outlines are
/// small and a record swap is exact, which a re-applied geometric delta
/// would not be after rotation round-off.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutCommand {
    AddFixture(AddFixture),
    RemoveFixture(RemoveFixture),
    UpdateFixture(UpdateFixture),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddFixture {
    pub fixture: Fixture,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoveFixture {
    pub fixture: Fixture,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateFixture {
    pub before: Fixture,
    pub after: Fixture,
    pub name: String,
    /// The fixture's item-map entries, when the edit renumbered its edges.
    pub items: Option<EdgeItems>,
}

/// Item-map entries of one fixture before and after an edit.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeItems {
    pub before: ItemMap,
    pub after: ItemMap,
}

impl LayoutCommand {
    /// Records a change from `before` to `after`, or `None` if nothing changed.
    pub fn update(name: &str, before: Fixture, after: Fixture) -> Option<Self> {
        (before != after).then(|| {
            LayoutCommand::UpdateFixture(UpdateFixture {
                before,
                after,
                name: name.to_string(),
                items: None,
            })
        })
    }

    /// Attaches an item-map change to an update command.
    pub fn with_items(mut self, items: EdgeItems) -> Self {
        if let LayoutCommand::UpdateFixture(cmd) = &mut self {
            cmd.items = (items.before != items.after).then_some(items);
        }
        self
    }

    pub fn name(&self) -> &str {
        match self {
            LayoutCommand::AddFixture(_) => "Add Fixture",
            LayoutCommand::RemoveFixture(_) => "Delete Fixture",
            LayoutCommand::UpdateFixture(cmd) => &cmd.name,
        }
    }

    /// The fixture this command touches.
    pub fn fixture_id(&self) -> &FixtureId {
        match self {
            LayoutCommand::AddFixture(cmd) => &cmd.fixture.id,
            LayoutCommand::RemoveFixture(cmd) => &cmd.fixture.id,
            LayoutCommand::UpdateFixture(cmd) => &cmd.after.id,
        }
    }

    pub fn apply(&self, store: &mut FixtureStore, items: &mut ItemMap) {
        match self {
            LayoutCommand::AddFixture(cmd) => store.insert(cmd.fixture.clone()),
            LayoutCommand::RemoveFixture(cmd) => {
                store.remove(&cmd.fixture.id);
            }
            LayoutCommand::UpdateFixture(cmd) => {
                store.insert(cmd.after.clone());
                if let Some(change) = &cmd.items {
                    item_map::replace_fixture_entries(items, &cmd.after.id, &change.after);
                }
            }
        }
    }

    pub fn undo(&self, store: &mut FixtureStore, items: &mut ItemMap) {
        match self {
            LayoutCommand::AddFixture(cmd) => {
                store.remove(&cmd.fixture.id);
            }
            LayoutCommand::RemoveFixture(cmd) => store.insert(cmd.fixture.clone()),
            LayoutCommand::UpdateFixture(cmd) => {
                store.insert(cmd.before.clone());
                if let Some(change) = &cmd.items {
                    item_map::replace_fixture_entries(items, &cmd.before.id, &change.before);
                }
            }
        }
    }
}

/// Undo/redo stacks.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<LayoutCommand>,
    redo_stack: Vec<LayoutCommand>,
    max_depth: usize,
}

impl History {
    pub const DEFAULT_DEPTH: usize = 100;

    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Records an already-applied command.
    pub fn record(&mut self, cmd: LayoutCommand) {
        tracing::debug!("History: {}", cmd.name());
        self.undo_stack.push(cmd);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_name(&self) -> Option<&str> {
        self.undo_stack.last().map(LayoutCommand::name)
    }

    pub fn redo_name(&self) -> Option<&str> {
        self.redo_stack.last().map(LayoutCommand::name)
    }

    /// Reverts the latest command; returns it for the caller's bookkeeping.
    pub fn undo(&mut self, store: &mut FixtureStore, items: &mut ItemMap) -> Option<&LayoutCommand> {
        let cmd = self.undo_stack.pop()?;
        cmd.undo(store, items);
        self.redo_stack.push(cmd);
        self.redo_stack.last()
    }

    pub fn redo(&mut self, store: &mut FixtureStore, items: &mut ItemMap) -> Option<&LayoutCommand> {
        let cmd = self.redo_stack.pop()?;
        cmd.apply(store, items);
        self.undo_stack.push(cmd);
        self.undo_stack.last()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEPTH)
    }
}
