//! Undo/redo for the layout session.

use storeplan_core::{LayoutError, LayoutEvent};

use super::LayoutSession;
use crate::commands::LayoutCommand;

impl LayoutSession {
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_name(&self) -> Option<&str> {
        self.history.undo_name()
    }

    pub fn redo_name(&self) -> Option<&str> {
        self.history.redo_name()
    }

    pub fn undo(&mut self) -> Result<(), LayoutError> {
        self.drag = None;
        let event = self
            .history
            .undo(&mut self.store, &mut self.item_map)
            .map(|cmd| reverted_event(cmd, true))
            .ok_or(LayoutError::NothingToUndo)?;
        self.after_history_step(event);
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), LayoutError> {
        self.drag = None;
        let event = self
            .history
            .redo(&mut self.store, &mut self.item_map)
            .map(|cmd| reverted_event(cmd, false))
            .ok_or(LayoutError::NothingToRedo)?;
        self.after_history_step(event);
        Ok(())
    }

    fn after_history_step(&mut self, event: LayoutEvent) {
        self.is_modified = true;
        self.reconcile_selection();
        tracing::debug!("History step: {}", event.description());
        self.publish(event);
    }
}

/// Event describing what an undo (`undone == true`) or redo of `cmd` did.
fn reverted_event(cmd: &LayoutCommand, undone: bool) -> LayoutEvent {
    let id = cmd.fixture_id().clone();
    match (cmd, undone) {
        (LayoutCommand::AddFixture(_), true) | (LayoutCommand::RemoveFixture(_), false) => {
            LayoutEvent::FixtureRemoved { id }
        }
        (LayoutCommand::AddFixture(_), false) | (LayoutCommand::RemoveFixture(_), true) => {
            LayoutEvent::FixtureAdded { id }
        }
        (LayoutCommand::UpdateFixture(update), _) => {
            let (old, new) = if undone {
                (&update.after, &update.before)
            } else {
                (&update.before, &update.after)
            };
            if old.points != new.points {
                LayoutEvent::PointsChanged {
                    id,
                    node_count: new.node_count(),
                }
            } else {
                LayoutEvent::FixtureUpdated { id }
            }
        }
    }
}
