//! Drag gesture dispatch.
//!
//! The canvas reports drags as a phase plus a tagged payload. A whole drag,
//! however many move events it carries, becomes one undo step.

use serde::{Deserialize, Serialize};
use storeplan_core::{FixtureId, LayoutError, LayoutEvent};

use super::{ActiveDrag, LayoutSession};

/// What is being dragged, and where it is now (absolute floor-plan units).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DragInput {
    /// A whole fixture; `x, y` is its new position.
    Fixture { id: FixtureId, x: f64, y: f64 },
    /// One node handle; `x, y` is where the node is drawn.
    Node {
        id: FixtureId,
        index: usize,
        x: f64,
        y: f64,
    },
}

impl DragInput {
    pub fn fixture_id(&self) -> &FixtureId {
        match self {
            DragInput::Fixture { id, .. } | DragInput::Node { id, .. } => id,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DragInput::Fixture { .. } => "Move Fixture",
            DragInput::Node { .. } => "Move Node",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragPhase {
    Start,
    Move,
    End,
}

impl LayoutSession {
    /// Handles one drag event.
    ///
    /// `Start` snapshots the fixture for undo, `Move` applies the position
    /// without touching history, and `End` applies the final position and
    /// commits the snapshot. `Move`/`End` without a matching `Start` are
    /// rejected with [`LayoutError::NoActiveDrag`].
    pub fn handle_drag(&mut self, phase: DragPhase, input: DragInput) -> Result<(), LayoutError> {
        let id = input.fixture_id().clone();
        match phase {
            DragPhase::Start => {
                let before = self.fixture_or_err(&id)?.clone();
                if let Some(stale) = self.drag.take() {
                    tracing::warn!("Drag on {} started before previous drag ended", id);
                    self.record_update(stale.label, stale.before);
                }
                self.drag = Some(ActiveDrag {
                    before,
                    label: input.label(),
                });
                self.apply_drag(&input)
            }
            DragPhase::Move => {
                self.check_active_drag(&id)?;
                self.apply_drag(&input)
            }
            DragPhase::End => {
                self.check_active_drag(&id)?;
                let applied = self.apply_drag(&input);
                if let Some(drag) = self.drag.take() {
                    self.record_update(drag.label, drag.before);
                }
                applied
            }
        }
    }

    fn check_active_drag(&self, id: &FixtureId) -> Result<(), LayoutError> {
        match &self.drag {
            Some(drag) if &drag.before.id == id => Ok(()),
            _ => {
                tracing::warn!("Drag event for {} without a drag in progress", id);
                Err(LayoutError::NoActiveDrag)
            }
        }
    }

    fn apply_drag(&mut self, input: &DragInput) -> Result<(), LayoutError> {
        match input {
            DragInput::Fixture { id, x, y } => {
                self.store.move_fixture(id, *x, *y)?;
                if self.selection.is_selected(id) {
                    self.sync_projection();
                }
                self.publish(LayoutEvent::FixtureUpdated { id: id.clone() });
                Ok(())
            }
            DragInput::Node { id, index, x, y } => self.apply_node_move(id, *index, *x, *y),
        }
    }
}
