//! Event type definitions for the event bus.
//!
//! Events are cloneable and serializable so they can be logged or replayed.

use serde::{Deserialize, Serialize};

use crate::types::FixtureId;

/// Root event enum for all editor events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Fixture collection changes
    Layout(LayoutEvent),
    /// Selection and mode changes
    Selection(SelectionEvent),
    /// Save/load outcomes
    Persistence(PersistenceEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Layout(_) => EventCategory::Layout,
            AppEvent::Selection(_) => EventCategory::Selection,
            AppEvent::Persistence(_) => EventCategory::Persistence,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Layout(e) => e.description(),
            AppEvent::Selection(e) => e.description(),
            AppEvent::Persistence(e) => e.description(),
        }
    }
}

impl From<LayoutEvent> for AppEvent {
    fn from(event: LayoutEvent) -> Self {
        AppEvent::Layout(event)
    }
}

impl From<SelectionEvent> for AppEvent {
    fn from(event: SelectionEvent) -> Self {
        AppEvent::Selection(event)
    }
}

impl From<PersistenceEvent> for AppEvent {
    fn from(event: PersistenceEvent) -> Self {
        AppEvent::Persistence(event)
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Fixture collection events.
    Layout,
    /// Selection state events.
    Selection,
    /// Save/load events.
    Persistence,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Layout => write!(f, "Layout"),
            EventCategory::Selection => write!(f, "Selection"),
            EventCategory::Persistence => write!(f, "Persistence"),
        }
    }
}

/// Fixture collection events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayoutEvent {
    /// A fixture was created.
    FixtureAdded {
        /// The new fixture.
        id: FixtureId,
    },
    /// A fixture was deleted.
    FixtureRemoved {
        /// The deleted fixture.
        id: FixtureId,
    },
    /// Position, name, color or transform changed.
    FixtureUpdated {
        /// The changed fixture.
        id: FixtureId,
    },
    /// The polygon outline changed.
    PointsChanged {
        /// The changed fixture.
        id: FixtureId,
        /// Node count after the change.
        node_count: usize,
    },
    /// The whole collection was replaced (restore, load, undo of many).
    Restored {
        /// Number of fixtures after the restore.
        fixture_count: usize,
    },
}

impl LayoutEvent {
    /// Get a short description of this event
    pub fn description(&self) -> String {
        match self {
            LayoutEvent::FixtureAdded { id } => format!("fixture {} added", id),
            LayoutEvent::FixtureRemoved { id } => format!("fixture {} removed", id),
            LayoutEvent::FixtureUpdated { id } => format!("fixture {} updated", id),
            LayoutEvent::PointsChanged { id, node_count } => {
                format!("fixture {} outline now has {} nodes", id, node_count)
            }
            LayoutEvent::Restored { fixture_count } => {
                format!("layout restored with {} fixtures", fixture_count)
            }
        }
    }
}

/// Selection state events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// Selected fixture changed (None means idle).
    FixtureSelected {
        /// The selected fixture, if any.
        id: Option<FixtureId>,
    },
    /// Selected edge changed.
    EdgeSelected {
        /// The selected edge, if any.
        index: Option<usize>,
        /// Item-map key of the selected edge, if any.
        item_key: Option<String>,
    },
    /// Selected node changed.
    NodeSelected {
        /// The selected node, if any.
        index: Option<usize>,
    },
    /// Interaction mode switched.
    ModeChanged {
        /// True for edit mode.
        edit: bool,
    },
}

impl SelectionEvent {
    /// Get a short description of this event
    pub fn description(&self) -> String {
        match self {
            SelectionEvent::FixtureSelected { id: Some(id) } => format!("fixture {} selected", id),
            SelectionEvent::FixtureSelected { id: None } => "selection cleared".to_string(),
            SelectionEvent::EdgeSelected { index, .. } => format!("edge {:?} selected", index),
            SelectionEvent::NodeSelected { index } => format!("node {:?} selected", index),
            SelectionEvent::ModeChanged { edit: true } => "edit mode".to_string(),
            SelectionEvent::ModeChanged { edit: false } => "object mode".to_string(),
        }
    }
}

/// Save/load events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PersistenceEvent {
    /// Layout saved.
    Saved {
        /// Store name.
        store: String,
    },
    /// Layout loaded.
    Loaded {
        /// Store name.
        store: String,
    },
    /// Saved layout deleted.
    Cleared {
        /// Store name.
        store: String,
    },
    /// Backend reported a failure; in-memory state is unchanged.
    Failed {
        /// Store name.
        store: String,
        /// Failure message for display.
        message: String,
    },
}

impl PersistenceEvent {
    /// Get a short description of this event
    pub fn description(&self) -> String {
        match self {
            PersistenceEvent::Saved { store } => format!("layout '{}' saved", store),
            PersistenceEvent::Loaded { store } => format!("layout '{}' loaded", store),
            PersistenceEvent::Cleared { store } => format!("layout '{}' cleared", store),
            PersistenceEvent::Failed { store, message } => {
                format!("layout '{}' persistence failed: {}", store, message)
            }
        }
    }
}
