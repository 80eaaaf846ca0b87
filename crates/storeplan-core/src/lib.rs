//! # StorePlan Core
//!
//! Core types, error taxonomy and the event bus shared by the StorePlan
//! crates. The editor model itself lives in `storeplan-designer`; this crate
//! only holds what several crates need to agree on.

pub mod error;
pub mod event_bus;
pub mod types;

pub use error::{EditError, Error, LayoutError, PersistenceError, Result, SelectionError};

pub use event_bus::{
    AppEvent, EventBus, EventBusConfig, EventCategory, EventFilter, LayoutEvent,
    PersistenceEvent, SelectionEvent, SubscriptionId,
};

pub use types::{Axis, EditorFlavor, FixtureId};
