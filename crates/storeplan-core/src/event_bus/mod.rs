//! # Event Bus Module
//!
//! Publish/subscribe notifications for components that mirror the editor
//! state (property panels, item-map views, autosave hooks).
//!
//! ## Overview
//!
//! - The layout session publishes typed events after each successful change
//! - Subscribers filter by category and receive events synchronously
//! - There is no global instance: a bus is created by the shell and handed to
//!   the session that should publish on it
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use storeplan_core::event_bus::{AppEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = Arc::new(EventBus::new());
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Selection]),
//!     |event| {
//!         if let AppEvent::Selection(sel) = event {
//!             println!("selection changed: {}", sel.description());
//!         }
//!     },
//! );
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
