//! # StorePlan Designer
//!
//! Editor core for store floor plans. Fixtures (shelves, racks, display
//! units) are polygons placed on the plan; the designer lets a user add and
//! delete them, edit their fields, and reshape their outlines node by node.
//!
//! ## Core Components
//!
//! - **Geometry**: centroid, rotation, and the local/absolute fixture transform
//! - **Fixture Store**: the fixture collection and its only write path
//! - **Selection Manager**: fixture/edge/node selection state machine
//! - **Node Editing**: pure add/delete/move node transforms
//! - **Layout Session**: the state a UI drives, with drag dispatch and undo
//! - **Viewport** and **Render**: screen mapping and draw/hit-test data
//! - **Serialization** and **Persistence**: layout files and storage backends
//!
//! ## Architecture
//!
//! ```text
//! LayoutSession
//!   ├── FixtureStore ── Fixture ── geometry
//!   ├── SelectionManager
//!   ├── History (LayoutCommand)
//!   └── ItemMap
//!
//! node_editing (pure) ◀── session edits
//! render / viewport   ◀── canvas collaborator
//! LayoutFile ──▶ LayoutBackend (JSON directory, memory)
//! ```
//!
//! ## Usage
//!
//! ```
//! use storeplan_designer::{EditMode, LayoutSession};
//!
//! let mut session = LayoutSession::default();
//! let id = session.add_fixture();
//! session.select_fixture(&id).unwrap();
//! session.set_mode(EditMode::Edit);
//! session.select_edge(0).unwrap();
//! session.add_node_to_selected_edge().unwrap();
//! assert_eq!(session.fixture(&id).unwrap().node_count(), 4);
//! ```

pub mod commands;
pub mod fixture;
pub mod fixture_store;
pub mod geometry;
pub mod item_map;
pub mod layout_session;
pub mod node_editing;
pub mod persistence;
pub mod render;
pub mod selection_manager;
pub mod serialization;
pub mod viewport;

pub use commands::{EdgeItems, History, LayoutCommand};
pub use fixture::{Fixture, FixtureTemplate, DEFAULT_SPAWN};
pub use fixture_store::{FixtureSnapshot, FixtureStore};
pub use geometry::{FixtureTransform, Point};
pub use item_map::{edge_item_key, ItemMap};
pub use layout_session::{DragInput, DragPhase, EditingProjection, LayoutSession, SessionOptions};
pub use persistence::{JsonDirectoryBackend, LayoutBackend, MemoryBackend};
pub use render::{FixtureView, HitTarget};
pub use selection_manager::{EditMode, SelectionManager, SelectionState};
pub use serialization::{LayoutFile, LayoutMetadata};
pub use viewport::Viewport;
