//! Error handling for StorePlan
//!
//! Provides error types for every layer of the editor core:
//! - Edit errors (node/edge mutation rejections)
//! - Selection errors (illegal selection transitions)
//! - Layout errors (session-level operations)
//! - Persistence errors (saving/loading layouts)
//!
//! All error types use `thiserror`. None of them are fatal: every variant
//! describes a condition the editor recovers from by leaving its state as it
//! was before the rejected operation.

use thiserror::Error;

use crate::types::FixtureId;

/// Minimum number of nodes a fixture polygon may have.
pub const MIN_NODES: usize = 3;

/// Node/edge mutation error type
///
/// Returned by the mutation engine when an edit would break a polygon
/// invariant. The input point list is never partially modified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    /// Deleting the node would leave fewer than three nodes
    #[error("Polygon needs at least {MIN_NODES} nodes, it has {node_count}")]
    TooFewNodes {
        /// Node count before the rejected deletion.
        node_count: usize,
    },

    /// Node index outside the polygon
    #[error("Node {index} out of range (polygon has {node_count} nodes)")]
    NodeOutOfRange {
        /// The requested node index.
        index: usize,
        /// Current node count.
        node_count: usize,
    },

    /// Edge index outside the polygon
    #[error("Edge {index} out of range (polygon has {edge_count} edges)")]
    EdgeOutOfRange {
        /// The requested edge index.
        index: usize,
        /// Current edge count.
        edge_count: usize,
    },

    /// Drop position is not a finite coordinate
    #[error("Non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate {
        /// Requested x.
        x: f64,
        /// Requested y.
        y: f64,
    },
}

/// Selection state machine error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// An edge or node was picked while no fixture is selected
    #[error("No fixture selected")]
    NoFixtureSelected,

    /// Edge/node picking is only allowed in edit mode
    #[error("Edges and nodes can only be selected in edit mode")]
    NotInEditMode,

    /// The fixture to select does not exist
    #[error("Fixture {id} does not exist")]
    UnknownFixture {
        /// The requested fixture id.
        id: FixtureId,
    },

    /// Edge index outside the selected polygon
    #[error("Edge {index} out of range (polygon has {edge_count} edges)")]
    EdgeOutOfRange {
        /// The requested edge index.
        index: usize,
        /// Current edge count.
        edge_count: usize,
    },

    /// Node index outside the selected polygon
    #[error("Node {index} out of range (polygon has {node_count} nodes)")]
    NodeOutOfRange {
        /// The requested node index.
        index: usize,
        /// Current node count.
        node_count: usize,
    },
}

/// Layout session error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Fixture id not present in the store
    #[error("Fixture {id} not found")]
    FixtureNotFound {
        /// The missing fixture id.
        id: FixtureId,
    },

    /// A numeric field received NaN or infinity
    #[error("Ignoring non-finite value for {field}: {value}")]
    NonFiniteValue {
        /// The field that was being set.
        field: String,
        /// The rejected value.
        value: f64,
    },

    /// Operation needs a selection and none was given
    #[error("Nothing selected")]
    NoSelection,

    /// Operation needs a selected edge
    #[error("No edge selected")]
    NoEdgeSelected,

    /// Operation needs a selected node
    #[error("No node selected")]
    NoNodeSelected,

    /// Undo stack is empty
    #[error("Nothing to undo")]
    NothingToUndo,

    /// Redo stack is empty
    #[error("Nothing to redo")]
    NothingToRedo,

    /// Drag move or end without a matching start
    #[error("No drag in progress")]
    NoActiveDrag,

    /// Mutation engine rejection
    #[error(transparent)]
    Edit(#[from] EditError),

    /// Selection state machine rejection
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Persistence error type
///
/// Raised by layout backends. A failed save or load never touches the
/// in-memory editor state.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// No saved layout for this store
    #[error("No saved layout for store '{store}'")]
    LayoutNotFound {
        /// The store name that was looked up.
        store: String,
    },

    /// Store name cannot be used as a storage key
    #[error("Invalid store name '{store}'")]
    InvalidStoreName {
        /// The rejected store name.
        store: String,
    },

    /// Saved layout uses a format version this build does not read
    #[error("Unsupported layout version {version}")]
    UnsupportedVersion {
        /// The version string found in the document.
        version: String,
    },

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend-specific failure
    #[error("Backend error: {message}")]
    Backend {
        /// A message describing the failure.
        message: String,
    },
}

/// Main error type for StorePlan
///
/// A unified error type that can represent any error from the editor core.
#[derive(Error, Debug)]
pub enum Error {
    /// Layout session error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Persistence error
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a persistence error
    pub fn is_persistence_error(&self) -> bool {
        matches!(self, Error::Persistence(_))
    }

    /// Check if this error is a rejected edit (recoverable user action)
    pub fn is_rejected_edit(&self) -> bool {
        matches!(
            self,
            Error::Layout(LayoutError::Edit(_)) | Error::Layout(LayoutError::Selection(_))
        )
    }
}

impl From<EditError> for Error {
    fn from(err: EditError) -> Self {
        Error::Layout(LayoutError::Edit(err))
    }
}

impl From<SelectionError> for Error {
    fn from(err: SelectionError) -> Self {
        Error::Layout(LayoutError::Selection(err))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
