//! # StorePlan
//!
//! Store floor-plan editor core. Fixtures are polygons placed on a store
//! plan; users add them, move them and reshape their outlines node by node.
//!
//! ## Architecture
//!
//! StorePlan is organized as a workspace with multiple crates:
//!
//! 1. **storeplan-core** - Fixture ids, error taxonomy, event bus
//! 2. **storeplan-designer** - Geometry, fixture store, selection, node
//!    editing, layout session, layout files and storage backends
//! 3. **storeplan-settings** - Configuration files
//! 4. **storeplan** - CLI binary that ties the crates together

pub mod cli;

use std::sync::Arc;

pub use storeplan_core::{
    AppEvent, EditError, EditorFlavor, Error, EventBus, FixtureId, LayoutError, PersistenceError,
    Result, SelectionError,
};
pub use storeplan_designer::{
    DragInput, DragPhase, EditMode, Fixture, JsonDirectoryBackend, LayoutBackend, LayoutFile,
    LayoutSession, MemoryBackend, Point, SessionOptions,
};
pub use storeplan_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Console output, pretty or JSON lines
/// - `level` as the default directive
/// - RUST_LOG environment variable support, overriding `level`
pub fn init_logging(level: &str, json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
            .pretty();
        registry.with(fmt_layer).try_init()?;
    }

    Ok(())
}

/// Session options derived from the editor and storage settings.
pub fn session_options(config: &Config) -> SessionOptions {
    SessionOptions {
        flavor: config.editor.flavor,
        spawn: Point::new(config.editor.spawn_x, config.editor.spawn_y),
        auto_select_new: config.editor.auto_select_new,
        store_name: config.storage.store_name.clone(),
        ..SessionOptions::default()
    }
}

/// A session configured from `config`, optionally publishing to `bus`.
pub fn session_from_config(config: &Config, bus: Option<Arc<EventBus>>) -> LayoutSession {
    let session = LayoutSession::new(session_options(config));
    match bus {
        Some(bus) => session.with_event_bus(bus),
        None => session,
    }
}

/// Opens the configured layout directory.
pub fn open_backend(config: &Config) -> std::result::Result<JsonDirectoryBackend, PersistenceError> {
    JsonDirectoryBackend::new(&config.storage.layout_directory)
}

/// Loads the configured store into `session`; a store that was never saved
/// leaves the session empty.
pub fn load_or_start(
    session: &mut LayoutSession,
    backend: &dyn LayoutBackend,
) -> std::result::Result<bool, PersistenceError> {
    let store = session.store_name().to_string();
    match session.load(backend, &store) {
        Ok(()) => Ok(true),
        Err(PersistenceError::LayoutNotFound { .. }) => {
            tracing::info!("Starting new layout for store '{}'", store);
            Ok(false)
        }
        Err(err) => Err(err),
    }
}
