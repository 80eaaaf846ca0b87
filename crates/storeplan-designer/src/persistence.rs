//! Layout storage backends.
//!
//! The session never touches storage directly; it hands a [`LayoutFile`] to a
//! [`LayoutBackend`] and gets one back.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use storeplan_core::PersistenceError;

use crate::serialization::LayoutFile;

/// Storage for one layout per store name.
pub trait LayoutBackend {
    fn save_layout(&self, layout: &LayoutFile) -> Result<(), PersistenceError>;

    fn load_layout(&self, store: &str) -> Result<LayoutFile, PersistenceError>;

    fn clear_layout(&self, store: &str) -> Result<(), PersistenceError>;
}

/// Store names become file names, so they are limited to a safe alphabet.
pub fn validate_store_name(store: &str) -> Result<(), PersistenceError> {
    let valid = !store.is_empty()
        && store.len() <= 128
        && !store.starts_with('.')
        && store
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(PersistenceError::InvalidStoreName {
            store: store.to_string(),
        })
    }
}

/// One pretty-printed `<store>.json` per store inside a directory.
#[derive(Debug, Clone)]
pub struct JsonDirectoryBackend {
    root: PathBuf,
}

impl JsonDirectoryBackend {
    /// Uses `root` as the layout directory, creating it if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout_path(&self, store: &str) -> Result<PathBuf, PersistenceError> {
        validate_store_name(store)?;
        Ok(self.root.join(format!("{}.json", store)))
    }
}

impl LayoutBackend for JsonDirectoryBackend {
    fn save_layout(&self, layout: &LayoutFile) -> Result<(), PersistenceError> {
        let path = self.layout_path(layout.store_name())?;
        let json = layout.to_json()?;
        // Write next to the target and rename so a failed write keeps the old file.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!("Saved layout to {}", path.display());
        Ok(())
    }

    fn load_layout(&self, store: &str) -> Result<LayoutFile, PersistenceError> {
        let path = self.layout_path(store)?;
        let json = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PersistenceError::LayoutNotFound {
                store: store.to_string(),
            },
            _ => PersistenceError::Io(e),
        })?;
        LayoutFile::from_json(&json)
    }

    fn clear_layout(&self, store: &str) -> Result<(), PersistenceError> {
        let path = self.layout_path(store)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process backend, handy for tests and for running without a disk.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    layouts: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, store: &str) -> bool {
        self.layouts.read().contains_key(store)
    }

    pub fn len(&self) -> usize {
        self.layouts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.read().is_empty()
    }
}

impl LayoutBackend for MemoryBackend {
    fn save_layout(&self, layout: &LayoutFile) -> Result<(), PersistenceError> {
        validate_store_name(layout.store_name())?;
        let json = layout.to_json()?;
        self.layouts
            .write()
            .insert(layout.store_name().to_string(), json);
        Ok(())
    }

    fn load_layout(&self, store: &str) -> Result<LayoutFile, PersistenceError> {
        validate_store_name(store)?;
        let layouts = self.layouts.read();
        let json = layouts
            .get(store)
            .ok_or_else(|| PersistenceError::LayoutNotFound {
                store: store.to_string(),
            })?;
        LayoutFile::from_json(json)
    }

    fn clear_layout(&self, store: &str) -> Result<(), PersistenceError> {
        validate_store_name(store)?;
        self.layouts.write().remove(store);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_name_validation() {
        assert!(validate_store_name("downtown-01").is_ok());
        assert!(validate_store_name("store_2.v1").is_ok());
        for bad in ["", "..", ".hidden", "a/b", "a\\b", "münchen"] {
            assert!(validate_store_name(bad).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn test_memory_backend() {
        let backend = MemoryBackend::new();
        assert!(matches!(
            backend.load_layout("x"),
            Err(PersistenceError::LayoutNotFound { .. })
        ));
        let layout = LayoutFile::new("x");
        backend.save_layout(&layout).unwrap();
        assert!(backend.contains("x"));
        assert_eq!(backend.load_layout("x").unwrap(), layout);
        backend.clear_layout("x").unwrap();
        assert!(backend.is_empty());
    }
}
