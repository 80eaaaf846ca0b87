//! Layout file format.
//!
//! One JSON document per store: format version, metadata, the fixture
//! snapshot keyed by id, and the item map carried through untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storeplan_core::PersistenceError;

use crate::fixture_store::FixtureSnapshot;
use crate::item_map::ItemMap;

/// Layout file format version
pub const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete layout file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutFile {
    pub version: String,
    pub metadata: LayoutMetadata,
    #[serde(default)]
    pub fixtures: FixtureSnapshot,
    #[serde(default)]
    pub item_map: ItemMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetadata {
    pub store_name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl LayoutFile {
    /// Create an empty layout for `store_name`
    pub fn new(store_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: LayoutMetadata {
                store_name: store_name.into(),
                created: now,
                modified: now,
            },
            fixtures: FixtureSnapshot::new(),
            item_map: ItemMap::new(),
        }
    }

    pub fn store_name(&self) -> &str {
        &self.metadata.store_name
    }

    /// Bumps the modification time.
    pub fn touch(&mut self) {
        self.metadata.modified = Utc::now();
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a layout document, rejecting other major format versions.
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let file: LayoutFile = serde_json::from_str(json)?;
        let major = |v: &str| v.split('.').next().map(str::to_owned);
        if major(&file.version) != major(FILE_FORMAT_VERSION) {
            return Err(PersistenceError::UnsupportedVersion {
                version: file.version,
            });
        }
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{Fixture, FixtureTemplate};
    use crate::geometry::Point;
    use serde_json::json;

    #[test]
    fn test_layout_file_json_round_trip() {
        let mut file = LayoutFile::new("downtown");
        let f = Fixture::from_template("f1".into(), &FixtureTemplate::TRIANGLE, Point::new(1.0, 2.0));
        file.fixtures.insert(f.id.clone(), f);
        file.item_map.insert("f1-edge-0".to_string(), json!(["milk"]));

        let text = file.to_json().unwrap();
        assert!(text.contains("\"scaleX\""));
        let back = LayoutFile::from_json(&text).unwrap();
        assert_eq!(back, file);
    }

    #[test]
    fn test_rejects_unknown_major_version() {
        let mut file = LayoutFile::new("downtown");
        file.version = "2.0".to_string();
        let text = file.to_json().unwrap();
        assert!(matches!(
            LayoutFile::from_json(&text),
            Err(PersistenceError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let text = r#"{
            "version": "1.2",
            "metadata": {
                "store_name": "x",
                "created": "2024-01-01T00:00:00Z",
                "modified": "2024-01-01T00:00:00Z"
            }
        }"#;
        let file = LayoutFile::from_json(text).unwrap();
        assert!(file.fixtures.is_empty());
        assert!(file.item_map.is_empty());
    }
}
