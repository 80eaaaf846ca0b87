//! Shared value types.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque fixture identifier.
///
/// New fixtures get a random uuid; restored layouts may carry any string
/// the persistence backend handed out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixtureId(String);

impl FixtureId {
    /// Generate a fresh unique id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FixtureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FixtureId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FixtureId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Position axis for single-field position edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}

/// Editor flavor, selecting the template used for new fixtures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorFlavor {
    /// Triangle template, light green fill
    #[default]
    Triangle,
    /// Narrow rectangle template, orange fill
    Rectangle,
}

impl fmt::Display for EditorFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Triangle => write!(f, "triangle"),
            Self::Rectangle => write!(f, "rectangle"),
        }
    }
}
