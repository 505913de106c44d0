//! Canonical volume identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::content::ContentClass;

/// Canonical string key addressing a stored object: `storage:class/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VolumeId(pub String);

impl VolumeId {
    /// Build the canonical identifier the platform assigns to a volume.
    pub fn new(storage: &str, class: ContentClass, name: &str) -> Self {
        Self(format!("{}:{}/{}", storage, class, name))
    }

    /// Reconstruct an identifier from a node-local filesystem path.
    ///
    /// Listing endpoints populate `path` but not the identifier; the final
    /// path component is the volume name. Returns `None` when the path has
    /// no final component.
    pub fn from_path(storage: &str, class: ContentClass, path: &str) -> Option<Self> {
        let name = Path::new(path).file_name()?.to_str()?;
        Some(Self::new(storage, class, name))
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for VolumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VolumeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VolumeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
