//! Content classes and stored-content metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of content stored on a storage pool.
///
/// The class determines which API subpath addresses the content and which
/// lifecycle operations are legal for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentClass {
    /// Installer images
    Iso,
    /// Container templates
    Vztmpl,
    /// VM and container backup archives
    Backup,
}

impl ContentClass {
    /// Get the wire representation of the class.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentClass::Iso => "iso",
            ContentClass::Vztmpl => "vztmpl",
            ContentClass::Backup => "backup",
        }
    }

    /// Whether this class may be pushed to a storage via upload or URL
    /// import. Backups are produced by the platform itself and can only be
    /// retrieved or deleted.
    pub fn is_uploadable(&self) -> bool {
        matches!(self, ContentClass::Iso | ContentClass::Vztmpl)
    }
}

impl fmt::Display for ContentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata for a single content volume as returned by the content detail
/// endpoint.
///
/// The detail endpoint does not always echo the volume identifier, and the
/// listing endpoints omit it entirely while still populating `path`; callers
/// that need an identifier fall back to the canonical `storage:class/name`
/// form when this one is empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentDetails {
    /// Volume identifier, empty when the endpoint omitted it
    #[serde(default)]
    pub volid: String,
    /// Absolute path on the owning node, empty when not exposed
    #[serde(default)]
    pub path: String,
    /// Content size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Bytes actually allocated on the backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used: Option<u64>,
    /// On-disk format (`iso`, `tgz`, `vma.zst`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Creation time as a Unix timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctime: Option<i64>,
    /// Free-form notes attached to the volume
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ContentDetails {
    /// Creation time as a UTC timestamp, when the platform reported one.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.ctime.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}
