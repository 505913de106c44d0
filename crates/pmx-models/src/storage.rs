//! Storage pool listings.

use serde::{Deserialize, Serialize};

use crate::content::ContentClass;

/// One storage pool attached to a node, as returned by the node storage
/// listing. Platform booleans are integers (0/1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageInfo {
    /// Storage pool name
    pub storage: String,
    /// Backend type (`dir`, `lvmthin`, `nfs`, ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Comma-separated content classes the pool accepts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared: Option<u8>,
    /// Total capacity in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Used capacity in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used: Option<u64>,
    /// Available capacity in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avail: Option<u64>,
}

impl StorageInfo {
    /// Whether the pool is configured to accept the given content class.
    pub fn accepts(&self, class: ContentClass) -> bool {
        self.content
            .as_deref()
            .map_or(false, |content| {
                content.split(',').any(|part| part.trim() == class.as_str())
            })
    }
}
