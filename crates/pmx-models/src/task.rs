//! Asynchronous task identifiers and status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for an asynchronous operation.
///
/// Every mutating call returns one of these. The platform encodes the owning
/// node into the identifier (`UPID:node:...`), which is the only structure
/// this type interprets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Upid(pub String);

impl Upid {
    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Node the operation runs on, parsed from the identifier.
    pub fn node(&self) -> Option<&str> {
        let mut parts = self.0.split(':');
        match parts.next()? {
            "UPID" => parts.next().filter(|node| !node.is_empty()),
            _ => None,
        }
    }
}

impl fmt::Display for Upid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Upid {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Upid {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Status snapshot of an asynchronous operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatus {
    /// `running` or `stopped`
    #[serde(default)]
    pub status: String,
    /// Exit status, present once the task stopped (`OK` on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exitstatus: Option<String>,
    /// Task type (`imgcopy`, `download`, ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Node the task ran on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
    /// User that started the task
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Start time as a Unix timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starttime: Option<i64>,
}

impl TaskStatus {
    /// Whether the task is still running.
    pub fn is_running(&self) -> bool {
        self.status == "running"
    }

    /// Whether the task stopped successfully.
    pub fn succeeded(&self) -> bool {
        !self.is_running() && self.exitstatus.as_deref() == Some("OK")
    }
}
