//! Handles for asynchronous operations.

use std::fmt;

use pmx_models::{TaskStatus, Upid};

use crate::client::PmxClient;
use crate::error::{PmxError, PmxResult};

/// Handle for an asynchronous operation started by a mutating call.
///
/// Uploads, imports, and deletions run in the background on the owning node;
/// the handle carries the identifier the operation can be tracked by.
/// Waiting for completion is the caller's concern.
#[derive(Clone, Debug)]
pub struct Task {
    upid: Upid,
    client: PmxClient,
}

impl Task {
    pub(crate) fn new(upid: Upid, client: PmxClient) -> Self {
        Self { upid, client }
    }

    /// The operation identifier.
    pub fn upid(&self) -> &Upid {
        &self.upid
    }

    /// Node the operation runs on, when the identifier carries one.
    pub fn node(&self) -> Option<&str> {
        self.upid.node()
    }

    /// Read the operation's current status snapshot.
    pub async fn status(&self) -> PmxResult<TaskStatus> {
        let node = self.upid.node().ok_or_else(|| {
            PmxError::invalid_response(format!("upid {} does not name a node", self.upid))
        })?;
        self.client
            .get(&format!("/nodes/{}/tasks/{}/status", node, self.upid))
            .await
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.upid)
    }
}
