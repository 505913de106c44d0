//! Node-level API entry points.

use pmx_models::StorageInfo;

use crate::client::PmxClient;
use crate::error::PmxResult;
use crate::storage::Storage;

/// Handle for one cluster node.
#[derive(Clone)]
pub struct Node {
    client: PmxClient,
    name: String,
}

impl Node {
    pub(crate) fn new(client: PmxClient, name: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
        }
    }

    /// Node name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn client(&self) -> &PmxClient {
        &self.client
    }

    /// List the storage pools attached to this node.
    pub async fn storages(&self) -> PmxResult<Vec<StorageInfo>> {
        self.client.get(&format!("/nodes/{}/storage", self.name)).await
    }

    /// Handle for one storage pool on this node. No remote call is made;
    /// the platform validates the pool name on first use.
    pub fn storage(&self, name: impl Into<String>) -> Storage {
        Storage::new(self.client.clone(), self.name.clone(), name)
    }
}
