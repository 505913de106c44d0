//! Software-defined-network topology read-throughs.
//!
//! Pure pass-through listings; no derived logic lives here.

use pmx_models::{SdnVnet, SdnZone, SdnZoneContent, SdnZoneStatus};

use crate::client::PmxClient;
use crate::error::PmxResult;
use crate::node::Node;

/// Entry point for cluster-level calls.
#[derive(Clone)]
pub struct Cluster {
    client: PmxClient,
}

impl Cluster {
    pub(crate) fn new(client: PmxClient) -> Self {
        Self { client }
    }

    /// List the SDN zones configured on the cluster.
    pub async fn sdn_zones(&self) -> PmxResult<Vec<SdnZone>> {
        self.client.get("/cluster/sdn/zones").await
    }

    /// List the virtual networks configured on the cluster.
    pub async fn sdn_vnets(&self) -> PmxResult<Vec<SdnVnet>> {
        self.client.get("/cluster/sdn/vnets").await
    }
}

/// Per-node view of one SDN zone.
#[derive(Clone)]
pub struct NodeSdnZone {
    client: PmxClient,
    node: String,
    status: SdnZoneStatus,
}

impl NodeSdnZone {
    /// Zone identifier.
    pub fn zone(&self) -> &str {
        &self.status.zone
    }

    /// Reported status entry.
    pub fn status(&self) -> &SdnZoneStatus {
        &self.status
    }

    /// List the vnets present in this zone on this node.
    pub async fn content(&self) -> PmxResult<Vec<SdnZoneContent>> {
        self.client
            .get(&format!(
                "/nodes/{}/sdn/zones/{}/content",
                self.node, self.status.zone
            ))
            .await
    }
}

impl Node {
    /// List the SDN zones visible on this node.
    pub async fn sdn_zones(&self) -> PmxResult<Vec<NodeSdnZone>> {
        let zones: Vec<SdnZoneStatus> = self
            .client()
            .get(&format!("/nodes/{}/sdn/zones", self.name()))
            .await?;

        Ok(zones
            .into_iter()
            .map(|status| NodeSdnZone {
                client: self.client().clone(),
                node: self.name().to_string(),
                status,
            })
            .collect())
    }
}
