//! Software-defined-network topology models.

use serde::{Deserialize, Serialize};

/// A cluster-level SDN zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdnZone {
    /// Zone identifier
    pub zone: String,
    /// Zone plugin type (`simple`, `vlan`, `vxlan`, `evpn`, ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtu: Option<u32>,
    /// Nodes the zone is restricted to, comma separated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<String>,
    /// Configuration state (`new`, `changed`, `deleted`) when pending
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// A cluster-level virtual network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdnVnet {
    /// Vnet identifier
    pub vnet: String,
    /// Zone the vnet belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Human-readable alias
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// VLAN or VXLAN tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<u32>,
    /// Whether the vnet is VLAN aware (platform boolean, 0/1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlanaware: Option<u8>,
}

/// Per-node status entry for an SDN zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdnZoneStatus {
    /// Zone identifier
    pub zone: String,
    /// Reported status (`available`, `error`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// One vnet inside a node's SDN zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdnZoneContent {
    /// Vnet identifier
    pub vnet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Interface statistics as reported by the node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<serde_json::Value>,
}
