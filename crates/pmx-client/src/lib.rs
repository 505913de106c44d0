//! Typed client for the Proxmox VE management API.
//!
//! This crate provides:
//! - An authenticated transport over the platform's JSON API
//! - Storage content lifecycle: upload, URL import, retrieval, deletion
//! - SDN topology discovery (zones and vnets)
//! - Handles for the platform's asynchronous tasks

pub mod client;
pub mod error;
pub mod node;
pub mod retry;
pub mod sdn;
pub mod storage;
pub mod task;

pub use client::{PmxClient, PmxConfig};
pub use error::{PmxError, PmxResult};
pub use node::Node;
pub use retry::RetryConfig;
pub use sdn::{Cluster, NodeSdnZone};
pub use storage::{Backup, IsoFile, Storage, VzTmpl};
pub use task::Task;
