//! Shared data models for the Proxmox VE client.
//!
//! This crate provides Serde-serializable types for:
//! - Content classes and stored-content metadata
//! - Canonical volume identifiers
//! - Upload options and checksum algorithms
//! - Asynchronous task identifiers and status
//! - Storage pool and SDN topology listings

pub mod content;
pub mod sdn;
pub mod storage;
pub mod task;
pub mod upload;
pub mod volume;

// Re-export common types
pub use content::{ContentClass, ContentDetails};
pub use sdn::{SdnVnet, SdnZone, SdnZoneContent, SdnZoneStatus};
pub use storage::StorageInfo;
pub use task::{TaskStatus, Upid};
pub use upload::{ChecksumAlgorithm, UploadOptions};
pub use volume::VolumeId;
