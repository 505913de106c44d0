//! Upload and URL-import options.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Checksum algorithms accepted by the upload and URL-import endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl ChecksumAlgorithm {
    /// Get the wire representation of the algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecksumAlgorithm::Md5 => "md5",
            ChecksumAlgorithm::Sha1 => "sha1",
            ChecksumAlgorithm::Sha224 => "sha224",
            ChecksumAlgorithm::Sha256 => "sha256",
            ChecksumAlgorithm::Sha384 => "sha384",
            ChecksumAlgorithm::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optional parameters shared by upload and URL import.
///
/// All fields are independently optional; unset fields are omitted from the
/// request entirely rather than sent empty.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// Override for the filename stored on the target storage
    pub filename: Option<String>,
    /// Expected checksum of the content, verified by the platform after
    /// the transfer
    pub checksum: Option<String>,
    /// Algorithm the checksum was computed with
    pub checksum_algorithm: Option<ChecksumAlgorithm>,
}

impl UploadOptions {
    /// Options overriding only the stored filename.
    pub fn with_filename(filename: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
            ..Self::default()
        }
    }

    /// Options carrying a checksum, with an optional filename override.
    pub fn with_hash(
        filename: Option<&str>,
        checksum: impl Into<String>,
        algorithm: ChecksumAlgorithm,
    ) -> Self {
        Self {
            filename: filename.map(str::to_string),
            checksum: Some(checksum.into()),
            checksum_algorithm: Some(algorithm),
        }
    }

    /// Form fields for the set options, in a stable order.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(ref filename) = self.filename {
            fields.push(("filename", filename.clone()));
        }
        if let Some(ref checksum) = self.checksum {
            fields.push(("checksum", checksum.clone()));
        }
        if let Some(algorithm) = self.checksum_algorithm {
            fields.push(("checksum-algorithm", algorithm.as_str().to_string()));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_produce_no_fields() {
        assert!(UploadOptions::default().form_fields().is_empty());
    }

    #[test]
    fn test_hash_without_filename_omits_filename_field() {
        let options = UploadOptions::with_hash(None, "abc123", ChecksumAlgorithm::Sha256);
        let fields = options.form_fields();
        assert!(fields.iter().all(|(key, _)| *key != "filename"));
        assert!(fields.contains(&("checksum", "abc123".to_string())));
        assert!(fields.contains(&("checksum-algorithm", "sha256".to_string())));
    }

    #[test]
    fn test_hash_with_filename_includes_filename_field() {
        let options =
            UploadOptions::with_hash(Some("renamed.iso"), "abc123", ChecksumAlgorithm::Sha1);
        let fields = options.form_fields();
        assert!(fields.contains(&("filename", "renamed.iso".to_string())));
    }

    #[test]
    fn test_algorithm_wire_form() {
        assert_eq!(ChecksumAlgorithm::Sha256.as_str(), "sha256");
        let json = serde_json::to_string(&ChecksumAlgorithm::Md5).unwrap();
        assert_eq!(json, "\"md5\"");
    }
}
