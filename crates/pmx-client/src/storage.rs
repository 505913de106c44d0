//! Storage content lifecycle: upload, URL import, retrieval, deletion.

use std::path::Path;

use pmx_models::{
    ChecksumAlgorithm, ContentClass, ContentDetails, UploadOptions, Upid, VolumeId,
};
use tracing::debug;

use crate::client::PmxClient;
use crate::error::{PmxError, PmxResult};
use crate::task::Task;

/// Handle for one storage pool on one node.
#[derive(Clone)]
pub struct Storage {
    client: PmxClient,
    node: String,
    name: String,
}

impl Storage {
    pub(crate) fn new(client: PmxClient, node: String, name: impl Into<String>) -> Self {
        Self {
            client,
            node,
            name: name.into(),
        }
    }

    /// Owning node name.
    pub fn node(&self) -> &str {
        &self.node
    }

    /// Storage pool name.
    pub fn name(&self) -> &str {
        &self.name
    }

    // =========================================================================
    // Upload
    // =========================================================================

    /// Upload a local file as `class` content.
    pub async fn upload(&self, class: ContentClass, file: impl AsRef<Path>) -> PmxResult<Task> {
        self.upload_with(class, file, UploadOptions::default()).await
    }

    /// Upload a local file, stored under a different name on the pool.
    pub async fn upload_with_name(
        &self,
        class: ContentClass,
        file: impl AsRef<Path>,
        storage_filename: &str,
    ) -> PmxResult<Task> {
        self.upload_with(class, file, UploadOptions::with_filename(storage_filename))
            .await
    }

    /// Upload a local file with a checksum the platform verifies after the
    /// transfer. The remote filename override is optional.
    pub async fn upload_with_hash(
        &self,
        class: ContentClass,
        file: impl AsRef<Path>,
        storage_filename: Option<&str>,
        checksum: &str,
        algorithm: ChecksumAlgorithm,
    ) -> PmxResult<Task> {
        self.upload_with(
            class,
            file,
            UploadOptions::with_hash(storage_filename, checksum, algorithm),
        )
        .await
    }

    /// Upload a local file with explicit options.
    ///
    /// The content class is validated and the local path checked before any
    /// remote call; the file handle is released on every exit path.
    pub async fn upload_with(
        &self,
        class: ContentClass,
        file: impl AsRef<Path>,
        options: UploadOptions,
    ) -> PmxResult<Task> {
        if !class.is_uploadable() {
            return Err(PmxError::InvalidContentClass(class));
        }

        let path = file.as_ref();
        let meta = tokio::fs::metadata(path).await?;
        if meta.is_dir() {
            return Err(PmxError::FileIsDirectory(path.to_path_buf()));
        }

        let handle = tokio::fs::File::open(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let mut fields = vec![("content", class.to_string())];
        fields.extend(options.form_fields());

        debug!(storage = %self.name, content = %class, "uploading {}", path.display());
        let upid: Upid = self
            .client
            .upload(
                &format!("/nodes/{}/storage/{}/upload", self.node, self.name),
                &fields,
                handle,
                &file_name,
            )
            .await?;
        Ok(Task::new(upid, self.client.clone()))
    }

    // =========================================================================
    // URL import
    // =========================================================================

    /// Import content the cluster downloads from `url` itself. `filename`
    /// names the stored result.
    pub async fn download_url(
        &self,
        class: ContentClass,
        filename: &str,
        url: &str,
    ) -> PmxResult<Task> {
        self.download_url_with(class, filename, url, UploadOptions::default())
            .await
    }

    /// URL import with a checksum the platform verifies after the download.
    pub async fn download_url_with_hash(
        &self,
        class: ContentClass,
        filename: &str,
        url: &str,
        checksum: &str,
        algorithm: ChecksumAlgorithm,
    ) -> PmxResult<Task> {
        self.download_url_with(
            class,
            filename,
            url,
            UploadOptions::with_hash(None, checksum, algorithm),
        )
        .await
    }

    /// URL import with explicit options. Only the checksum fields of the
    /// options apply here; the stored name is the `filename` argument.
    pub async fn download_url_with(
        &self,
        class: ContentClass,
        filename: &str,
        url: &str,
        options: UploadOptions,
    ) -> PmxResult<Task> {
        if !class.is_uploadable() {
            return Err(PmxError::InvalidContentClass(class));
        }

        let mut fields = vec![
            ("content", class.to_string()),
            ("filename", filename.to_string()),
            ("url", url.to_string()),
        ];
        if let Some(ref checksum) = options.checksum {
            fields.push(("checksum", checksum.clone()));
        }
        if let Some(algorithm) = options.checksum_algorithm {
            fields.push(("checksum-algorithm", algorithm.as_str().to_string()));
        }

        debug!(storage = %self.name, content = %class, "importing {}", url);
        let upid: Upid = self
            .client
            .post(
                &format!("/nodes/{}/storage/{}/download-url", self.node, self.name),
                &fields,
            )
            .await?;
        Ok(Task::new(upid, self.client.clone()))
    }

    // =========================================================================
    // Retrieval
    // =========================================================================

    async fn content_item(&self, class: ContentClass, name: &str) -> PmxResult<ContentItem> {
        let volume = VolumeId::new(&self.name, class, name);
        let details: ContentDetails = self
            .client
            .get(&format!(
                "/nodes/{}/storage/{}/content/{}",
                self.node, self.name, volume
            ))
            .await?;

        Ok(ContentItem {
            client: self.client.clone(),
            node: self.node.clone(),
            storage: self.name.clone(),
            class,
            details,
        })
    }

    /// Fetch metadata for an ISO image on this pool.
    pub async fn iso(&self, name: &str) -> PmxResult<IsoFile> {
        let mut item = self.content_item(ContentClass::Iso, name).await?;
        item.synthesize_volid(name);
        Ok(IsoFile { inner: item })
    }

    /// Fetch metadata for a container template on this pool.
    pub async fn vztmpl(&self, name: &str) -> PmxResult<VzTmpl> {
        let mut item = self.content_item(ContentClass::Vztmpl, name).await?;
        item.synthesize_volid(name);
        Ok(VzTmpl { inner: item })
    }

    /// Fetch metadata for a backup archive on this pool.
    ///
    /// Unlike ISO and container-template retrieval this does not synthesize
    /// a volume identifier when the platform omits one; backups are keyed by
    /// path when deleted.
    pub async fn backup(&self, name: &str) -> PmxResult<Backup> {
        Ok(Backup {
            inner: self.content_item(ContentClass::Backup, name).await?,
        })
    }
}

// =============================================================================
// Content items
// =============================================================================

/// Shared state of a retrieved content item. The client reference and the
/// storage coordinates are assigned once at construction and never change.
#[derive(Clone, Debug)]
struct ContentItem {
    client: PmxClient,
    node: String,
    storage: String,
    class: ContentClass,
    details: ContentDetails,
}

impl ContentItem {
    /// Fill in the canonical identifier when the detail endpoint omitted it.
    fn synthesize_volid(&mut self, name: &str) {
        if self.details.volid.is_empty() {
            self.details.volid = VolumeId::new(&self.storage, self.class, name).into_string();
        }
    }

    /// Resolve a deletable volume identifier and issue the DELETE.
    ///
    /// Listing endpoints populate `path` but never the identifier, so it is
    /// reconstructed from the path's final component when absent.
    async fn delete(&self) -> PmxResult<Task> {
        let volume = if !self.details.volid.is_empty() {
            VolumeId::from(self.details.volid.as_str())
        } else {
            VolumeId::from_path(&self.storage, self.class, &self.details.path)
                .ok_or(PmxError::MissingVolumeId)?
        };

        debug!(volume = %volume, "deleting volume");
        let upid: Upid = self
            .client
            .delete(&format!(
                "/nodes/{}/storage/{}/content/{}",
                self.node, self.storage, volume
            ))
            .await?;
        Ok(Task::new(upid, self.client.clone()))
    }
}

/// An ISO image retrieved from a storage pool.
#[derive(Clone, Debug)]
pub struct IsoFile {
    inner: ContentItem,
}

impl IsoFile {
    /// Volume identifier; synthesized at retrieval time if the platform
    /// omitted it.
    pub fn volid(&self) -> &str {
        &self.inner.details.volid
    }

    /// Path on the owning node, empty when not exposed.
    pub fn path(&self) -> &str {
        &self.inner.details.path
    }

    /// Owning node name.
    pub fn node(&self) -> &str {
        &self.inner.node
    }

    /// Owning storage pool name.
    pub fn storage(&self) -> &str {
        &self.inner.storage
    }

    /// Full decoded metadata.
    pub fn details(&self) -> &ContentDetails {
        &self.inner.details
    }

    /// Delete the image from its storage pool.
    pub async fn delete(&self) -> PmxResult<Task> {
        self.inner.delete().await
    }
}

/// A container template retrieved from a storage pool.
#[derive(Clone)]
pub struct VzTmpl {
    inner: ContentItem,
}

impl VzTmpl {
    /// Volume identifier; synthesized at retrieval time if the platform
    /// omitted it.
    pub fn volid(&self) -> &str {
        &self.inner.details.volid
    }

    /// Path on the owning node, empty when not exposed.
    pub fn path(&self) -> &str {
        &self.inner.details.path
    }

    /// Owning node name.
    pub fn node(&self) -> &str {
        &self.inner.node
    }

    /// Owning storage pool name.
    pub fn storage(&self) -> &str {
        &self.inner.storage
    }

    /// Full decoded metadata.
    pub fn details(&self) -> &ContentDetails {
        &self.inner.details
    }

    /// Delete the template from its storage pool.
    pub async fn delete(&self) -> PmxResult<Task> {
        self.inner.delete().await
    }
}

/// A backup archive retrieved from a storage pool.
///
/// Backups carry no synthesized identifier; deletion falls back to the
/// path-derived form when the platform did not return one.
#[derive(Clone)]
pub struct Backup {
    inner: ContentItem,
}

impl Backup {
    /// Volume identifier, empty when the platform omitted it.
    pub fn volid(&self) -> &str {
        &self.inner.details.volid
    }

    /// Path on the owning node, empty when not exposed.
    pub fn path(&self) -> &str {
        &self.inner.details.path
    }

    /// Owning node name.
    pub fn node(&self) -> &str {
        &self.inner.node
    }

    /// Owning storage pool name.
    pub fn storage(&self) -> &str {
        &self.inner.storage
    }

    /// Full decoded metadata.
    pub fn details(&self) -> &ContentDetails {
        &self.inner.details
    }

    /// Delete the archive from its storage pool.
    pub async fn delete(&self) -> PmxResult<Task> {
        self.inner.delete().await
    }
}

// =============================================================================
// Tests
// =============================================================================
