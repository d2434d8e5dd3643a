//! ObjectStore trait definition
//!
//! This trait defines the four storage operations the CLI needs.
//! It allows the CLI to be decoupled from the specific S3 SDK implementation.

use std::path::Path;

use async_trait::async_trait;
use jiff::Timestamp;
use serde::Serialize;

use crate::error::Result;
use crate::path::ObjectRef;

/// Metadata for a listed object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectInfo {
    /// Object key
    pub key: String,

    /// Size in bytes
    pub size_bytes: i64,

    /// Human-readable size
    pub size_human: String,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,

    /// Storage class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
}

impl ObjectInfo {
    /// Create a new ObjectInfo for a key of the given size
    pub fn new(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size_bytes: size,
            size_human: humansize::format_size(size.max(0) as u64, humansize::BINARY),
            last_modified: None,
            storage_class: None,
        }
    }

    pub fn with_last_modified(mut self, last_modified: Timestamp) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    pub fn with_storage_class(mut self, storage_class: impl Into<String>) -> Self {
        self.storage_class = Some(storage_class.into());
        self
    }
}

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    /// Where the object was written
    pub object: ObjectRef,

    /// URL of the stored object
    pub location: String,

    /// Bytes sent
    pub size_bytes: u64,

    /// ETag returned by the backend
    pub etag: Option<String>,

    /// Whether the upload went through the multipart API
    pub multipart: bool,
}

/// Observer notified as transfer bytes move
pub trait TransferProgress: Send + Sync {
    /// `transferred` is cumulative; `total` is known once the size is
    fn on_progress(&self, transferred: u64, total: Option<u64>);
}

/// Trait for S3-compatible storage operations
///
/// This trait is implemented by the S3 adapter and can be mocked for testing.
/// Every call is independent: implementations must not rely on state left
/// behind by an earlier call.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stream a local file to `target`, creating or overwriting it
    ///
    /// Fails with [`Error::Io`](crate::Error::Io) before any network request
    /// when `source` cannot be opened.
    async fn upload(&self, source: &Path, target: &ObjectRef) -> Result<UploadOutcome>;

    /// Stream `source` into a local file, returning bytes written
    ///
    /// The destination is created (or truncated) before the object is
    /// requested. A missing object is [`Error::NotFound`](crate::Error::NotFound).
    async fn download(&self, destination: &Path, source: &ObjectRef) -> Result<u64>;

    /// List every object in `bucket` whose key starts with `prefix`
    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectInfo>>;

    /// Delete `target` and wait until it is confirmed absent
    async fn delete(&self, target: &ObjectRef) -> Result<()>;
}
