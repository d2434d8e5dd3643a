//! Object references and path flag validation
//!
//! Keys are opaque slash-separated strings; the only check made here is that
//! neither the bucket nor the key is empty.

use crate::config::SENTINEL;
use crate::error::{Error, Result};

/// A bucket plus object key identifying one stored object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Bucket name
    pub bucket: String,
    /// Object key
    pub key: String,
}

impl ObjectRef {
    /// Create a new ObjectRef, rejecting an empty bucket or key
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        let bucket = require_bucket(bucket)?;
        let key = key.into();
        if key.is_empty() {
            return Err(Error::Config("Object key cannot be empty".into()));
        }
        Ok(Self { bucket, key })
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// Check that a bucket name was configured
pub fn require_bucket(bucket: impl Into<String>) -> Result<String> {
    let bucket = bucket.into();
    if bucket.is_empty() {
        return Err(Error::Config(
            "A bucket must be specified (--bucket, S3CLI_BUCKET or config file)".into(),
        ));
    }
    Ok(bucket)
}

/// Whether a flag value is unset: empty or the `none` placeholder
pub fn is_unset(value: &str) -> bool {
    value.is_empty() || value == SENTINEL
}

/// Check that a required path flag was given a real value
pub fn require_path<'a>(flag: &str, value: &'a str) -> Result<&'a str> {
    if is_unset(value) {
        return Err(Error::Config(format!("--{flag} must be specified")));
    }
    Ok(value)
}
