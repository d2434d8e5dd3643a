//! s3cli-core: Core library for the s3cli object storage client
//!
//! This crate provides the core functionality for the s3cli CLI, including:
//! - Connection configuration and the YAML config file
//! - Object references and path flag validation
//! - ObjectStore trait for the four storage operations
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing the commands to be tested against mock stores.

pub mod config;
pub mod error;
pub mod path;
pub mod traits;

pub use config::{ConfigFile, ConfigManager, ConnectionConfig, ConnectionOverrides, SENTINEL};
pub use error::{Error, Result};
pub use path::{ObjectRef, is_unset, require_bucket, require_path};
pub use traits::{ObjectInfo, ObjectStore, TransferProgress, UploadOutcome};
