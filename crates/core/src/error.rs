//! Error types for s3cli-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for s3cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for s3cli operations
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid configuration (flags, environment, config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local file could not be opened, created, read or written
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML config file could not be parsed
    #[error("Invalid config file {}: {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Object or bucket does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credentials rejected or permission denied
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Upload, download or list failure reported by the SDK
    #[error("Transfer failed: {0}")]
    Transfer(String),

    /// Delete request failed or the object never disappeared
    #[error("Unable to delete object {key:?} from bucket {bucket:?}: {message}")]
    Delete {
        bucket: String,
        key: String,
        message: String,
    },
}

impl Error {
    /// Wrap an IO error together with the path it happened on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::ConfigFile { .. } => 2, // UsageError
            Error::Transfer(_) => 3,                          // NetworkError
            Error::Auth(_) => 4,                              // AuthError
            Error::NotFound(_) => 5,                          // NotFound
            Error::Io { .. } | Error::Delete { .. } => 1,     // GeneralError
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(Error::Config("test".into()).exit_code(), 2);
        assert_eq!(Error::Transfer("test".into()).exit_code(), 3);
        assert_eq!(Error::Auth("test".into()).exit_code(), 4);
        assert_eq!(Error::NotFound("test".into()).exit_code(), 5);
        assert_eq!(
            Error::io("a.txt", std::io::Error::from(std::io::ErrorKind::NotFound)).exit_code(),
            1
        );
        assert_eq!(
            Error::Delete {
                bucket: "b".into(),
                key: "k".into(),
                message: "boom".into(),
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_config_file_is_usage_error() {
        let source = serde_yaml::from_str::<u32>("not: a number").unwrap_err();
        let err = Error::ConfigFile {
            path: "/home/u/.s3cli.yaml".into(),
            source,
        };
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().starts_with("Invalid config file /home/u/.s3cli.yaml"));
    }

    #[test]
    fn test_error_display() {
        let err = Error::NotFound("bucket/missing.txt".into());
        assert_eq!(err.to_string(), "Not found: bucket/missing.txt");

        let err = Error::Delete {
            bucket: "data".into(),
            key: "dir/a.txt".into(),
            message: "AccessDenied".into(),
        };
        assert_eq!(
            err.to_string(),
            r#"Unable to delete object "dir/a.txt" from bucket "data": AccessDenied"#
        );
    }

    #[test]
    fn test_io_error_names_path() {
        let err = Error::io(
            "/tmp/missing.bin",
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.bin"));
        assert!(msg.contains("No such file or directory"));
    }
}
