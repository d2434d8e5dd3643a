//! Configuration management
//!
//! Connection settings come from three layers: command-line flags (or their
//! environment variables), an optional YAML file (default `~/.s3cli.yaml`),
//! and built-in defaults. The first layer that sets a value wins.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Placeholder value of unset string flags
pub const SENTINEL: &str = "none";

/// Default region when none is configured
pub const DEFAULT_REGION: &str = "us-east-1";

/// File name of the config file in the home directory
pub const CONFIG_FILE_NAME: &str = ".s3cli.yaml";

/// Resolved connection parameters for one S3-compatible endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Access key ID
    pub access_key: String,

    /// Secret access key
    pub secret_key: String,

    /// S3 endpoint URL
    pub endpoint: String,

    /// Region used for request signing
    pub region: String,

    /// Bucket all commands operate on
    pub bucket: String,

    /// Address buckets as `endpoint/bucket` instead of `bucket.endpoint`
    pub force_path_style: bool,
}

impl ConnectionConfig {
    /// Create a connection config with explicit values
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            endpoint: endpoint.into(),
            region: DEFAULT_REGION.to_string(),
            bucket: bucket.into(),
            force_path_style: false,
        }
    }

    pub fn with_force_path_style(mut self, force: bool) -> Self {
        self.force_path_style = force;
        self
    }

    /// Merge flag/environment values over the config file and defaults
    pub fn resolve(overrides: ConnectionOverrides, file: ConfigFile) -> Self {
        Self {
            access_key: overrides
                .access_key
                .or(file.accesskey)
                .unwrap_or_else(|| SENTINEL.to_string()),
            secret_key: overrides
                .secret_key
                .or(file.privatekey)
                .unwrap_or_else(|| SENTINEL.to_string()),
            endpoint: overrides
                .endpoint
                .or(file.endpoint)
                .unwrap_or_else(|| SENTINEL.to_string()),
            region: overrides
                .region
                .or(file.region)
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            bucket: overrides.bucket.or(file.bucket).unwrap_or_default(),
            force_path_style: overrides
                .force_path_style
                .or(file.forcepath)
                .unwrap_or(false),
        }
    }
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("force_path_style", &self.force_path_style)
            .finish()
    }
}

/// Values given on the command line or through environment variables
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub endpoint: Option<String>,
    pub region: Option<String>,
    pub bucket: Option<String>,
    pub force_path_style: Option<bool>,
}

/// Contents of the YAML config file
///
/// Keys match the global flag names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub accesskey: Option<String>,
    #[serde(default)]
    pub privatekey: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub forcepath: Option<bool>,
}

/// Locates and loads the config file
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
    explicit: bool,
}

impl ConfigManager {
    /// Create a ConfigManager pointing at `~/.s3cli.yaml`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".into()))?;
        Ok(Self {
            config_path: home.join(CONFIG_FILE_NAME),
            explicit: false,
        })
    }

    /// Create a ConfigManager for a file named on the command line
    ///
    /// Unlike the default location, an explicit file must exist.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            explicit: true,
        }
    }

    /// Load the config file
    ///
    /// A missing default file yields an empty configuration.
    pub fn load(&self) -> Result<ConfigFile> {
        if !self.config_path.exists() {
            if self.explicit {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    self.config_path.display()
                )));
            }
            return Ok(ConfigFile::default());
        }

        let content = std::fs::read_to_string(&self.config_path).map_err(|e| {
            Error::Config(format!(
                "Cannot read config file {}: {e}",
                self.config_path.display()
            ))
        })?;
        tracing::debug!(path = %self.config_path.display(), "Using config file");

        if content.trim().is_empty() {
            return Ok(ConfigFile::default());
        }

        serde_yaml::from_str(&content).map_err(|source| Error::ConfigFile {
            path: self.config_path.clone(),
            source,
        })
    }
}
