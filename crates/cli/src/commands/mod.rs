//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations.
//! Each storage command validates its flags, builds an S3 client from the
//! resolved connection config and runs exactly one operation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use s3cli_core::{ConfigManager, ConnectionConfig, ConnectionOverrides, Error, Result};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod completions;
mod delete;
mod download;
mod list;
mod upload;

/// s3cli - a small S3 client
///
/// Upload, download, list and delete objects in one bucket of an
/// S3-compatible object store.
#[derive(Parser, Debug)]
#[command(name = "s3cli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress bar
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection flags shared by every storage command
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// S3 access key ID
    #[arg(long, global = true, env = "S3CLI_ACCESSKEY")]
    pub accesskey: Option<String>,

    /// S3 secret access key
    #[arg(long, global = true, env = "S3CLI_PRIVATEKEY", hide_env_values = true)]
    pub privatekey: Option<String>,

    /// S3 endpoint URL
    #[arg(long, global = true, env = "S3CLI_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Region used for request signing
    #[arg(long, global = true, env = "S3CLI_REGION")]
    pub region: Option<String>,

    /// Bucket to operate on
    #[arg(long, global = true, env = "S3CLI_BUCKET")]
    pub bucket: Option<String>,

    /// Use path-style addressing (endpoint/bucket/key)
    #[arg(
        long,
        global = true,
        env = "S3CLI_FORCEPATH",
        num_args = 0..=1,
        default_missing_value = "true",
        require_equals = true
    )]
    pub forcepath: Option<bool>,

    /// Config file (default: ~/.s3cli.yaml)
    #[arg(long, global = true, env = "S3CLI_CONFIG")]
    pub config: Option<PathBuf>,
}

impl ConnectionArgs {
    fn overrides(&self) -> ConnectionOverrides {
        ConnectionOverrides {
            access_key: self.accesskey.clone(),
            secret_key: self.privatekey.clone(),
            endpoint: self.endpoint.clone(),
            region: self.region.clone(),
            bucket: self.bucket.clone(),
            force_path_style: self.forcepath,
        }
    }

    /// Merge these flags with the config file and defaults
    pub fn resolve(&self) -> Result<ConnectionConfig> {
        let manager = match &self.config {
            Some(path) => ConfigManager::with_path(path.clone()),
            None => ConfigManager::new()?,
        };
        let file = manager.load()?;
        let config = ConnectionConfig::resolve(self.overrides(), file);
        tracing::debug!(?config, "Resolved connection config");
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a local file to the bucket
    Upload(upload::UploadArgs),

    /// Download an object to a local file
    Download(download::DownloadArgs),

    /// List objects under a prefix
    List(list::ListArgs),

    /// Delete an object
    Delete(delete::DeleteArgs),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Upload(args) => upload::execute(args, &cli.connection, output_config).await,
        Commands::Download(args) => {
            download::execute(args, &cli.connection, output_config).await
        }
        Commands::List(args) => list::execute(args, &cli.connection, output_config).await,
        Commands::Delete(args) => delete::execute(args, &cli.connection, output_config).await,
        Commands::Completions(args) => completions::execute(args),
    }
}

/// Print an error and map it to its exit code
pub(crate) fn report_error(formatter: &Formatter, err: &Error) -> ExitCode {
    formatter.error(&err.to_string());
    ExitCode::from(err)
}
