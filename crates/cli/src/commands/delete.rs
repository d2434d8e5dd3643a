//! delete command - Delete an object
//!
//! Deletes one object and waits until the backend confirms it is gone.

use std::time::Duration;

use clap::Args;
use s3cli_core::{ObjectRef, ObjectStore, Result, SENTINEL, require_path};
use s3cli_s3::multipart::DEFAULT_DELETE_WAIT;
use s3cli_s3::{S3Client, TransferConfig};
use serde::Serialize;

use super::{ConnectionArgs, report_error};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, ProgressBar};

/// Delete an object
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Key of the object to delete
    #[arg(long, default_value = SENTINEL)]
    pub s3path: String,

    /// Seconds to wait for the object to disappear after the delete request
    #[arg(long, default_value_t = DEFAULT_DELETE_WAIT.as_secs(), value_name = "SECONDS")]
    pub wait: u64,
}

#[derive(Debug, Serialize)]
struct DeleteOutput {
    status: &'static str,
    bucket: String,
    key: String,
}

/// Execute the delete command
pub async fn execute(
    args: DeleteArgs,
    connection: &ConnectionArgs,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config.clone());

    let config = match connection.resolve() {
        Ok(config) => config,
        Err(e) => return report_error(&formatter, &e),
    };

    let spinner = ProgressBar::spinner(&output_config, &format!("Deleting {}", args.s3path));
    let client = S3Client::new(config.clone())
        .with_transfer_config(TransferConfig::new().delete_wait(Duration::from_secs(args.wait)));
    let result = run(&args, &config.bucket, &client).await;
    spinner.finish_and_clear();

    match result {
        Ok(output) => {
            if formatter.is_json() {
                formatter.json(&output);
            } else {
                formatter.success(&format!("Removed {}/{}", output.bucket, output.key));
            }
            ExitCode::Success
        }
        Err(e) => report_error(&formatter, &e),
    }
}

async fn run(args: &DeleteArgs, bucket: &str, store: &dyn ObjectStore) -> Result<DeleteOutput> {
    let s3path = require_path("s3path", &args.s3path)?;
    let target = ObjectRef::new(bucket, s3path)?;

    store.delete(&target).await?;

    Ok(DeleteOutput {
        status: "success",
        bucket: target.bucket,
        key: target.key,
    })
}
