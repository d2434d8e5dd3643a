//! list command - List objects
//!
//! Lists every object in the configured bucket whose key starts with a prefix.

use clap::Args;
use s3cli_core::{ObjectInfo, ObjectStore, Result};
use s3cli_s3::S3Client;
use serde::Serialize;

use super::{ConnectionArgs, report_error};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// RFC 822 date layout with a two-digit year
const DATE_FORMAT: &str = "%d %b %y %H:%M UTC";

/// List objects
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Key prefix to filter by (empty lists the whole bucket)
    #[arg(long, default_value = "")]
    pub s3prefix: String,
}

/// Output structure for list command (JSON format)
#[derive(Debug, Serialize)]
struct ListOutput {
    items: Vec<ObjectInfo>,
    total: usize,
}

/// Execute the list command
pub async fn execute(
    args: ListArgs,
    connection: &ConnectionArgs,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let config = match connection.resolve() {
        Ok(config) => config,
        Err(e) => return report_error(&formatter, &e),
    };

    let client = S3Client::new(config.clone());
    match run(&args, &config.bucket, &client).await {
        Ok(items) => {
            if formatter.is_json() {
                let total = items.len();
                formatter.json(&ListOutput { items, total });
            } else {
                for item in &items {
                    formatter.println(&format_line(item));
                }
            }
            ExitCode::Success
        }
        Err(e) => report_error(&formatter, &e),
    }
}

async fn run(args: &ListArgs, bucket: &str, store: &dyn ObjectStore) -> Result<Vec<ObjectInfo>> {
    store.list(bucket, &args.s3prefix).await
}

/// One human-readable line: date, size in bytes and key, tab separated
fn format_line(item: &ObjectInfo) -> String {
    let date = item
        .last_modified
        .map(|ts| ts.strftime(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string());
    format!("{date}\t{}\t{}", item.size_bytes, item.key)
}
