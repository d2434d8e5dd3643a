//! download command - Download an object
//!
//! Streams one object from the configured bucket into a local file.

use std::path::Path;
use std::sync::Arc;

use clap::Args;
use s3cli_core::{ObjectRef, ObjectStore, Result, SENTINEL, require_path};
use s3cli_s3::S3Client;
use serde::Serialize;

use super::{ConnectionArgs, report_error};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, ProgressBar};

/// Download an object
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Local file to write
    #[arg(long, default_value = SENTINEL)]
    pub outfile: String,

    /// Key of the object to download
    #[arg(long, default_value = SENTINEL)]
    pub s3path: String,
}

#[derive(Debug, Serialize)]
struct DownloadOutput {
    status: &'static str,
    source: String,
    target: String,
    size_bytes: u64,
    size_human: String,
}

/// Execute the download command
pub async fn execute(
    args: DownloadArgs,
    connection: &ConnectionArgs,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config.clone());

    let config = match connection.resolve() {
        Ok(config) => config,
        Err(e) => return report_error(&formatter, &e),
    };

    let progress = Arc::new(ProgressBar::new(&output_config, 0));
    let client = S3Client::new(config.clone()).with_progress(progress.clone());
    let result = run(&args, &config.bucket, &client).await;
    progress.finish_and_clear();

    match result {
        Ok(output) => {
            if formatter.is_json() {
                formatter.json(&output);
            } else {
                formatter.success(&format!(
                    "{} -> {} ({} bytes)",
                    output.source, output.target, output.size_bytes
                ));
            }
            ExitCode::Success
        }
        Err(e) => report_error(&formatter, &e),
    }
}

async fn run(args: &DownloadArgs, bucket: &str, store: &dyn ObjectStore) -> Result<DownloadOutput> {
    let outfile = require_path("outfile", &args.outfile)?;
    let s3path = require_path("s3path", &args.s3path)?;
    let source = ObjectRef::new(bucket, s3path)?;

    let written = store.download(Path::new(outfile), &source).await?;

    Ok(DownloadOutput {
        status: "success",
        source: source.to_string(),
        target: outfile.to_string(),
        size_bytes: written,
        size_human: humansize::format_size(written, humansize::BINARY),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::MockStore;
    use s3cli_core::Error;

    fn args(outfile: &str, s3path: &str) -> DownloadArgs {
        DownloadArgs {
            outfile: outfile.to_string(),
            s3path: s3path.to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_outfile_never_reaches_store() {
        let store = MockStore::new();

        let err = run(&args("none", "a.txt"), "data", &store)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: --outfile must be specified");
        assert_eq!(ExitCode::from(&err), ExitCode::UsageError);
    }

    #[tokio::test]
    async fn test_missing_s3path_never_reaches_store() {
        let store = MockStore::new();

        let err = run(&args("out.txt", "none"), "data", &store)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: --s3path must be specified");
    }

    #[tokio::test]
    async fn test_download_reports_bytes() {
        let mut store = MockStore::new();
        store
            .expect_download()
            .withf(|destination, source| {
                destination == Path::new("out/a.txt") && source.key == "dir/a.txt"
            })
            .times(1)
            .returning(|_, _| Ok(3 * 1024 * 1024));

        let output = run(&args("out/a.txt", "dir/a.txt"), "data", &store)
            .await
            .unwrap();

        insta::assert_json_snapshot!(output, @r#"
        {
          "status": "success",
          "source": "data/dir/a.txt",
          "target": "out/a.txt",
          "size_bytes": 3145728,
          "size_human": "3 MiB"
        }
        "#);
    }

    #[tokio::test]
    async fn test_download_missing_object() {
        let mut store = MockStore::new();
        store
            .expect_download()
            .returning(|_, source| Err(Error::NotFound(source.to_string())));

        let err = run(&args("out.txt", "gone.txt"), "data", &store)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Not found: data/gone.txt");
        assert_eq!(ExitCode::from(&err), ExitCode::NotFound);
    }
}
