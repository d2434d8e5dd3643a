//! upload command - Upload a local file
//!
//! Streams one local file to a key in the configured bucket.

use std::path::Path;
use std::sync::Arc;

use clap::Args;
use s3cli_core::{ObjectRef, ObjectStore, Result, SENTINEL, UploadOutcome, require_path};
use s3cli_s3::S3Client;
use serde::Serialize;

use super::{ConnectionArgs, report_error};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, ProgressBar};

/// Upload a local file
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Local file to upload
    #[arg(long, default_value = SENTINEL)]
    pub infile: String,

    /// Destination key in the bucket
    #[arg(long, default_value = SENTINEL)]
    pub s3path: String,
}

#[derive(Debug, Serialize)]
struct UploadOutput {
    status: &'static str,
    source: String,
    target: String,
    location: String,
    size_bytes: u64,
    size_human: String,
    multipart: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    etag: Option<String>,
}

impl UploadOutput {
    fn new(source: &str, outcome: UploadOutcome) -> Self {
        Self {
            status: "success",
            source: source.to_string(),
            target: outcome.object.to_string(),
            location: outcome.location,
            size_bytes: outcome.size_bytes,
            size_human: humansize::format_size(outcome.size_bytes, humansize::BINARY),
            multipart: outcome.multipart,
            etag: outcome.etag,
        }
    }
}

/// Execute the upload command
pub async fn execute(
    args: UploadArgs,
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
        Ok(outcome) => {
            let output = UploadOutput::new(&args.infile, outcome);
            if formatter.is_json() {
                formatter.json(&output);
            } else {
                formatter.success(&format!(
                    "{} -> {} ({})",
                    output.source, output.location, output.size_human
                ));
            }
            ExitCode::Success
        }
        Err(e) => report_error(&formatter, &e),
    }
}

async fn run(args: &UploadArgs, bucket: &str, store: &dyn ObjectStore) -> Result<UploadOutcome> {
    let infile = require_path("infile", &args.infile)?;
    let s3path = require_path("s3path", &args.s3path)?;
    let target = ObjectRef::new(bucket, s3path)?;

    store.upload(Path::new(infile), &target).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::MockStore;
    use s3cli_core::Error;

    fn args(infile: &str, s3path: &str) -> UploadArgs {
        UploadArgs {
            infile: infile.to_string(),
            s3path: s3path.to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_infile_never_reaches_store() {
        // No expectations: any store call would panic
        let store = MockStore::new();

        let err = run(&args("none", "dir/a.txt"), "data", &store)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Configuration error: --infile must be specified");
        assert_eq!(ExitCode::from(&err), ExitCode::UsageError);
    }

    #[tokio::test]
    async fn test_missing_s3path_never_reaches_store() {
        let store = MockStore::new();

        let err = run(&args("a.txt", ""), "data", &store).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_missing_bucket_never_reaches_store() {
        let store = MockStore::new();

        let err = run(&args("a.txt", "a.txt"), "", &store).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_upload_passes_paths_through() {
        let mut store = MockStore::new();
        store
            .expect_upload()
            .withf(|source, target| {
                source == Path::new("a.txt") && target.bucket == "data" && target.key == "dir/a.txt"
            })
            .times(1)
            .returning(|_, target| {
                Ok(UploadOutcome {
                    object: target.clone(),
                    location: "http://localhost:9000/data/dir/a.txt".into(),
                    size_bytes: 11,
                    etag: None,
                    multipart: false,
                })
            });

        let outcome = run(&args("a.txt", "dir/a.txt"), "data", &store)
            .await
            .unwrap();
        assert_eq!(outcome.location, "http://localhost:9000/data/dir/a.txt");
        assert_eq!(outcome.size_bytes, 11);
    }

    #[tokio::test]
    async fn test_upload_error_keeps_its_kind() {
        let mut store = MockStore::new();
        store.expect_upload().returning(|source, _| {
            Err(Error::io(
                source,
                std::io::Error::from(std::io::ErrorKind::NotFound),
            ))
        });

        let err = run(&args("missing.txt", "a.txt"), "data", &store)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(ExitCode::from(&err), ExitCode::GeneralError);
    }

    #[test]
    fn test_upload_json_output() {
        let outcome = UploadOutcome {
            object: ObjectRef::new("data", "dir/a.txt").unwrap(),
            location: "http://localhost:9000/data/dir/a.txt".into(),
            size_bytes: 2048,
            etag: Some("9b2cf535f27731c974343645a3985328".into()),
            multipart: false,
        };

        insta::assert_json_snapshot!(UploadOutput::new("a.txt", outcome), @r#"
        {
          "status": "success",
          "source": "a.txt",
          "target": "data/dir/a.txt",
          "location": "http://localhost:9000/data/dir/a.txt",
          "size_bytes": 2048,
          "size_human": "2 KiB",
          "multipart": false,
          "etag": "9b2cf535f27731c974343645a3985328"
        }
        "#);
    }
}
