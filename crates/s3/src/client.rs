//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from s3cli-core.
//! No SDK client is kept between calls: each operation builds its own session
//! from the connection config.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::client::Waiters;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};
use aws_smithy_types::byte_stream::Length;
use jiff::Timestamp;
use tokio::io::AsyncWriteExt;

use s3cli_core::{
    ConnectionConfig, Error, ObjectInfo, ObjectRef, ObjectStore, Result, TransferProgress,
    UploadOutcome, require_bucket,
};

use crate::credentials::StaticCredentials;
use crate::location::object_location;
use crate::multipart::{TransferConfig, calculate_parts, part_byte_range};

/// S3 client wrapper
pub struct S3Client {
    config: ConnectionConfig,
    transfer: TransferConfig,
    progress: Option<Arc<dyn TransferProgress>>,
}

impl S3Client {
    /// Create a new S3 client from a connection config
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            transfer: TransferConfig::default(),
            progress: None,
        }
    }

    pub fn with_transfer_config(mut self, transfer: TransferConfig) -> Self {
        self.transfer = transfer;
        self
    }

    /// Report transfer progress to `progress`
    pub fn with_progress(mut self, progress: Arc<dyn TransferProgress>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Build a fresh SDK client from the connection config
    async fn session(&self) -> aws_sdk_s3::Client {
        tracing::debug!(
            endpoint = %self.config.endpoint,
            region = %self.config.region,
            force_path_style = self.config.force_path_style,
            "Building S3 session"
        );

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(StaticCredentials::from_config(&self.config))
            .region(aws_config::Region::new(self.config.region.clone()))
            .endpoint_url(&self.config.endpoint)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(self.config.force_path_style)
            .build();

        aws_sdk_s3::Client::from_conf(s3_config)
    }

    fn report(&self, transferred: u64, total: Option<u64>) {
        if let Some(progress) = &self.progress {
            progress.on_progress(transferred, total);
        }
    }

    async fn put_single(
        &self,
        client: &aws_sdk_s3::Client,
        file: tokio::fs::File,
        source: &Path,
        size: u64,
        target: &ObjectRef,
        content_type: &str,
    ) -> Result<(Option<String>, Option<String>)> {
        let body = ByteStream::read_from()
            .file(file)
            .build()
            .await
            .map_err(|e| Error::io(source, io::Error::other(e)))?;

        self.report(0, Some(size));
        let response = client
            .put_object()
            .bucket(&target.bucket)
            .key(&target.key)
            .content_type(content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| classify(e, target))?;
        self.report(size, Some(size));

        Ok((response.e_tag().map(trim_etag), None))
    }

    async fn put_multipart(
        &self,
        client: &aws_sdk_s3::Client,
        source: &Path,
        size: u64,
        target: &ObjectRef,
        content_type: &str,
    ) -> Result<(Option<String>, Option<String>)> {
        let created = client
            .create_multipart_upload()
            .bucket(&target.bucket)
            .key(&target.key)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| classify(e, target))?;

        let upload_id = created
            .upload_id()
            .ok_or_else(|| Error::Transfer(format!("No upload ID returned for {target}")))?
            .to_string();

        match self
            .upload_parts(client, source, size, target, &upload_id)
            .await
        {
            Ok(result) => Ok(result),
            Err(e) => {
                tracing::debug!(%upload_id, "Aborting multipart upload");
                if let Err(abort) = client
                    .abort_multipart_upload()
                    .bucket(&target.bucket)
                    .key(&target.key)
                    .upload_id(&upload_id)
                    .send()
                    .await
                {
                    tracing::warn!(
                        %upload_id,
                        "Failed to abort multipart upload: {}",
                        DisplayErrorContext(&abort)
                    );
                }
                Err(e)
            }
        }
    }

    async fn upload_parts(
        &self,
        client: &aws_sdk_s3::Client,
        source: &Path,
        size: u64,
        target: &ObjectRef,
        upload_id: &str,
    ) -> Result<(Option<String>, Option<String>)> {
        let part_size = self.transfer.calculate_part_size(size);
        let part_count = calculate_parts(size, part_size);
        tracing::debug!(part_size, part_count, "Starting multipart upload");

        let mut completed = Vec::with_capacity(part_count as usize);
        self.report(0, Some(size));

        for part_number in 1..=part_count as i32 {
            let (start, end) = part_byte_range(part_number, part_size, size);
            let body = ByteStream::read_from()
                .path(source)
                .offset(start)
                .length(Length::Exact(end - start))
                .build()
                .await
                .map_err(|e| Error::io(source, io::Error::other(e)))?;

            let response = client
                .upload_part()
                .bucket(&target.bucket)
                .key(&target.key)
                .upload_id(upload_id)
                .part_number(part_number)
                .body(body)
                .send()
                .await
                .map_err(|e| classify(e, target))?;

            completed.push(
                CompletedPart::builder()
                    .set_e_tag(response.e_tag().map(str::to_string))
                    .part_number(part_number)
                    .build(),
            );
            self.report(end, Some(size));
        }

        let response = client
            .complete_multipart_upload()
            .bucket(&target.bucket)
            .key(&target.key)
            .upload_id(upload_id)
            .multipart_upload(
                CompletedMultipartUpload::builder()
                    .set_parts(Some(completed))
                    .build(),
            )
            .send()
            .await
            .map_err(|e| classify(e, target))?;

        Ok((
            response.e_tag().map(trim_etag),
            response.location().map(str::to_string),
        ))
    }

    async fn fetch_into(
        &self,
        mut file: tokio::fs::File,
        destination: &Path,
        source: &ObjectRef,
    ) -> Result<u64> {
        let client = self.session().await;
        let response = client
            .get_object()
            .bucket(&source.bucket)
            .key(&source.key)
            .send()
            .await
            .map_err(|e| classify(e, source))?;

        let total = response.content_length().map(|n| n.max(0) as u64);
        let mut body = response.body;
        let mut written = 0u64;
        self.report(0, total);

        while let Some(chunk) = body
            .try_next()
            .await
            .map_err(|e| Error::Transfer(format!("Failed to read {source}: {e}")))?
        {
            file.write_all(&chunk)
                .await
                .map_err(|e| Error::io(destination, e))?;
            written += chunk.len() as u64;
            self.report(written, total);
        }

        file.flush().await.map_err(|e| Error::io(destination, e))?;
        Ok(written)
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn upload(&self, source: &Path, target: &ObjectRef) -> Result<UploadOutcome> {
        let file = tokio::fs::File::open(source)
            .await
            .map_err(|e| Error::io(source, e))?;
        let metadata = file.metadata().await.map_err(|e| Error::io(source, e))?;
        if metadata.is_dir() {
            return Err(Error::io(
                source,
                io::Error::new(io::ErrorKind::InvalidInput, "source is a directory"),
            ));
        }

        let size = metadata.len();
        let content_type = mime_guess::from_path(source)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        let multipart = self.transfer.use_multipart(size);

        let client = self.session().await;
        let (etag, server_location) = if multipart {
            drop(file);
            self.put_multipart(&client, source, size, target, &content_type)
                .await?
        } else {
            self.put_single(&client, file, source, size, target, &content_type)
                .await?
        };

        let location = server_location.unwrap_or_else(|| {
            object_location(
                &self.config.endpoint,
                &target.bucket,
                &target.key,
                self.config.force_path_style,
            )
        });
        tracing::info!(%location, size, multipart, "File uploaded");

        Ok(UploadOutcome {
            object: target.clone(),
            location,
            size_bytes: size,
            etag,
            multipart,
        })
    }

    async fn download(&self, destination: &Path, source: &ObjectRef) -> Result<u64> {
        let file = tokio::fs::File::create(destination)
            .await
            .map_err(|e| Error::io(destination, e))?;

        match self.fetch_into(file, destination, source).await {
            Ok(written) => {
                tracing::info!(object = %source, bytes = written, "File downloaded");
                Ok(written)
            }
            Err(e) => {
                // Do not leave a truncated destination behind
                if let Err(remove) = tokio::fs::remove_file(destination).await {
                    tracing::warn!(
                        path = %destination.display(),
                        "Failed to remove partial download: {remove}"
                    );
                }
                Err(e)
            }
        }
    }

    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectInfo>> {
        let bucket = require_bucket(bucket)?;
        let client = self.session().await;

        let mut items = Vec::new();
        let mut continuation_token: Option<String> = None;

        // Paginate through all results
        loop {
            let mut request = client.list_objects_v2().bucket(&bucket).prefix(prefix);
            if let Some(token) = &continuation_token {
                request = request.continuation_token(token);
            }

            let response = request
                .send()
                .await
                .map_err(|e| classify(e, format!("bucket {bucket}")))?;

            for object in response.contents() {
                let mut info = ObjectInfo::new(
                    object.key().unwrap_or_default(),
                    object.size().unwrap_or(0),
                );
                if let Some(modified) = object.last_modified().and_then(to_timestamp) {
                    info = info.with_last_modified(modified);
                }
                if let Some(sc) = object.storage_class() {
                    info = info.with_storage_class(sc.as_str());
                }
                items.push(info);
            }

            match (response.is_truncated(), response.next_continuation_token()) {
                (Some(true), Some(token)) => continuation_token = Some(token.to_string()),
                _ => break,
            }
        }

        tracing::debug!(%bucket, prefix, count = items.len(), "Listed objects");
        Ok(items)
    }

    async fn delete(&self, target: &ObjectRef) -> Result<()> {
        let client = self.session().await;
        let delete_error = |message: String| Error::Delete {
            bucket: target.bucket.clone(),
            key: target.key.clone(),
            message,
        };

        client
            .delete_object()
            .bucket(&target.bucket)
            .key(&target.key)
            .send()
            .await
            .map_err(|e| delete_error(DisplayErrorContext(&e).to_string()))?;

        client
            .wait_until_object_not_exists()
            .bucket(&target.bucket)
            .key(&target.key)
            .wait(self.transfer.delete_wait)
            .await
            .map_err(|e| {
                delete_error(format!(
                    "object still present after delete: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        tracing::info!(key = %target.key, "Object successfully deleted");
        Ok(())
    }
}

/// Map an SDK failure onto the error kinds the CLI reports
fn classify<E>(err: SdkError<E>, subject: impl std::fmt::Display) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let status = err.raw_response().map(|r| r.status().as_u16());
    let code = err.code().map(str::to_string);

    match (status, code.as_deref()) {
        (Some(404), _) | (_, Some("NoSuchKey" | "NoSuchBucket" | "NotFound")) => {
            Error::NotFound(subject.to_string())
        }
        (Some(403), _)
        | (_, Some("AccessDenied" | "InvalidAccessKeyId" | "SignatureDoesNotMatch")) => {
            Error::Auth(DisplayErrorContext(&err).to_string())
        }
        _ => Error::Transfer(DisplayErrorContext(&err).to_string()),
    }
}

fn to_timestamp(dt: &aws_smithy_types::DateTime) -> Option<Timestamp> {
    Timestamp::new(dt.secs(), dt.subsec_nanos() as i32).ok()
}

fn trim_etag(etag: &str) -> String {
    etag.trim_matches('"').to_string()
}
