//! s3cli-s3: S3 SDK adapter for the s3cli client
//!
//! This crate provides the implementation of the ObjectStore trait
//! using the aws-sdk-s3 crate. It is the only crate that directly
//! depends on the AWS SDK.

pub mod client;
pub mod credentials;
pub mod location;
pub mod multipart;

pub use client::S3Client;
pub use credentials::StaticCredentials;
pub use multipart::TransferConfig;
