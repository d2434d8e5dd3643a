//! Static credential provider
//!
//! Hands the configured key pair to the SDK session. The credentials carry no
//! session token and never expire, so the SDK never asks for a refresh.

use aws_credential_types::Credentials;
use aws_credential_types::provider::{self, ProvideCredentials, future};

use s3cli_core::ConnectionConfig;

/// Provider name reported to the SDK
const PROVIDER_NAME: &str = "s3cli-static-credentials";

/// Access key / secret key pair taken from the connection config
#[derive(Clone)]
pub struct StaticCredentials {
    access_key: String,
    secret_key: String,
}

impl StaticCredentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn from_config(config: &ConnectionConfig) -> Self {
        Self::new(&config.access_key, &config.secret_key)
    }

    fn credentials(&self) -> provider::Result {
        Ok(Credentials::new(
            &self.access_key,
            &self.secret_key,
            None,
            None,
            PROVIDER_NAME,
        ))
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl ProvideCredentials for StaticCredentials {
    fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
    where
        Self: 'a,
    {
        future::ProvideCredentials::ready(self.credentials())
    }
}
