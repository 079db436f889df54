//! Presigned S3 GET URLs signed with a dedicated IAM key pair.

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use std::fmt;
use std::time::Duration;

use crate::errors::VmxError;

/// Attempts per request for the scoped client, standard retry mode.
pub const SIGNER_MAX_ATTEMPTS: u32 = 10;

const CREDENTIALS_PROVIDER_NAME: &str = "vmx3-secret-bundle";

/// Static access key pair taken from the secret bundle.
#[derive(Clone)]
pub struct IamKeyPair {
    access_key_id: String,
    secret_access_key: String,
}

impl IamKeyPair {
    #[must_use]
    pub fn new(access_key_id: &str, secret_access_key: &str) -> Self {
        Self {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
        }
    }

    #[must_use]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }
}

impl fmt::Debug for IamKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IamKeyPair")
            .field("access_key_id", &"<redacted>")
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
pub trait UrlSigner: Send + Sync {
    /// Returns a GET URL for `bucket`/`key` valid for `expires_in`.
    async fn presign_get(
        &self,
        region: &str,
        keys: &IamKeyPair,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, VmxError>;
}

/// Builds a fresh S3 client per call, scoped to the supplied key pair.
pub struct S3UrlSigner;

impl S3UrlSigner {
    fn scoped_client(region: &str, keys: &IamKeyPair) -> S3Client {
        let credentials = Credentials::new(
            keys.access_key_id.clone(),
            keys.secret_access_key.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        );

        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .endpoint_url(regional_endpoint(region))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::standard().with_max_attempts(SIGNER_MAX_ATTEMPTS))
            .build();

        S3Client::from_conf(config)
    }
}

#[async_trait]
impl UrlSigner for S3UrlSigner {
    async fn presign_get(
        &self,
        region: &str,
        keys: &IamKeyPair,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, VmxError> {
        let client = Self::scoped_client(region, keys);

        // S3 caps SigV4 presigned URLs at seven days.
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| VmxError::PresignError(format!("presigning config: {e}")))?;

        let request = client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| {
                VmxError::PresignError(format!(
                    "presign get_object {bucket}/{key}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(request.uri().to_string())
    }
}

/// Regional S3 endpoint, so links are signed for the bucket's own region.
#[must_use]
pub fn regional_endpoint(region: &str) -> String {
    format!("https://s3.{region}.amazonaws.com")
}
