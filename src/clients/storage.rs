//! S3 access for recordings and transcripts.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::error::DisplayErrorContext;
use std::collections::HashMap;

use crate::errors::VmxError;

#[async_trait]
pub trait RecordingStore: Send + Sync {
    /// Tag set of one object as a key → value map.
    async fn object_tags(&self, bucket: &str, key: &str)
    -> Result<HashMap<String, String>, VmxError>;

    /// Full body of one object decoded as UTF-8.
    async fn object_text(&self, bucket: &str, key: &str) -> Result<String, VmxError>;
}

pub struct S3Store {
    client: S3Client,
}

impl S3Store {
    #[must_use]
    pub fn new(shared: &SdkConfig) -> Self {
        Self {
            client: S3Client::new(shared),
        }
    }
}

#[async_trait]
impl RecordingStore for S3Store {
    async fn object_tags(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<HashMap<String, String>, VmxError> {
        let resp = self
            .client
            .get_object_tagging()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                VmxError::AwsError(format!(
                    "s3 get_object_tagging {bucket}/{key}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(resp
            .tag_set()
            .iter()
            .map(|tag| (tag.key().to_string(), tag.value().to_string()))
            .collect())
    }

    async fn object_text(&self, bucket: &str, key: &str) -> Result<String, VmxError> {
        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                VmxError::AwsError(format!(
                    "s3 get_object {bucket}/{key}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let bytes = resp
            .body
            .collect()
            .await
            .map_err(|e| VmxError::AwsError(format!("s3 body read {bucket}/{key}: {e}")))?
            .into_bytes();

        String::from_utf8(bytes.to_vec())
            .map_err(|e| VmxError::AwsError(format!("s3 object {bucket}/{key} is not UTF-8: {e}")))
    }
}
