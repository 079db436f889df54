use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_transcribe::Client as AwsTranscribeClient;
use aws_sdk_transcribe::error::DisplayErrorContext;

use crate::errors::VmxError;

#[async_trait]
pub trait TranscriptionJobs: Send + Sync {
    async fn delete_job(&self, job_name: &str) -> Result<(), VmxError>;
}

pub struct TranscribeClient {
    client: AwsTranscribeClient,
}

impl TranscribeClient {
    #[must_use]
    pub fn new(shared: &SdkConfig) -> Self {
        Self {
            client: AwsTranscribeClient::new(shared),
        }
    }
}

#[async_trait]
impl TranscriptionJobs for TranscribeClient {
    async fn delete_job(&self, job_name: &str) -> Result<(), VmxError> {
        self.client
            .delete_transcription_job()
            .transcription_job_name(job_name)
            .send()
            .await
            .map_err(|e| {
                VmxError::AwsError(format!(
                    "transcribe delete_transcription_job {job_name}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }
}
