//! Synchronous invocation of the presigner function.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_lambda::Client as AwsLambdaClient;
use aws_sdk_lambda::error::DisplayErrorContext;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;

use crate::core::models::{PresignRequest, PresignResponse};
use crate::errors::VmxError;

#[async_trait]
pub trait PresignInvoker: Send + Sync {
    /// Invokes `function_arn` with `request` and waits for its reply.
    async fn invoke_presigner(
        &self,
        function_arn: &str,
        request: &PresignRequest,
    ) -> Result<PresignResponse, VmxError>;
}

pub struct LambdaInvoker {
    client: AwsLambdaClient,
}

impl LambdaInvoker {
    #[must_use]
    pub fn new(shared: &SdkConfig) -> Self {
        Self {
            client: AwsLambdaClient::new(shared),
        }
    }
}

#[async_trait]
impl PresignInvoker for LambdaInvoker {
    async fn invoke_presigner(
        &self,
        function_arn: &str,
        request: &PresignRequest,
    ) -> Result<PresignResponse, VmxError> {
        let body = serde_json::to_vec(request)
            .map_err(|e| VmxError::PresignError(format!("serialize request: {e}")))?;

        let resp = self
            .client
            .invoke()
            .function_name(function_arn)
            .invocation_type(InvocationType::RequestResponse)
            .payload(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                VmxError::AwsError(format!("lambda invoke: {}", DisplayErrorContext(&e)))
            })?;

        if let Some(function_error) = resp.function_error() {
            return Err(VmxError::PresignError(format!(
                "presigner raised {function_error}"
            )));
        }

        let payload = resp
            .payload()
            .ok_or_else(|| VmxError::PresignError("presigner returned no payload".to_string()))?;

        serde_json::from_slice(payload.as_ref())
            .map_err(|e| VmxError::PresignError(format!("unreadable presigner reply: {e}")))
    }
}
