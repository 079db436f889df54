#![allow(clippy::missing_errors_doc)]
use lambda_runtime::{Error, LambdaEvent};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::clients::PresignerClients;
use crate::clients::secrets::SecretBundle;
use crate::core::config::PresignerConfig;
use crate::core::models::{PresignRequest, PresignResponse};
use crate::errors::VmxError;

pub use self::function_handler as handler;

/// Lambda handler for the presigner. Failures are reported in the response
/// body, never as a runtime error.
#[tracing::instrument(level = "info", skip(event, clients))]
pub async fn function_handler(
    event: LambdaEvent<Value>,
    clients: &PresignerClients,
) -> Result<PresignResponse, Error> {
    debug!("Presigner received event: {:?}", event.payload);

    let response = match PresignerConfig::from_env() {
        Ok(config) => issue_url(&event.payload, &config, clients).await,
        Err(e) => {
            error!("Config error: {}", e);
            PresignResponse::fail(failure_detail(&e))
        }
    };

    Ok(response)
}

/// Signs a GET URL for the recording named in `event`.
pub async fn issue_url(
    event: &Value,
    config: &PresignerConfig,
    clients: &PresignerClients,
) -> PresignResponse {
    match presign(event, config, clients).await {
        Ok(url) => {
            info!("Issued presigned URL");
            PresignResponse::success(url)
        }
        Err(e) => {
            error!("{}", e);
            let response = PresignResponse::fail(failure_detail(&e));
            debug!("{:?}", response);
            response
        }
    }
}

/// `detail` reported for a presigner failure.
#[must_use]
pub fn failure_detail(error: &VmxError) -> &'static str {
    match error {
        VmxError::ConfigError(_) | VmxError::SecretError(_) => "key retrieval failed",
        VmxError::ClientInitError(_) => "s3 client init failed",
        _ => "presigned url generation failed",
    }
}

async fn presign(
    event: &Value,
    config: &PresignerConfig,
    clients: &PresignerClients,
) -> Result<String, VmxError> {
    let raw_secret = clients
        .secrets
        .secret_string(&config.secrets_key_id)
        .await
        .map_err(|e| VmxError::SecretError(e.to_string()))?;
    let keys = SecretBundle::parse(&raw_secret)?.key_pair()?;

    let request = PresignRequest::deserialize(event)
        .map_err(|e| VmxError::PresignError(format!("invalid request: {e}")))?;
    let expires_in = config.link_lifetime()?;
    debug!(
        "Signing {}/{} for {}s",
        request.recording_bucket,
        request.recording_key,
        expires_in.as_secs()
    );

    clients
        .signer
        .presign_get(
            &config.aws_region,
            &keys,
            &request.recording_bucket,
            &request.recording_key,
            expires_in,
        )
        .await
        .map_err(|e| match e {
            VmxError::PresignError(_) => e,
            other => VmxError::PresignError(other.to_string()),
        })
}
