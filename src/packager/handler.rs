#![allow(clippy::missing_errors_doc)]
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, error, info};
use url::Url;

use super::attributes::{FLAG_ATTRIBUTE, VmxMode, VoicemailFields, collect_attributes};
use super::entity::{QueueArn, resolve_entity};
use super::keys::{derive_keys, event_object_key};
use super::task::write_task;
use super::transcript::first_transcript;
use crate::clients::PackagerClients;
use crate::core::config::PackagerConfig;
use crate::core::models::{
    PackagerResponse, PresignRequest, PresignStatus, TranscriptKeys, WriterPayload,
};
use crate::errors::VmxError;

pub use self::function_handler as handler;

pub const QUEUE_ARN_TAG: &str = "vmx3_queue_arn";

/// Lambda handler for the packager. Always answers with a [`PackagerResponse`].
#[tracing::instrument(level = "info", skip(event, clients))]
pub async fn function_handler(
    event: LambdaEvent<Value>,
    clients: &PackagerClients,
) -> Result<PackagerResponse, Error> {
    debug!("Packager received event: {:?}", event.payload);

    let response = match PackagerConfig::from_env() {
        Ok(config) => process_record(&event.payload, &config, clients).await,
        Err(e) => {
            error!("Config error: {}", e);
            PackagerResponse::failed(failure_message(&e))
        }
    };

    Ok(response)
}

/// Runs the whole pipeline for one transcription event.
pub async fn process_record(
    event: &Value,
    config: &PackagerConfig,
    clients: &PackagerClients,
) -> PackagerResponse {
    match package_voicemail(event, config, clients).await {
        Ok(record) => {
            cleanup(clients, &record).await;
            PackagerResponse::complete()
        }
        Err(e) => {
            error!("{}", e);
            let message = failure_message(&e);
            error!("Record Result: {}", message);
            PackagerResponse::failed(message)
        }
    }
}

/// Public result string for a fatal packager error.
#[must_use]
pub fn failure_message(error: &VmxError) -> &'static str {
    match error {
        VmxError::ExtractionError(_) => "Failed to extract keys",
        VmxError::PresignError(_) => "Failed to generate presigned URL",
        VmxError::TagError(_) => "Failed to extract tags",
        VmxError::TranscriptError(_) => "Failed to retrieve transcript",
        VmxError::InvalidModeError(_) => "Invalid mode selection",
        VmxError::TaskActivationError(_) => "Failed to activate task function",
        VmxError::WriteError(_) => "Record VM failed to write",
        _ => "Record failed to process",
    }
}

/// Identifiers the cleanup steps need once the voicemail is written.
struct WrittenRecord {
    transcript_job: String,
    instance_id: String,
    contact_id: String,
}

async fn package_voicemail(
    event: &Value,
    config: &PackagerConfig,
    clients: &PackagerClients,
) -> Result<WrittenRecord, VmxError> {
    let keys = derive_keys(event_object_key(event)?)?;
    info!(
        "Processing contact {} from transcript {}",
        keys.contact_id, keys.transcript_key
    );

    let presigned_url = fetch_presigned_url(clients, config, &keys).await?;

    let tags = clients
        .storage
        .object_tags(&config.recordings_bucket, &keys.recording_key)
        .await
        .map_err(|e| VmxError::TagError(e.to_string()))?;

    let document = clients
        .storage
        .object_text(&config.transcripts_bucket, &keys.transcript_key)
        .await
        .map_err(|e| VmxError::TranscriptError(e.to_string()))?;
    let transcript = first_transcript(&document)?;

    let queue_arn = tags
        .get(QUEUE_ARN_TAG)
        .ok_or_else(|| VmxError::TagError(format!("recording has no {QUEUE_ARN_TAG} tag")))?;
    let arn = QueueArn::parse(queue_arn)?;

    let entity = resolve_entity(clients.contacts.as_ref(), &arn).await;
    let json_attributes = collect_attributes(
        clients.contacts.as_ref(),
        &arn.instance_id,
        &keys.contact_id,
        VoicemailFields {
            entity: &entity,
            transcript: &transcript,
            presigned_url: &presigned_url,
        },
    )
    .await;

    let payload = WriterPayload {
        instance_id: arn.instance_id.clone(),
        contact_id: keys.contact_id.clone(),
        queue_id: arn.queue_id.clone(),
        entity_type: entity.kind,
        json_attributes,
        entity,
        transcript,
        presigned_url,
    };
    debug!(
        "Writer payload: {}",
        serde_json::to_string(&payload).unwrap_or_default()
    );

    let mode = VmxMode::resolve(&payload.json_attributes)?;
    debug!("VM Mode set to {:?}.", mode);

    match mode {
        VmxMode::Task => {
            write_task(
                clients.contacts.as_ref(),
                &payload,
                config.default_task_flow.as_deref(),
            )
            .await?;
        }
    }
    info!("Record VM successfully written");

    Ok(WrittenRecord {
        transcript_job: keys.transcript_job,
        instance_id: payload.instance_id,
        contact_id: payload.contact_id,
    })
}

async fn fetch_presigned_url(
    clients: &PackagerClients,
    config: &PackagerConfig,
    keys: &TranscriptKeys,
) -> Result<String, VmxError> {
    let request = PresignRequest {
        recording_bucket: config.recordings_bucket.clone(),
        recording_key: keys.recording_key.clone(),
    };

    let reply = clients
        .presigner
        .invoke_presigner(&config.presigner_function_arn, &request)
        .await
        .map_err(|e| VmxError::PresignError(e.to_string()))?;

    if reply.result == PresignStatus::Fail {
        return Err(VmxError::PresignError(format!(
            "presigner failed: {}",
            reply.detail.as_deref().unwrap_or("no detail")
        )));
    }

    let raw_url = reply
        .presigned_url
        .ok_or_else(|| VmxError::PresignError("reply has no presigned_url".to_string()))?;
    Url::parse(&raw_url).map_err(|e| VmxError::PresignError(format!("invalid URL: {e}")))?;

    Ok(raw_url)
}

/// Best-effort cleanup after a successful write; failures are only logged.
async fn cleanup(clients: &PackagerClients, record: &WrittenRecord) {
    if let Err(e) = clients.transcription.delete_job(&record.transcript_job).await {
        let e = VmxError::CleanupError(e.to_string());
        error!("{}", e);
        error!("Record Failed to delete transcription job");
    }

    let flag = HashMap::from([(FLAG_ATTRIBUTE.to_string(), "0".to_string())]);
    if let Err(e) = clients
        .contacts
        .update_contact_attributes(&record.instance_id, &record.contact_id, flag)
        .await
    {
        let e = VmxError::CleanupError(e.to_string());
        error!("{}", e);
        error!("Record Failed to change {}", FLAG_ATTRIBUTE);
    }
}
