use serde_json::Value;

use crate::core::models::TranscriptKeys;
use crate::errors::VmxError;

const TRANSCRIPT_SUFFIX: &str = ".json";
const RECORDING_EXTENSION: &str = ".wav";

/// Pulls `detail.object.key` out of an S3 "Object Created" event.
///
/// # Errors
///
/// Returns `ExtractionError` if the field is missing or not a string.
pub fn event_object_key(event: &Value) -> Result<&str, VmxError> {
    event
        .get("detail")
        .and_then(|detail| detail.get("object"))
        .and_then(|object| object.get("key"))
        .and_then(Value::as_str)
        .ok_or_else(|| VmxError::ExtractionError("event has no detail.object.key".to_string()))
}

/// Derives job, contact and recording names from a transcript key
/// of the form `<contact_id>_<suffix>.json`.
///
/// # Errors
///
/// Returns `ExtractionError` for an empty key or contact id.
pub fn derive_keys(transcript_key: &str) -> Result<TranscriptKeys, VmxError> {
    let transcript_job = transcript_key.replace(TRANSCRIPT_SUFFIX, "");
    let contact_id = transcript_job
        .split_once('_')
        .map_or(transcript_job.as_str(), |(head, _)| head)
        .to_string();

    if contact_id.is_empty() {
        return Err(VmxError::ExtractionError(format!(
            "no contact id in transcript key {transcript_key:?}"
        )));
    }

    Ok(TranscriptKeys {
        transcript_key: transcript_key.to_string(),
        recording_key: format!("{contact_id}{RECORDING_EXTENSION}"),
        transcript_job,
        contact_id,
    })
}
