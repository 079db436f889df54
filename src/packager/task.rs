//! Task mode: delivers a voicemail as an Amazon Connect task.

use std::collections::HashMap;
use tracing::info;

use super::attributes::TASK_FLOW_ATTRIBUTE;
use crate::clients::ContactCenter;
use crate::core::models::{ContactAttributes, TaskContact, WriterPayload};
use crate::errors::VmxError;

/// Connect's limit on task names.
pub const MAX_TASK_NAME_CHARS: usize = 512;
/// Connect's limit on task descriptions.
pub const MAX_TASK_DESCRIPTION_CHARS: usize = 4096;

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Builds the task request for `payload`.
///
/// # Errors
///
/// Returns `TaskActivationError` when no contact flow is configured for tasks.
pub fn build_task(
    payload: &WriterPayload,
    default_task_flow: Option<&str>,
) -> Result<TaskContact, VmxError> {
    let attributes = &payload.json_attributes;

    let contact_flow_id = attributes
        .get(TASK_FLOW_ATTRIBUTE)
        .filter(|flow| !flow.is_empty())
        .or(default_task_flow)
        .ok_or_else(|| {
            VmxError::TaskActivationError(format!(
                "no {TASK_FLOW_ATTRIBUTE} attribute and no default_task_flow configured"
            ))
        })?
        .to_string();

    let name = match attributes.get("callback_number") {
        Some(number) if !number.is_empty() => format!("Voicemail from {number}"),
        _ => format!("Voicemail for {}", payload.entity.name),
    };

    let task_attributes = match attributes {
        ContactAttributes::Merged(map) | ContactAttributes::Unmerged(map) => map.clone(),
        ContactAttributes::Unavailable => HashMap::new(),
    };

    Ok(TaskContact {
        instance_id: payload.instance_id.clone(),
        previous_contact_id: payload.contact_id.clone(),
        contact_flow_id,
        name: truncate_chars(&name, MAX_TASK_NAME_CHARS),
        description: truncate_chars(&payload.transcript, MAX_TASK_DESCRIPTION_CHARS),
        recording_url: payload.presigned_url.clone(),
        attributes: task_attributes,
        client_token: format!("vmx3-{}", payload.contact_id),
    })
}

/// Creates the task and returns the new task's contact id.
///
/// # Errors
///
/// Returns `TaskActivationError` if the task cannot be built and `WriteError`
/// if Connect rejects it.
pub async fn write_task(
    contacts: &dyn ContactCenter,
    payload: &WriterPayload,
    default_task_flow: Option<&str>,
) -> Result<String, VmxError> {
    let task = build_task(payload, default_task_flow)?;
    let task_id = contacts
        .start_task_contact(task)
        .await
        .map_err(|e| VmxError::WriteError(e.to_string()))?;

    info!(
        "Created voicemail task {} for contact {}",
        task_id, payload.contact_id
    );
    Ok(task_id)
}
