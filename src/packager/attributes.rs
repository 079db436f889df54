use std::collections::HashMap;
use tracing::{debug, error};

use crate::clients::ContactCenter;
use crate::core::models::{ContactAttributes, Entity};
use crate::errors::VmxError;

pub const FROM_ATTRIBUTE: &str = "vmx3_from";
pub const MODE_ATTRIBUTE: &str = "vmx3_mode";
pub const FLAG_ATTRIBUTE: &str = "vmx3_flag";
pub const TASK_FLOW_ATTRIBUTE: &str = "vmx3_task_flow";

/// Voicemail fields layered on top of the contact's own attributes.
#[derive(Debug, Clone, Copy)]
pub struct VoicemailFields<'a> {
    pub entity: &'a Entity,
    pub transcript: &'a str,
    pub presigned_url: &'a str,
}

/// Adds the voicemail fields to `existing`, copying `vmx3_from` into `callback_number`.
///
/// # Errors
///
/// Returns `AttributeMergeError` if the contact has no `vmx3_from` attribute.
pub fn merge_attributes(
    mut existing: HashMap<String, String>,
    fields: VoicemailFields<'_>,
) -> Result<HashMap<String, String>, VmxError> {
    let callback_number = existing.get(FROM_ATTRIBUTE).cloned().ok_or_else(|| {
        VmxError::AttributeMergeError(format!("contact has no {FROM_ATTRIBUTE} attribute"))
    })?;

    existing.extend([
        ("entity_name".to_string(), fields.entity.name.clone()),
        ("entity_id".to_string(), fields.entity.id.clone()),
        (
            "entity_description".to_string(),
            fields.entity.description.clone(),
        ),
        (
            "transcript_contents".to_string(),
            fields.transcript.to_string(),
        ),
        ("callback_number".to_string(), callback_number),
        ("presigned_url".to_string(), fields.presigned_url.to_string()),
    ]);

    Ok(existing)
}

/// Reads the contact's attributes and merges the voicemail fields in.
///
/// A failed read yields [`ContactAttributes::Unavailable`]; a failed merge keeps
/// the contact's own attributes as [`ContactAttributes::Unmerged`]. Both are logged.
pub async fn collect_attributes(
    contacts: &dyn ContactCenter,
    instance_id: &str,
    contact_id: &str,
    fields: VoicemailFields<'_>,
) -> ContactAttributes {
    let existing = match contacts.contact_attributes(instance_id, contact_id).await {
        Ok(existing) => existing,
        Err(e) => {
            error!("{}", VmxError::AttributeMergeError(e.to_string()));
            error!("Record Result: Failed to extract attributes");
            return ContactAttributes::Unavailable;
        }
    };

    match merge_attributes(existing.clone(), fields) {
        Ok(map) => {
            debug!("Merged {} attributes for contact {}", map.len(), contact_id);
            ContactAttributes::Merged(map)
        }
        Err(e) => {
            error!("{}", e);
            error!("Record Result: Failed to extract attributes");
            ContactAttributes::Unmerged(existing)
        }
    }
}

/// Ways a voicemail can be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmxMode {
    Task,
}

impl VmxMode {
    /// Mode requested by `vmx3_mode`; `task` when the attribute is absent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidModeError` for any other value, including an empty one.
    pub fn resolve(attributes: &ContactAttributes) -> Result<Self, VmxError> {
        match attributes.get(MODE_ATTRIBUTE) {
            None | Some("task") => Ok(VmxMode::Task),
            Some(other) => Err(VmxError::InvalidModeError(format!(
                "unsupported {MODE_ATTRIBUTE} {other:?}"
            ))),
        }
    }
}
