use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// Placeholder written wherever a lookup could not be completed.
pub const UNKNOWN: &str = "UNKNOWN";

/// Payload the packager sends to the presigner function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignRequest {
    pub recording_bucket: String,
    pub recording_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresignStatus {
    Success,
    Fail,
}

/// Reply from the presigner function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignResponse {
    pub result: PresignStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presigned_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl PresignResponse {
    #[must_use]
    pub fn success(presigned_url: String) -> Self {
        Self {
            result: PresignStatus::Success,
            presigned_url: Some(presigned_url),
            detail: None,
        }
    }

    #[must_use]
    pub fn fail(detail: &str) -> Self {
        Self {
            result: PresignStatus::Fail,
            presigned_url: None,
            detail: Some(detail.to_string()),
        }
    }
}

/// Value returned by the packager to the Lambda runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackagerResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub result: String,
}

impl PackagerResponse {
    #[must_use]
    pub fn complete() -> Self {
        Self {
            status: Some("complete".to_string()),
            result: "Record processed".to_string(),
        }
    }

    #[must_use]
    pub fn failed(result: &str) -> Self {
        Self {
            status: None,
            result: result.to_string(),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status.as_deref() == Some("complete")
    }
}

/// Object keys derived from a finished transcription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptKeys {
    pub transcript_key: String,
    pub transcript_job: String,
    pub contact_id: String,
    pub recording_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Agent,
    Queue,
}

/// The agent or queue a voicemail was left for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub kind: EntityKind,
    pub name: String,
    pub id: String,
    pub description: String,
}

/// Contact attributes after merging, or the sentinel when they could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactAttributes {
    Merged(HashMap<String, String>),
    /// The contact's own attributes, returned by Connect but not merged.
    Unmerged(HashMap<String, String>),
    Unavailable,
}

impl ContactAttributes {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match self {
            ContactAttributes::Merged(map) | ContactAttributes::Unmerged(map) => {
                map.get(key).map(String::as_str)
            }
            ContactAttributes::Unavailable => None,
        }
    }
}

impl Serialize for ContactAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ContactAttributes::Merged(map) => map.serialize(serializer),
            ContactAttributes::Unmerged(_) | ContactAttributes::Unavailable => {
                serializer.serialize_str(UNKNOWN)
            }
        }
    }
}

/// Everything the voicemail writer needs for one contact.
#[derive(Debug, Clone, Serialize)]
pub struct WriterPayload {
    pub instance_id: String,
    pub contact_id: String,
    pub queue_id: String,
    pub entity_type: EntityKind,
    pub json_attributes: ContactAttributes,
    #[serde(skip)]
    pub entity: Entity,
    #[serde(skip)]
    pub transcript: String,
    #[serde(skip)]
    pub presigned_url: String,
}

/// Identity fields returned by a user lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentIdentity {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueDetails {
    pub name: String,
    pub arn: String,
    pub description: Option<String>,
}

/// Request for a task contact created from a voicemail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskContact {
    pub instance_id: String,
    pub previous_contact_id: String,
    pub contact_flow_id: String,
    pub name: String,
    pub description: String,
    pub recording_url: String,
    pub attributes: HashMap<String, String>,
    pub client_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_packager_response_shapes() {
        let done = serde_json::to_value(PackagerResponse::complete()).unwrap();
        assert_eq!(
            done,
            json!({"status": "complete", "result": "Record processed"})
        );

        let failed = serde_json::to_value(PackagerResponse::failed("Failed to extract keys")).unwrap();
        assert_eq!(failed, json!({"result": "Failed to extract keys"}));
    }

    #[test]
    fn test_presign_response_omits_empty_fields() {
        let ok = serde_json::to_value(PresignResponse::success("https://x".into())).unwrap();
        assert_eq!(ok, json!({"result": "success", "presigned_url": "https://x"}));

        let fail = serde_json::to_value(PresignResponse::fail("key retrieval failed")).unwrap();
        assert_eq!(fail, json!({"result": "fail", "detail": "key retrieval failed"}));
    }

    #[test]
    fn test_unavailable_attributes_serialize_as_sentinel() {
        let value = serde_json::to_value(ContactAttributes::Unavailable).unwrap();
        assert_eq!(value, json!("UNKNOWN"));
        assert_eq!(ContactAttributes::Unavailable.get("vmx3_mode"), None);
    }

    #[test]
    fn test_unmerged_attributes_keep_contact_values() {
        let unmerged = ContactAttributes::Unmerged(HashMap::from([(
            "vmx3_mode".to_string(),
            "email".to_string(),
        )]));
        assert_eq!(unmerged.get("vmx3_mode"), Some("email"));
        assert_eq!(serde_json::to_value(&unmerged).unwrap(), json!("UNKNOWN"));
    }
}
