#![allow(dead_code)]
//! Fake AWS clients shared by the integration tests.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use vmx3::clients::{
    ContactCenter, IamKeyPair, PackagerClients, PresignInvoker, PresignerClients, RecordingStore,
    SecretStore, TranscriptionJobs, UrlSigner,
};
use vmx3::core::config::{PackagerConfig, PresignerConfig};
use vmx3::core::models::{
    AgentIdentity, PresignRequest, PresignResponse, QueueDetails, TaskContact,
};
use vmx3::errors::VmxError;

pub const INSTANCE_ID: &str = "11111111-2222-3333-4444-555555555555";
pub const CALLER: &str = "+15555550100";

pub type Log<T> = Arc<Mutex<Vec<T>>>;

fn aws_failure(what: &str) -> VmxError {
    VmxError::AwsError(format!("{what}: simulated outage"))
}

pub fn transcription_event(key: &str) -> Value {
    json!({
        "version": "0",
        "detail-type": "Object Created",
        "source": "aws.s3",
        "detail": {
            "bucket": { "name": "vmx3-transcripts" },
            "object": { "key": key, "size": 1024 }
        }
    })
}

pub fn queue_arn(queue_id: &str) -> String {
    format!("arn:aws:connect:us-east-1:123456789012:instance/{INSTANCE_ID}/queue/{queue_id}")
}

pub fn transcript_document(text: &str) -> String {
    json!({
        "jobName": "abc123_job1",
        "results": { "transcripts": [ { "transcript": text } ], "items": [] },
        "status": "COMPLETED"
    })
    .to_string()
}

pub fn packager_config() -> PackagerConfig {
    PackagerConfig {
        transcripts_bucket: "vmx3-transcripts".to_string(),
        recordings_bucket: "vmx3-recordings".to_string(),
        presigner_function_arn: "arn:aws:lambda:us-east-1:123456789012:function:vmx3-presigner"
            .to_string(),
        default_task_flow: Some("default-task-flow".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Packager fakes
// ---------------------------------------------------------------------------

struct FakeStorage {
    tags: Option<HashMap<String, String>>,
    document: Option<String>,
}

#[async_trait]
impl RecordingStore for FakeStorage {
    async fn object_tags(
        &self,
        _bucket: &str,
        _key: &str,
    ) -> Result<HashMap<String, String>, VmxError> {
        self.tags.clone().ok_or_else(|| aws_failure("get_object_tagging"))
    }

    async fn object_text(&self, _bucket: &str, _key: &str) -> Result<String, VmxError> {
        self.document.clone().ok_or_else(|| aws_failure("get_object"))
    }
}

struct FakeContacts {
    agent: Option<AgentIdentity>,
    queue: Option<QueueDetails>,
    attributes: Option<HashMap<String, String>>,
    fail_flag_update: bool,
    fail_task: bool,
    tasks: Log<TaskContact>,
    updates: Log<(String, String, HashMap<String, String>)>,
}

#[async_trait]
impl ContactCenter for FakeContacts {
    async fn describe_agent(
        &self,
        _instance_id: &str,
        _agent_id: &str,
    ) -> Result<AgentIdentity, VmxError> {
        self.agent.clone().ok_or_else(|| aws_failure("describe_user"))
    }

    async fn describe_queue(
        &self,
        _instance_id: &str,
        _queue_id: &str,
    ) -> Result<QueueDetails, VmxError> {
        self.queue.clone().ok_or_else(|| aws_failure("describe_queue"))
    }

    async fn contact_attributes(
        &self,
        _instance_id: &str,
        _contact_id: &str,
    ) -> Result<HashMap<String, String>, VmxError> {
        self.attributes
            .clone()
            .ok_or_else(|| aws_failure("get_contact_attributes"))
    }

    async fn update_contact_attributes(
        &self,
        instance_id: &str,
        contact_id: &str,
        attributes: HashMap<String, String>,
    ) -> Result<(), VmxError> {
        if self.fail_flag_update {
            return Err(aws_failure("update_contact_attributes"));
        }
        self.updates.lock().unwrap().push((
            instance_id.to_string(),
            contact_id.to_string(),
            attributes,
        ));
        Ok(())
    }

    async fn start_task_contact(&self, task: TaskContact) -> Result<String, VmxError> {
        if self.fail_task {
            return Err(aws_failure("start_task_contact"));
        }
        self.tasks.lock().unwrap().push(task);
        Ok("task-contact-1".to_string())
    }
}

struct FakePresigner {
    reply: Option<PresignResponse>,
    requests: Log<PresignRequest>,
}

#[async_trait]
impl PresignInvoker for FakePresigner {
    async fn invoke_presigner(
        &self,
        _function_arn: &str,
        request: &PresignRequest,
    ) -> Result<PresignResponse, VmxError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone().ok_or_else(|| aws_failure("invoke"))
    }
}

struct FakeTranscription {
    fail: bool,
    deleted: Log<String>,
}

#[async_trait]
impl TranscriptionJobs for FakeTranscription {
    async fn delete_job(&self, job_name: &str) -> Result<(), VmxError> {
        if self.fail {
            return Err(aws_failure("delete_transcription_job"));
        }
        self.deleted.lock().unwrap().push(job_name.to_string());
        Ok(())
    }
}

/// What each fake service returns for one packager run.
pub struct Scenario {
    pub tags: Option<HashMap<String, String>>,
    pub document: Option<String>,
    pub agent: Option<AgentIdentity>,
    pub queue: Option<QueueDetails>,
    pub attributes: Option<HashMap<String, String>>,
    pub presign_reply: Option<PresignResponse>,
    pub fail_delete: bool,
    pub fail_flag_update: bool,
    pub fail_task: bool,
}

/// Calls the fakes observed during a run.
pub struct Recorders {
    pub presign_requests: Log<PresignRequest>,
    pub tasks: Log<TaskContact>,
    pub updates: Log<(String, String, HashMap<String, String>)>,
    pub deleted_jobs: Log<String>,
}

impl Recorders {
    pub fn single_task(&self) -> TaskContact {
        let tasks = self.tasks.lock().unwrap();
        assert_eq!(tasks.len(), 1, "expected exactly one task");
        tasks[0].clone()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    pub fn cleanup_ran(&self) -> bool {
        !self.deleted_jobs.lock().unwrap().is_empty() || !self.updates.lock().unwrap().is_empty()
    }
}

impl Scenario {
    /// A voicemail left in a standard queue, with every service healthy.
    pub fn queue_voicemail() -> Self {
        Self {
            tags: Some(HashMap::from([(
                "vmx3_queue_arn".to_string(),
                queue_arn("q-1"),
            )])),
            document: Some(transcript_document("Hi, please call me back.")),
            agent: None,
            queue: Some(QueueDetails {
                name: "Support".to_string(),
                arn: queue_arn("q-1"),
                description: Some("Support line".to_string()),
            }),
            attributes: Some(HashMap::from([
                ("vmx3_from".to_string(), CALLER.to_string()),
                ("vmx3_flag".to_string(), "1".to_string()),
            ])),
            presign_reply: Some(PresignResponse::success(
                "https://vmx3-recordings.s3.us-east-1.amazonaws.com/abc123.wav?X-Amz-Expires=604800"
                    .to_string(),
            )),
            fail_delete: false,
            fail_flag_update: false,
            fail_task: false,
        }
    }

    /// A voicemail left in an agent's personal queue.
    pub fn agent_voicemail() -> Self {
        let mut scenario = Self::queue_voicemail();
        scenario.tags = Some(HashMap::from([(
            "vmx3_queue_arn".to_string(),
            queue_arn("agent/a-42"),
        )]));
        scenario.queue = None;
        scenario.agent = Some(AgentIdentity {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            username: "jdoe".to_string(),
        });
        scenario
    }

    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        if let Some(attributes) = self.attributes.as_mut() {
            attributes.insert(key.to_string(), value.to_string());
        }
        self
    }

    pub fn build(self) -> (PackagerClients, Recorders) {
        let recorders = Recorders {
            presign_requests: Arc::default(),
            tasks: Arc::default(),
            updates: Arc::default(),
            deleted_jobs: Arc::default(),
        };

        let clients = PackagerClients {
            storage: Box::new(FakeStorage {
                tags: self.tags,
                document: self.document,
            }),
            contacts: Box::new(FakeContacts {
                agent: self.agent,
                queue: self.queue,
                attributes: self.attributes,
                fail_flag_update: self.fail_flag_update,
                fail_task: self.fail_task,
                tasks: recorders.tasks.clone(),
                updates: recorders.updates.clone(),
            }),
            presigner: Box::new(FakePresigner {
                reply: self.presign_reply,
                requests: recorders.presign_requests.clone(),
            }),
            transcription: Box::new(FakeTranscription {
                fail: self.fail_delete,
                deleted: recorders.deleted_jobs.clone(),
            }),
        };

        (clients, recorders)
    }
}

// ---------------------------------------------------------------------------
// Presigner fakes
// ---------------------------------------------------------------------------

struct FakeSecrets {
    secret: Option<String>,
    requested: Log<String>,
}

#[async_trait]
impl SecretStore for FakeSecrets {
    async fn secret_string(&self, secret_id: &str) -> Result<String, VmxError> {
        self.requested.lock().unwrap().push(secret_id.to_string());
        self.secret.clone().ok_or_else(|| aws_failure("get_secret_value"))
    }
}

/// One call made to the fake signer.
#[derive(Debug, Clone)]
pub struct SignCall {
    pub region: String,
    pub access_key_id: String,
    pub bucket: String,
    pub key: String,
    pub expires_in: Duration,
}

struct FakeSigner {
    fail: bool,
    calls: Log<SignCall>,
}

#[async_trait]
impl UrlSigner for FakeSigner {
    async fn presign_get(
        &self,
        region: &str,
        keys: &IamKeyPair,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, VmxError> {
        if self.fail {
            return Err(VmxError::PresignError("signing failed".to_string()));
        }
        self.calls.lock().unwrap().push(SignCall {
            region: region.to_string(),
            access_key_id: keys.access_key_id().to_string(),
            bucket: bucket.to_string(),
            key: key.to_string(),
            expires_in,
        });
        Ok(format!(
            "https://{bucket}.s3.{region}.amazonaws.com/{key}?X-Amz-Expires={}",
            expires_in.as_secs()
        ))
    }
}

pub fn presigner_config(lifecycle_days: Option<u64>) -> PresignerConfig {
    PresignerConfig {
        aws_region: "us-east-1".to_string(),
        secrets_key_id: "vmx3-presigner-keys".to_string(),
        obj_lifecycle_days: lifecycle_days,
    }
}

pub fn key_bundle() -> String {
    json!({ "vmx_iam_key_id": "AKIAEXAMPLE", "vmx_iam_key_secret": "example-secret" }).to_string()
}

pub fn presigner_clients(
    secret: Option<String>,
    fail_signing: bool,
) -> (PresignerClients, Log<String>, Log<SignCall>) {
    let requested = Arc::default();
    let calls = Arc::default();
    let clients = PresignerClients {
        secrets: Box::new(FakeSecrets {
            secret,
            requested: Arc::clone(&requested),
        }),
        signer: Box::new(FakeSigner {
            fail: fail_signing,
            calls: Arc::clone(&calls),
        }),
    };
    (clients, requested, calls)
}
