//! Amazon Connect client module
//!
//! Wraps the handful of Connect APIs the packager needs: agent and queue
//! lookups, contact attribute reads/writes and task creation.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_connect::Client as AwsConnectClient;
use aws_sdk_connect::error::DisplayErrorContext;
use aws_sdk_connect::types::{Reference, ReferenceType};
use std::collections::HashMap;
use tracing::debug;

use crate::core::models::{AgentIdentity, QueueDetails, TaskContact};
use crate::errors::VmxError;

/// Reference name under which the recording link appears on a task.
pub const RECORDING_REFERENCE_NAME: &str = "Voicemail Recording";

#[async_trait]
pub trait ContactCenter: Send + Sync {
    async fn describe_agent(
        &self,
        instance_id: &str,
        agent_id: &str,
    ) -> Result<AgentIdentity, VmxError>;

    async fn describe_queue(
        &self,
        instance_id: &str,
        queue_id: &str,
    ) -> Result<QueueDetails, VmxError>;

    async fn contact_attributes(
        &self,
        instance_id: &str,
        contact_id: &str,
    ) -> Result<HashMap<String, String>, VmxError>;

    async fn update_contact_attributes(
        &self,
        instance_id: &str,
        contact_id: &str,
        attributes: HashMap<String, String>,
    ) -> Result<(), VmxError>;

    /// Creates a task contact and returns its contact id.
    async fn start_task_contact(&self, task: TaskContact) -> Result<String, VmxError>;
}

pub struct ConnectClient {
    client: AwsConnectClient,
}

impl ConnectClient {
    #[must_use]
    pub fn new(shared: &SdkConfig) -> Self {
        Self {
            client: AwsConnectClient::new(shared),
        }
    }
}

#[async_trait]
impl ContactCenter for ConnectClient {
    async fn describe_agent(
        &self,
        instance_id: &str,
        agent_id: &str,
    ) -> Result<AgentIdentity, VmxError> {
        let resp = self
            .client
            .describe_user()
            .instance_id(instance_id)
            .user_id(agent_id)
            .send()
            .await
            .map_err(|e| {
                VmxError::AwsError(format!("connect describe_user: {}", DisplayErrorContext(&e)))
            })?;

        let user = resp
            .user()
            .ok_or_else(|| VmxError::AwsError(format!("user {agent_id} not returned")))?;
        let identity = user
            .identity_info()
            .ok_or_else(|| VmxError::AwsError(format!("user {agent_id} has no identity info")))?;
        debug!(
            "Agent identity for {}: first={:?} last={:?}",
            agent_id,
            identity.first_name(),
            identity.last_name()
        );

        Ok(AgentIdentity {
            first_name: identity
                .first_name()
                .ok_or_else(|| VmxError::AwsError(format!("user {agent_id} has no first name")))?
                .to_string(),
            last_name: identity
                .last_name()
                .ok_or_else(|| VmxError::AwsError(format!("user {agent_id} has no last name")))?
                .to_string(),
            username: user
                .username()
                .ok_or_else(|| VmxError::AwsError(format!("user {agent_id} has no username")))?
                .to_string(),
        })
    }

    async fn describe_queue(
        &self,
        instance_id: &str,
        queue_id: &str,
    ) -> Result<QueueDetails, VmxError> {
        let resp = self
            .client
            .describe_queue()
            .instance_id(instance_id)
            .queue_id(queue_id)
            .send()
            .await
            .map_err(|e| {
                VmxError::AwsError(format!("connect describe_queue: {}", DisplayErrorContext(&e)))
            })?;

        let queue = resp
            .queue()
            .ok_or_else(|| VmxError::AwsError(format!("queue {queue_id} not returned")))?;

        Ok(QueueDetails {
            name: queue
                .name()
                .ok_or_else(|| VmxError::AwsError(format!("queue {queue_id} has no name")))?
                .to_string(),
            arn: queue
                .queue_arn()
                .ok_or_else(|| VmxError::AwsError(format!("queue {queue_id} has no ARN")))?
                .to_string(),
            description: queue.description().map(str::to_string),
        })
    }

    async fn contact_attributes(
        &self,
        instance_id: &str,
        contact_id: &str,
    ) -> Result<HashMap<String, String>, VmxError> {
        let resp = self
            .client
            .get_contact_attributes()
            .instance_id(instance_id)
            .initial_contact_id(contact_id)
            .send()
            .await
            .map_err(|e| {
                VmxError::AwsError(format!(
                    "connect get_contact_attributes: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(resp.attributes().cloned().unwrap_or_default())
    }

    async fn update_contact_attributes(
        &self,
        instance_id: &str,
        contact_id: &str,
        attributes: HashMap<String, String>,
    ) -> Result<(), VmxError> {
        self.client
            .update_contact_attributes()
            .instance_id(instance_id)
            .initial_contact_id(contact_id)
            .set_attributes(Some(attributes))
            .send()
            .await
            .map_err(|e| {
                VmxError::AwsError(format!(
                    "connect update_contact_attributes: {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }

    async fn start_task_contact(&self, task: TaskContact) -> Result<String, VmxError> {
        let reference = Reference::builder()
            .value(task.recording_url)
            .r#type(ReferenceType::Url)
            .build()
            .map_err(|e| VmxError::AwsError(format!("task reference: {e}")))?;

        let resp = self
            .client
            .start_task_contact()
            .instance_id(task.instance_id)
            .previous_contact_id(task.previous_contact_id)
            .contact_flow_id(task.contact_flow_id)
            .name(task.name)
            .description(task.description)
            .references(RECORDING_REFERENCE_NAME, reference)
            .set_attributes(Some(task.attributes))
            .client_token(task.client_token)
            .send()
            .await
            .map_err(|e| {
                VmxError::AwsError(format!(
                    "connect start_task_contact: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(resp.contact_id().unwrap_or_default().to_string())
    }
}
