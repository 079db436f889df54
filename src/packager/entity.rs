//! Queue ARN decomposition and agent/queue identity resolution.
//!
//! Voicemails are tagged with the ARN of the queue they were left in. Agent
//! queues look like `.../instance/<instance>/queue/agent/<agent>` and resolve
//! to the agent's name; every other queue resolves to the queue's own details.
//! Lookup failures never abort the record: the entity name falls back to
//! [`UNKNOWN`].

use tracing::{debug, error};

use crate::clients::ContactCenter;
use crate::core::models::{Entity, EntityKind, UNKNOWN};
use crate::errors::VmxError;

pub const AGENT_DESCRIPTION: &str = "Amazon Connect Agent";

const AGENT_QUEUE_PREFIX: &str = "agent";

/// Components of a Connect queue ARN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueArn {
    pub instance_id: String,
    pub queue_id: String,
    /// Present only for agent queues whose ARN carries an `agent/` segment.
    pub agent_id: Option<String>,
}

impl QueueArn {
    /// # Errors
    ///
    /// Returns `TagError` unless the ARN contains `instance/`, `/queue` and `queue/`.
    pub fn parse(arn: &str) -> Result<Self, VmxError> {
        let malformed = || VmxError::TagError(format!("malformed queue ARN {arn:?}"));

        let rest = arn.split("instance/").nth(1).ok_or_else(malformed)?;
        if !rest.contains("/queue") {
            return Err(malformed());
        }
        let instance_id = rest.split("/queue").next().unwrap_or_default();
        let queue_id = rest.split("queue/").nth(1).ok_or_else(malformed)?;
        if instance_id.is_empty() || queue_id.is_empty() {
            return Err(malformed());
        }

        let agent_id = if queue_id.starts_with(AGENT_QUEUE_PREFIX) {
            rest.split("agent/")
                .nth(1)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
        } else {
            None
        };

        Ok(Self {
            instance_id: instance_id.to_string(),
            queue_id: queue_id.to_string(),
            agent_id,
        })
    }

    #[must_use]
    pub fn entity_kind(&self) -> EntityKind {
        entity_kind_for(&self.queue_id)
    }
}

#[must_use]
pub fn entity_kind_for(queue_id: &str) -> EntityKind {
    if queue_id.starts_with(AGENT_QUEUE_PREFIX) {
        EntityKind::Agent
    } else {
        EntityKind::Queue
    }
}

/// Looks up the agent or queue behind `arn`, degrading to `UNKNOWN` on failure.
pub async fn resolve_entity(contacts: &dyn ContactCenter, arn: &QueueArn) -> Entity {
    match arn.entity_kind() {
        EntityKind::Agent => match lookup_agent(contacts, arn).await {
            Ok(entity) => entity,
            Err(e) => {
                error!("{}", e);
                error!("Record Result: Failed to find agent");
                Entity {
                    kind: EntityKind::Agent,
                    name: UNKNOWN.to_string(),
                    id: arn.agent_id.clone().unwrap_or_else(|| UNKNOWN.to_string()),
                    description: AGENT_DESCRIPTION.to_string(),
                }
            }
        },
        EntityKind::Queue => match lookup_queue(contacts, arn).await {
            Ok(entity) => entity,
            Err(e) => {
                error!("{}", e);
                error!("Record Result: Failed to extract queue name");
                Entity {
                    kind: EntityKind::Queue,
                    name: UNKNOWN.to_string(),
                    id: arn.queue_id.clone(),
                    description: String::new(),
                }
            }
        },
    }
}

async fn lookup_agent(contacts: &dyn ContactCenter, arn: &QueueArn) -> Result<Entity, VmxError> {
    let agent_id = arn.agent_id.as_deref().ok_or_else(|| {
        VmxError::IdentityResolutionError(format!("no agent id in queue {}", arn.queue_id))
    })?;

    let identity = contacts
        .describe_agent(&arn.instance_id, agent_id)
        .await
        .map_err(|e| VmxError::IdentityResolutionError(e.to_string()))?;
    debug!("Resolved agent {} to {}", agent_id, identity.username);

    Ok(Entity {
        kind: EntityKind::Agent,
        name: format!("{} {}", identity.first_name, identity.last_name),
        id: identity.username,
        description: AGENT_DESCRIPTION.to_string(),
    })
}

async fn lookup_queue(contacts: &dyn ContactCenter, arn: &QueueArn) -> Result<Entity, VmxError> {
    let queue = contacts
        .describe_queue(&arn.instance_id, &arn.queue_id)
        .await
        .map_err(|e| VmxError::IdentityResolutionError(e.to_string()))?;

    Ok(Entity {
        kind: EntityKind::Queue,
        name: queue.name,
        id: queue.arn,
        description: queue.description.unwrap_or_default(),
    })
}
