//! Secrets Manager access for the presigner's IAM key pair.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use serde_json::{Map, Value};
use std::fmt;

use super::signer::IamKeyPair;
use crate::errors::VmxError;

pub const KEY_ID_FIELD: &str = "vmx_iam_key_id";
pub const KEY_SECRET_FIELD: &str = "vmx_iam_key_secret";

#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Raw `SecretString` of `secret_id`.
    async fn secret_string(&self, secret_id: &str) -> Result<String, VmxError>;
}

pub struct SecretsManagerStore {
    client: SecretsManagerClient,
}

impl SecretsManagerStore {
    #[must_use]
    pub fn new(shared: &SdkConfig) -> Self {
        Self {
            client: SecretsManagerClient::new(shared),
        }
    }
}

#[async_trait]
impl SecretStore for SecretsManagerStore {
    async fn secret_string(&self, secret_id: &str) -> Result<String, VmxError> {
        let resp = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| {
                VmxError::SecretError(format!(
                    "secretsmanager get_secret_value {secret_id}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        resp.secret_string()
            .map(str::to_string)
            .ok_or_else(|| VmxError::SecretError(format!("secret {secret_id} has no SecretString")))
    }
}

/// Named credentials read from the secret store.
pub struct SecretBundle {
    values: Map<String, Value>,
}

impl SecretBundle {
    /// # Errors
    ///
    /// Returns `SecretError` unless `raw` is a JSON object.
    pub fn parse(raw: &str) -> Result<Self, VmxError> {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(values)) => Ok(Self { values }),
            Ok(_) => Err(VmxError::SecretError(
                "secret is not a JSON object".to_string(),
            )),
            // serde's message can quote the input, so it is not included.
            Err(_) => Err(VmxError::SecretError("secret is not valid JSON".to_string())),
        }
    }

    fn field(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
    }

    /// # Errors
    ///
    /// Returns `ClientInitError` when either key field is missing.
    pub fn key_pair(&self) -> Result<IamKeyPair, VmxError> {
        let access_key_id = self.field(KEY_ID_FIELD).ok_or_else(|| {
            VmxError::ClientInitError(format!("secret bundle lacks {KEY_ID_FIELD}"))
        })?;
        let secret_access_key = self.field(KEY_SECRET_FIELD).ok_or_else(|| {
            VmxError::ClientInitError(format!("secret bundle lacks {KEY_SECRET_FIELD}"))
        })?;

        Ok(IamKeyPair::new(access_key_id, secret_access_key))
    }
}

impl fmt::Debug for SecretBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretBundle")
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}
