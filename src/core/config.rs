use std::env;
use std::time::Duration;

use tracing::warn;

use crate::errors::VmxError;

const SECONDS_PER_DAY: u64 = 86_400;

#[derive(Debug, Clone)]
pub struct PackagerConfig {
    pub transcripts_bucket: String,
    pub recordings_bucket: String,
    pub presigner_function_arn: String,
    pub default_task_flow: Option<String>,
}

impl PackagerConfig {
    /// # Errors
    ///
    /// Missing buckets are reported as `ExtractionError` and a missing
    /// presigner ARN as `PresignError`, matching the step that needs them.
    pub fn from_env() -> Result<Self, VmxError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// # Errors
    ///
    /// See [`PackagerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, VmxError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| lookup(name).filter(|v| !v.is_empty());

        Ok(Self {
            transcripts_bucket: required("s3_transcripts_bucket").ok_or_else(|| {
                VmxError::ExtractionError("s3_transcripts_bucket is not set".to_string())
            })?,
            recordings_bucket: required("s3_recordings_bucket").ok_or_else(|| {
                VmxError::ExtractionError("s3_recordings_bucket is not set".to_string())
            })?,
            presigner_function_arn: required("presigner_function_arn").ok_or_else(|| {
                VmxError::PresignError("presigner_function_arn is not set".to_string())
            })?,
            default_task_flow: required("default_task_flow"),
        })
    }
}

#[derive(Debug, Clone)]
pub struct PresignerConfig {
    pub aws_region: String,
    pub secrets_key_id: String,
    /// Days a presigned link stays valid; `None` when unset or not an integer.
    pub obj_lifecycle_days: Option<u64>,
}

impl PresignerConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` if `aws_region` or `secrets_key_id` is missing.
    pub fn from_env() -> Result<Self, VmxError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// # Errors
    ///
    /// See [`PresignerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, VmxError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let aws_region = lookup("aws_region")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| VmxError::ConfigError("aws_region is not set".to_string()))?;
        let secrets_key_id = lookup("secrets_key_id")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| VmxError::ConfigError("secrets_key_id is not set".to_string()))?;

        let obj_lifecycle_days = match lookup("s3_obj_lifecycle") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(days) => Some(days),
                Err(e) => {
                    warn!("s3_obj_lifecycle {:?} is not a whole number of days: {}", raw, e);
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            aws_region,
            secrets_key_id,
            obj_lifecycle_days,
        })
    }

    /// Lifetime of an issued link.
    ///
    /// # Errors
    ///
    /// Returns `PresignError` when `s3_obj_lifecycle` is unset or overflows.
    pub fn link_lifetime(&self) -> Result<Duration, VmxError> {
        let days = self.obj_lifecycle_days.ok_or_else(|| {
            VmxError::PresignError("s3_obj_lifecycle is not configured".to_string())
        })?;
        expiry_seconds(days)
            .map(Duration::from_secs)
            .ok_or_else(|| VmxError::PresignError(format!("lifecycle of {days} days overflows")))
    }
}

/// Presigned URL expiry in seconds for a lifecycle of `days`.
#[must_use]
pub fn expiry_seconds(days: u64) -> Option<u64> {
    days.checked_mul(SECONDS_PER_DAY)
}
