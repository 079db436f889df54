//! VMX3 - voicemail packaging for Amazon Connect.
//!
//! This crate implements the two Lambdas behind voicemail transcription:
//! 1. A Packager Lambda, triggered when a Transcribe job writes its output,
//!    that resolves the agent or queue the voicemail was left for, collects
//!    the transcript and a recording link, and creates a Connect task
//! 2. A Presigner Lambda, invoked synchronously by the packager, that signs a
//!    time-limited GET URL for the recording using a dedicated IAM key pair
//!    held in Secrets Manager
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda for serverless execution
//! - S3 for recordings and transcripts
//! - Amazon Connect for identity lookups, contact attributes and tasks
//! - Secrets Manager for the presigning credentials
//! - Tokio for async runtime
//!
//! AWS clients are built once in each binary's `main` and handed to the
//! handlers, so every step can be exercised with fakes of the traits in
//! [`clients`].
//!
//! # Example
//!
//! ```no_run
//! use aws_config::BehaviorVersion;
//! use vmx3::clients::PackagerClients;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lambda_runtime::Error> {
//!     vmx3::setup_logging(vmx3::log_level_from_env(tracing::Level::DEBUG));
//!
//!     let shared = aws_config::load_defaults(BehaviorVersion::latest()).await;
//!     let clients = PackagerClients::from_sdk_config(&shared);
//!
//!     lambda_runtime::run(lambda_runtime::service_fn(|event: lambda_runtime::LambdaEvent<serde_json::Value>| {
//!         vmx3::packager::handler(event, &clients)
//!     }))
//!     .await
//! }
//! ```
pub mod clients;
pub mod core;
pub mod errors;
pub mod packager;
pub mod presigner;

use tracing::Level;

/// Environment variable holding the function's log level.
pub const LOG_LEVEL_VAR: &str = "lambda_logging_level";

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// vmx3::setup_logging(tracing::Level::INFO);
/// ```
pub fn setup_logging(level: Level) {
    let _ = tracing_subscriber::fmt()
        .json()
        .with_target(true)
        .with_max_level(level)
        .try_init();
}

/// Maps a level name to a [`Level`]. Accepts the Python logging names used by
/// the deployment templates (`WARNING`, `CRITICAL`) as well as tracing's own.
#[must_use]
pub fn parse_log_level(name: &str) -> Option<Level> {
    match name.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Some(Level::TRACE),
        "DEBUG" => Some(Level::DEBUG),
        "INFO" => Some(Level::INFO),
        "WARN" | "WARNING" => Some(Level::WARN),
        "ERROR" | "CRITICAL" | "FATAL" => Some(Level::ERROR),
        _ => None,
    }
}

/// Level from `lambda_logging_level`, or `default` when unset or unrecognised.
#[must_use]
pub fn log_level_from_env(default: Level) -> Level {
    std::env::var(LOG_LEVEL_VAR)
        .ok()
        .as_deref()
        .and_then(parse_log_level)
        .unwrap_or(default)
}
