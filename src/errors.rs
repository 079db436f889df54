use thiserror::Error;

#[derive(Debug, Error)]
pub enum VmxError {
    #[error("Failed to extract keys: {0}")]
    ExtractionError(String),

    #[error("Failed to generate presigned URL: {0}")]
    PresignError(String),

    #[error("Failed to extract tags: {0}")]
    TagError(String),

    #[error("Failed to retrieve transcript: {0}")]
    TranscriptError(String),

    #[error("Failed to resolve agent or queue identity: {0}")]
    IdentityResolutionError(String),

    #[error("Failed to extract contact attributes: {0}")]
    AttributeMergeError(String),

    #[error("Invalid mode selection: {0}")]
    InvalidModeError(String),

    #[error("Failed to activate task writer: {0}")]
    TaskActivationError(String),

    #[error("Failed to write voicemail: {0}")]
    WriteError(String),

    #[error("Cleanup step failed: {0}")]
    CleanupError(String),

    #[error("Missing or invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to retrieve secret: {0}")]
    SecretError(String),

    #[error("Failed to initialize storage client: {0}")]
    ClientInitError(String),

    #[error("Failed to interact with AWS services: {0}")]
    AwsError(String),
}
