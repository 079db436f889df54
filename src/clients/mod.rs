//! Client modules for the AWS services both functions talk to.
//!
//! Each service sits behind a small trait so handlers receive their clients
//! explicitly and tests can substitute fakes.

pub mod connect;
pub mod lambda;
pub mod secrets;
pub mod signer;
pub mod storage;
pub mod transcribe;

pub use connect::{ConnectClient, ContactCenter};
pub use lambda::{LambdaInvoker, PresignInvoker};
pub use secrets::{SecretStore, SecretsManagerStore};
pub use signer::{IamKeyPair, S3UrlSigner, UrlSigner};
pub use storage::{RecordingStore, S3Store};
pub use transcribe::{TranscribeClient, TranscriptionJobs};

use aws_config::SdkConfig;

/// Clients used by the packager, built once per process.
pub struct PackagerClients {
    pub storage: Box<dyn RecordingStore>,
    pub contacts: Box<dyn ContactCenter>,
    pub presigner: Box<dyn PresignInvoker>,
    pub transcription: Box<dyn TranscriptionJobs>,
}

impl PackagerClients {
    #[must_use]
    pub fn from_sdk_config(shared: &SdkConfig) -> Self {
        Self {
            storage: Box::new(S3Store::new(shared)),
            contacts: Box::new(ConnectClient::new(shared)),
            presigner: Box::new(LambdaInvoker::new(shared)),
            transcription: Box::new(TranscribeClient::new(shared)),
        }
    }
}

/// Clients used by the presigner, built once per process.
pub struct PresignerClients {
    pub secrets: Box<dyn SecretStore>,
    pub signer: Box<dyn UrlSigner>,
}

impl PresignerClients {
    #[must_use]
    pub fn from_sdk_config(shared: &SdkConfig) -> Self {
        Self {
            secrets: Box::new(SecretsManagerStore::new(shared)),
            signer: Box::new(S3UrlSigner),
        }
    }
}
