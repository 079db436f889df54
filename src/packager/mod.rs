//! Packager Lambda: turns a finished transcription into a voicemail task

pub mod attributes;
pub mod entity;
pub mod handler;
pub mod keys;
pub mod task;
pub mod transcript;

// Re-export the main handler for convenience
pub use handler::handler;
