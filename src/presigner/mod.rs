//! Presigner Lambda: issues time-limited recording URLs

pub mod handler;

// Re-export the main handler for convenience
pub use handler::handler;
