//! Error types for the timeline controller.

use thiserror::Error;

/// Main error type for timeline operations.
#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid item: {0}")]
    InvalidItem(String),

    #[error("Stream buffer full for topic {topic} (capacity {capacity})")]
    Backpressure { topic: String, capacity: usize },

    #[error("Stream hub is closed")]
    HubClosed,

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl From<serde_json::Error> for TimelineError {
    fn from(e: serde_json::Error) -> Self {
        TimelineError::Decode(e.to_string())
    }
}

/// Result type for timeline operations.
pub type Result<T> = std::result::Result<T, TimelineError>;
