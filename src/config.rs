//! Connection settings supplied by the host.

use crate::error::{Result, TimelineError};

/// Streaming endpoint and credential used for every subscription a
/// controller opens.
#[derive(Clone, Debug, Default)]
pub struct StreamConfig {
    /// Base URL of the streaming API.
    pub streaming_api_base_url: String,

    /// Access token presented to the transport.
    pub access_token: String,
}

impl StreamConfig {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            streaming_api_base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Check that both fields are present.
    pub fn validate(&self) -> Result<()> {
        if self.streaming_api_base_url.trim().is_empty() {
            return Err(TimelineError::Configuration(
                "streaming API base URL is required".to_string(),
            ));
        }
        if self.access_token.trim().is_empty() {
            return Err(TimelineError::Configuration(
                "access token is required".to_string(),
            ));
        }
        Ok(())
    }
}
