//! Stream types shared by transports.

use crate::error::Result;
use crate::types::{Item, ItemId, Topic};
use serde::{Deserialize, Serialize};

/// A raw frame delivered by a transport.
///
/// `event` is the discriminant; `payload` is left undecoded. Update payloads
/// usually arrive as a string holding the item's JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreamMessage {
    pub event: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl StreamMessage {
    pub fn new(event: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            event: event.into(),
            payload,
        }
    }

    /// An `update` frame carrying the item as a JSON string.
    pub fn update(item: &Item) -> Result<Self> {
        let encoded = serde_json::to_string(item.as_value())?;
        Ok(Self::new("update", serde_json::Value::String(encoded)))
    }

    /// A `delete` frame carrying the raw id.
    pub fn delete(item_id: &ItemId) -> Self {
        Self::new("delete", serde_json::Value::String(item_id.0.clone()))
    }

    /// Parse a text frame.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Unique identifier for a hub subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Everything a transport needs to open a stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectRequest {
    pub base_url: String,
    pub access_token: String,
    pub topic: Topic,
}

/// Configuration for a [`StreamHub`](super::StreamHub).
#[derive(Clone, Debug)]
pub struct HubConfig {
    /// Max queued messages before publishers are refused.
    /// Default: 1000
    pub buffer_size: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self { buffer_size: 1000 }
    }
}
