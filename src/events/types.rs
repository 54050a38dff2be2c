//! Typed push events.

use crate::error::{Result, TimelineError};
use crate::stream::StreamMessage;
use crate::types::{json_kind, Item, ItemId};

/// A decoded push event. Built from a [`StreamMessage`] with
/// [`PushEvent::decode`]; there is no direct wire form.
#[derive(Clone, Debug, PartialEq)]
pub enum PushEvent {
    /// A new or edited item for the subscribed timeline.
    Update { item: Item },

    /// An item was deleted everywhere.
    Delete { item_id: ItemId },
}

impl PushEvent {
    /// Decode a raw frame.
    ///
    /// Returns `Ok(None)` for event kinds this crate does not know about.
    pub fn decode(message: &StreamMessage) -> Result<Option<Self>> {
        match message.event.as_str() {
            "update" => {
                let item = decode_item(&message.payload)?;
                Ok(Some(PushEvent::Update { item }))
            }
            "delete" => {
                let item_id = ItemId::from_json(&message.payload).ok_or_else(|| {
                    TimelineError::Decode(format!(
                        "delete payload must be an item id, got {}",
                        json_kind(&message.payload)
                    ))
                })?;
                Ok(Some(PushEvent::Delete { item_id }))
            }
            _ => Ok(None),
        }
    }
}

/// Update payloads arrive as a JSON-encoded string; already-parsed objects
/// are accepted too.
fn decode_item(payload: &serde_json::Value) -> Result<Item> {
    match payload {
        serde_json::Value::String(encoded) => {
            let value: serde_json::Value = serde_json::from_str(encoded)?;
            Item::from_value(value)
        }
        other => Item::from_value(other.clone()),
    }
}
