//! Core types for the timeline controller.

use crate::error::{Result, TimelineError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store namespace used for tag-scoped timelines.
pub const TAG_NAMESPACE: &str = "tag";

/// Prefix of the streaming topic for a tag scope.
const HASHTAG_TOPIC_PREFIX: &str = "hashtag&tag=";

/// The tag a timeline is filtered by.
///
/// Compared by value; any two scopes with different strings are different
/// feeds.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope(String);

impl Scope {
    /// Create a scope, rejecting the empty string.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(TimelineError::Configuration(
                "scope must not be empty".to_string(),
            ));
        }
        Ok(Scope(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Streaming topic for this scope.
    pub fn topic(&self) -> Topic {
        Topic(format!("{}{}", HASHTAG_TOPIC_PREFIX, self.0))
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scope({})", self.0)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wire-level name of a stream.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topic(String);

impl Topic {
    /// Wrap an arbitrary topic string.
    pub fn new(value: impl Into<String>) -> Self {
        Topic(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Topic({})", self.0)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a timeline item.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(value: impl Into<String>) -> Self {
        ItemId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read an id out of a JSON value. Integers are normalized to their
    /// decimal form.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) if !s.is_empty() => Some(ItemId(s.clone())),
            serde_json::Value::Number(n) if n.is_u64() || n.is_i64() => Some(ItemId(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

/// An opaque timeline entry.
///
/// The controller forwards the decoded JSON untouched; only stores look
/// inside it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(serde_json::Value);

impl Item {
    /// Wrap a JSON object. Anything else is not an item.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(TimelineError::Decode(format!(
                "item payload must be a JSON object, got {}",
                json_kind(&value)
            )));
        }
        Ok(Item(value))
    }

    /// The item's `id` field, if it has a usable one.
    pub fn id(&self) -> Option<ItemId> {
        self.0.get("id").and_then(ItemId::from_json)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
