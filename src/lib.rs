//! # Tag Timeline
//!
//! Keeps a tag-filtered timeline live by holding exactly one push-stream
//! subscription at a time, and moving it whenever the tag changes.
//!
//! ## Core Concepts
//!
//! - **Controller**: activate / change scope / deactivate, one stream at most
//! - **Events**: `update` and `delete` frames decoded and applied to a store
//! - **Transport**: pluggable stream factory; `StreamHub` is in-process
//! - **Timelines**: pluggable store; `MemoryTimelines` keeps them in memory
//!
//! ## Example
//!
//! ```ignore
//! use tag_timeline::{MemoryTimelines, StreamConfig, StreamHub, TimelineController};
//!
//! let hub = Arc::new(StreamHub::new());
//! let store = Arc::new(MemoryTimelines::new());
//! let mut controller = TimelineController::new(
//!     StreamConfig::new("wss://streaming.example", "token"),
//!     store.clone(),
//!     hub.clone(),
//! );
//!
//! controller.activate("cats")?;
//! hub.publisher().publish(
//!     &Scope::new("cats")?.topic(),
//!     StreamMessage::new("delete", json!("42")),
//! )?;
//! hub.dispatch_pending()?;
//! controller.deactivate();
//! ```

pub mod columns;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod stream;
pub mod timelines;
pub mod types;

// Re-exports
pub use columns::{move_intent, pin_intent, scroll_key, ColumnId, ColumnIntent, MoveDirection};
pub use config::StreamConfig;
pub use controller::{
    LifecycleState, ScopeTracker, ScopeTransition, Subscription, TimelineController,
};
pub use error::{Result, TimelineError};
pub use events::{EventRouter, PushEvent};
pub use stream::{
    ConnectRequest, HubConfig, HubHandle, HubPublisher, MessageHandler, StreamHandle, StreamHub,
    StreamMessage, SubscriptionId, Transport,
};
pub use timelines::{MemoryTimelines, MemoryTimelinesConfig, TimelineStore};
pub use types::*;
