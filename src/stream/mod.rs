//! Push-stream transport seam.
//!
//! A [`Transport`] opens one stream per topic and hands every frame it
//! receives to a [`MessageHandler`]. The returned [`StreamHandle`] closes the
//! stream; once `close` returns, the handler must not be called again.
//!
//! [`StreamHub`] is an in-process transport: publishers on any thread enqueue
//! frames, and the owning thread delivers them with `dispatch_pending`.
//!
//! # Example
//!
//! ```ignore
//! let hub = StreamHub::new();
//! let publisher = hub.publisher();
//!
//! let handle = hub.connect(request, Box::new(|msg: StreamMessage| {
//!     println!("{}: {}", msg.event, msg.payload);
//!     Ok(())
//! }))?;
//!
//! publisher.publish(&topic, StreamMessage::delete(&"42".into()))?;
//! hub.dispatch_pending()?;
//! ```

mod hub;
mod types;

use crate::error::Result;

pub use hub::{HubHandle, HubPublisher, StreamHub};
pub use types::{ConnectRequest, HubConfig, StreamMessage, SubscriptionId};

/// Receives frames from an open stream.
pub trait MessageHandler: Send {
    fn on_message(&mut self, message: StreamMessage) -> Result<()>;
}

impl<F> MessageHandler for F
where
    F: FnMut(StreamMessage) -> Result<()> + Send,
{
    fn on_message(&mut self, message: StreamMessage) -> Result<()> {
        self(message)
    }
}

/// An open stream.
pub trait StreamHandle: Send {
    /// Stop delivery. Idempotent.
    fn close(&mut self);
}

/// Factory for streams.
pub trait Transport: Send + Sync {
    fn connect(
        &self,
        request: ConnectRequest,
        handler: Box<dyn MessageHandler>,
    ) -> Result<Box<dyn StreamHandle>>;
}
