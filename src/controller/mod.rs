//! Subscription lifecycle controller.
//!
//! A [`TimelineController`] follows one tag at a time:
//! - `activate(scope)` loads the tag's timeline and opens a stream for it
//! - `on_scope_change(scope)` closes the stream, reloads and reopens for the
//!   new tag (ignored when the tag is unchanged)
//! - `deactivate()` closes the stream
//!
//! The three entry points do not depend on any UI framework; a view, a
//! daemon, or a test can drive them.
//!
//! # Example
//!
//! ```ignore
//! let hub = Arc::new(StreamHub::new());
//! let store = Arc::new(MemoryTimelines::new());
//! let mut controller = TimelineController::new(
//!     StreamConfig::new("wss://streaming.example", token),
//!     store.clone(),
//!     hub.clone(),
//! );
//!
//! controller.activate("rust")?;
//! hub.dispatch_pending()?;
//! controller.on_scope_change("ferris")?;
//! controller.deactivate();
//! ```

mod lifecycle;
mod scope;
mod subscription;

pub use lifecycle::{LifecycleState, TimelineController};
pub use scope::{ScopeTracker, ScopeTransition};
pub use subscription::Subscription;
