//! Push event decoding and routing.
//!
//! Frames from a transport carry a string discriminant. Two kinds are
//! understood:
//! - `update`: an item to merge into the subscribed timeline
//! - `delete`: an item id to remove from every timeline
//!
//! Any other discriminant is skipped so that newer servers can add event
//! kinds without breaking older clients.

mod router;
mod types;

pub use router::EventRouter;
pub use types::PushEvent;
