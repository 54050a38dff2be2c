//! Timeline storage seam.
//!
//! The controller writes to a [`TimelineStore`] and never reads from it. How
//! a store orders, deduplicates, or caps its entries is its own business.

mod memory;

use crate::error::Result;
use crate::types::{Item, ItemId, Scope};

pub use memory::{MemoryTimelines, MemoryTimelinesConfig};

/// Timeline mutations requested by a controller.
pub trait TimelineStore: Send + Sync {
    /// Replace the timeline in `namespace` with a fresh load for `scope`.
    fn load_initial(&self, namespace: &str, scope: &Scope) -> Result<()>;

    /// Merge one item into the timeline in `namespace`.
    fn merge_item(&self, namespace: &str, item: Item) -> Result<()>;

    /// Remove an item from every timeline.
    fn remove_item_everywhere(&self, item_id: &ItemId) -> Result<()>;
}
