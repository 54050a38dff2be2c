//! In-memory timeline store.

use crate::error::{Result, TimelineError};
use crate::types::{Item, ItemId, Scope};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

use super::TimelineStore;

/// Configuration for [`MemoryTimelines`].
#[derive(Clone, Debug)]
pub struct MemoryTimelinesConfig {
    /// Max items kept per timeline; the oldest are dropped first.
    /// Default: 40
    pub max_items: usize,
}

impl Default for MemoryTimelinesConfig {
    fn default() -> Self {
        Self { max_items: 40 }
    }
}

/// One namespace's timeline.
#[derive(Clone, Debug, Default)]
struct Timeline {
    /// Scope the timeline was last loaded for.
    scope: Option<Scope>,
    /// Newest first.
    items: Vec<Item>,
    /// Items merged since the last load or `mark_read`.
    unread: usize,
}

/// Keeps one timeline per namespace in memory.
///
/// `load_initial` fills a timeline from content registered with
/// [`seed`](MemoryTimelines::seed), standing in for a fetch from a server.
pub struct MemoryTimelines {
    config: MemoryTimelinesConfig,
    timelines: RwLock<HashMap<String, Timeline>>,
    /// Backfill content by scope.
    backfill: RwLock<HashMap<Scope, Vec<Item>>>,
}

impl MemoryTimelines {
    pub fn new() -> Self {
        Self::with_config(MemoryTimelinesConfig::default())
    }

    pub fn with_config(config: MemoryTimelinesConfig) -> Self {
        Self {
            config,
            timelines: RwLock::new(HashMap::new()),
            backfill: RwLock::new(HashMap::new()),
        }
    }

    /// Register the items (newest first) an initial load of `scope` returns.
    pub fn seed(&self, scope: Scope, items: Vec<Item>) {
        self.backfill.write().insert(scope, items);
    }

    /// Snapshot of a timeline, newest first.
    pub fn items(&self, namespace: &str) -> Vec<Item> {
        self.timelines
            .read()
            .get(namespace)
            .map(|t| t.items.clone())
            .unwrap_or_default()
    }

    /// Ids of a timeline, newest first.
    pub fn item_ids(&self, namespace: &str) -> Vec<ItemId> {
        self.timelines
            .read()
            .get(namespace)
            .map(|t| t.items.iter().filter_map(Item::id).collect())
            .unwrap_or_default()
    }

    /// Scope a namespace was last loaded for.
    pub fn scope(&self, namespace: &str) -> Option<Scope> {
        self.timelines
            .read()
            .get(namespace)
            .and_then(|t| t.scope.clone())
    }

    pub fn unread(&self, namespace: &str) -> usize {
        self.timelines
            .read()
            .get(namespace)
            .map(|t| t.unread)
            .unwrap_or(0)
    }

    pub fn has_unread(&self, namespace: &str) -> bool {
        self.unread(namespace) > 0
    }

    pub fn mark_read(&self, namespace: &str) {
        if let Some(timeline) = self.timelines.write().get_mut(namespace) {
            timeline.unread = 0;
        }
    }
}

impl Default for MemoryTimelines {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineStore for MemoryTimelines {
    fn load_initial(&self, namespace: &str, scope: &Scope) -> Result<()> {
        let mut items = self
            .backfill
            .read()
            .get(scope)
            .cloned()
            .unwrap_or_default();
        items.truncate(self.config.max_items);

        debug!(namespace, scope = %scope, items = items.len(), "timeline loaded");

        self.timelines.write().insert(
            namespace.to_string(),
            Timeline {
                scope: Some(scope.clone()),
                items,
                unread: 0,
            },
        );
        Ok(())
    }

    fn merge_item(&self, namespace: &str, item: Item) -> Result<()> {
        let id = item
            .id()
            .ok_or_else(|| TimelineError::InvalidItem("item has no usable id".to_string()))?;

        let mut timelines = self.timelines.write();
        let timeline = timelines.entry(namespace.to_string()).or_default();

        if let Some(existing) = timeline
            .items
            .iter_mut()
            .find(|existing| existing.id().as_ref() == Some(&id))
        {
            *existing = item;
            return Ok(());
        }

        timeline.items.insert(0, item);
        timeline.items.truncate(self.config.max_items);
        timeline.unread += 1;
        Ok(())
    }

    fn remove_item_everywhere(&self, item_id: &ItemId) -> Result<()> {
        let mut timelines = self.timelines.write();
        for timeline in timelines.values_mut() {
            timeline
                .items
                .retain(|item| item.id().as_ref() != Some(item_id));
        }
        Ok(())
    }
}
