//! Applies decoded push events to a timeline store.

use crate::error::Result;
use crate::stream::{MessageHandler, StreamMessage};
use crate::timelines::TimelineStore;
use crate::types::Scope;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{trace, warn};

use super::types::PushEvent;

/// Delivery callback for one subscription.
///
/// Events are applied in the order they are delivered. Once the owning
/// subscription clears `active`, every later delivery is dropped without
/// touching the store.
pub struct EventRouter {
    store: Arc<dyn TimelineStore>,
    namespace: &'static str,
    scope: Scope,
    active: Arc<AtomicBool>,
}

impl EventRouter {
    pub fn new(
        store: Arc<dyn TimelineStore>,
        namespace: &'static str,
        scope: Scope,
        active: Arc<AtomicBool>,
    ) -> Self {
        Self {
            store,
            namespace,
            scope,
            active,
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Decode a frame and apply it.
    pub fn route(&self, message: &StreamMessage) -> Result<()> {
        if !self.active.load(Ordering::Acquire) {
            trace!(scope = %self.scope, event = %message.event, "dropping frame for closed subscription");
            return Ok(());
        }

        let event = PushEvent::decode(message).map_err(|e| {
            warn!(scope = %self.scope, event = %message.event, error = %e, "undecodable frame");
            e
        })?;

        match event {
            Some(PushEvent::Update { item }) => {
                trace!(scope = %self.scope, item = ?item.id(), "merging item");
                self.store.merge_item(self.namespace, item)
            }
            Some(PushEvent::Delete { item_id }) => {
                trace!(scope = %self.scope, item = %item_id, "removing item");
                self.store.remove_item_everywhere(&item_id)
            }
            None => {
                trace!(scope = %self.scope, event = %message.event, "ignoring unknown event");
                Ok(())
            }
        }
    }
}

impl MessageHandler for EventRouter {
    fn on_message(&mut self, message: StreamMessage) -> Result<()> {
        self.route(&message)
    }
}
