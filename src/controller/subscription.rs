//! The single live stream a controller holds.

use crate::config::StreamConfig;
use crate::error::Result;
use crate::events::EventRouter;
use crate::stream::{ConnectRequest, StreamHandle, Transport};
use crate::timelines::TimelineStore;
use crate::types::{Scope, Topic, TAG_NAMESPACE};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// An open stream for one scope.
///
/// Closing clears the activity flag before the transport handle is closed,
/// so the router drops anything the transport still hands it.
pub struct Subscription {
    scope: Scope,
    topic: Topic,
    handle: Option<Box<dyn StreamHandle>>,
    active: Arc<AtomicBool>,
}

impl Subscription {
    /// Connect to the scope's topic with an [`EventRouter`] as the callback.
    pub fn open(
        transport: &dyn Transport,
        config: &StreamConfig,
        store: Arc<dyn TimelineStore>,
        scope: Scope,
    ) -> Result<Self> {
        let topic = scope.topic();
        let active = Arc::new(AtomicBool::new(true));
        let router = EventRouter::new(store, TAG_NAMESPACE, scope.clone(), Arc::clone(&active));

        let request = ConnectRequest {
            base_url: config.streaming_api_base_url.clone(),
            access_token: config.access_token.clone(),
            topic: topic.clone(),
        };
        let handle = transport.connect(request, Box::new(router))?;

        debug!(scope = %scope, topic = %topic, "subscription opened");

        Ok(Self {
            scope,
            topic,
            handle: Some(handle),
            active,
        })
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Close the stream. No-op if already closed.
    pub fn close(&mut self) {
        self.active.store(false, Ordering::Release);
        if let Some(mut handle) = self.handle.take() {
            handle.close();
            debug!(scope = %self.scope, topic = %self.topic, "subscription closed");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.close();
    }
}
