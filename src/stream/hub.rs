//! In-process stream hub.

use crate::error::{Result, TimelineError};
use crate::types::Topic;
use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

use super::types::{ConnectRequest, HubConfig, StreamMessage, SubscriptionId};
use super::{MessageHandler, StreamHandle, Transport};

/// Handler storage. `None` once the owning handle is closed.
type HandlerSlot = Arc<Mutex<Option<Box<dyn MessageHandler>>>>;

/// Internal subscription state.
struct Registration {
    topic: Topic,
    slot: HandlerSlot,
}

struct Registry {
    /// Active subscriptions by ID.
    subscriptions: RwLock<HashMap<SubscriptionId, Registration>>,
    /// Counter for generating subscription IDs.
    next_id: AtomicU64,
}

impl Registry {
    fn remove(&self, id: SubscriptionId) {
        self.subscriptions.write().remove(&id);
    }

    /// Live handler slots for a topic, in subscription order.
    fn slots_for(&self, topic: &Topic) -> Vec<HandlerSlot> {
        let subs = self.subscriptions.read();
        let mut matching: Vec<_> = subs
            .iter()
            .filter(|(_, reg)| &reg.topic == topic)
            .map(|(id, reg)| (*id, Arc::clone(&reg.slot)))
            .collect();
        matching.sort_by_key(|(id, _)| *id);
        matching.into_iter().map(|(_, slot)| slot).collect()
    }
}

/// Routes published frames to subscribers by topic.
///
/// Frames are queued by [`HubPublisher::publish`] and delivered on the thread
/// that calls [`StreamHub::dispatch_pending`]. Handlers run with their slot
/// locked, so a handler must not close its own handle or re-enter delivery
/// for its own topic.
pub struct StreamHub {
    config: HubConfig,
    registry: Arc<Registry>,
    sender: Sender<(Topic, StreamMessage)>,
    receiver: Receiver<(Topic, StreamMessage)>,
}

impl StreamHub {
    /// Create a hub with the default buffer size.
    pub fn new() -> Self {
        Self::with_config(HubConfig::default())
    }

    /// Create a hub with custom configuration.
    pub fn with_config(config: HubConfig) -> Self {
        let (sender, receiver) = bounded(config.buffer_size);
        Self {
            config,
            registry: Arc::new(Registry {
                subscriptions: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(1),
            }),
            sender,
            receiver,
        }
    }

    /// A cloneable handle for enqueueing frames from other threads.
    pub fn publisher(&self) -> HubPublisher {
        HubPublisher {
            sender: self.sender.clone(),
            capacity: self.config.buffer_size,
        }
    }

    /// Register a handler for a topic.
    pub fn subscribe(&self, topic: Topic, handler: Box<dyn MessageHandler>) -> HubHandle {
        let id = SubscriptionId(self.registry.next_id.fetch_add(1, Ordering::SeqCst));
        let slot: HandlerSlot = Arc::new(Mutex::new(Some(handler)));

        debug!(subscription = id.0, topic = %topic, "stream subscribed");

        self.registry.subscriptions.write().insert(
            id,
            Registration {
                topic,
                slot: Arc::clone(&slot),
            },
        );

        HubHandle {
            id,
            registry: Arc::clone(&self.registry),
            slot,
            closed: false,
        }
    }

    /// Deliver a frame to every live handler on `topic` right away.
    ///
    /// Returns the number of handlers that received it. Every live handler
    /// gets the frame; the first handler error is returned afterwards.
    pub fn deliver(&self, topic: &Topic, message: StreamMessage) -> Result<usize> {
        let mut delivered = 0;
        let mut first_error = None;
        for slot in self.registry.slots_for(topic) {
            let mut guard = slot.lock();
            if let Some(handler) = guard.as_mut() {
                delivered += 1;
                if let Err(e) = handler.on_message(message.clone()) {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }
        trace!(topic = %topic, event = %message.event, delivered, "frame delivered");
        match first_error {
            Some(e) => Err(e),
            None => Ok(delivered),
        }
    }

    /// Drain queued frames in publish order.
    ///
    /// Returns the number of frames taken off the queue. On a handler error
    /// the remaining frames stay queued.
    pub fn dispatch_pending(&self) -> Result<usize> {
        let mut dispatched = 0;
        while let Ok((topic, message)) = self.receiver.try_recv() {
            dispatched += 1;
            self.deliver(&topic, message)?;
        }
        Ok(dispatched)
    }

    /// Number of queued, undelivered frames.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Get subscription count.
    pub fn subscription_count(&self) -> usize {
        self.registry.subscriptions.read().len()
    }

    /// Number of live subscriptions on a topic.
    pub fn topic_subscribers(&self, topic: &Topic) -> usize {
        self.registry
            .subscriptions
            .read()
            .values()
            .filter(|reg| &reg.topic == topic)
            .count()
    }
}

impl Default for StreamHub {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for StreamHub {
    fn connect(
        &self,
        request: ConnectRequest,
        handler: Box<dyn MessageHandler>,
    ) -> Result<Box<dyn StreamHandle>> {
        if request.base_url.trim().is_empty() {
            return Err(TimelineError::Transport("missing base URL".to_string()));
        }
        if request.access_token.trim().is_empty() {
            return Err(TimelineError::Transport("missing access token".to_string()));
        }
        if request.topic.as_str().is_empty() {
            return Err(TimelineError::Transport("missing topic".to_string()));
        }

        Ok(Box::new(self.subscribe(request.topic, handler)))
    }
}

/// Enqueues frames into a [`StreamHub`].
#[derive(Clone)]
pub struct HubPublisher {
    sender: Sender<(Topic, StreamMessage)>,
    capacity: usize,
}

impl HubPublisher {
    /// Queue a frame for `topic`. Fails if the hub's buffer is full or the hub
    /// is gone.
    pub fn publish(&self, topic: &Topic, message: StreamMessage) -> Result<()> {
        match self.sender.try_send((topic.clone(), message)) {
            Ok(()) => Ok(()),
            Err(crossbeam_channel::TrySendError::Full(_)) => Err(TimelineError::Backpressure {
                topic: topic.to_string(),
                capacity: self.capacity,
            }),
            Err(crossbeam_channel::TrySendError::Disconnected(_)) => Err(TimelineError::HubClosed),
        }
    }
}

/// Handle to a hub subscription. Closing (or dropping) it unregisters the
/// handler.
pub struct HubHandle {
    id: SubscriptionId,
    registry: Arc<Registry>,
    slot: HandlerSlot,
    closed: bool,
}

impl HubHandle {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// True once `close` has run.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl StreamHandle for HubHandle {
    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        // Waits out an in-flight delivery; none can start afterwards.
        self.slot.lock().take();
        self.registry.remove(self.id);
        debug!(subscription = self.id.0, "stream closed");
    }
}

impl Drop for HubHandle {
    fn drop(&mut self) {
        self.close();
    }
}
