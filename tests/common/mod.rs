//! Recording collaborators shared by the integration tests.

#![allow(dead_code)]

use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tag_timeline::{
    ConnectRequest, Item, ItemId, MessageHandler, Result, Scope, StreamConfig, StreamHandle,
    StreamMessage, TimelineController, TimelineError, TimelineStore, Transport,
};

/// One call made by the controller on a collaborator.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    LoadInitial { namespace: String, scope: String },
    MergeItem { namespace: String, item: serde_json::Value },
    RemoveItem(String),
    Connect { topic: String, handle: usize },
    Close { handle: usize },
}

/// Shared call log. Handlers are kept after close so a test can play a
/// transport that keeps delivering.
#[derive(Default)]
pub struct Log {
    calls: Mutex<Vec<Call>>,
    open: Mutex<BTreeSet<usize>>,
    max_open: AtomicUsize,
    handlers: Mutex<HashMap<usize, Box<dyn MessageHandler>>>,
    next_handle: AtomicUsize,
    pub fail_connect: AtomicBool,
    pub fail_load: AtomicBool,
    pub fail_merge: AtomicBool,
}

impl Log {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn open_handles(&self) -> usize {
        self.open.lock().len()
    }

    pub fn max_open(&self) -> usize {
        self.max_open.load(Ordering::SeqCst)
    }

    /// Hand a frame to the handler registered under `handle`, open or not.
    pub fn deliver(&self, handle: usize, message: StreamMessage) -> Result<()> {
        let mut handlers = self.handlers.lock();
        let handler = handlers
            .get_mut(&handle)
            .unwrap_or_else(|| panic!("no handler for handle {}", handle));
        handler.on_message(message)
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

pub struct RecordingStore(pub Arc<Log>);

impl TimelineStore for RecordingStore {
    fn load_initial(&self, namespace: &str, scope: &Scope) -> Result<()> {
        if self.0.fail_load.load(Ordering::SeqCst) {
            return Err(TimelineError::Store("load failed".to_string()));
        }
        self.0.record(Call::LoadInitial {
            namespace: namespace.to_string(),
            scope: scope.to_string(),
        });
        Ok(())
    }

    fn merge_item(&self, namespace: &str, item: Item) -> Result<()> {
        if self.0.fail_merge.load(Ordering::SeqCst) {
            return Err(TimelineError::Store("merge failed".to_string()));
        }
        self.0.record(Call::MergeItem {
            namespace: namespace.to_string(),
            item: item.into_value(),
        });
        Ok(())
    }

    fn remove_item_everywhere(&self, item_id: &ItemId) -> Result<()> {
        self.0.record(Call::RemoveItem(item_id.to_string()));
        Ok(())
    }
}

pub struct RecordingTransport(pub Arc<Log>);

impl Transport for RecordingTransport {
    fn connect(
        &self,
        request: ConnectRequest,
        handler: Box<dyn MessageHandler>,
    ) -> Result<Box<dyn StreamHandle>> {
        if self.0.fail_connect.load(Ordering::SeqCst) {
            return Err(TimelineError::Transport("connection refused".to_string()));
        }

        let handle = self.0.next_handle.fetch_add(1, Ordering::SeqCst) + 1;
        self.0.handlers.lock().insert(handle, handler);

        let open = {
            let mut open = self.0.open.lock();
            open.insert(handle);
            open.len()
        };
        self.0.max_open.fetch_max(open, Ordering::SeqCst);

        self.0.record(Call::Connect {
            topic: request.topic.to_string(),
            handle,
        });

        Ok(Box::new(RecordingHandle {
            handle,
            log: Arc::clone(&self.0),
            closed: false,
        }))
    }
}

pub struct RecordingHandle {
    handle: usize,
    log: Arc<Log>,
    closed: bool,
}

impl StreamHandle for RecordingHandle {
    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.log.open.lock().remove(&self.handle);
        self.log.record(Call::Close {
            handle: self.handle,
        });
    }
}

pub fn config() -> StreamConfig {
    StreamConfig::new("wss://streaming.test", "secret-token")
}

/// A controller wired to a fresh recording log.
pub fn harness() -> (Arc<Log>, TimelineController) {
    let log = Arc::new(Log::default());
    let controller = TimelineController::new(
        config(),
        Arc::new(RecordingStore(Arc::clone(&log))),
        Arc::new(RecordingTransport(Arc::clone(&log))),
    );
    (log, controller)
}

pub fn load(scope: &str) -> Call {
    Call::LoadInitial {
        namespace: "tag".to_string(),
        scope: scope.to_string(),
    }
}

pub fn connect(scope: &str, handle: usize) -> Call {
    Call::Connect {
        topic: format!("hashtag&tag={}", scope),
        handle,
    }
}
