//! Controller lifecycle: activate, change scope, deactivate.

use crate::config::StreamConfig;
use crate::error::{Result, TimelineError};
use crate::stream::Transport;
use crate::timelines::TimelineStore;
use crate::types::{Scope, TAG_NAMESPACE};
use std::sync::Arc;
use tracing::{debug, warn};

use super::scope::{ScopeTracker, ScopeTransition};
use super::subscription::Subscription;

/// Observable controller state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Inactive,
    /// Following `scope`. `subscribed` is false after a failed load or open.
    Active { scope: Scope, subscribed: bool },
}

/// Keeps one tag timeline live.
///
/// Holds at most one [`Subscription`]. Every transition closes the old
/// stream before a new one is opened, and every failure is returned to the
/// caller without retry.
pub struct TimelineController {
    config: StreamConfig,
    store: Arc<dyn TimelineStore>,
    transport: Arc<dyn Transport>,
    tracker: ScopeTracker,
    subscription: Option<Subscription>,
}

impl TimelineController {
    pub fn new(
        config: StreamConfig,
        store: Arc<dyn TimelineStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            store,
            transport,
            tracker: ScopeTracker::new(),
            subscription: None,
        }
    }

    /// Start following `scope`: load its timeline, then subscribe.
    ///
    /// An already active controller is deactivated first.
    pub fn activate(&mut self, scope: &str) -> Result<()> {
        self.config.validate().map_err(|e| {
            warn!(error = %e, "activation refused");
            e
        })?;
        let scope = Scope::new(scope)?;

        if self.is_active() {
            self.deactivate();
        }

        self.tracker.observe(&scope);
        debug!(scope = %scope, "controller activated");
        self.load_and_open(scope)
    }

    /// Follow a new scope. Equal scopes are ignored.
    pub fn on_scope_change(&mut self, new_scope: &str) -> Result<()> {
        let new_scope = Scope::new(new_scope)?;
        let Some(current) = self.tracker.current_scope() else {
            return Err(TimelineError::InvalidOperation(
                "scope change on an inactive controller".to_string(),
            ));
        };

        match ScopeTracker::on_scope_will_change(Some(current), &new_scope) {
            ScopeTransition::Unchanged => return Ok(()),
            transition => {
                debug!(?transition, to = %new_scope, "scope changing");
            }
        }

        self.close();
        self.tracker.observe(&new_scope);
        self.load_and_open(new_scope)
    }

    /// Stop following. No-op when inactive.
    pub fn deactivate(&mut self) {
        self.close();
        if let Some(scope) = self.tracker.clear() {
            debug!(scope = %scope, "controller deactivated");
        }
    }

    pub fn current_scope(&self) -> Option<&Scope> {
        self.tracker.current_scope()
    }

    pub fn is_active(&self) -> bool {
        self.tracker.current_scope().is_some()
    }

    /// Whether a stream is currently open.
    pub fn is_subscribed(&self) -> bool {
        self.subscription.as_ref().is_some_and(Subscription::is_open)
    }

    pub fn state(&self) -> LifecycleState {
        match self.tracker.current_scope() {
            None => LifecycleState::Inactive,
            Some(scope) => LifecycleState::Active {
                scope: scope.clone(),
                subscribed: self.is_subscribed(),
            },
        }
    }

    fn load_and_open(&mut self, scope: Scope) -> Result<()> {
        self.store
            .load_initial(TAG_NAMESPACE, &scope)
            .map_err(|e| {
                warn!(scope = %scope, error = %e, "initial load failed");
                e
            })?;
        self.open(scope)
    }

    fn open(&mut self, scope: Scope) -> Result<()> {
        debug_assert!(
            self.subscription.is_none(),
            "opening a subscription while another is live"
        );

        let subscription = Subscription::open(
            self.transport.as_ref(),
            &self.config,
            Arc::clone(&self.store),
            scope,
        )
        .map_err(|e| {
            warn!(error = %e, "subscription failed to open");
            e
        })?;

        self.subscription = Some(subscription);
        Ok(())
    }

    fn close(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.close();
        }
    }
}

impl Drop for TimelineController {
    fn drop(&mut self) {
        self.deactivate();
    }
}
