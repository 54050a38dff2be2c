//! Scope change detection.

use crate::types::Scope;

/// What a newly observed scope means for the current one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopeTransition {
    /// No scope was held before.
    Initial,
    /// The scope moved away from `from`.
    Changed { from: Scope },
    /// Same scope as before.
    Unchanged,
}

impl ScopeTransition {
    /// Whether the transition requires a new subscription.
    pub fn is_change(&self) -> bool {
        !matches!(self, ScopeTransition::Unchanged)
    }
}

/// Holds the scope a controller is currently following.
#[derive(Clone, Debug, Default)]
pub struct ScopeTracker {
    current: Option<Scope>,
}

impl ScopeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_scope(&self) -> Option<&Scope> {
        self.current.as_ref()
    }

    /// Classify a move from `old` to `new`. Pure comparison.
    pub fn on_scope_will_change(old: Option<&Scope>, new: &Scope) -> ScopeTransition {
        match old {
            None => ScopeTransition::Initial,
            Some(old) if old == new => ScopeTransition::Unchanged,
            Some(old) => ScopeTransition::Changed { from: old.clone() },
        }
    }

    /// Record `new` as the current scope.
    pub fn observe(&mut self, new: &Scope) -> ScopeTransition {
        let transition = Self::on_scope_will_change(self.current.as_ref(), new);
        if transition.is_change() {
            self.current = Some(new.clone());
        }
        transition
    }

    /// Forget the current scope.
    pub fn clear(&mut self) -> Option<Scope> {
        self.current.take()
    }
}
