//! Navigation system for Rose Bedsheet
//!
//! This module provides the per-flow navigation primitives:
//! - Destination trait and the uninhabited [`NoDestination`]
//! - One-shot completion channels carried by callback destinations
//! - Observable router state (stack, sheet slot, fullscreen slot)
//!
//! Every router mutation is synchronous. Subscribers see the new state as
//! soon as the mutating call returns.

use app_state::Published;
use parking_lot::Mutex;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tokio::sync::{oneshot, watch};
use uuid::Uuid;

// =============================================================================
// Destinations
// =============================================================================

/// A screen or modal a router can show
pub trait Destination: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Stable identifier, used for logging and modal identity
    fn id(&self) -> String;
}

/// Destination type for slots a flow never uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoDestination {}

impl Destination for NoDestination {
    fn id(&self) -> String {
        match *self {}
    }
}

// =============================================================================
// Completion
// =============================================================================

/// One-shot result channel carried by a destination
///
/// Two completions are equal when they share an id, so a destination that
/// carries one can still be compared and hashed. Clones share the channel;
/// only the first `complete` call delivers a value.
pub struct Completion<T> {
    id: Uuid,
    sender: Arc<Mutex<Option<oneshot::Sender<T>>>>,
}

impl<T> Completion<T> {
    /// Create a completion and the receiver that observes it
    pub fn new() -> (Self, CompletionReceiver<T>) {
        let (tx, rx) = oneshot::channel();
        let id = Uuid::new_v4();
        let completion = Self {
            id,
            sender: Arc::new(Mutex::new(Some(tx))),
        };
        (completion, CompletionReceiver { id, rx })
    }

    /// Unique id of this completion
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Deliver the result
    ///
    /// Returns false when the completion was already used or nobody is
    /// listening any more.
    pub fn complete(&self, value: T) -> bool {
        match self.sender.lock().take() {
            Some(tx) => tx.send(value).is_ok(),
            None => false,
        }
    }

    /// Whether `complete` has been called
    pub fn is_completed(&self) -> bool {
        self.sender.lock().is_none()
    }
}

impl<T> Clone for Completion<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T> PartialEq for Completion<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Completion<T> {}

impl<T> Hash for Completion<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("id", &self.id)
            .field("completed", &self.is_completed())
            .finish()
    }
}

/// Receiving half of a [`Completion`]
#[derive(Debug)]
pub struct CompletionReceiver<T> {
    id: Uuid,
    rx: oneshot::Receiver<T>,
}

impl<T> CompletionReceiver<T> {
    /// Id of the completion this receiver belongs to
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Wait for the result
    ///
    /// Resolves to `None` when every clone of the completion was dropped
    /// without completing.
    pub async fn wait(self) -> Option<T> {
        self.rx.await.ok()
    }

    /// Take the result if it already arrived
    pub fn try_take(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}

// =============================================================================
// Router State
// =============================================================================

/// Snapshot of a router
#[derive(Debug, Clone, PartialEq)]
pub struct RouterState<N, S, F> {
    /// Navigation stack, root first
    pub stack: Vec<N>,
    /// Presented sheet
    pub sheet: Option<S>,
    /// Presented fullscreen cover
    pub fullscreen: Option<F>,
}

impl<N, S, F> Default for RouterState<N, S, F> {
    fn default() -> Self {
        Self {
            stack: Vec::new(),
            sheet: None,
            fullscreen: None,
        }
    }
}

impl<N, S, F> RouterState<N, S, F> {
    /// True when nothing is pushed or presented
    pub fn is_idle(&self) -> bool {
        self.stack.is_empty() && self.sheet.is_none() && self.fullscreen.is_none()
    }
}

// =============================================================================
// Router
// =============================================================================

/// Navigation state of one flow
///
/// `N` is pushed onto the stack, `S` fills the sheet slot and `F` the
/// fullscreen slot. Presenting into an occupied slot replaces its content.
pub struct Router<N, S = NoDestination, F = NoDestination> {
    name: &'static str,
    state: Published<RouterState<N, S, F>>,
}

impl<N, S, F> Router<N, S, F>
where
    N: Destination,
    S: Destination,
    F: Destination,
{
    /// Create an empty router; `name` tags its log lines
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Published::default(),
        }
    }

    /// Name used in logs
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Push a destination
    pub fn navigate(&self, destination: N) {
        tracing::debug!(router = self.name, destination = %destination.id(), "navigate");
        self.state.modify(|state| state.stack.push(destination));
    }

    /// Remove the top destination. Returns false when the stack was empty.
    pub fn back(&self) -> bool {
        let popped = self.state.modify_if(|state| state.stack.pop().is_some());
        if popped {
            tracing::debug!(router = self.name, "back");
        }
        popped
    }

    /// Remove up to `count` destinations from the top
    ///
    /// Returns how many were removed.
    pub fn pop(&self, count: usize) -> usize {
        let mut removed = 0;
        self.state.modify_if(|state| {
            removed = count.min(state.stack.len());
            let keep = state.stack.len() - removed;
            state.stack.truncate(keep);
            removed > 0
        });
        if removed > 0 {
            tracing::debug!(router = self.name, removed, "pop");
        }
        removed
    }

    /// Empty the stack
    pub fn reset(&self) {
        let changed = self.state.modify_if(|state| {
            let had_entries = !state.stack.is_empty();
            state.stack.clear();
            had_entries
        });
        if changed {
            tracing::debug!(router = self.name, "reset");
        }
    }

    /// Show a sheet
    pub fn present_sheet(&self, destination: S) {
        tracing::debug!(router = self.name, destination = %destination.id(), "present sheet");
        self.state.modify(|state| state.sheet = Some(destination));
    }

    /// Dismiss the sheet, returning what was shown
    pub fn dismiss_sheet(&self) -> Option<S> {
        let mut dismissed = None;
        self.state.modify_if(|state| {
            dismissed = state.sheet.take();
            dismissed.is_some()
        });
        dismissed
    }

    /// Show a fullscreen cover
    pub fn present_fullscreen(&self, destination: F) {
        tracing::debug!(router = self.name, destination = %destination.id(), "present fullscreen");
        self.state.modify(|state| state.fullscreen = Some(destination));
    }

    /// Dismiss the fullscreen cover, returning what was shown
    pub fn dismiss_fullscreen(&self) -> Option<F> {
        let mut dismissed = None;
        self.state.modify_if(|state| {
            dismissed = state.fullscreen.take();
            dismissed.is_some()
        });
        dismissed
    }

    /// Empty the stack and clear both modal slots
    pub fn reset_all(&self) {
        let changed = self.state.modify_if(|state| {
            let was_idle = state.is_idle();
            *state = RouterState::default();
            !was_idle
        });
        if changed {
            tracing::debug!(router = self.name, "reset all");
        }
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Copy of the stack, root first
    pub fn path(&self) -> Vec<N> {
        self.state.read(|state| state.stack.clone())
    }

    /// Top destination
    pub fn top(&self) -> Option<N> {
        self.state.read(|state| state.stack.last().cloned())
    }

    /// Stack depth
    pub fn depth(&self) -> usize {
        self.state.read(|state| state.stack.len())
    }

    /// True when the stack is empty
    pub fn is_empty(&self) -> bool {
        self.depth() == 0
    }

    /// Presented sheet
    pub fn sheet(&self) -> Option<S> {
        self.state.read(|state| state.sheet.clone())
    }

    /// Presented fullscreen cover
    pub fn fullscreen(&self) -> Option<F> {
        self.state.read(|state| state.fullscreen.clone())
    }

    /// Full snapshot
    pub fn state(&self) -> RouterState<N, S, F> {
        self.state.get()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<RouterState<N, S, F>> {
        self.state.subscribe()
    }
}

impl<N, S, F> fmt::Debug for Router<N, S, F>
where
    N: fmt::Debug,
    S: fmt::Debug,
    F: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("name", &self.name)
            .field("state", &self.state)
            .finish()
    }
}
