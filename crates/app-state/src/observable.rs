//! Observable state
//!
//! A `Published<T>` holds one value and notifies subscribers on every
//! change. Mutations are synchronous, so a rendering layer observing the
//! receiver sees each change as soon as the mutating call returns.

use std::fmt;
use tokio::sync::watch;

/// Observable value backed by a `tokio::sync::watch` channel
///
/// # Example
///
/// ```
/// use app_state::Published;
///
/// let count = Published::new(0u32);
/// let rx = count.subscribe();
///
/// count.set(3);
/// assert_eq!(*rx.borrow(), 3);
/// assert!(rx.has_changed().unwrap());
/// ```
pub struct Published<T> {
    tx: watch::Sender<T>,
}

impl<T> Published<T> {
    /// Create a published value
    pub fn new(initial: T) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Replace the value and notify subscribers
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Mutate in place and notify subscribers
    pub fn modify(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Mutate in place; subscribers are notified only when `f` returns true
    pub fn modify_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }

    /// Read the current value without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Subscribe to changes
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone> Published<T> {
    /// Snapshot of the current value
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

impl<T: Default> Default for Published<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Published<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Published").field(&*self.tx.borrow()).finish()
    }
}
