//! Atomically swappable holder for a single instance.

use arc_swap::ArcSwapOption;
use std::fmt;
use std::sync::Arc;

/// Holds at most one live instance.
///
/// Readers receive an owned [`Arc`], so whatever they captured stays valid
/// after the slot is replaced or cleared. Nothing is drained or cancelled.
pub struct InstanceSlot<T> {
    inner: ArcSwapOption<T>,
}

impl<T> InstanceSlot<T> {
    /// An empty slot.
    pub fn empty() -> Self {
        Self {
            inner: ArcSwapOption::empty(),
        }
    }

    /// A slot already holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: ArcSwapOption::from_pointee(value),
        }
    }

    /// The current instance, if any.
    pub fn load(&self) -> Option<Arc<T>> {
        self.inner.load_full()
    }

    /// Stores `value` and returns the instance it displaced.
    pub fn replace(&self, value: Arc<T>) -> Option<Arc<T>> {
        self.inner.swap(Some(value))
    }

    /// Empties the slot and returns the instance it held.
    pub fn take(&self) -> Option<Arc<T>> {
        self.inner.swap(None)
    }

    /// Whether an instance is currently held.
    pub fn is_occupied(&self) -> bool {
        self.inner.load().is_some()
    }
}

impl<T> Default for InstanceSlot<T> {
    fn default() -> Self {
        InstanceSlot::empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for InstanceSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InstanceSlot").field(&self.load()).finish()
    }
}
