//! Shared keyed store of reconciled group sizes.

use crate::collections::map::OrderedMap;
use crate::notifier::{
    BroadcastNotifier, ChangeKind, ChangeNotifier, ObserverId, RegistryChange,
};
use crate::GroupKey;
use maestro_geometry::Size;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

thread_local! {
    static SHARED_REGISTRY: Rc<SizeRegistry> = Rc::new(SizeRegistry::new());
}

/// Keyed store mapping each group to its current reconciled size.
///
/// Entries are created lazily with a `(0, 0)` default on first `get` or `set`
/// and are never removed; memory stays bounded only if callers draw group
/// keys from a bounded set. Every registration and every write is announced
/// through the registry's [`ChangeNotifier`].
///
/// All access happens on the UI thread. [`SizeRegistry::shared`] is the
/// per-thread instance the modifiers use by default; it is created on first
/// use and lives until the thread exits.
pub struct SizeRegistry {
    entries: RefCell<OrderedMap<GroupKey, Size>>,
    notifier: Box<dyn ChangeNotifier>,
    writes: Cell<u64>,
}

impl SizeRegistry {
    pub fn new() -> Self {
        Self::with_notifier(BroadcastNotifier::new())
    }

    pub fn with_notifier(notifier: impl ChangeNotifier + 'static) -> Self {
        Self {
            entries: RefCell::new(OrderedMap::default()),
            notifier: Box::new(notifier),
            writes: Cell::new(0),
        }
    }

    /// The registry shared by every view on this thread.
    pub fn shared() -> Rc<SizeRegistry> {
        SHARED_REGISTRY.with(Rc::clone)
    }

    /// Current size for `key`.
    ///
    /// Reading an unseen key registers it with `(0, 0)` and notifies
    /// observers, so the reader is part of the group from then on.
    pub fn get(&self, key: GroupKey) -> Size {
        {
            let mut entries = self.entries.borrow_mut();
            if let Some(size) = entries.get(&key) {
                return *size;
            }
            entries.insert(key, Size::ZERO);
        }
        log::trace!("registered {key} with default size");
        self.notifier.notify(RegistryChange {
            key,
            kind: ChangeKind::Registered,
        });
        Size::ZERO
    }

    /// Reads `key` without registering it.
    pub fn peek(&self, key: GroupKey) -> Option<Size> {
        self.entries.borrow().get(&key).copied()
    }

    /// Replaces the size for `key` and announces the write through the notifier.
    pub fn set(&self, key: GroupKey, value: Size) {
        let previous = self.entries.borrow_mut().insert(key, value);
        self.writes.set(self.writes.get() + 1);
        log::trace!("{key}: {previous:?} -> {value:?}");
        self.notifier.notify(RegistryChange {
            key,
            kind: ChangeKind::Updated,
        });
    }

    /// Registers `callback` for registry changes until the subscription drops.
    pub fn subscribe(
        self: &Rc<Self>,
        interest: GroupKey,
        callback: impl Fn(RegistryChange) + 'static,
    ) -> RegistrySubscription {
        let id = self.notifier.subscribe(interest, Rc::new(callback));
        RegistrySubscription {
            registry: Rc::downgrade(self),
            id: Some(id),
        }
    }

    pub fn contains(&self, key: GroupKey) -> bool {
        self.entries.borrow().contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Keys in registration order.
    pub fn keys(&self) -> Vec<GroupKey> {
        self.entries.borrow().keys().copied().collect()
    }

    pub fn observer_count(&self) -> usize {
        self.notifier.observer_count()
    }

    /// Number of `set` calls so far.
    pub fn write_count(&self) -> u64 {
        self.writes.get()
    }
}

impl Default for SizeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SizeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizeRegistry")
            .field("entries", &self.entries.borrow().len())
            .field("observers", &self.notifier.observer_count())
            .field("writes", &self.writes.get())
            .finish()
    }
}

/// Keeps a registry observer registered until dropped.
#[must_use = "dropping a RegistrySubscription unsubscribes immediately"]
pub struct RegistrySubscription {
    registry: Weak<SizeRegistry>,
    id: Option<ObserverId>,
}

impl Drop for RegistrySubscription {
    fn drop(&mut self) {
        if let (Some(id), Some(registry)) = (self.id.take(), self.registry.upgrade()) {
            registry.notifier.unsubscribe(id);
        }
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
