//! Change notification for the size registry.
//!
//! The registry only talks to a [`ChangeNotifier`]. Subscribers declare the
//! key they care about, but [`BroadcastNotifier`] ignores it and delivers
//! every change to everyone. A per-key notifier can replace it without any
//! change to the registry's public contract.

use crate::GroupKey;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// What happened to a registry entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    /// A key was read for the first time and now holds the default size.
    Registered,
    /// A value was written with `set`.
    Updated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistryChange {
    pub key: GroupKey,
    pub kind: ChangeKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl ObserverId {
    /// Id minted by a [`ChangeNotifier`] implementation.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

pub type ChangeCallback = Rc<dyn Fn(RegistryChange)>;

pub trait ChangeNotifier {
    /// Registers `callback`. `interest` is the key the subscriber renders from.
    fn subscribe(&self, interest: GroupKey, callback: ChangeCallback) -> ObserverId;

    fn unsubscribe(&self, id: ObserverId);

    /// Delivers `change` to the subscribers this notifier considers affected.
    fn notify(&self, change: RegistryChange);

    fn observer_count(&self) -> usize;
}

/// Delivers every change to every subscriber.
///
/// A change raised while another is being delivered is queued and delivered
/// once the current round finishes, so callbacks never re-enter and changes
/// arrive in the order they were issued.
#[derive(Default)]
pub struct BroadcastNotifier {
    observers: RefCell<SmallVec<[(ObserverId, ChangeCallback); 4]>>,
    next_id: Cell<u64>,
    delivering: Cell<bool>,
    queued: RefCell<VecDeque<RegistryChange>>,
}

impl BroadcastNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn deliver(&self, change: RegistryChange) {
        let observers: SmallVec<[ChangeCallback; 4]> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in observers {
            callback(change);
        }
    }
}

impl ChangeNotifier for BroadcastNotifier {
    fn subscribe(&self, _interest: GroupKey, callback: ChangeCallback) -> ObserverId {
        let id = ObserverId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.observers.borrow_mut().push((id, callback));
        id
    }

    fn unsubscribe(&self, id: ObserverId) {
        self.observers
            .borrow_mut()
            .retain(|(observer, _)| *observer != id);
    }

    fn notify(&self, change: RegistryChange) {
        self.queued.borrow_mut().push_back(change);
        if self.delivering.replace(true) {
            return;
        }
        let _delivering = DeliveryGuard(&self.delivering);
        loop {
            let next = self.queued.borrow_mut().pop_front();
            match next {
                Some(change) => self.deliver(change),
                None => break,
            }
        }
    }

    fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }
}

/// Clears the delivering flag even when a callback unwinds.
struct DeliveryGuard<'a>(&'a Cell<bool>);

impl Drop for DeliveryGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
