use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Decides whether a write actually changed a state's value.
pub trait MutationPolicy<T> {
    fn equivalent(&self, a: &T, b: &T) -> bool;
}

/// Writes of an equal value are dropped without notifying anyone.
pub struct StructuralEqualityPolicy;

impl<T: PartialEq> MutationPolicy<T> for StructuralEqualityPolicy {
    fn equivalent(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

/// Every write notifies, even when the value did not change.
pub struct NeverEqual;

impl<T> MutationPolicy<T> for NeverEqual {
    fn equivalent(&self, _a: &T, _b: &T) -> bool {
        false
    }
}

type Listener<T> = Rc<dyn Fn(&T)>;

struct StateInner<T> {
    value: RefCell<T>,
    policy: Box<dyn MutationPolicy<T>>,
    listeners: RefCell<SmallVec<[(u64, Listener<T>); 2]>>,
    next_listener_id: Cell<u64>,
    writes: Cell<u64>,
}

impl<T: Clone + 'static> StateInner<T> {
    fn notify(&self) {
        // Listeners may read or write this state, so nothing stays borrowed
        // while they run.
        let listeners: SmallVec<[Listener<T>; 2]> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        if listeners.is_empty() {
            return;
        }
        let value = self.value.borrow().clone();
        for listener in listeners {
            listener(&value);
        }
    }
}

/// Observable single-threaded state cell.
///
/// Clones share the same value. Hosts bind a render to a state by
/// subscribing; the subscription lives as long as the returned
/// [`StateSubscription`].
pub struct MutableState<T> {
    inner: Rc<StateInner<T>>,
}

impl<T> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for MutableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableState")
            .field("value", &*self.inner.value.borrow())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

/// Creates a state that ignores writes of an equal value.
pub fn mutable_state_of<T: Clone + PartialEq + 'static>(value: T) -> MutableState<T> {
    MutableState::with_policy(value, StructuralEqualityPolicy)
}

impl<T: Clone + 'static> MutableState<T> {
    pub fn with_policy(value: T, policy: impl MutationPolicy<T> + 'static) -> Self {
        Self {
            inner: Rc::new(StateInner {
                value: RefCell::new(value),
                policy: Box::new(policy),
                listeners: RefCell::new(SmallVec::new()),
                next_listener_id: Cell::new(1),
                writes: Cell::new(0),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Stores `value` and notifies listeners. Returns `false` when the policy
    /// judged the write a no-op.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.inner.value.borrow_mut();
            if self.inner.policy.equivalent(&current, &value) {
                return false;
            }
            *current = value;
        }
        self.inner.writes.set(self.inner.writes.get() + 1);
        self.inner.notify();
        true
    }

    /// Applies `f` to a copy of the value and stores the result.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let mut next = self.get();
        f(&mut next);
        self.set(next)
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> StateSubscription {
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));

        let weak: Weak<StateInner<T>> = Rc::downgrade(&self.inner);
        StateSubscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner
                        .listeners
                        .borrow_mut()
                        .retain(|(listener_id, _)| *listener_id != id);
                }
            })),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Number of writes that changed the value.
    pub fn write_count(&self) -> u64 {
        self.inner.writes.get()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Keeps a state listener registered until dropped.
#[must_use = "dropping a StateSubscription unsubscribes immediately"]
pub struct StateSubscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl StateSubscription {
    /// Keeps the listener registered for the lifetime of the state.
    pub fn detach(mut self) {
        self.cancel.take();
    }
}

impl Drop for StateSubscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_writes_do_not_notify() {
        let state = mutable_state_of(1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = state.subscribe(move |value| sink.borrow_mut().push(*value));

        assert!(state.set(2));
        assert!(!state.set(2));
        assert!(state.update(|value| *value += 1));

        assert_eq!(*seen.borrow(), vec![2, 3]);
        assert_eq!(state.write_count(), 2);
    }

    #[test]
    fn never_equal_policy_notifies_every_write() {
        let state = MutableState::with_policy(0u8, NeverEqual);
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let _sub = state.subscribe(move |_| counter.set(counter.get() + 1));

        state.set(0);
        state.set(0);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let state = mutable_state_of(String::from("a"));
        let sub = state.subscribe(|_| {});
        assert_eq!(state.listener_count(), 1);
        drop(sub);
        assert_eq!(state.listener_count(), 0);

        state.subscribe(|_| {}).detach();
        assert_eq!(state.listener_count(), 1);
    }

    #[test]
    fn listener_may_write_back_into_the_state() {
        let state = mutable_state_of(0);
        let writer = state.clone();
        let _sub = state.subscribe(move |value| {
            if *value < 3 {
                writer.set(value + 1);
            }
        });

        state.set(1);
        assert_eq!(state.get(), 3);
    }
}
