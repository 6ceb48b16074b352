//! Core runtime for Maestro cross-view geometry sharing.
//!
//! This crate holds everything that is independent of how a host renders:
//! observable state, the deferred-execution runtime hosts drive with their
//! render passes, and the equal-size machinery: the shared [`SizeRegistry`]
//! and the [`SizeReconciler`] policies that decide what it stores.

pub mod collections;
pub mod hash;
mod key;
pub mod notifier;
mod observer;
pub mod platform;
mod reconciler;
mod registry;
mod runtime;
mod state;

pub use key::GroupKey;
pub use notifier::{
    BroadcastNotifier, ChangeCallback, ChangeKind, ChangeNotifier, ObserverId, RegistryChange,
};
pub use observer::GeometryObserver;
pub use platform::{DefaultScheduler, RuntimeScheduler};
pub use reconciler::{
    propose, Dimension, Extent, ReconciliationPolicy, SizeReconciler, UpdateDecision,
};
pub use registry::{RegistrySubscription, SizeRegistry};
pub use runtime::{PassGuard, Runtime, RuntimeHandle};
pub use state::{
    mutable_state_of, MutableState, MutationPolicy, NeverEqual, StateSubscription,
    StructuralEqualityPolicy,
};

pub mod prelude {
    pub use crate::key::GroupKey;
    pub use crate::observer::GeometryObserver;
    pub use crate::reconciler::{Dimension, Extent, ReconciliationPolicy};
    pub use crate::registry::SizeRegistry;
    pub use crate::runtime::{Runtime, RuntimeHandle};
    pub use crate::state::{mutable_state_of, MutableState};
}
