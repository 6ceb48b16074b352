//! One view's membership in an equal-size group.

use crate::modifier::SizeOverride;
use maestro_core::{
    mutable_state_of, Dimension, GroupKey, MutableState, ReconciliationPolicy,
    RegistrySubscription, SizeReconciler, SizeRegistry, StateSubscription, UpdateDecision,
};
use maestro_geometry::Size;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticipantPhase {
    /// Registered with the group but not measured yet.
    Idle,
    /// Has proposed at least one measurement.
    Participating,
}

struct ParticipantInner {
    key: GroupKey,
    reconciler: SizeReconciler,
    registry: Rc<SizeRegistry>,
    phase: Cell<ParticipantPhase>,
    rendered: MutableState<Size>,
    last_measured: Cell<Option<Size>>,
    subscription: RefCell<Option<RegistrySubscription>>,
}

impl ParticipantInner {
    /// Re-reads the group's size. The rendered state ignores equal values, so
    /// a notification that changed nothing for this group causes no re-render.
    fn refresh(&self) {
        let size = self.registry.get(self.key);
        if self.rendered.set(size) {
            log::trace!("{}: rendering at {size:?}", self.key);
        }
    }
}

/// Bridges one view's measurements into a [`SizeRegistry`] group and exposes
/// the size the view should render at.
///
/// The participant stays subscribed to the registry until it is dropped.
/// Clones share the same membership.
#[derive(Clone)]
pub struct EqualSizeParticipant {
    inner: Rc<ParticipantInner>,
}

impl EqualSizeParticipant {
    pub fn new(registry: Rc<SizeRegistry>, key: GroupKey, policy: ReconciliationPolicy) -> Self {
        let current = registry.get(key);
        let inner = Rc::new(ParticipantInner {
            key,
            reconciler: SizeReconciler::new(policy),
            registry,
            phase: Cell::new(ParticipantPhase::Idle),
            rendered: mutable_state_of(current),
            last_measured: Cell::new(None),
            subscription: RefCell::new(None),
        });

        let weak: Weak<ParticipantInner> = Rc::downgrade(&inner);
        let subscription = inner.registry.subscribe(key, move |_change| {
            if let Some(inner) = weak.upgrade() {
                inner.refresh();
            }
        });
        *inner.subscription.borrow_mut() = Some(subscription);

        Self { inner }
    }

    /// Proposes a fresh measurement of the view to the group.
    pub fn on_measured(&self, measured: Size) -> UpdateDecision {
        let inner = &self.inner;
        inner.last_measured.set(Some(measured));
        if inner.phase.replace(ParticipantPhase::Participating) == ParticipantPhase::Idle {
            log::debug!("{}: first measurement {measured:?}", inner.key);
        }
        let decision = inner
            .reconciler
            .reconcile(&inner.registry, inner.key, measured);
        // A rejected proposal still catches up with writes made before this
        // participant subscribed.
        inner.refresh();
        decision
    }

    pub fn key(&self) -> GroupKey {
        self.inner.key
    }

    pub fn policy(&self) -> ReconciliationPolicy {
        self.inner.reconciler.policy()
    }

    pub fn phase(&self) -> ParticipantPhase {
        self.inner.phase.get()
    }

    pub fn last_measured(&self) -> Option<Size> {
        self.inner.last_measured.get()
    }

    pub fn rendered_size(&self) -> Size {
        self.inner.rendered.get()
    }

    pub fn rendered_state(&self) -> &MutableState<Size> {
        &self.inner.rendered
    }

    /// Calls `listener` whenever the rendered size changes.
    pub fn on_render(&self, listener: impl Fn(&Size) + 'static) -> StateSubscription {
        self.inner.rendered.subscribe(listener)
    }

    /// Number of times the rendered size actually changed.
    pub fn render_count(&self) -> u64 {
        self.inner.rendered.write_count()
    }

    /// The axes the host must impose. Empty until the first measurement.
    pub fn size_override(&self) -> SizeOverride {
        if self.phase() == ParticipantPhase::Idle {
            return SizeOverride::NONE;
        }
        let size = self.rendered_size();
        match self.policy().dimension {
            Dimension::Width => SizeOverride {
                width: Some(size.width),
                height: None,
            },
            Dimension::Height => SizeOverride {
                width: None,
                height: Some(size.height),
            },
            Dimension::Both => SizeOverride {
                width: Some(size.width),
                height: Some(size.height),
            },
        }
    }
}

impl fmt::Debug for EqualSizeParticipant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EqualSizeParticipant")
            .field("key", &self.inner.key)
            .field("policy", &self.inner.reconciler.policy())
            .field("phase", &self.inner.phase.get())
            .field("rendered", &self.inner.rendered.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/participant_tests.rs"]
mod tests;
