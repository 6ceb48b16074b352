//! Policies that decide whether a measured size replaces a group's size.
//!
//! The decision is a table over `(Extent, Dimension)`:
//!
//! | extent   | dimension | replace when                                   |
//! |----------|-----------|------------------------------------------------|
//! | Least    | Width     | `candidate.width < current.width`              |
//! | Least    | Height    | `candidate.height < current.height`            |
//! | Least    | Both      | either axis of `candidate` is smaller          |
//! | Greatest | Width     | `candidate.width > current.width`              |
//! | Greatest | Height    | `candidate.height > current.height`            |
//! | Greatest | Both      | either axis of `candidate` is larger           |
//!
//! A replacement always stores the whole candidate, both axes, even when
//! only one axis won. Equal extents never replace.
//!
//! A `Least` group whose entry still holds the `(0, 0)` default never moves,
//! because no measurement is smaller than zero. Seed such groups with
//! [`SizeRegistry::set`] before the first measurement.

use crate::{GroupKey, SizeRegistry};
use maestro_geometry::{Axis, Size};

/// Whether a group converges to its smallest or largest member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Extent {
    Least,
    Greatest,
}

impl Extent {
    /// Strict comparison of one axis.
    #[inline]
    fn prefers(self, candidate: f32, current: f32) -> bool {
        match self {
            Extent::Least => candidate < current,
            Extent::Greatest => candidate > current,
        }
    }
}

/// Axes a policy compares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    Width,
    Height,
    Both,
}

impl Dimension {
    pub fn axes(self) -> &'static [Axis] {
        match self {
            Dimension::Width => &[Axis::Horizontal],
            Dimension::Height => &[Axis::Vertical],
            Dimension::Both => &Axis::ALL,
        }
    }

    pub fn covers(self, axis: Axis) -> bool {
        self.axes().contains(&axis)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReconciliationPolicy {
    pub extent: Extent,
    pub dimension: Dimension,
}

impl ReconciliationPolicy {
    pub const fn new(extent: Extent, dimension: Dimension) -> Self {
        Self { extent, dimension }
    }

    /// True when `candidate` wins on at least one selected axis.
    pub fn accepts(&self, current: Size, candidate: Size) -> bool {
        self.dimension
            .axes()
            .iter()
            .any(|&axis| self.extent.prefers(candidate.along(axis), current.along(axis)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpdateDecision {
    /// Store this size, both axes.
    Replace(Size),
    NoChange,
}

impl UpdateDecision {
    pub fn is_replace(&self) -> bool {
        matches!(self, UpdateDecision::Replace(_))
    }

    /// The size the registry holds after the decision is applied to `current`.
    pub fn resolve(self, current: Size) -> Size {
        match self {
            UpdateDecision::Replace(size) => size,
            UpdateDecision::NoChange => current,
        }
    }
}

/// Pure decision for one proposal.
pub fn propose(policy: ReconciliationPolicy, current: Size, candidate: Size) -> UpdateDecision {
    if policy.accepts(current, candidate) {
        UpdateDecision::Replace(candidate)
    } else {
        UpdateDecision::NoChange
    }
}

/// Applies one policy against a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeReconciler {
    policy: ReconciliationPolicy,
}

impl SizeReconciler {
    pub const fn new(policy: ReconciliationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ReconciliationPolicy {
        self.policy
    }

    pub fn propose(&self, current: Size, candidate: Size) -> UpdateDecision {
        propose(self.policy, current, candidate)
    }

    /// Reads the group's size, decides, and writes the candidate back when it wins.
    pub fn reconcile(&self, registry: &SizeRegistry, key: GroupKey, candidate: Size) -> UpdateDecision {
        let current = registry.get(key);
        let decision = self.propose(current, candidate);
        log::trace!(
            "{key} {:?}/{:?}: current={current:?} candidate={candidate:?} -> {decision:?}",
            self.policy.extent,
            self.policy.dimension
        );
        if let UpdateDecision::Replace(size) = decision {
            registry.set(key, size);
        }
        decision
    }
}

#[cfg(test)]
#[path = "tests/reconciler_tests.rs"]
mod tests;
