use super::{GeometryElement, Modifier, SizeOverride};
use crate::host::LayoutPass;
use crate::measuring_shape::MeasuringShape;
use crate::participant::{EqualSizeParticipant, ParticipantPhase};
use maestro_core::{Dimension, Extent, GroupKey, ReconciliationPolicy, SizeRegistry};
use maestro_geometry::{GeometrySnapshot, Rect};
use std::hash::Hash;
use std::rc::Rc;

/// Makes the decorated view a member of an equal-size group.
///
/// Measurements travel through a [`MeasuringShape`], so the registry is only
/// written after the pass that produced them has been committed.
pub struct EqualSizeElement {
    participant: EqualSizeParticipant,
    shape: MeasuringShape,
}

impl EqualSizeElement {
    pub fn new(participant: EqualSizeParticipant) -> Self {
        let target = participant.clone();
        let shape = MeasuringShape::with_sink(move |size| {
            let first = target.phase() == ParticipantPhase::Idle;
            let renders = target.render_count();
            let decision = target.on_measured(size);
            // The first measurement switches the size override on, and a
            // write to the group re-renders every other member.
            first || decision.is_replace() || target.render_count() != renders
        });
        Self { participant, shape }
    }

    pub fn participant(&self) -> &EqualSizeParticipant {
        &self.participant
    }
}

impl GeometryElement for EqualSizeElement {
    fn name(&self) -> &'static str {
        match self.participant.policy().dimension {
            Dimension::Width => "equalWidths",
            Dimension::Height => "equalHeights",
            Dimension::Both => "equalSize",
        }
    }

    fn on_layout(&self, pass: &LayoutPass<'_>) {
        match GeometrySnapshot::new(pass.view().size()) {
            Ok(snapshot) => {
                self.shape
                    .path(Rect::from_size(snapshot.size()), pass.runtime());
            }
            Err(err) => log::warn!(
                "{} {}: skipping measurement: {err}",
                self.name(),
                self.participant.key()
            ),
        }
    }

    fn size_override(&self) -> SizeOverride {
        self.participant.size_override()
    }

    fn equal_size_participant(&self) -> Option<&EqualSizeParticipant> {
        Some(&self.participant)
    }
}

impl Modifier {
    /// Equalizes this view's width with every view using the same `id`.
    pub fn equal_widths<I: Hash + ?Sized>(self, extent: Extent, id: &I) -> Self {
        self.equal_widths_in(&SizeRegistry::shared(), extent, id)
    }

    pub fn equal_heights<I: Hash + ?Sized>(self, extent: Extent, id: &I) -> Self {
        self.equal_heights_in(&SizeRegistry::shared(), extent, id)
    }

    /// Equalizes both axes; a member winning on either axis sets the whole size.
    pub fn equal_size<I: Hash + ?Sized>(self, extent: Extent, id: &I) -> Self {
        self.equal_size_in(&SizeRegistry::shared(), extent, id)
    }

    pub fn equal_widths_in<I: Hash + ?Sized>(
        self,
        registry: &Rc<SizeRegistry>,
        extent: Extent,
        id: &I,
    ) -> Self {
        self.equal_dimension(registry, ReconciliationPolicy::new(extent, Dimension::Width), id)
    }

    pub fn equal_heights_in<I: Hash + ?Sized>(
        self,
        registry: &Rc<SizeRegistry>,
        extent: Extent,
        id: &I,
    ) -> Self {
        self.equal_dimension(registry, ReconciliationPolicy::new(extent, Dimension::Height), id)
    }

    pub fn equal_size_in<I: Hash + ?Sized>(
        self,
        registry: &Rc<SizeRegistry>,
        extent: Extent,
        id: &I,
    ) -> Self {
        self.equal_dimension(registry, ReconciliationPolicy::new(extent, Dimension::Both), id)
    }

    fn equal_dimension<I: Hash + ?Sized>(
        self,
        registry: &Rc<SizeRegistry>,
        policy: ReconciliationPolicy,
        id: &I,
    ) -> Self {
        let participant = EqualSizeParticipant::new(Rc::clone(registry), GroupKey::new(id), policy);
        self.then(Self::with_element(EqualSizeElement::new(participant)))
    }

    /// Participant of the last equal-size element in the chain.
    pub fn equal_size_participant(&self) -> Option<EqualSizeParticipant> {
        self.elements()
            .iter()
            .rev()
            .find_map(|element| element.equal_size_participant().cloned())
    }
}
