use super::{GeometryElement, GeometrySource, Modifier, ReadGeometryElement};
use crate::host::LayoutPass;
use maestro_core::GeometryObserver;
use maestro_geometry::{Alignment, FrameBehavior, FrameRequest};

/// Fills the available space and pins the content to an alignment.
///
/// Owns a private observer, so the anchored content's geometry can still be
/// read through [`Modifier::anchored_observer`].
pub struct AnchoredElement {
    reader: ReadGeometryElement,
}

impl AnchoredElement {
    pub fn new(alignment: Alignment) -> Self {
        let observer = GeometryObserver::new()
            .with_behavior(FrameBehavior::Fill)
            .with_alignment(alignment);
        Self {
            reader: ReadGeometryElement::new(observer, GeometrySource::View),
        }
    }

    pub fn observer(&self) -> &GeometryObserver {
        self.reader.observer()
    }
}

impl GeometryElement for AnchoredElement {
    fn name(&self) -> &'static str {
        "anchored"
    }

    fn on_layout(&self, pass: &LayoutPass<'_>) {
        self.reader.on_layout(pass);
    }

    fn frame_request(&self) -> Option<FrameRequest> {
        self.reader.frame_request()
    }

    fn anchored_observer(&self) -> Option<&GeometryObserver> {
        Some(self.observer())
    }
}

impl Modifier {
    pub fn anchored(self, alignment: Alignment) -> Self {
        self.then(Self::with_element(AnchoredElement::new(alignment)))
    }

    /// Observer of the last `anchored` element in the chain.
    pub fn anchored_observer(&self) -> Option<GeometryObserver> {
        self.elements()
            .iter()
            .rev()
            .find_map(|element| element.anchored_observer().cloned())
    }
}
