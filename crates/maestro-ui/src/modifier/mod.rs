//! Modifier chain for geometry-aware view decorations.
//!
//! A [`Modifier`] is an immutable list of [`GeometryElement`]s. The host
//! consumes it in two places: when rendering a view it asks for the merged
//! [`SizeOverride`] and [`FrameRequest`], and after resolving the view's
//! geometry it calls [`Modifier::dispatch_layout`] so every element can read
//! what it needs.

use std::fmt;
use std::rc::Rc;

mod anchored;
mod equal_size;
mod measure;
mod read_size;

pub use anchored::AnchoredElement;
pub use equal_size::EqualSizeElement;
pub use measure::MeasureElement;
pub use read_size::{GeometrySource, ReadGeometryElement};

use crate::host::LayoutPass;
use crate::participant::EqualSizeParticipant;
use maestro_core::GeometryObserver;
use maestro_geometry::{FrameRequest, Size};

/// One decoration in a [`Modifier`] chain.
pub trait GeometryElement {
    /// Name used in debug output and by [`Modifier::element_names`].
    fn name(&self) -> &'static str;

    /// Called after the host resolved the decorated view's geometry.
    fn on_layout(&self, _pass: &LayoutPass<'_>) {}

    /// Size the decorated view must be rendered at, per axis.
    fn size_override(&self) -> SizeOverride {
        SizeOverride::NONE
    }

    /// Frame the decorated view asks the host for.
    fn frame_request(&self) -> Option<FrameRequest> {
        None
    }

    /// The private observer of an anchoring element.
    fn anchored_observer(&self) -> Option<&GeometryObserver> {
        None
    }

    fn equal_size_participant(&self) -> Option<&EqualSizeParticipant> {
        None
    }
}

pub type DynGeometryElement = Rc<dyn GeometryElement>;

/// Per-axis size the host must impose on a view. `None` leaves the axis alone.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SizeOverride {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl SizeOverride {
    pub const NONE: SizeOverride = SizeOverride {
        width: None,
        height: None,
    };

    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }

    /// Applies the overridden axes to `size`.
    pub fn apply(&self, size: Size) -> Size {
        Size::new(
            self.width.unwrap_or(size.width),
            self.height.unwrap_or(size.height),
        )
    }

    /// Later overrides win axis by axis.
    pub fn merge(self, next: SizeOverride) -> SizeOverride {
        SizeOverride {
            width: next.width.or(self.width),
            height: next.height.or(self.height),
        }
    }
}

#[derive(Clone, Default)]
pub struct Modifier {
    elements: Rc<Vec<DynGeometryElement>>,
}

impl Modifier {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_element(element: impl GeometryElement + 'static) -> Self {
        Self {
            elements: Rc::new(vec![Rc::new(element)]),
        }
    }

    pub fn then(&self, next: Modifier) -> Modifier {
        if self.elements.is_empty() {
            return next;
        }
        if next.elements.is_empty() {
            return self.clone();
        }
        let mut elements = Vec::with_capacity(self.elements.len() + next.elements.len());
        elements.extend(self.elements.iter().cloned());
        elements.extend(next.elements.iter().cloned());
        Modifier {
            elements: Rc::new(elements),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub(crate) fn elements(&self) -> &[DynGeometryElement] {
        &self.elements
    }

    pub fn element_names(&self) -> Vec<&'static str> {
        self.elements.iter().map(|element| element.name()).collect()
    }

    /// Hands the resolved geometry to every element, in chain order.
    pub fn dispatch_layout(&self, pass: &LayoutPass<'_>) {
        for element in self.elements() {
            element.on_layout(pass);
        }
    }

    /// Merged size override of the chain; later elements win per axis.
    pub fn size_override(&self) -> SizeOverride {
        self.elements()
            .iter()
            .fold(SizeOverride::NONE, |merged, element| {
                merged.merge(element.size_override())
            })
    }

    /// The last frame request in the chain.
    pub fn frame_request(&self) -> Option<FrameRequest> {
        self.elements()
            .iter()
            .rev()
            .find_map(|element| element.frame_request())
    }
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.element_names()).finish()
    }
}

#[cfg(test)]
#[path = "tests/modifier_tests.rs"]
mod tests;
