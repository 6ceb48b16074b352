use super::{GeometryElement, GeometrySource, Modifier};
use crate::host::LayoutPass;
use crate::measuring_shape::MeasuringShape;
use maestro_core::MutableState;
use maestro_geometry::{GeometrySnapshot, Rect, Size};

/// Feeds a view's local size through a [`MeasuringShape`].
pub struct MeasureElement {
    shape: MeasuringShape,
    source: GeometrySource,
}

impl MeasureElement {
    pub fn new(shape: MeasuringShape, source: GeometrySource) -> Self {
        Self { shape, source }
    }
}

impl GeometryElement for MeasureElement {
    fn name(&self) -> &'static str {
        match self.source {
            GeometrySource::View => "measure",
            GeometrySource::Container => "measureContainingView",
        }
    }

    fn on_layout(&self, pass: &LayoutPass<'_>) {
        let Some(proxy) = self.source.select(pass) else {
            log::debug!("{}: host provided no container geometry", self.name());
            return;
        };
        match GeometrySnapshot::new(proxy.size()) {
            Ok(snapshot) => {
                self.shape
                    .path(Rect::from_size(snapshot.size()), pass.runtime());
            }
            Err(err) => log::warn!("{}: skipping measurement: {err}", self.name()),
        }
    }
}

impl Modifier {
    /// Binds this view's size to `binding`, one turn after each render commit.
    ///
    /// Only local geometry is measured.
    pub fn measure(self, binding: &MutableState<Size>) -> Self {
        self.then(Self::with_element(MeasureElement::new(
            MeasuringShape::new(binding.clone()),
            GeometrySource::View,
        )))
    }

    /// Binds the containing view's size to `binding`.
    pub fn measure_containing_view(self, binding: &MutableState<Size>) -> Self {
        self.then(Self::with_element(MeasureElement::new(
            MeasuringShape::new(binding.clone()),
            GeometrySource::Container,
        )))
    }
}
