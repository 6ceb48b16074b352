use super::{GeometryElement, Modifier};
use crate::host::{GeometryProxy, LayoutPass};
use maestro_core::GeometryObserver;
use maestro_geometry::{FrameRequest, GeometrySnapshot};

/// Which view's geometry a read modifier records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometrySource {
    /// The decorated view itself.
    View,
    /// The view containing the decorated view.
    Container,
}

impl GeometrySource {
    pub(crate) fn select<'a>(&self, pass: &LayoutPass<'a>) -> Option<&'a dyn GeometryProxy> {
        match self {
            GeometrySource::View => Some(pass.view()),
            GeometrySource::Container => pass.container(),
        }
    }
}

/// Records a view's size and frame into a [`GeometryObserver`] after every layout.
pub struct ReadGeometryElement {
    observer: GeometryObserver,
    source: GeometrySource,
}

impl ReadGeometryElement {
    pub fn new(observer: GeometryObserver, source: GeometrySource) -> Self {
        Self { observer, source }
    }

    pub fn observer(&self) -> &GeometryObserver {
        &self.observer
    }
}

impl GeometryElement for ReadGeometryElement {
    fn name(&self) -> &'static str {
        match self.source {
            GeometrySource::View => "readSize",
            GeometrySource::Container => "readParentSize",
        }
    }

    fn on_layout(&self, pass: &LayoutPass<'_>) {
        let Some(proxy) = self.source.select(pass) else {
            log::debug!("{}: host provided no container geometry", self.name());
            return;
        };
        let snapshot = match GeometrySnapshot::new(proxy.size()) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::warn!("{}: skipping measurement: {err}", self.name());
                return;
            }
        };
        let snapshot = match proxy.frame_in(self.observer.coordinate_space()) {
            Some(frame) => snapshot.with_frame(frame),
            None => snapshot,
        };
        if self.observer.record(snapshot) {
            log::trace!("{}: recorded {snapshot:?}", self.name());
        }
    }

    fn frame_request(&self) -> Option<FrameRequest> {
        // The container read leaves the decorated view's frame alone.
        match self.source {
            GeometrySource::View => Some(self.observer.frame_request()),
            GeometrySource::Container => None,
        }
    }
}

impl Modifier {
    /// Keeps `observer` in sync with this view's content size and its frame in
    /// the observer's coordinate space.
    ///
    /// The view's frame follows the observer's [`FrameBehavior`]: with `Fill`
    /// the frame extends to the available space and the content is placed by
    /// the observer's alignment, but the recorded size is still the content's.
    ///
    /// [`FrameBehavior`]: maestro_geometry::FrameBehavior
    pub fn read_size(self, observer: &GeometryObserver) -> Self {
        self.then(Self::with_element(ReadGeometryElement::new(
            observer.clone(),
            GeometrySource::View,
        )))
    }

    /// Keeps `observer` in sync with the geometry of the containing view.
    pub fn read_parent_size(self, observer: &GeometryObserver) -> Self {
        self.then(Self::with_element(ReadGeometryElement::new(
            observer.clone(),
            GeometrySource::Container,
        )))
    }
}
