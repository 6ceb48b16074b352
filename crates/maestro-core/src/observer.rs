//! Per-view holder of the latest measured geometry.

use crate::state::{mutable_state_of, MutableState, StateSubscription};
use maestro_geometry::{
    Alignment, CoordinateSpace, FrameBehavior, FrameRequest, GeometrySnapshot, Rect, Size,
};

/// Observable geometry of one view, written by the read modifiers.
///
/// The observer also carries the read configuration: which coordinate space
/// frames are resolved in, and which frame the decorated view asks for.
/// Clones share the same snapshot.
///
/// ```
/// use maestro_core::GeometryObserver;
/// use maestro_geometry::{CoordinateSpace, GeometrySnapshot, Rect, Size};
///
/// let observer = GeometryObserver::new().with_coordinate_space(CoordinateSpace::Global);
/// let snapshot = GeometrySnapshot::new(Size::new(80.0, 20.0))
///     .unwrap()
///     .with_frame(Rect::new(10.0, 0.0, 80.0, 20.0));
/// observer.record(snapshot);
/// assert_eq!(observer.width(), 80.0);
/// assert_eq!(observer.max_x(), 90.0);
/// ```
#[derive(Clone, Debug)]
pub struct GeometryObserver {
    snapshot: MutableState<GeometrySnapshot>,
    coordinate_space: CoordinateSpace,
    behavior: FrameBehavior,
    alignment: Alignment,
}

impl GeometryObserver {
    pub fn new() -> Self {
        Self {
            snapshot: mutable_state_of(GeometrySnapshot::zero()),
            coordinate_space: CoordinateSpace::Local,
            behavior: FrameBehavior::Default,
            alignment: Alignment::CENTER,
        }
    }

    pub fn with_coordinate_space(mut self, space: CoordinateSpace) -> Self {
        self.coordinate_space = space;
        self
    }

    pub fn with_behavior(mut self, behavior: FrameBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn coordinate_space(&self) -> &CoordinateSpace {
        &self.coordinate_space
    }

    pub fn frame_request(&self) -> FrameRequest {
        FrameRequest::new(self.behavior, self.alignment)
    }

    /// Replaces the stored snapshot. Returns `false` if nothing changed.
    pub fn record(&self, snapshot: GeometrySnapshot) -> bool {
        self.snapshot.set(snapshot)
    }

    pub fn snapshot(&self) -> GeometrySnapshot {
        self.snapshot.get()
    }

    /// The observable state behind this observer, for host bindings.
    pub fn state(&self) -> &MutableState<GeometrySnapshot> {
        &self.snapshot
    }

    pub fn subscribe(&self, listener: impl Fn(&GeometrySnapshot) + 'static) -> StateSubscription {
        self.snapshot.subscribe(listener)
    }

    pub fn size(&self) -> Size {
        self.snapshot.with(|snapshot| snapshot.size())
    }

    pub fn width(&self) -> f32 {
        self.snapshot.with(|snapshot| snapshot.width())
    }

    pub fn height(&self) -> f32 {
        self.snapshot.with(|snapshot| snapshot.height())
    }

    pub fn frame(&self) -> Option<Rect> {
        self.snapshot.with(|snapshot| snapshot.frame())
    }

    pub fn min_x(&self) -> f32 {
        self.snapshot.with(|snapshot| snapshot.min_x())
    }

    pub fn mid_x(&self) -> f32 {
        self.snapshot.with(|snapshot| snapshot.mid_x())
    }

    pub fn max_x(&self) -> f32 {
        self.snapshot.with(|snapshot| snapshot.max_x())
    }

    pub fn min_y(&self) -> f32 {
        self.snapshot.with(|snapshot| snapshot.min_y())
    }

    pub fn mid_y(&self) -> f32 {
        self.snapshot.with(|snapshot| snapshot.mid_y())
    }

    pub fn max_y(&self) -> f32 {
        self.snapshot.with(|snapshot| snapshot.max_y())
    }
}

impl Default for GeometryObserver {
    fn default() -> Self {
        Self::new()
    }
}
