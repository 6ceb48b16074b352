//! The boundary between modifiers and the host's layout pass.

use maestro_core::collections::map::HashMap;
use maestro_core::RuntimeHandle;
use maestro_geometry::{CoordinateSpace, Point, Rect, Size};

/// Geometry the host resolved for one view.
pub trait GeometryProxy {
    /// Size of the view's content.
    fn size(&self) -> Size;

    /// The view's frame expressed in `space`, or `None` if the host does not
    /// know that space.
    fn frame_in(&self, space: &CoordinateSpace) -> Option<Rect>;
}

/// Plain-data [`GeometryProxy`] for hosts that resolve frames up front.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeasuredGeometry {
    size: Size,
    local: Option<Rect>,
    global: Option<Rect>,
    named: HashMap<String, Rect>,
}

impl MeasuredGeometry {
    /// Geometry with a local frame at the origin and no other spaces.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            local: Some(Rect::from_size(size)),
            global: None,
            named: HashMap::default(),
        }
    }

    pub fn with_local_origin(mut self, origin: Point) -> Self {
        self.local = Some(Rect::from_origin_size(origin, self.size));
        self
    }

    pub fn with_global_origin(mut self, origin: Point) -> Self {
        self.global = Some(Rect::from_origin_size(origin, self.size));
        self
    }

    pub fn with_named_frame(mut self, name: impl Into<String>, frame: Rect) -> Self {
        self.named.insert(name.into(), frame);
        self
    }
}

impl GeometryProxy for MeasuredGeometry {
    fn size(&self) -> Size {
        self.size
    }

    fn frame_in(&self, space: &CoordinateSpace) -> Option<Rect> {
        match space {
            CoordinateSpace::Local => self.local,
            CoordinateSpace::Global => self.global,
            CoordinateSpace::Named(name) => self.named.get(name).copied(),
        }
    }
}

/// What the host hands to [`Modifier::dispatch_layout`](crate::Modifier::dispatch_layout)
/// once a view's geometry is resolved.
#[derive(Clone, Copy)]
pub struct LayoutPass<'a> {
    view: &'a dyn GeometryProxy,
    container: Option<&'a dyn GeometryProxy>,
    runtime: &'a RuntimeHandle,
}

impl<'a> LayoutPass<'a> {
    pub fn new(view: &'a dyn GeometryProxy, runtime: &'a RuntimeHandle) -> Self {
        Self {
            view,
            container: None,
            runtime,
        }
    }

    pub fn with_container(mut self, container: &'a dyn GeometryProxy) -> Self {
        self.container = Some(container);
        self
    }

    pub fn view(&self) -> &'a dyn GeometryProxy {
        self.view
    }

    /// Geometry of the view that contains the decorated view, if the host has one.
    pub fn container(&self) -> Option<&'a dyn GeometryProxy> {
        self.container
    }

    pub fn runtime(&self) -> &'a RuntimeHandle {
        self.runtime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measured_geometry_answers_known_spaces_only() {
        let geometry = MeasuredGeometry::new(Size::new(40.0, 10.0))
            .with_local_origin(Point::new(5.0, 0.0))
            .with_global_origin(Point::new(105.0, 50.0))
            .with_named_frame("row", Rect::new(5.0, 0.0, 40.0, 10.0));

        assert_eq!(
            geometry.frame_in(&CoordinateSpace::Local),
            Some(Rect::new(5.0, 0.0, 40.0, 10.0))
        );
        assert_eq!(
            geometry.frame_in(&CoordinateSpace::Global),
            Some(Rect::new(105.0, 50.0, 40.0, 10.0))
        );
        assert_eq!(
            geometry.frame_in(&CoordinateSpace::named("row")),
            Some(Rect::new(5.0, 0.0, 40.0, 10.0))
        );
        assert_eq!(geometry.frame_in(&CoordinateSpace::named("scroll")), None);
    }

    #[test]
    fn new_geometry_has_no_global_frame() {
        let geometry = MeasuredGeometry::new(Size::new(1.0, 1.0));
        assert_eq!(geometry.frame_in(&CoordinateSpace::Global), None);
        assert_eq!(geometry.size(), Size::new(1.0, 1.0));
    }
}
