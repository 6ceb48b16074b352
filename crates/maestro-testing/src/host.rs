//! Headless host that lays views out in a single row.
//!
//! Every [`TestHost::layout_pass`] is bracketed by the runtime's render pass,
//! so work deferred by the modifiers runs when the pass commits, the way a
//! real host would run it at the end of a frame.

use maestro_core::{Runtime, RuntimeHandle};
use maestro_geometry::{Point, Rect, Size};
use maestro_ui::{LayoutPass, MeasuredGeometry, Modifier};
use std::fmt;

/// Named coordinate space of the row, with its origin at the row's top-left.
pub const ROW_SPACE: &str = "row";

/// Passes [`TestHost::run_until_idle`] allows before giving up.
pub const DEFAULT_MAX_PASSES: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ViewId(usize);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostError {
    Missing { id: ViewId },
    DidNotConverge { passes: usize },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Missing { id } => write!(f, "view {id} missing"),
            HostError::DidNotConverge { passes } => {
                write!(f, "layout did not settle after {passes} passes")
            }
        }
    }
}

impl std::error::Error for HostError {}

/// Lays out content of `proposal` size. `None` asks for the natural size.
type Content = Box<dyn Fn(Option<Size>) -> Size>;

struct TestView {
    content: Content,
    modifier: Modifier,
    rendered: Size,
    measured: Size,
    frame: Rect,
}

/// What one pass produced for one view.
#[derive(Clone, Copy, Debug, PartialEq)]
struct PlacedView {
    frame: Rect,
    rendered: Size,
    measured: Size,
}

pub struct TestHost {
    runtime: Runtime,
    container: Size,
    origin: Point,
    spacing: f32,
    views: Vec<TestView>,
    passes: usize,
}

impl TestHost {
    /// Host whose row spans `container`, with its own runtime.
    ///
    /// The host does not own a size registry: each equal-size modifier writes
    /// to the registry it was built with.
    pub fn new(container: Size) -> Self {
        Self {
            runtime: Runtime::default(),
            container,
            origin: Point::ZERO,
            spacing: 0.0,
            views: Vec::new(),
            passes: 0,
        }
    }

    /// Places the row at `origin` in global coordinates.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// Number of layout passes run so far.
    pub fn pass_count(&self) -> usize {
        self.passes
    }

    /// Adds a view whose content always has `size`.
    pub fn add_view(&mut self, size: Size, modifier: Modifier) -> ViewId {
        self.add_reflowing_view(move |_| size, modifier)
    }

    /// Adds a view whose content size depends on the size the host imposes.
    pub fn add_reflowing_view(
        &mut self,
        content: impl Fn(Option<Size>) -> Size + 'static,
        modifier: Modifier,
    ) -> ViewId {
        let id = ViewId(self.views.len());
        self.views.push(TestView {
            content: Box::new(content),
            modifier,
            rendered: Size::ZERO,
            measured: Size::ZERO,
            frame: Rect::from_size(Size::ZERO),
        });
        id
    }

    pub fn modifier(&self, id: ViewId) -> Result<&Modifier, HostError> {
        self.view(id).map(|view| &view.modifier)
    }

    /// Size the view was rendered at in the last pass, after size overrides.
    pub fn rendered_size(&self, id: ViewId) -> Result<Size, HostError> {
        self.view(id).map(|view| view.rendered)
    }

    /// Content size the view reported in the last pass.
    pub fn measured_size(&self, id: ViewId) -> Result<Size, HostError> {
        self.view(id).map(|view| view.measured)
    }

    /// The view's frame in row coordinates.
    pub fn frame(&self, id: ViewId) -> Result<Rect, HostError> {
        self.view(id).map(|view| view.frame)
    }

    fn view(&self, id: ViewId) -> Result<&TestView, HostError> {
        self.views.get(id.0).ok_or(HostError::Missing { id })
    }

    /// Lays out every view once and commits the pass.
    pub fn layout_pass(&mut self) {
        let _pass = self.runtime.begin_pass();
        let handle = self.runtime.handle();
        let container = MeasuredGeometry::new(self.container)
            .with_global_origin(self.origin)
            .with_named_frame(ROW_SPACE, Rect::from_size(self.container));

        let mut cursor = 0.0f32;
        for view in &mut self.views {
            let natural = (view.content)(None);
            let overrides = view.modifier.size_override();
            let (measured, rendered) = if overrides.is_empty() {
                (natural, natural)
            } else {
                let measured = (view.content)(Some(overrides.apply(natural)));
                (measured, overrides.apply(measured))
            };

            let available = Size::new(
                (self.container.width - cursor).max(0.0),
                self.container.height,
            );
            let request = view.modifier.frame_request().unwrap_or_default();
            let (slot, offset) = request.resolve(available, rendered);
            let content_origin = Point::new(cursor + offset.x, offset.y);

            let geometry = MeasuredGeometry::new(measured)
                .with_local_origin(offset)
                .with_global_origin(Point::new(
                    self.origin.x + content_origin.x,
                    self.origin.y + content_origin.y,
                ))
                .with_named_frame(ROW_SPACE, Rect::from_origin_size(content_origin, measured));
            view.modifier
                .dispatch_layout(&LayoutPass::new(&geometry, &handle).with_container(&container));

            view.rendered = rendered;
            view.measured = measured;
            view.frame = Rect::new(cursor, 0.0, slot.width, slot.height);
            cursor += slot.width + self.spacing;
        }
        self.passes += 1;
        log::trace!("layout pass {} placed {} view(s)", self.passes, self.views.len());
    }

    /// Runs passes until one repeats the previous pass with nothing pending.
    ///
    /// Returns the number of passes run by this call.
    pub fn run_until_idle(&mut self, max_passes: usize) -> Result<usize, HostError> {
        let mut previous: Option<Vec<PlacedView>> = None;
        for pass in 1..=max_passes {
            self.layout_pass();
            let placed = self.placed();
            if previous.as_ref() == Some(&placed) && !self.runtime.has_pending() {
                log::debug!("layout settled after {pass} pass(es)");
                return Ok(pass);
            }
            previous = Some(placed);
        }
        log::warn!("layout still changing after {max_passes} passes");
        Err(HostError::DidNotConverge { passes: max_passes })
    }

    fn placed(&self) -> Vec<PlacedView> {
        self.views
            .iter()
            .map(|view| PlacedView {
                frame: view.frame,
                rendered: view.rendered,
                measured: view.measured,
            })
            .collect()
    }
}

impl fmt::Debug for TestHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestHost")
            .field("container", &self.container)
            .field("origin", &self.origin)
            .field("views", &self.views.len())
            .field("passes", &self.passes)
            .finish()
    }
}
