use super::*;
use crate::host::MeasuredGeometry;
use maestro_core::{mutable_state_of, Extent, GroupKey, Runtime, RuntimeScheduler, SizeRegistry};
use maestro_geometry::{
    Alignment, CoordinateSpace, FrameBehavior, GeometrySnapshot, Point, Rect,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct CountingScheduler {
    frames: AtomicUsize,
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.frames.fetch_add(1, Ordering::SeqCst);
    }
}

struct Fixed {
    width: Option<f32>,
    height: Option<f32>,
}

impl GeometryElement for Fixed {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn size_override(&self) -> SizeOverride {
        SizeOverride {
            width: self.width,
            height: self.height,
        }
    }
}

fn fixed(width: Option<f32>, height: Option<f32>) -> Modifier {
    Modifier::with_element(Fixed { width, height })
}

#[test]
fn then_keeps_chain_order() {
    let observer = GeometryObserver::new();
    let binding = mutable_state_of(Size::ZERO);
    let modifier = Modifier::empty()
        .read_size(&observer)
        .measure(&binding)
        .read_parent_size(&observer)
        .anchored(Alignment::TOP_START);

    assert_eq!(
        modifier.element_names(),
        vec!["readSize", "measure", "readParentSize", "anchored"]
    );
    assert!(Modifier::empty().is_empty());
    assert_eq!(modifier.len(), 4);
}

#[test]
fn later_size_overrides_win_per_axis() {
    let modifier = fixed(Some(10.0), Some(20.0)).then(fixed(Some(30.0), None));
    assert_eq!(
        modifier.size_override(),
        SizeOverride {
            width: Some(30.0),
            height: Some(20.0),
        }
    );
    assert_eq!(
        modifier.size_override().apply(Size::new(1.0, 2.0)),
        Size::new(30.0, 20.0)
    );
    assert!(Modifier::empty().size_override().is_empty());
}

#[test]
fn read_size_records_size_and_frame_in_observer_space() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let observer = GeometryObserver::new().with_coordinate_space(CoordinateSpace::Global);
    let modifier = Modifier::empty().read_size(&observer);

    let view = MeasuredGeometry::new(Size::new(80.0, 24.0))
        .with_global_origin(Point::new(200.0, 40.0));
    modifier.dispatch_layout(&LayoutPass::new(&view, &handle));

    assert_eq!(
        observer.snapshot(),
        GeometrySnapshot::new(Size::new(80.0, 24.0))
            .unwrap()
            .with_frame(Rect::new(200.0, 40.0, 80.0, 24.0))
    );
    assert_eq!(observer.mid_x(), 240.0);
    assert_eq!(observer.max_y(), 64.0);
}

#[test]
fn unknown_coordinate_space_records_size_only() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let observer = GeometryObserver::new().with_coordinate_space(CoordinateSpace::named("scroll"));
    let view = MeasuredGeometry::new(Size::new(8.0, 8.0));

    Modifier::empty()
        .read_size(&observer)
        .dispatch_layout(&LayoutPass::new(&view, &handle));

    assert_eq!(observer.size(), Size::new(8.0, 8.0));
    assert_eq!(observer.frame(), None);
}

#[test]
fn read_parent_size_reads_the_container() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let observer = GeometryObserver::new();
    let modifier = Modifier::empty().read_parent_size(&observer);
    let view = MeasuredGeometry::new(Size::new(10.0, 10.0));
    let container = MeasuredGeometry::new(Size::new(300.0, 120.0));

    modifier.dispatch_layout(&LayoutPass::new(&view, &handle));
    assert_eq!(observer.size(), Size::ZERO);

    modifier.dispatch_layout(&LayoutPass::new(&view, &handle).with_container(&container));
    assert_eq!(observer.size(), Size::new(300.0, 120.0));
    assert_eq!(modifier.frame_request(), None);
}

#[test]
fn invalid_geometry_is_skipped() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let observer = GeometryObserver::new();
    observer.record(GeometrySnapshot::new(Size::new(5.0, 5.0)).unwrap());
    let modifier = Modifier::empty().read_size(&observer);

    let view = MeasuredGeometry::new(Size::new(-1.0, 5.0));
    modifier.dispatch_layout(&LayoutPass::new(&view, &handle));
    let view = MeasuredGeometry::new(Size::new(f32::NAN, 5.0));
    modifier.dispatch_layout(&LayoutPass::new(&view, &handle));

    assert_eq!(observer.size(), Size::new(5.0, 5.0));
}

#[test]
fn fill_observer_requests_filled_frame() {
    let observer = GeometryObserver::new()
        .with_behavior(FrameBehavior::Fill)
        .with_alignment(Alignment::BOTTOM_END);
    let modifier = Modifier::empty().read_size(&observer);
    let request = modifier.frame_request().expect("read_size requests a frame");

    assert_eq!(request.behavior, FrameBehavior::Fill);
    assert_eq!(
        request.content_rect(Size::new(100.0, 100.0), Size::new(10.0, 10.0)),
        Rect::new(90.0, 90.0, 10.0, 10.0)
    );
}

#[test]
fn anchored_exposes_its_private_observer() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let modifier = Modifier::empty().anchored(Alignment::CENTER);
    let observer = modifier
        .anchored_observer()
        .expect("anchored element present");
    assert_eq!(
        modifier.frame_request(),
        Some(FrameRequest::new(FrameBehavior::Fill, Alignment::CENTER))
    );

    let view = MeasuredGeometry::new(Size::new(20.0, 20.0)).with_local_origin(Point::new(40.0, 40.0));
    modifier.dispatch_layout(&LayoutPass::new(&view, &handle));
    assert_eq!(observer.frame(), Some(Rect::new(40.0, 40.0, 20.0, 20.0)));
}

#[test]
fn measure_writes_one_commit_later() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let own = mutable_state_of(Size::ZERO);
    let parent = mutable_state_of(Size::ZERO);
    let modifier = Modifier::empty()
        .measure(&own)
        .measure_containing_view(&parent);
    let view = MeasuredGeometry::new(Size::new(12.0, 6.0));
    let container = MeasuredGeometry::new(Size::new(400.0, 6.0));

    {
        let _pass = runtime.begin_pass();
        modifier.dispatch_layout(&LayoutPass::new(&view, &handle).with_container(&container));
        assert_eq!(own.get(), Size::ZERO);
        assert_eq!(parent.get(), Size::ZERO);
    }

    assert_eq!(own.get(), Size::new(12.0, 6.0));
    assert_eq!(parent.get(), Size::new(400.0, 6.0));
}

#[test]
fn equal_widths_registers_group_and_exposes_participant() {
    let registry = Rc::new(SizeRegistry::new());
    let modifier = Modifier::empty().equal_widths_in(&registry, Extent::Greatest, "row1");
    let participant = modifier
        .equal_size_participant()
        .expect("equal size element present");

    assert_eq!(modifier.element_names(), vec!["equalWidths"]);
    assert!(registry.contains(GroupKey::new("row1")));
    assert_eq!(participant.key(), GroupKey::new("row1"));
    assert!(modifier.size_override().is_empty());
}

#[test]
fn equal_size_overrides_both_axes_once_measured() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let registry = Rc::new(SizeRegistry::new());
    let modifier = Modifier::empty().equal_size_in(&registry, Extent::Greatest, &7u8);
    let view = MeasuredGeometry::new(Size::new(30.0, 40.0));

    {
        let _pass = runtime.begin_pass();
        modifier.dispatch_layout(&LayoutPass::new(&view, &handle));
        assert_eq!(registry.get(GroupKey::new(&7u8)), Size::ZERO);
    }

    assert_eq!(registry.get(GroupKey::new(&7u8)), Size::new(30.0, 40.0));
    assert_eq!(
        modifier.size_override(),
        SizeOverride {
            width: Some(30.0),
            height: Some(40.0),
        }
    );
}

#[test]
fn stable_equal_width_view_stops_requesting_frames() {
    let scheduler = Arc::new(CountingScheduler::default());
    let runtime = Runtime::new(scheduler.clone());
    let handle = runtime.handle();
    let registry = Rc::new(SizeRegistry::new());
    let modifier = Modifier::empty().equal_widths_in(&registry, Extent::Greatest, "stable");
    let view = MeasuredGeometry::new(Size::new(50.0, 10.0));

    let mut frames = Vec::new();
    for _ in 0..5 {
        {
            let _pass = runtime.begin_pass();
            modifier.dispatch_layout(&LayoutPass::new(&view, &handle));
        }
        frames.push(scheduler.frames.load(Ordering::SeqCst));
    }

    // One frame to render the first measurement, then nothing.
    assert_eq!(frames, vec![1, 1, 1, 1, 1]);
    assert_eq!(registry.write_count(), 1);
    assert!(!runtime.needs_frame());
    assert!(!runtime.has_pending());
}

#[test]
fn growing_member_requests_a_frame_for_the_new_width() {
    let scheduler = Arc::new(CountingScheduler::default());
    let runtime = Runtime::new(scheduler.clone());
    let handle = runtime.handle();
    let registry = Rc::new(SizeRegistry::new());
    let modifier = Modifier::empty().equal_widths_in(&registry, Extent::Greatest, "grow");

    for width in [50.0, 50.0, 70.0, 70.0] {
        let view = MeasuredGeometry::new(Size::new(width, 10.0));
        let _pass = runtime.begin_pass();
        modifier.dispatch_layout(&LayoutPass::new(&view, &handle));
    }

    assert_eq!(scheduler.frames.load(Ordering::SeqCst), 2);
    assert_eq!(registry.get(GroupKey::new("grow")).width, 70.0);
}
