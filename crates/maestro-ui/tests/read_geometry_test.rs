//! Single-view read paths driven through the headless host.

use maestro_testing::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn read_size_tracks_frames_in_each_coordinate_space() {
    let mut host = TestHost::new(Size::new(600.0, 80.0))
        .with_origin(Point::new(20.0, 300.0))
        .with_spacing(10.0);
    let global = GeometryObserver::new().with_coordinate_space(CoordinateSpace::Global);
    let in_row = GeometryObserver::new().with_coordinate_space(CoordinateSpace::named(ROW_SPACE));
    let local = GeometryObserver::new();

    host.add_view(Size::new(100.0, 30.0), Modifier::empty());
    host.add_view(
        Size::new(60.0, 30.0),
        Modifier::empty()
            .read_size(&global)
            .read_size(&in_row)
            .read_size(&local),
    );
    host.layout_pass();

    assert_eq!(global.frame(), Some(Rect::new(130.0, 300.0, 60.0, 30.0)));
    assert_eq!(in_row.frame(), Some(Rect::new(110.0, 0.0, 60.0, 30.0)));
    assert_eq!(local.frame(), Some(Rect::new(0.0, 0.0, 60.0, 30.0)));
    assert_eq!(global.size(), Size::new(60.0, 30.0));
    assert_eq!(in_row.mid_x(), 140.0);
}

#[test]
fn fill_extends_the_frame_but_reads_content_size() {
    let mut host = TestHost::new(Size::new(400.0, 100.0));
    let observer = GeometryObserver::new()
        .with_behavior(FrameBehavior::Fill)
        .with_alignment(Alignment::BOTTOM_END);
    let id = host.add_view(Size::new(40.0, 20.0), Modifier::empty().read_size(&observer));

    host.layout_pass();

    assert_eq!(host.frame(id), Ok(Rect::new(0.0, 0.0, 400.0, 100.0)));
    assert_eq!(observer.size(), Size::new(40.0, 20.0));
    assert_eq!(observer.frame(), Some(Rect::new(360.0, 80.0, 40.0, 20.0)));
}

#[test]
fn anchored_view_is_centered_in_the_remaining_space() {
    let mut host = TestHost::new(Size::new(300.0, 100.0));
    host.add_view(Size::new(100.0, 100.0), Modifier::empty());
    let id = host.add_view(
        Size::new(50.0, 20.0),
        Modifier::empty().anchored(Alignment::CENTER),
    );
    let observer = host
        .modifier(id)
        .ok()
        .and_then(Modifier::anchored_observer)
        .expect("anchored observer");

    host.layout_pass();

    assert_eq!(host.frame(id), Ok(Rect::new(100.0, 0.0, 200.0, 100.0)));
    assert_rect_approx_eq(
        observer.frame().expect("local frame"),
        Rect::new(75.0, 40.0, 50.0, 20.0),
        0.001,
        "anchored content",
    );
}

#[test]
fn read_parent_size_sees_the_row() {
    let mut host = TestHost::new(Size::new(640.0, 48.0)).with_origin(Point::new(0.0, 12.0));
    let parent = GeometryObserver::new().with_coordinate_space(CoordinateSpace::Global);
    host.add_view(Size::new(10.0, 10.0), Modifier::empty().read_parent_size(&parent));

    host.layout_pass();

    assert_eq!(parent.size(), Size::new(640.0, 48.0));
    assert_eq!(parent.frame(), Some(Rect::new(0.0, 12.0, 640.0, 48.0)));
    assert_eq!(parent.max_y(), 60.0);
}

#[test]
fn observers_notify_only_when_geometry_changes() {
    let mut host = TestHost::new(Size::new(640.0, 48.0));
    let observer = GeometryObserver::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _sub = observer.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.size()));
    host.add_view(Size::new(32.0, 32.0), Modifier::empty().read_size(&observer));

    host.layout_pass();
    host.layout_pass();
    host.layout_pass();

    assert_eq!(*seen.borrow(), vec![Size::new(32.0, 32.0)]);
}

#[test]
fn measure_binding_is_written_after_the_pass_commits() {
    let mut host = TestHost::new(Size::new(640.0, 48.0));
    let own = mutable_state_of(Size::ZERO);
    let parent = mutable_state_of(Size::ZERO);
    let writes_during_pass = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&writes_during_pass);
    let handle = host.handle();
    let _sub = own.subscribe(move |_| sink.borrow_mut().push(handle.is_in_pass()));
    host.add_view(
        Size::new(24.0, 12.0),
        Modifier::empty()
            .measure(&own)
            .measure_containing_view(&parent),
    );

    host.layout_pass();

    assert_eq!(own.get(), Size::new(24.0, 12.0));
    assert_eq!(parent.get(), Size::new(640.0, 48.0));
    assert_eq!(*writes_during_pass.borrow(), vec![false]);
    assert_eq!(host.runtime().commit_count(), 1);
    assert!(!host.runtime().has_pending());
}
