//! Assertion helpers for host-driven tests.

use crate::host::{TestHost, ViewId};
use maestro_geometry::{Rect, Size};

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{msg}: expected {expected} (±{tolerance}), got {actual} (diff: {diff})"
    );
}

pub fn assert_rect_approx_eq(actual: Rect, expected: Rect, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{msg} - x"));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{msg} - y"));
    assert_approx_eq(actual.width, expected.width, tolerance, &format!("{msg} - width"));
    assert_approx_eq(actual.height, expected.height, tolerance, &format!("{msg} - height"));
}

/// Assert that every view in `ids` was rendered `width` wide in the last pass.
pub fn assert_rendered_widths(host: &TestHost, ids: &[ViewId], width: f32) {
    for &id in ids {
        match host.rendered_size(id) {
            Ok(size) => assert_eq!(size.width, width, "rendered width of view {id}"),
            Err(err) => panic!("{err}"),
        }
    }
}

/// Assert that every view in `ids` was rendered `height` tall in the last pass.
pub fn assert_rendered_heights(host: &TestHost, ids: &[ViewId], height: f32) {
    for &id in ids {
        match host.rendered_size(id) {
            Ok(size) => assert_eq!(size.height, height, "rendered height of view {id}"),
            Err(err) => panic!("{err}"),
        }
    }
}

pub fn assert_rendered_sizes(host: &TestHost, ids: &[ViewId], expected: Size) {
    for &id in ids {
        match host.rendered_size(id) {
            Ok(size) => assert_eq!(size, expected, "rendered size of view {id}"),
            Err(err) => panic!("{err}"),
        }
    }
}
