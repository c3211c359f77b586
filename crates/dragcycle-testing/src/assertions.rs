//! Assertion utilities for gesture tests
//!
//! Drag output goes through smoothing and velocity estimation, so most checks
//! compare with a tolerance rather than exactly.

use dragcycle_foundation::DragEvent;
use dragcycle_geometry::{Point, Velocity};

/// Assert that a value is within an expected range.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that a point is approximately equal to another.
pub fn assert_point_approx_eq(actual: Point, expected: Point, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
}

pub fn assert_velocity_approx_eq(actual: Velocity, expected: Velocity, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - vx", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - vy", msg));
}

/// Assert that the callback stream is a sequence of well formed drag cycles.
///
/// Every cycle is `Started Delta* (Stopped | Cancelled)`; the last one may
/// still be open.
pub fn assert_well_formed_cycles(events: &[DragEvent], msg: &str) {
    let mut open = false;
    for (index, event) in events.iter().enumerate() {
        match event {
            DragEvent::Started { .. } => {
                assert!(!open, "{}: Started at {} inside an open cycle: {:?}", msg, index, events);
                open = true;
            }
            _ => {
                assert!(open, "{}: {:?} at {} outside a cycle: {:?}", msg, event, index, events);
                if event.is_terminal() {
                    open = false;
                }
            }
        }
    }
}

/// Assert that a collection has an expected count.
pub fn assert_count<T: std::fmt::Debug>(items: &[T], expected: usize, msg: &str) {
    assert_eq!(
        items.len(),
        expected,
        "{}: expected {} items, got {}: {:?}",
        msg,
        expected,
        items.len(),
        items
    );
}
