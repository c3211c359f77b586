//! Velocity samples follow the finger even when the dragged element moves.

use dragcycle_foundation::{
    DragCycleDetector, Draggable, IndirectTouchEvent, PassDispatcher, PointerInputHandler,
};
use dragcycle_geometry::Point;
use dragcycle_testing::{
    assert_point_approx_eq, GestureScript, RecordingDragNode, RecordingVelocityTracker,
};

type TrackedDraggable = Draggable<RecordingDragNode, RecordingVelocityTracker>;

fn tracked_draggable() -> TrackedDraggable {
    Draggable::with_detector(
        RecordingDragNode::new().immediate(),
        DragCycleDetector::with_velocity_tracker(RecordingVelocityTracker::new()),
    )
}

fn run(draggable: &mut TrackedDraggable, mut event: IndirectTouchEvent) {
    let handlers: &mut [&mut dyn PointerInputHandler] = &mut [draggable];
    PassDispatcher::dispatch(&mut event, handlers);
}

/// Drives a three-move vertical drag, shifting the element by `drift` on
/// screen before every move.
fn drag_with_drift(drift: Point) -> TrackedDraggable {
    let mut draggable = tracked_draggable();
    let mut script = GestureScript::new();
    draggable.node_mut().position_on_screen = Point::new(0.0, 200.0);

    run(&mut draggable, script.down(0, Point::ZERO));
    for _ in 0..3 {
        let moved = draggable.node().position_on_screen + drift;
        draggable.node_mut().position_on_screen = moved;
        run(&mut draggable, script.move_by(0, Point::new(0.0, 5.0)));
    }
    run(&mut draggable, script.up(0));
    draggable
}

#[test]
fn samples_are_offset_by_cumulative_element_drift() {
    let still = drag_with_drift(Point::ZERO);
    let scrolled = drag_with_drift(Point::new(0.0, -5.0));

    let still_samples = still.detector().velocity_tracker().positions();
    let scrolled_samples = scrolled.detector().velocity_tracker().positions();
    assert_eq!(still_samples.len(), 5);
    assert_eq!(scrolled_samples.len(), still_samples.len());

    // down, three moves, release
    let expected_drift = [0.0, -5.0, -10.0, -15.0, -15.0];
    for ((still, scrolled), drift) in still_samples
        .iter()
        .zip(&scrolled_samples)
        .zip(expected_drift)
    {
        assert_point_approx_eq(
            *scrolled - *still,
            Point::new(0.0, drift),
            1e-4,
            "sample drift",
        );
    }
    assert_eq!(scrolled.detector().node_offset(), Point::new(0.0, -15.0));
}

#[test]
fn drift_does_not_change_reported_deltas() {
    let still = drag_with_drift(Point::ZERO);
    let scrolled = drag_with_drift(Point::new(0.0, -5.0));

    assert_eq!(still.node().deltas(), scrolled.node().deltas());
    assert_eq!(still.node().total_delta(), Point::new(0.0, 15.0));
}

#[test]
fn new_drag_starts_with_zero_offset() {
    let mut draggable = drag_with_drift(Point::new(0.0, -5.0));
    let mut script = GestureScript::new();
    script.advance(1_000);

    run(&mut draggable, script.down(0, Point::ZERO));

    assert_eq!(draggable.detector().node_offset(), Point::ZERO);
}
