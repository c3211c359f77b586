//! Recording stand-ins for the host side of a drag recognizer.

use dragcycle_foundation::{
    DragEvent, DragGestureNode, Orientation, PointerType, VelocityTracker, ViewConfiguration,
};
use dragcycle_geometry::{Point, Velocity};

/// Drag node that records every event it receives.
///
/// All the behaviour switches a node exposes are plain fields so tests can
/// flip them between frames.
#[derive(Clone, Debug)]
pub struct RecordingDragNode {
    pub events: Vec<DragEvent>,
    pub immediate_drag_start: bool,
    pub drag_enabled: bool,
    pub orientation: Option<Orientation>,
    pub position_on_screen: Point,
    pub view_configuration: ViewConfiguration,
}

impl Default for RecordingDragNode {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDragNode {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            immediate_drag_start: false,
            drag_enabled: true,
            orientation: None,
            position_on_screen: Point::ZERO,
            view_configuration: ViewConfiguration::default(),
        }
    }

    pub fn immediate(mut self) -> Self {
        self.immediate_drag_start = true;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.view_configuration = self.view_configuration.with_touch_slop(touch_slop);
        self
    }

    pub fn with_drag_disabled(mut self) -> Self {
        self.drag_enabled = false;
        self
    }

    pub fn started_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, DragEvent::Started { .. }))
            .count()
    }

    pub fn cancelled_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, DragEvent::Cancelled))
            .count()
    }

    pub fn start_point(&self) -> Option<Point> {
        self.events.iter().find_map(|event| match event {
            DragEvent::Started { start_point } => Some(*start_point),
            _ => None,
        })
    }

    pub fn deltas(&self) -> Vec<Point> {
        self.events
            .iter()
            .filter_map(|event| match event {
                DragEvent::Delta { delta, .. } => Some(*delta),
                _ => None,
            })
            .collect()
    }

    /// Sum of every delta delivered so far.
    pub fn total_delta(&self) -> Point {
        self.deltas()
            .into_iter()
            .fold(Point::ZERO, |sum, delta| sum + delta)
    }

    pub fn stop_velocity(&self) -> Option<Velocity> {
        self.events.iter().rev().find_map(|event| match event {
            DragEvent::Stopped { velocity, .. } => Some(*velocity),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl DragGestureNode for RecordingDragNode {
    fn allows_immediate_drag_start(&self) -> bool {
        self.immediate_drag_start
    }

    fn can_drag(&self, _pointer_type: PointerType) -> bool {
        self.drag_enabled
    }

    fn orientation_lock(&self) -> Option<Orientation> {
        self.orientation
    }

    fn position_on_screen(&self) -> Point {
        self.position_on_screen
    }

    fn view_configuration(&self) -> ViewConfiguration {
        self.view_configuration
    }

    fn on_drag_event(&mut self, event: DragEvent) {
        log::trace!("recorded {:?}", event);
        self.events.push(event);
    }
}

/// Velocity tracker that keeps every sample it was ever given.
///
/// `log` survives resets so tests can inspect the samples of a finished
/// cycle; `estimate_velocity` answers with the configured `velocity`.
#[derive(Clone, Debug, Default)]
pub struct RecordingVelocityTracker {
    pub log: Vec<(u64, Point)>,
    pub resets: usize,
    pub velocity: Velocity,
}

impl RecordingVelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reporting(velocity: Velocity) -> Self {
        Self {
            velocity,
            ..Self::default()
        }
    }

    pub fn positions(&self) -> Vec<Point> {
        self.log.iter().map(|(_, position)| *position).collect()
    }
}

impl VelocityTracker for RecordingVelocityTracker {
    fn add_sample(&mut self, time_ms: u64, position: Point) {
        self.log.push((time_ms, position));
    }

    fn estimate_velocity(&self, maximum: Velocity) -> Velocity {
        Velocity::new(
            self.velocity.x.clamp(-maximum.x, maximum.x),
            self.velocity.y.clamp(-maximum.y, maximum.y),
        )
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summaries_follow_recorded_events() {
        let mut node = RecordingDragNode::new();
        node.on_drag_event(DragEvent::Started {
            start_point: Point::new(1.0, 1.0),
        });
        node.on_drag_event(DragEvent::Delta {
            delta: Point::new(0.0, 3.0),
            from_smoothing: true,
        });
        node.on_drag_event(DragEvent::Delta {
            delta: Point::new(0.0, 4.0),
            from_smoothing: true,
        });
        node.on_drag_event(DragEvent::Stopped {
            velocity: Velocity::new(0.0, 120.0),
            from_smoothing: true,
        });

        assert_eq!(node.started_count(), 1);
        assert_eq!(node.start_point(), Some(Point::new(1.0, 1.0)));
        assert_eq!(node.total_delta(), Point::new(0.0, 7.0));
        assert_eq!(node.stop_velocity(), Some(Velocity::new(0.0, 120.0)));
    }

    #[test]
    fn recording_tracker_clamps_to_maximum() {
        let tracker = RecordingVelocityTracker::reporting(Velocity::new(-9000.0, 50.0));
        assert_eq!(
            tracker.estimate_velocity(Velocity::new(8000.0, 8000.0)),
            Velocity::new(-8000.0, 50.0)
        );
    }
}
