//! Drag events and the node interface a drag recognizer reports to.

use super::axis::Orientation;
use crate::nodes::input::types::PointerType;
use crate::view_configuration::ViewConfiguration;
use dragcycle_geometry::{Point, Velocity};

/// Signals emitted over one drag cycle.
///
/// Every cycle reads `Started Delta* (Stopped | Cancelled)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEvent {
    /// The gesture became a drag. `start_point` is where the drag is
    /// considered to have begun: the slop-crossing position minus whatever
    /// movement already happened past the slop.
    Started { start_point: Point },
    /// The pointer moved by `delta` since the previous event.
    Delta { delta: Point, from_smoothing: bool },
    /// The last pointer lifted normally.
    Stopped {
        velocity: Velocity,
        from_smoothing: bool,
    },
    /// Someone else took the gesture, or the recognizer was reset.
    Cancelled,
}

impl DragEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DragEvent::Stopped { .. } | DragEvent::Cancelled)
    }
}

/// The element a drag recognizer is attached to.
///
/// This is the recognizer's whole view of its host: behaviour switches,
/// layout position and platform configuration are queried through it, and
/// the resulting [`DragEvent`]s are delivered back to it.
pub trait DragGestureNode {
    /// Whether a drag should start on down without waiting for touch slop.
    /// Asked once per physical down.
    fn allows_immediate_drag_start(&self) -> bool {
        false
    }

    /// Whether a drag may start for pointers of `pointer_type`.
    fn can_drag(&self, _pointer_type: PointerType) -> bool {
        true
    }

    /// Axis the drag is locked to, if any.
    fn orientation_lock(&self) -> Option<Orientation> {
        None
    }

    /// Current position of the element on screen.
    fn position_on_screen(&self) -> Point {
        Point::ZERO
    }

    fn view_configuration(&self) -> ViewConfiguration {
        ViewConfiguration::default()
    }

    fn on_drag_event(&mut self, event: DragEvent);
}
