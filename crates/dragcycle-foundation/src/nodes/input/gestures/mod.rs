pub mod axis;
pub mod drag;
pub mod drag_cycle;
pub mod draggable;
pub mod smoothing;
pub mod touch_slop;

pub use axis::{axis_magnitude, project_on_axis, Orientation};
pub use drag::{DragEvent, DragGestureNode};
pub use drag_cycle::{DragCycleDetector, DragDetectionState, SlopDecision};
pub use draggable::Draggable;
pub use smoothing::{EventPositionSmoother, OffsetSmoother};
pub use touch_slop::TouchSlopDetector;
