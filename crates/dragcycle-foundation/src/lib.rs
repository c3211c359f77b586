//! Foundation for dragcycle: indirect touch input, drag recognition and
//! velocity tracking.

pub mod gesture_constants;
pub mod nodes;
pub mod velocity_tracker;
pub mod view_configuration;

// Re-export commonly used items
pub use gesture_constants::*;
pub use nodes::input::gestures::{
    DragCycleDetector, DragDetectionState, DragEvent, DragGestureNode, Draggable, Orientation,
};
pub use nodes::input::{
    IndirectPointerInputChange, IndirectTouchEvent, PassDispatcher, PointerEventPass, PointerId,
    PointerInputHandler, PointerType, PrimaryDirectionalMotionAxis,
};
pub use velocity_tracker::{ImpulseVelocityTracker, VelocityTracker, VelocityTracker1D};
pub use view_configuration::ViewConfiguration;

pub mod prelude {
    pub use crate::nodes::input::prelude::*;
    pub use crate::velocity_tracker::{ImpulseVelocityTracker, VelocityTracker};
    pub use crate::view_configuration::ViewConfiguration;
    pub use dragcycle_geometry::{Point, Velocity};
}
