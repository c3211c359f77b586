pub mod dispatcher;
pub mod gestures;
pub mod types;

pub use dispatcher::{PassDispatcher, PointerInputHandler};
pub use types::{
    IndirectPointerInputChange, IndirectTouchEvent, PointerEventPass, PointerId, PointerType,
    PrimaryDirectionalMotionAxis,
};

pub mod prelude {
    pub use super::dispatcher::{PassDispatcher, PointerInputHandler};
    pub use super::gestures::{
        DragCycleDetector, DragEvent, DragGestureNode, Draggable, Orientation,
    };
    pub use super::types::{
        IndirectPointerInputChange, IndirectTouchEvent, PointerEventPass, PointerId, PointerType,
        PrimaryDirectionalMotionAxis,
    };
}
