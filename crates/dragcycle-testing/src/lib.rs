//! Testing utilities for the dragcycle gesture recognizers

pub mod assertions;
pub mod handler;
pub mod node;
pub mod script;

pub use assertions::*;
pub use handler::ConsumingHandler;
pub use node::{RecordingDragNode, RecordingVelocityTracker};
pub use script::GestureScript;

pub mod prelude {
    pub use crate::assertions;
    pub use crate::handler::ConsumingHandler;
    pub use crate::node::{RecordingDragNode, RecordingVelocityTracker};
    pub use crate::script::GestureScript;
}
