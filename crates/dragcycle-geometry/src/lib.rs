//! Pure math for pointer positions and velocities in dragcycle
//!
//! This crate contains the 2-D offset and velocity primitives shared by the
//! gesture recognizers and their hosts.

mod geometry;
mod unit;

pub use geometry::*;
pub use unit::*;

pub mod prelude {
    pub use crate::geometry::Point;
    pub use crate::unit::Velocity;
}
