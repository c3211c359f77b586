//! Touch slop detection.
//!
//! A press only becomes a drag once it has travelled far enough from where it
//! went down. The detector accumulates per-frame position changes and, once
//! the accumulated distance reaches the slop, reports how far past the slop
//! the pointer already is so the first drag delta does not jump.

use super::axis::Orientation;
use dragcycle_geometry::Point;

#[derive(Clone, Debug, PartialEq)]
pub struct TouchSlopDetector {
    orientation: Option<Orientation>,
    total_position_change: Point,
}

impl Default for TouchSlopDetector {
    fn default() -> Self {
        Self::new(None)
    }
}

impl TouchSlopDetector {
    pub fn new(orientation: Option<Orientation>) -> Self {
        Self {
            orientation,
            total_position_change: Point::ZERO,
        }
    }

    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Option<Orientation>) {
        self.orientation = orientation;
    }

    pub fn total_position_change(&self) -> Point {
        self.total_position_change
    }

    /// Accumulates `current - previous` and checks it against `touch_slop`.
    ///
    /// Returns the post-slop offset once the accumulated distance (along the
    /// locked axis, or Euclidean when unlocked) reaches `touch_slop`. The
    /// detector is spent after that and must be [`reset`](Self::reset) before
    /// it is used for another episode.
    pub fn add_positions(
        &mut self,
        current: Point,
        previous: Point,
        touch_slop: f32,
    ) -> Option<Point> {
        self.total_position_change += current - previous;

        let in_direction = match self.orientation {
            Some(orientation) => orientation.main_axis(self.total_position_change).abs(),
            None => self.total_position_change.distance(),
        };

        if in_direction >= touch_slop {
            Some(self.post_slop_offset(touch_slop))
        } else {
            None
        }
    }

    /// Re-seeds the accumulator, e.g. with movement that already happened
    /// while another recognizer owned the gesture.
    pub fn reset(&mut self, initial_position_change: Point) {
        self.total_position_change = initial_position_change;
    }

    fn post_slop_offset(&self, touch_slop: f32) -> Point {
        let total = self.total_position_change;
        match self.orientation {
            None => {
                let distance = total.distance();
                if distance == 0.0 {
                    return Point::ZERO;
                }
                total - total / distance * touch_slop
            }
            Some(orientation) => {
                let main = orientation.main_axis(total);
                let cross = orientation.cross_axis(total);
                orientation.point(main - main.signum() * touch_slop, cross)
            }
        }
    }
}
