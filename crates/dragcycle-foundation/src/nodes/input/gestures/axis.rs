//! Orientation locks and primary-axis projection.

use crate::nodes::input::types::PrimaryDirectionalMotionAxis;
use dragcycle_geometry::Point;

/// Orientation for dragging - horizontal or vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Component of `point` along this orientation.
    pub fn main_axis(self, point: Point) -> f32 {
        match self {
            Orientation::Horizontal => point.x,
            Orientation::Vertical => point.y,
        }
    }

    /// Component of `point` across this orientation.
    pub fn cross_axis(self, point: Point) -> f32 {
        match self {
            Orientation::Horizontal => point.y,
            Orientation::Vertical => point.x,
        }
    }

    /// Builds a point from main and cross axis components.
    pub fn point(self, main: f32, cross: f32) -> Point {
        match self {
            Orientation::Horizontal => Point::new(main, cross),
            Orientation::Vertical => Point::new(cross, main),
        }
    }
}

/// Remaps `point` onto the consumer's orientation using the surface's primary
/// axis.
///
/// Without an orientation lock, or without a primary axis hint, the point is
/// returned unchanged. Otherwise the hinted raw component is moved onto the
/// locked axis and the other component is dropped.
///
/// Used alike for current positions, previous positions and plain offsets so
/// all three stay in the same coordinate space.
pub fn project_on_axis(
    point: Point,
    orientation: Option<Orientation>,
    primary_axis: Option<PrimaryDirectionalMotionAxis>,
) -> Point {
    let Some(orientation) = orientation else {
        return point;
    };
    let value = match primary_axis {
        Some(PrimaryDirectionalMotionAxis::X) => point.x,
        Some(PrimaryDirectionalMotionAxis::Y) => point.y,
        None => return point,
    };
    orientation.point(value, 0.0)
}

/// Magnitude of `offset` along `orientation`, or its length when unlocked.
pub fn axis_magnitude(offset: Point, orientation: Option<Orientation>) -> f32 {
    match orientation {
        Some(orientation) => orientation.main_axis(offset).abs(),
        None => offset.distance(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlocked_projection_is_identity() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(project_on_axis(p, None, Some(PrimaryDirectionalMotionAxis::X)), p);
    }

    #[test]
    fn missing_hint_keeps_the_point() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(project_on_axis(p, Some(Orientation::Vertical), None), p);
    }

    #[test]
    fn hinted_component_moves_onto_locked_axis() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(
            project_on_axis(
                p,
                Some(Orientation::Vertical),
                Some(PrimaryDirectionalMotionAxis::X)
            ),
            Point::new(0.0, 3.0)
        );
        assert_eq!(
            project_on_axis(
                p,
                Some(Orientation::Horizontal),
                Some(PrimaryDirectionalMotionAxis::Y)
            ),
            Point::new(4.0, 0.0)
        );
    }

    #[test]
    fn magnitude_follows_lock() {
        let offset = Point::new(-3.0, 4.0);
        assert_eq!(axis_magnitude(offset, None), 5.0);
        assert_eq!(axis_magnitude(offset, Some(Orientation::Horizontal)), 3.0);
        assert_eq!(axis_magnitude(offset, Some(Orientation::Vertical)), 4.0);
    }
}
