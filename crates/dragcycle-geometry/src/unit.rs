//! Unit types: Velocity

/// Two-dimensional velocity in pixels per second.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };

    /// Replaces NaN or infinite components with zero so downstream fling
    /// animations never see an unusable value.
    pub fn to_valid(self) -> Self {
        fn valid(component: f32) -> f32 {
            if component.is_finite() {
                component
            } else {
                0.0
            }
        }
        Self::new(valid(self.x), valid(self.y))
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_valid_zeroes_non_finite_components() {
        let v = Velocity::new(f32::NAN, 12.0).to_valid();
        assert_eq!(v, Velocity::new(0.0, 12.0));

        let v = Velocity::new(3.0, f32::INFINITY).to_valid();
        assert_eq!(v, Velocity::new(3.0, 0.0));
    }

    #[test]
    fn magnitude_matches_pythagoras() {
        assert_eq!(Velocity::new(-6.0, 8.0).magnitude(), 10.0);
    }
}
