//! Device-dependent gesture configuration.

use crate::gesture_constants::{MAX_FLING_VELOCITY, TOUCH_SLOP};

/// Platform constants consulted by gesture recognizers.
///
/// Mirrors the subset of Android's `ViewConfiguration` the drag recognizer
/// needs. Nodes report one of these per query, so a host can change it at
/// runtime (e.g. on a density change) without rebuilding recognizers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfiguration {
    /// Distance in pixels a pointer must travel before a drag starts.
    pub touch_slop: f32,
    /// Upper bound, per axis, for the velocity reported when a drag stops.
    pub maximum_fling_velocity: f32,
}

impl Default for ViewConfiguration {
    fn default() -> Self {
        Self {
            touch_slop: TOUCH_SLOP,
            maximum_fling_velocity: MAX_FLING_VELOCITY,
        }
    }
}

impl ViewConfiguration {
    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn with_maximum_fling_velocity(mut self, velocity: f32) -> Self {
        self.maximum_fling_velocity = velocity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_come_from_gesture_constants() {
        let config = ViewConfiguration::default();
        assert_eq!(config.touch_slop, TOUCH_SLOP);
        assert_eq!(config.maximum_fling_velocity, MAX_FLING_VELOCITY);
    }

    #[test]
    fn builders_override_single_fields() {
        let config = ViewConfiguration::default()
            .with_touch_slop(10.0)
            .with_maximum_fling_velocity(1_000.0);
        assert_eq!(config.touch_slop, 10.0);
        assert_eq!(config.maximum_fling_velocity, 1_000.0);
    }
}
