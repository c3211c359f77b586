//! Averaging filters for noisy indirect touch input.
//!
//! Indirect touch surfaces report positions at a high rate with visible
//! jitter. Two independent filters smooth them: one over raw positions before
//! they reach the velocity tracker, one over the deltas handed to the drag
//! consumer.

use crate::gesture_constants::SMOOTHING_FACTOR;
use crate::nodes::input::types::IndirectPointerInputChange;
use dragcycle_geometry::Point;
use smallvec::SmallVec;

/// Fixed-capacity ring of points whose mean is taken over the filled slots.
#[derive(Clone, Debug, Default)]
struct RingAverage {
    samples: SmallVec<[Point; SMOOTHING_FACTOR]>,
    index: usize,
}

impl RingAverage {
    fn push(&mut self, sample: Point) -> Point {
        if self.samples.len() == SMOOTHING_FACTOR {
            self.samples[self.index] = sample;
        } else {
            self.samples.push(sample);
        }
        self.index = (self.index + 1) % SMOOTHING_FACTOR;
        self.mean()
    }

    fn mean(&self) -> Point {
        if self.samples.is_empty() {
            return Point::ZERO;
        }
        let sum = self
            .samples
            .iter()
            .fold(Point::ZERO, |acc, sample| acc + *sample);
        sum / self.samples.len() as f32
    }

    fn clear(&mut self) {
        self.samples.clear();
        self.index = 0;
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

/// Smooths raw pointer positions before they are fed to velocity tracking.
///
/// A down transition restarts the buffer so samples of a previous gesture
/// never leak into a new one. Down and up positions pass through unchanged.
#[derive(Clone, Debug, Default)]
pub struct EventPositionSmoother {
    ring: RingAverage,
}

impl EventPositionSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn smooth_event_position(&mut self, change: &IndirectPointerInputChange) -> Point {
        if change.changed_to_down_ignore_consumed() {
            self.ring.clear();
            return change.position;
        }
        if change.changed_to_up_ignore_consumed() {
            return change.position;
        }
        self.ring.push(change.position)
    }

    pub fn reset(&mut self) {
        self.ring.clear();
    }

    pub fn sample_count(&self) -> usize {
        self.ring.len()
    }
}

/// Smooths the drag deltas reported to the consumer.
#[derive(Clone, Debug, Default)]
pub struct OffsetSmoother {
    ring: RingAverage,
}

impl OffsetSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn smooth(&mut self, offset: Point) -> Point {
        self.ring.push(offset)
    }

    pub fn reset(&mut self) {
        self.ring.clear();
    }

    pub fn sample_count(&self) -> usize {
        self.ring.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::input::types::PointerType;

    fn change(previous_pressed: bool, pressed: bool, x: f32) -> IndirectPointerInputChange {
        IndirectPointerInputChange::new(
            0,
            0,
            Point::new(x, 0.0),
            pressed,
            0,
            Point::ZERO,
            previous_pressed,
            PointerType::Touch,
        )
    }

    #[test]
    fn offset_smoother_is_running_mean_over_filled_slots() {
        let mut smoother = OffsetSmoother::new();
        assert_eq!(smoother.smooth(Point::new(1.0, 0.0)), Point::new(1.0, 0.0));
        assert_eq!(smoother.smooth(Point::new(3.0, 0.0)), Point::new(2.0, 0.0));
        assert_eq!(smoother.smooth(Point::new(5.0, 0.0)), Point::new(3.0, 0.0));
    }

    #[test]
    fn offset_smoother_overwrites_oldest_sample() {
        let mut smoother = OffsetSmoother::new();
        smoother.smooth(Point::new(1.0, 0.0));
        smoother.smooth(Point::new(3.0, 0.0));
        smoother.smooth(Point::new(5.0, 0.0));
        // 1 is evicted: (3 + 5 + 7) / 3
        assert_eq!(smoother.smooth(Point::new(7.0, 0.0)), Point::new(5.0, 0.0));
        assert_eq!(smoother.sample_count(), 3);
    }

    #[test]
    fn offset_smoother_reset_forgets_history() {
        let mut smoother = OffsetSmoother::new();
        smoother.smooth(Point::new(9.0, 9.0));
        smoother.reset();
        assert_eq!(smoother.sample_count(), 0);
        assert_eq!(smoother.smooth(Point::new(1.0, 2.0)), Point::new(1.0, 2.0));
    }

    #[test]
    fn down_restarts_and_passes_through() {
        let mut smoother = EventPositionSmoother::new();
        smoother.smooth_event_position(&change(true, true, 30.0));
        smoother.smooth_event_position(&change(true, true, 60.0));
        assert_eq!(smoother.sample_count(), 2);

        let down = smoother.smooth_event_position(&change(false, true, 5.0));
        assert_eq!(down, Point::new(5.0, 0.0));
        assert_eq!(smoother.sample_count(), 0);
    }

    #[test]
    fn moves_are_averaged_and_up_passes_through() {
        let mut smoother = EventPositionSmoother::new();
        smoother.smooth_event_position(&change(false, true, 0.0));
        assert_eq!(
            smoother.smooth_event_position(&change(true, true, 2.0)),
            Point::new(2.0, 0.0)
        );
        assert_eq!(
            smoother.smooth_event_position(&change(true, true, 4.0)),
            Point::new(3.0, 0.0)
        );
        assert_eq!(
            smoother.smooth_event_position(&change(true, false, 100.0)),
            Point::new(100.0, 0.0)
        );
        assert_eq!(smoother.sample_count(), 2);
    }
}
