//! Velocity tracking for drag release.
//!
//! [`VelocityTracker1D`] implements Jetpack Compose's impulse strategy: the
//! velocity is derived from the kinetic energy the pointer imparted over the
//! recent samples. [`ImpulseVelocityTracker`] pairs two of them for 2-D
//! positions and is the default behind the [`VelocityTracker`] seam the drag
//! recognizer feeds.

use dragcycle_geometry::{Point, Velocity};

/// Ring buffer size for velocity tracking samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within this window of the newest one contribute.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer had stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Default)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// 1D velocity tracker for absolute positions using the impulse strategy.
///
/// # Usage
/// ```ignore
/// let mut tracker = VelocityTracker1D::new();
/// tracker.add_data_point(time_ms, position);
/// // ... more points ...
/// let velocity = tracker.calculate_velocity(); // px/sec
/// ```
#[derive(Clone)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    /// Slot of the newest sample.
    index: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Adds the position observed at `time_ms`.
    pub fn add_data_point(&mut self, time_ms: i64, position: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, position });
    }

    /// Calculates the velocity in units/second.
    ///
    /// Returns 0.0 with fewer than two usable samples.
    pub fn calculate_velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.index] else {
            return 0.0;
        };

        // Walk backwards from the newest sample; `positions[0]` is the newest.
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;
        let mut previous = newest;
        let mut slot = self.index;

        while count < HISTORY_SIZE {
            let Some(sample) = self.samples[slot] else {
                break;
            };
            let age = newest.time_ms - sample.time_ms;
            let gap = (sample.time_ms - previous.time_ms).abs();
            previous = newest;
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }

            positions[count] = sample.position;
            times[count] = -(age as f32);
            count += 1;
            slot = (slot + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }

        if count < 2 {
            return 0.0;
        }

        impulse_velocity(&positions[..count], &times[..count]) * 1000.0
    }

    /// Calculates the velocity in units/second, capped to `±max_velocity`.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }

        let velocity = self.calculate_velocity();
        if velocity == 0.0 || velocity.is_nan() {
            return 0.0;
        }

        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

/// Accumulates timestamped positions and estimates a release velocity.
///
/// The drag recognizer only talks to velocity tracking through this trait so
/// hosts can substitute a platform tracker.
pub trait VelocityTracker {
    /// Records `position` observed at `time_ms`.
    fn add_sample(&mut self, time_ms: u64, position: Point);

    /// Estimates the current velocity in px/s, each axis clamped to
    /// `±maximum`.
    fn estimate_velocity(&self, maximum: Velocity) -> Velocity;

    /// Discards every recorded sample.
    fn reset(&mut self);
}

/// 2-D tracker built from two impulse-strategy [`VelocityTracker1D`]s.
#[derive(Clone, Default)]
pub struct ImpulseVelocityTracker {
    x: VelocityTracker1D,
    y: VelocityTracker1D,
}

impl ImpulseVelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VelocityTracker for ImpulseVelocityTracker {
    fn add_sample(&mut self, time_ms: u64, position: Point) {
        let time_ms = time_ms as i64;
        self.x.add_data_point(time_ms, position.x);
        self.y.add_data_point(time_ms, position.y);
    }

    fn estimate_velocity(&self, maximum: Velocity) -> Velocity {
        Velocity::new(
            self.x.calculate_velocity_with_max(maximum.x),
            self.y.calculate_velocity_with_max(maximum.y),
        )
    }

    fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}

/// Impulse strategy: accumulates the work done between consecutive samples,
/// oldest to newest, and converts the final kinetic energy back to a velocity.
///
/// `positions` and `times` are ordered newest first; times are in ms relative
/// to the newest sample (so non-positive).
fn impulse_velocity(positions: &[f32], times: &[f32]) -> f32 {
    let oldest = positions.len() - 1;
    let mut work = 0.0f32;

    for i in (1..=oldest).rev() {
        let dt = times[i] - times[i - 1];
        if dt == 0.0 {
            continue;
        }
        let v_curr = (positions[i] - positions[i - 1]) / dt;
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == oldest {
            work *= 0.5;
        }
    }

    kinetic_energy_to_velocity(work)
}

/// Converts kinetic energy to velocity using E = 0.5 * m * v^2 (with m = 1).
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tracker_returns_zero() {
        let tracker = VelocityTracker1D::new();
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn test_single_point_returns_zero() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 100.0);
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn test_constant_velocity() {
        let mut tracker = VelocityTracker1D::new();
        // Moving at 100 px per 10ms = 10000 px/s
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(10, 100.0);
        tracker.add_data_point(20, 200.0);
        tracker.add_data_point(30, 300.0);

        let velocity = tracker.calculate_velocity();
        // Should be approximately 10000 px/s
        assert!(
            (velocity - 10000.0).abs() < 1000.0,
            "Expected ~10000, got {}",
            velocity
        );
    }

    #[test]
    fn test_reset() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(10, 100.0);

        tracker.reset();

        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn test_negative_velocity() {
        let mut tracker = VelocityTracker1D::new();
        // Moving backwards
        tracker.add_data_point(0, 300.0);
        tracker.add_data_point(10, 200.0);
        tracker.add_data_point(20, 100.0);

        let velocity = tracker.calculate_velocity();
        assert!(
            velocity < 0.0,
            "Expected negative velocity, got {}",
            velocity
        );
    }

    #[test]
    fn test_velocity_capped() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(1, 10_000.0);

        let velocity = tracker.calculate_velocity_with_max(8_000.0);
        assert_eq!(velocity, 8_000.0);

        tracker.reset();
        tracker.add_data_point(0, 10_000.0);
        tracker.add_data_point(1, 0.0);

        let velocity = tracker.calculate_velocity_with_max(8_000.0);
        assert_eq!(velocity, -8_000.0);
    }

    #[test]
    fn test_old_samples_ignored() {
        let mut tracker = VelocityTracker1D::new();
        // Old sample (more than HORIZON_MS ago)
        tracker.add_data_point(0, 0.0);
        // Recent samples
        tracker.add_data_point(150, 100.0);
        tracker.add_data_point(160, 200.0);
        tracker.add_data_point(170, 300.0);

        // Velocity should only be based on recent samples
        let velocity = tracker.calculate_velocity();
        assert!(
            velocity.abs() > 0.0,
            "Should calculate velocity from recent samples"
        );
    }

    #[test]
    fn test_gap_over_stopped_threshold_returns_zero() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(ASSUME_STOPPED_MS + 1, 100.0);

        let velocity = tracker.calculate_velocity();
        assert_eq!(velocity, 0.0);
    }

    #[test]
    fn test_2d_tracker_tracks_axes_independently() {
        let mut tracker = ImpulseVelocityTracker::new();
        tracker.add_sample(0, Point::new(0.0, 0.0));
        tracker.add_sample(10, Point::new(10.0, -20.0));
        tracker.add_sample(20, Point::new(20.0, -40.0));

        let velocity = tracker.estimate_velocity(Velocity::new(8_000.0, 8_000.0));
        assert!(velocity.x > 0.0, "x should be positive, got {}", velocity.x);
        assert!(velocity.y < 0.0, "y should be negative, got {}", velocity.y);
        assert!(
            (velocity.y + 2.0 * velocity.x).abs() < 1.0,
            "y should move twice as fast as x: {:?}",
            velocity
        );
    }

    #[test]
    fn test_2d_tracker_clamps_each_axis() {
        let mut tracker = ImpulseVelocityTracker::new();
        tracker.add_sample(0, Point::new(0.0, 0.0));
        tracker.add_sample(1, Point::new(10_000.0, 10_000.0));

        let velocity = tracker.estimate_velocity(Velocity::new(500.0, 1_000.0));
        assert_eq!(velocity, Velocity::new(500.0, 1_000.0));

        tracker.reset();
        assert_eq!(
            tracker.estimate_velocity(Velocity::new(500.0, 500.0)),
            Velocity::ZERO
        );
    }
}
