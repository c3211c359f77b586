//! Shared gesture constants for consistent touch/pointer handling.
//!
//! These are the defaults a [`ViewConfiguration`](crate::ViewConfiguration)
//! starts from. Hosts that know the real device values override them there.
//!
//! # DPI Considerations
//!
//! These values are in logical pixels. For very high-density touch screens,
//! consider scaling by the device's DPI factor.

/// Touch slop in logical pixels.
///
/// A press has to travel at least this far (cumulatively, since the down
/// event) before it is classified as a drag rather than a tap. Matches
/// Android's ViewConfiguration.TOUCH_SLOP of ~8dp.
pub const TOUCH_SLOP: f32 = 8.0;

/// Maximum fling velocity in logical pixels per second.
///
/// Matches Android's default maximum fling velocity (ViewConfiguration) on a
/// baseline density.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Minimum delta, in pixels along the locked axis, for a drag delta to be
/// reported to the consumer.
///
/// Indirect touch hardware reports at a high rate with sub-pixel jitter; deltas
/// under this value are still fed to velocity tracking but not dispatched.
pub const PIXEL_SENSITIVITY: f32 = 2.0;

/// Number of samples averaged by the position and offset smoothers.
pub const SMOOTHING_FACTOR: usize = 3;
