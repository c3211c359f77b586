//! Frame builder for scripted indirect touch gestures
//!
//! [`GestureScript`] remembers where every pointer was on the previous frame
//! so each produced [`IndirectTouchEvent`] carries consistent previous/current
//! data, the way a platform input pipeline would.
//!
//! # Example
//!
//! ```
//! use dragcycle_geometry::Point;
//! use dragcycle_testing::GestureScript;
//!
//! let mut script = GestureScript::new();
//! let down = script.down(0, Point::new(0.0, 0.0));
//! let moved = script.move_by(0, Point::new(0.0, 12.0));
//! let up = script.up(0);
//! assert_eq!(moved.uptime_millis - down.uptime_millis, 16);
//! assert!(!up.changes[0].pressed);
//! ```

use dragcycle_foundation::{
    IndirectPointerInputChange, IndirectTouchEvent, PointerId, PointerType,
    PrimaryDirectionalMotionAxis,
};
use dragcycle_geometry::Point;

const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

#[derive(Clone, Copy, Debug)]
struct TrackedPointer {
    id: PointerId,
    position: Point,
    pressed: bool,
    uptime_millis: u64,
}

/// Builds a sequence of frames for one or more pointers.
#[derive(Clone, Debug)]
pub struct GestureScript {
    pointers: Vec<TrackedPointer>,
    uptime_millis: u64,
    frame_interval_ms: u64,
    started: bool,
    pointer_type: PointerType,
    primary_axis: Option<PrimaryDirectionalMotionAxis>,
}

impl Default for GestureScript {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureScript {
    pub fn new() -> Self {
        Self {
            pointers: Vec::new(),
            uptime_millis: 0,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            started: false,
            pointer_type: PointerType::Touch,
            primary_axis: None,
        }
    }

    pub fn with_frame_interval(mut self, frame_interval_ms: u64) -> Self {
        self.frame_interval_ms = frame_interval_ms;
        self
    }

    pub fn with_pointer_type(mut self, pointer_type: PointerType) -> Self {
        self.pointer_type = pointer_type;
        self
    }

    pub fn with_primary_axis(mut self, axis: PrimaryDirectionalMotionAxis) -> Self {
        self.primary_axis = Some(axis);
        self
    }

    /// Uptime of the most recently produced frame.
    pub fn now(&self) -> u64 {
        self.uptime_millis
    }

    /// Leaves a gap before the next frame, on top of the frame interval.
    pub fn advance(&mut self, millis: u64) {
        self.uptime_millis += millis;
    }

    pub fn position(&self, id: PointerId) -> Option<Point> {
        self.pointers
            .iter()
            .find(|pointer| pointer.id == id)
            .map(|pointer| pointer.position)
    }

    pub fn down(&mut self, id: PointerId, position: Point) -> IndirectTouchEvent {
        self.frame(&[(id, position, true)])
    }

    pub fn move_to(&mut self, id: PointerId, position: Point) -> IndirectTouchEvent {
        self.frame(&[(id, position, true)])
    }

    pub fn move_by(&mut self, id: PointerId, delta: Point) -> IndirectTouchEvent {
        let position = self.position(id).unwrap_or(Point::ZERO) + delta;
        self.move_to(id, position)
    }

    pub fn up(&mut self, id: PointerId) -> IndirectTouchEvent {
        let position = self.position(id).unwrap_or(Point::ZERO);
        self.frame(&[(id, position, false)])
    }

    /// Moves from the current position to `target` in `steps` equal frames.
    pub fn move_in_steps(
        &mut self,
        id: PointerId,
        target: Point,
        steps: usize,
    ) -> Vec<IndirectTouchEvent> {
        let start = self.position(id).unwrap_or(Point::ZERO);
        let steps = steps.max(1);
        (1..=steps)
            .map(|step| {
                let fraction = step as f32 / steps as f32;
                self.move_to(id, start + (target - start) * fraction)
            })
            .collect()
    }

    /// Produces one frame applying `updates` as `(pointer, position, pressed)`.
    ///
    /// Pointers that are still held but not named in `updates` are reported
    /// unchanged. Pointers released on an earlier frame are no longer
    /// reported.
    pub fn frame(&mut self, updates: &[(PointerId, Point, bool)]) -> IndirectTouchEvent {
        if self.started {
            self.uptime_millis += self.frame_interval_ms;
        }
        self.started = true;
        let now = self.uptime_millis;

        for &(id, position, _) in updates {
            if !self.pointers.iter().any(|pointer| pointer.id == id) {
                // New pointers appear where they go down.
                self.pointers.push(TrackedPointer {
                    id,
                    position,
                    pressed: false,
                    uptime_millis: now,
                });
            }
        }

        let pointer_type = self.pointer_type;
        let mut changes = Vec::with_capacity(self.pointers.len());
        for pointer in &mut self.pointers {
            let (position, pressed) = updates
                .iter()
                .find(|update| update.0 == pointer.id)
                .map_or((pointer.position, pointer.pressed), |update| {
                    (update.1, update.2)
                });

            changes.push(IndirectPointerInputChange::new(
                pointer.id,
                now,
                position,
                pressed,
                pointer.uptime_millis,
                pointer.position,
                pointer.pressed,
                pointer_type,
            ));

            pointer.position = position;
            pointer.pressed = pressed;
            pointer.uptime_millis = now;
        }
        self.pointers.retain(|pointer| pointer.pressed);

        let event = IndirectTouchEvent::new(changes, now);
        match self.primary_axis {
            Some(axis) => event.with_primary_axis(axis),
            None => event,
        }
    }
}
