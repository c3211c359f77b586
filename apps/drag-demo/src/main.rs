//! Replays a few scripted touchpad gestures through a vertically scrolling
//! list that hosts a horizontally swipeable row, and logs which recognizer
//! ends up owning each gesture.

use dragcycle_foundation::prelude::*;
use dragcycle_foundation::{MAX_FLING_VELOCITY, TOUCH_SLOP};
use web_time::Instant;

const FRAME_INTERVAL_MS: u64 = 8;

/// A drag target that logs everything it is told.
struct LoggingNode {
    name: &'static str,
    orientation: Orientation,
    config: ViewConfiguration,
    travelled: Point,
}

impl LoggingNode {
    fn new(name: &'static str, orientation: Orientation, config: ViewConfiguration) -> Self {
        Self {
            name,
            orientation,
            config,
            travelled: Point::ZERO,
        }
    }
}

impl DragGestureNode for LoggingNode {
    fn orientation_lock(&self) -> Option<Orientation> {
        Some(self.orientation)
    }

    fn view_configuration(&self) -> ViewConfiguration {
        self.config
    }

    fn on_drag_event(&mut self, event: DragEvent) {
        match event {
            DragEvent::Started { start_point } => {
                self.travelled = Point::ZERO;
                log::info!(
                    "[{}] started at ({:.1}, {:.1})",
                    self.name,
                    start_point.x,
                    start_point.y
                );
            }
            DragEvent::Delta { delta, .. } => {
                self.travelled += delta;
                log::debug!("[{}] delta ({:.1}, {:.1})", self.name, delta.x, delta.y);
            }
            DragEvent::Stopped { velocity, .. } => log::info!(
                "[{}] stopped after ({:.1}, {:.1}) with velocity ({:.0}, {:.0}) px/s",
                self.name,
                self.travelled.x,
                self.travelled.y,
                velocity.x,
                velocity.y
            ),
            DragEvent::Cancelled => log::info!("[{}] cancelled", self.name),
        }
    }
}

/// Reads a positive float override from the environment.
fn env_override(name: &str, default: f32) -> f32 {
    match std::env::var(name) {
        Ok(raw) => match raw.parse::<f32>() {
            Ok(value) if value.is_finite() && value > 0.0 => value,
            _ => {
                log::warn!("ignoring {name}={raw:?}, using {default}");
                default
            }
        },
        Err(_) => default,
    }
}

fn view_configuration_from_env() -> ViewConfiguration {
    ViewConfiguration::default()
        .with_touch_slop(env_override("DRAGCYCLE_TOUCH_SLOP", TOUCH_SLOP))
        .with_maximum_fling_velocity(env_override(
            "DRAGCYCLE_MAX_FLING_VELOCITY",
            MAX_FLING_VELOCITY,
        ))
}

/// One finger going down at `from`, moving to `to` in `steps` frames and
/// lifting, starting at `start_ms`.
fn stroke(from: Point, to: Point, steps: usize, start_ms: u64) -> Vec<IndirectTouchEvent> {
    let frame = |time: u64, previous: Point, position: Point, was_down: bool, down: bool| {
        let change = IndirectPointerInputChange::new(
            0,
            time,
            position,
            down,
            time.saturating_sub(FRAME_INTERVAL_MS),
            previous,
            was_down,
            PointerType::Touch,
        );
        IndirectTouchEvent::new([change], time)
    };

    let steps = steps.max(1);
    let mut frames = Vec::with_capacity(steps + 2);
    frames.push(frame(start_ms, from, from, false, true));

    let mut previous = from;
    let mut time = start_ms;
    for step in 1..=steps {
        time += FRAME_INTERVAL_MS;
        let position = from + (to - from) * (step as f32 / steps as f32);
        frames.push(frame(time, previous, position, true, true));
        previous = position;
    }
    frames.push(frame(time + FRAME_INTERVAL_MS, previous, previous, true, false));
    frames
}

fn main() {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = view_configuration_from_env();
    log::info!(
        "touch slop {:.1} px, max fling {:.0} px/s",
        config.touch_slop,
        config.maximum_fling_velocity
    );

    let mut list = Draggable::new(LoggingNode::new("list", Orientation::Vertical, config));
    let mut row = Draggable::new(LoggingNode::new("row", Orientation::Horizontal, config));
    let mut dispatcher = PassDispatcher::new();

    let gestures = [
        ("horizontal swipe", Point::new(100.0, 100.0), Point::new(220.0, 104.0)),
        ("vertical fling", Point::new(100.0, 300.0), Point::new(96.0, 60.0)),
        ("tap", Point::new(40.0, 40.0), Point::new(41.0, 40.0)),
    ];

    let started = Instant::now();
    let mut start_ms = 0;
    let mut frame_count = 0;
    let mut presses = 0;
    for (label, from, to) in gestures {
        log::info!("--- {label} ---");
        for frame in stroke(from, to, 12, start_ms) {
            start_ms = frame.uptime_millis;
            dispatcher.push(frame);
        }
        // The list is the outer handler, the row sits inside it.
        let handlers: &mut [&mut dyn PointerInputHandler] = &mut [&mut list, &mut row];
        dispatcher.drain(handlers, |frame| {
            frame_count += 1;
            if frame.changes.iter().any(IndirectPointerInputChange::changed_to_down) {
                presses += 1;
            }
        });
        start_ms += 500;
    }

    log::info!(
        "replayed {} frames with {} presses in {:?}",
        frame_count,
        presses,
        started.elapsed()
    );

    for node in [list.into_node(), row.into_node()] {
        log::info!(
            "[{}] last drag travelled ({:.1}, {:.1})",
            node.name,
            node.travelled.x,
            node.travelled.y
        );
    }
}
