//! Drag cycle detection for indirect touch input.
//!
//! [`DragCycleDetector`] turns the three-pass stream of indirect touch frames
//! into one drag cycle at a time: `Started Delta* (Stopped | Cancelled)`.
//!
//! The detector competes with other recognizers for the same frame through the
//! `consumed` flag on each change:
//!
//! * it waits for a down where every change is a fresh press,
//! * waits for touch slop (unless the node asks for an immediate start),
//! * if someone else consumes the pointer before slop is crossed it parks in
//!   [`DragDetectionState::AwaitGesturePickup`] and takes the gesture back
//!   on a later Final pass if the other recognizer lets go,
//! * once dragging, a consumed event cancels the cycle for good.
//!
//! Velocity samples are corrected by the node's on-screen drift so an element
//! that moves while it is dragged (e.g. inside a scrolling parent) still flings
//! with the finger's real speed.

use super::axis::{axis_magnitude, project_on_axis, Orientation};
use super::drag::{DragEvent, DragGestureNode};
use super::smoothing::{EventPositionSmoother, OffsetSmoother};
use super::touch_slop::TouchSlopDetector;
use crate::gesture_constants::PIXEL_SENSITIVITY;
use crate::nodes::input::types::{
    IndirectPointerInputChange, IndirectTouchEvent, PointerEventPass, PointerId,
    PrimaryDirectionalMotionAxis,
};
use crate::velocity_tracker::{ImpulseVelocityTracker, VelocityTracker};
use dragcycle_geometry::{Point, Velocity};

/// Whether the down currently being recognized has to cross touch slop.
///
/// Decided once per physical down and cached across its passes so the node is
/// not asked on every pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SlopDecision {
    #[default]
    Undecided,
    Await,
    Skip,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DragDetectionState {
    /// Waiting for a clean down frame.
    AwaitDown {
        slop_decision: SlopDecision,
        /// The down was claimed on the Initial pass; dispatch happens on Main.
        consumed_on_initial: bool,
    },
    /// A pointer is down; collecting movement until touch slop is crossed.
    AwaitTouchSlop {
        initial_down: IndirectPointerInputChange,
        pointer_id: PointerId,
        /// Main pass saw no consumption; re-check on Final in case a parent
        /// claimed the event after us.
        verify_consumption_in_final_pass: bool,
    },
    /// Someone else consumed the gesture before slop; dormant until they let
    /// it go or every pointer lifts.
    AwaitGesturePickup {
        initial_down: IndirectPointerInputChange,
        pointer_id: PointerId,
    },
    Dragging { pointer_id: PointerId },
}

impl Default for DragDetectionState {
    fn default() -> Self {
        DragDetectionState::AwaitDown {
            slop_decision: SlopDecision::Undecided,
            consumed_on_initial: false,
        }
    }
}

impl DragDetectionState {
    /// Pointer currently tracked by the cycle, if one is.
    pub fn pointer_id(&self) -> Option<PointerId> {
        match self {
            DragDetectionState::AwaitDown { .. } => None,
            DragDetectionState::AwaitTouchSlop { pointer_id, .. }
            | DragDetectionState::AwaitGesturePickup { pointer_id, .. }
            | DragDetectionState::Dragging { pointer_id } => Some(*pointer_id),
        }
    }

    pub fn is_await_down(&self) -> bool {
        matches!(self, DragDetectionState::AwaitDown { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragDetectionState::Dragging { .. })
    }

    fn name(&self) -> &'static str {
        match self {
            DragDetectionState::AwaitDown { .. } => "AwaitDown",
            DragDetectionState::AwaitTouchSlop { .. } => "AwaitTouchSlop",
            DragDetectionState::AwaitGesturePickup { .. } => "AwaitGesturePickup",
            DragDetectionState::Dragging { .. } => "Dragging",
        }
    }
}

/// Single-pointer drag recognizer for indirect touch frames.
///
/// The host must call [`process`](Self::process) once per pass, in the order
/// Initial, Main, Final, handing over the same frame each time.
pub struct DragCycleDetector<V = ImpulseVelocityTracker> {
    state: DragDetectionState,
    touch_slop_detector: TouchSlopDetector,
    velocity_tracker: V,
    touch_smoother: EventPositionSmoother,
    offset_smoother: OffsetSmoother,
    /// Node position at the previous dispatch, the drift baseline.
    previous_position_on_screen: Option<Point>,
    /// How far the node itself has moved on screen since the drag started.
    node_offset: Point,
    /// A Started reached the node and no terminal event has followed yet.
    listening: bool,
    /// Pointer and uptime of the change last fed to the velocity tracker.
    last_sampled: Option<(PointerId, u64)>,
}

impl Default for DragCycleDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl DragCycleDetector {
    pub fn new() -> Self {
        Self::with_velocity_tracker(ImpulseVelocityTracker::new())
    }
}

impl<V: VelocityTracker> DragCycleDetector<V> {
    pub fn with_velocity_tracker(velocity_tracker: V) -> Self {
        Self {
            state: DragDetectionState::default(),
            touch_slop_detector: TouchSlopDetector::default(),
            velocity_tracker,
            touch_smoother: EventPositionSmoother::new(),
            offset_smoother: OffsetSmoother::new(),
            previous_position_on_screen: None,
            node_offset: Point::ZERO,
            listening: false,
            last_sampled: None,
        }
    }

    pub fn state(&self) -> &DragDetectionState {
        &self.state
    }

    /// Whether the node is inside a drag cycle it was told about.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn node_offset(&self) -> Point {
        self.node_offset
    }

    pub fn velocity_tracker(&self) -> &V {
        &self.velocity_tracker
    }

    /// Feeds one pass of one frame through the state machine.
    pub fn process<N>(
        &mut self,
        node: &mut N,
        event: &mut IndirectTouchEvent,
        pass: PointerEventPass,
    ) where
        N: DragGestureNode + ?Sized,
    {
        let state = std::mem::take(&mut self.state);
        let previous = state.name();

        self.state = match state {
            DragDetectionState::AwaitDown {
                slop_decision,
                consumed_on_initial,
            } => self.process_await_down(node, event, pass, slop_decision, consumed_on_initial),
            DragDetectionState::AwaitTouchSlop {
                initial_down,
                pointer_id,
                verify_consumption_in_final_pass,
            } => self.process_await_touch_slop(
                node,
                event,
                pass,
                initial_down,
                pointer_id,
                verify_consumption_in_final_pass,
            ),
            DragDetectionState::AwaitGesturePickup {
                initial_down,
                pointer_id,
            } => self.process_await_gesture_pickup(node, event, pass, initial_down, pointer_id),
            DragDetectionState::Dragging { pointer_id } => {
                self.process_dragging(node, event, pass, pointer_id)
            }
        };

        if previous != self.state.name() {
            log::trace!(
                "drag cycle {} -> {} on {:?} pass",
                previous,
                self.state.name(),
                pass
            );
        }
    }

    /// Abandons whatever gesture is in progress.
    ///
    /// Returns to waiting for a down, tells the node the drag was cancelled if
    /// it had been started, and forgets all velocity and smoothing history.
    pub fn reset<N>(&mut self, node: &mut N)
    where
        N: DragGestureNode + ?Sized,
    {
        self.state = DragDetectionState::default();
        self.emit_cancelled(node);
        self.velocity_tracker.reset();
        self.offset_smoother.reset();
        self.last_sampled = None;
    }

    fn process_await_down<N>(
        &mut self,
        node: &mut N,
        event: &mut IndirectTouchEvent,
        pass: PointerEventPass,
        mut slop_decision: SlopDecision,
        mut consumed_on_initial: bool,
    ) -> DragDetectionState
    where
        N: DragGestureNode + ?Sized,
    {
        let is_clean_down = !event.changes.is_empty()
            && event
                .changes
                .iter()
                .all(IndirectPointerInputChange::changed_to_down_ignore_consumed);
        if !is_clean_down {
            return DragDetectionState::AwaitDown {
                slop_decision,
                consumed_on_initial,
            };
        }

        if slop_decision == SlopDecision::Undecided {
            slop_decision = if node.allows_immediate_drag_start() {
                SlopDecision::Skip
            } else {
                SlopDecision::Await
            };
        }

        match pass {
            PointerEventPass::Initial => {
                if slop_decision == SlopDecision::Skip {
                    // Claim now so recognizers later in this pass see it taken;
                    // the Started dispatch still waits for Main.
                    event.changes[0].consume();
                    consumed_on_initial = true;
                }
            }
            PointerEventPass::Main => {
                let first_down = event.changes[0].clone();
                if slop_decision == SlopDecision::Await {
                    let pointer_id = first_down.id;
                    return self.enter_await_touch_slop(node, first_down, pointer_id, Point::ZERO);
                }
                if consumed_on_initial {
                    let axis = event.primary_axis;
                    self.emit_started(node, &first_down, &first_down, axis, Point::ZERO);
                    self.emit_delta(node, &first_down, axis, Point::ZERO);
                    return DragDetectionState::Dragging {
                        pointer_id: first_down.id,
                    };
                }
            }
            PointerEventPass::Final => {}
        }

        DragDetectionState::AwaitDown {
            slop_decision,
            consumed_on_initial,
        }
    }

    fn process_await_touch_slop<N>(
        &mut self,
        node: &mut N,
        event: &mut IndirectTouchEvent,
        pass: PointerEventPass,
        initial_down: IndirectPointerInputChange,
        mut pointer_id: PointerId,
        mut verify_consumption_in_final_pass: bool,
    ) -> DragDetectionState
    where
        N: DragGestureNode + ?Sized,
    {
        if pass == PointerEventPass::Initial {
            return DragDetectionState::AwaitTouchSlop {
                initial_down,
                pointer_id,
                verify_consumption_in_final_pass,
            };
        }

        // Our pointer is gone from this frame: follow any other pressed one.
        let index = match position_of(event, pointer_id) {
            Some(index) => index,
            None => match event.changes.iter().position(|change| change.pressed) {
                Some(index) => {
                    pointer_id = event.changes[index].id;
                    index
                }
                None => return self.enter_await_down(),
            },
        };

        if pass == PointerEventPass::Main {
            if event.changes[index].is_consumed() {
                return self.enter_await_gesture_pickup(initial_down, pointer_id);
            }

            if event.changes[index].changed_to_up_ignore_consumed() {
                match event.first_pressed() {
                    Some(other) => pointer_id = other.id,
                    None => return self.enter_await_down(),
                }
            } else {
                let orientation = node.orientation_lock();
                let axis = event.primary_axis;
                let touch_slop = node.view_configuration().touch_slop;
                let change = &event.changes[index];
                let post_slop_offset = self.touch_slop_detector.add_positions(
                    project_on_axis(change.position, orientation, axis),
                    project_on_axis(change.previous_position, orientation, axis),
                    touch_slop,
                );

                match post_slop_offset {
                    Some(post_slop_offset) => {
                        event.changes[index].consume();
                        let trigger = event.changes[index].clone();
                        self.emit_started(node, &initial_down, &trigger, axis, post_slop_offset);
                        self.emit_delta(node, &trigger, axis, post_slop_offset);
                        return DragDetectionState::Dragging {
                            pointer_id: trigger.id,
                        };
                    }
                    None => verify_consumption_in_final_pass = true,
                }
            }
        }

        if pass == PointerEventPass::Final && verify_consumption_in_final_pass {
            // Either a parent consumed on Main after we looked, or it consumed
            // on Final before us.
            if event.changes[index].is_consumed() {
                return self.enter_await_gesture_pickup(initial_down, pointer_id);
            }
            verify_consumption_in_final_pass = false;
        }

        DragDetectionState::AwaitTouchSlop {
            initial_down,
            pointer_id,
            verify_consumption_in_final_pass,
        }
    }

    fn process_await_gesture_pickup<N>(
        &mut self,
        node: &mut N,
        event: &mut IndirectTouchEvent,
        pass: PointerEventPass,
        initial_down: IndirectPointerInputChange,
        pointer_id: PointerId,
    ) -> DragDetectionState
    where
        N: DragGestureNode + ?Sized,
    {
        // Only on Final is it certain nobody else wants this frame.
        if pass != PointerEventPass::Final {
            return DragDetectionState::AwaitGesturePickup {
                initial_down,
                pointer_id,
            };
        }

        if event.changes.is_empty() || !event.any_pressed() {
            return self.enter_await_down();
        }

        let has_unconsumed_drag = event
            .changes
            .iter()
            .any(|change| change.pressed && !change.is_consumed());
        if !has_unconsumed_drag {
            return DragDetectionState::AwaitGesturePickup {
                initial_down,
                pointer_id,
            };
        }

        // Resume slop detection from the original down so the movement made
        // while someone else owned the gesture counts towards the slop.
        let orientation = node.orientation_lock();
        let axis = event.primary_axis;
        let current = event.change(pointer_id).unwrap_or(&event.changes[0]);
        let initial_position_change = project_on_axis(current.position, orientation, axis)
            - project_on_axis(initial_down.position, orientation, axis);

        self.enter_await_touch_slop(node, initial_down, pointer_id, initial_position_change)
    }

    fn process_dragging<N>(
        &mut self,
        node: &mut N,
        event: &mut IndirectTouchEvent,
        pass: PointerEventPass,
        pointer_id: PointerId,
    ) -> DragDetectionState
    where
        N: DragGestureNode + ?Sized,
    {
        if pass != PointerEventPass::Main {
            return DragDetectionState::Dragging { pointer_id };
        }
        let Some(index) = position_of(event, pointer_id) else {
            return DragDetectionState::Dragging { pointer_id };
        };
        let axis = event.primary_axis;

        if event.changes[index].changed_to_up_ignore_consumed() {
            if let Some(other) = event.first_pressed() {
                // Hand the drag over to a finger that is still down.
                return DragDetectionState::Dragging {
                    pointer_id: other.id,
                };
            }
            let last_up = event.changes[index].clone();
            if last_up.changed_to_up() {
                self.emit_stopped(node, &last_up, axis);
            } else {
                self.emit_cancelled(node);
            }
            return self.enter_await_down();
        }

        if event.changes[index].is_consumed() {
            // Dragging gestures are never picked up again once lost.
            self.emit_cancelled(node);
            return self.enter_await_down();
        }

        let orientation = node.orientation_lock();
        let position_change =
            project_on_axis(event.changes[index].position_change(), orientation, axis);

        if position_change.distance() != 0.0 {
            event.changes[index].consume();
            let change = event.changes[index].clone();
            self.emit_delta(node, &change, axis, position_change);
        }

        DragDetectionState::Dragging { pointer_id }
    }

    fn enter_await_down(&mut self) -> DragDetectionState {
        DragDetectionState::default()
    }

    fn enter_await_touch_slop<N>(
        &mut self,
        node: &N,
        initial_down: IndirectPointerInputChange,
        pointer_id: PointerId,
        initial_position_change: Point,
    ) -> DragDetectionState
    where
        N: DragGestureNode + ?Sized,
    {
        self.touch_slop_detector
            .set_orientation(node.orientation_lock());
        self.touch_slop_detector.reset(initial_position_change);
        DragDetectionState::AwaitTouchSlop {
            initial_down,
            pointer_id,
            verify_consumption_in_final_pass: false,
        }
    }

    fn enter_await_gesture_pickup(
        &mut self,
        initial_down: IndirectPointerInputChange,
        pointer_id: PointerId,
    ) -> DragDetectionState {
        log::debug!("drag gesture for pointer {pointer_id} taken by another recognizer");
        self.touch_slop_detector.reset(Point::ZERO);
        DragDetectionState::AwaitGesturePickup {
            initial_down,
            pointer_id,
        }
    }

    fn add_velocity_sample(
        &mut self,
        change: &IndirectPointerInputChange,
        orientation: Option<Orientation>,
        axis: Option<PrimaryDirectionalMotionAxis>,
    ) {
        // An immediate start hands the same down to Started and Delta.
        let key = (change.id, change.uptime_millis);
        if self.last_sampled == Some(key) {
            return;
        }
        self.last_sampled = Some(key);

        let smoothed = project_on_axis(
            self.touch_smoother.smooth_event_position(change),
            orientation,
            axis,
        );
        self.velocity_tracker
            .add_sample(change.uptime_millis, smoothed + self.node_offset);
    }

    fn emit_started<N>(
        &mut self,
        node: &mut N,
        down: &IndirectPointerInputChange,
        slop_trigger: &IndirectPointerInputChange,
        axis: Option<PrimaryDirectionalMotionAxis>,
        post_slop_offset: Point,
    ) where
        N: DragGestureNode + ?Sized,
    {
        let orientation = node.orientation_lock();
        self.node_offset = Point::ZERO;
        self.offset_smoother.reset();
        self.velocity_tracker.reset();
        self.last_sampled = None;
        self.add_velocity_sample(down, orientation, axis);
        self.previous_position_on_screen = Some(node.position_on_screen());

        let start_point =
            project_on_axis(slop_trigger.position, orientation, axis) - post_slop_offset;

        if node.can_drag(slop_trigger.type_) {
            log::debug!(
                "drag started for pointer {} at ({:.1}, {:.1})",
                slop_trigger.id,
                start_point.x,
                start_point.y
            );
            self.listening = true;
            node.on_drag_event(DragEvent::Started { start_point });
        } else {
            log::trace!("drag start suppressed for {:?}", slop_trigger.type_);
        }
    }

    fn emit_delta<N>(
        &mut self,
        node: &mut N,
        change: &IndirectPointerInputChange,
        axis: Option<PrimaryDirectionalMotionAxis>,
        drag_amount: Point,
    ) where
        N: DragGestureNode + ?Sized,
    {
        let current_position_on_screen = node.position_on_screen();
        if let Some(previous) = self.previous_position_on_screen {
            if current_position_on_screen != previous {
                self.node_offset += current_position_on_screen - previous;
            }
        }
        self.previous_position_on_screen = Some(current_position_on_screen);

        let orientation = node.orientation_lock();
        self.add_velocity_sample(change, orientation, axis);

        if axis_magnitude(drag_amount, orientation) >= PIXEL_SENSITIVITY && self.listening {
            let delta = self.offset_smoother.smooth(drag_amount);
            node.on_drag_event(DragEvent::Delta {
                delta,
                from_smoothing: true,
            });
        }
    }

    fn emit_stopped<N>(
        &mut self,
        node: &mut N,
        change: &IndirectPointerInputChange,
        axis: Option<PrimaryDirectionalMotionAxis>,
    ) where
        N: DragGestureNode + ?Sized,
    {
        let orientation = node.orientation_lock();
        self.add_velocity_sample(change, orientation, axis);

        let maximum = node.view_configuration().maximum_fling_velocity;
        let velocity = self
            .velocity_tracker
            .estimate_velocity(Velocity::new(maximum, maximum))
            .to_valid();
        self.velocity_tracker.reset();

        if self.listening {
            self.listening = false;
            log::debug!(
                "drag stopped with velocity ({:.1}, {:.1})",
                velocity.x,
                velocity.y
            );
            node.on_drag_event(DragEvent::Stopped {
                velocity,
                from_smoothing: true,
            });
        }
    }

    fn emit_cancelled<N>(&mut self, node: &mut N)
    where
        N: DragGestureNode + ?Sized,
    {
        if self.listening {
            self.listening = false;
            log::debug!("drag cancelled");
            node.on_drag_event(DragEvent::Cancelled);
        }
    }
}

fn position_of(event: &IndirectTouchEvent, pointer_id: PointerId) -> Option<usize> {
    event
        .changes
        .iter()
        .position(|change| change.id == pointer_id)
}
