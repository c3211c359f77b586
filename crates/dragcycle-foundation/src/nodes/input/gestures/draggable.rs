//! Pointer input handler pairing a [`DragGestureNode`] with its detector.

use super::drag::DragGestureNode;
use super::drag_cycle::DragCycleDetector;
use crate::nodes::input::dispatcher::PointerInputHandler;
use crate::nodes::input::types::{IndirectTouchEvent, PointerEventPass};
use crate::velocity_tracker::{ImpulseVelocityTracker, VelocityTracker};

/// A draggable element on the hit path.
///
/// Disabling it abandons any gesture in progress, the same way a detached
/// pointer input node would.
pub struct Draggable<N, V = ImpulseVelocityTracker> {
    node: N,
    detector: DragCycleDetector<V>,
    enabled: bool,
}

impl<N: DragGestureNode> Draggable<N> {
    pub fn new(node: N) -> Self {
        Self::with_detector(node, DragCycleDetector::new())
    }
}

impl<N: DragGestureNode, V: VelocityTracker> Draggable<N, V> {
    pub fn with_detector(node: N, detector: DragCycleDetector<V>) -> Self {
        Self {
            node,
            detector,
            enabled: true,
        }
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut N {
        &mut self.node
    }

    pub fn detector(&self) -> &DragCycleDetector<V> {
        &self.detector
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled && !enabled {
            self.detector.reset(&mut self.node);
        }
        self.enabled = enabled;
    }

    pub fn into_node(self) -> N {
        self.node
    }
}

impl<N: DragGestureNode, V: VelocityTracker> PointerInputHandler for Draggable<N, V> {
    fn on_indirect_touch_event(&mut self, event: &mut IndirectTouchEvent, pass: PointerEventPass) {
        if !self.enabled {
            return;
        }
        self.detector.process(&mut self.node, event, pass);
    }
}
