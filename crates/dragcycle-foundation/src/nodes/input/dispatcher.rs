//! Multi-pass frame dispatch.
//!
//! Every frame is delivered three times to the handlers on its hit path. The
//! Initial pass tunnels from the outermost handler inwards, Main and Final
//! bubble from the innermost handler outwards. The same frame is mutated in
//! place, so consumption by one handler is visible to every handler after it.

use super::types::{IndirectTouchEvent, PointerEventPass};
use std::collections::VecDeque;

/// Anything that takes part in multi-pass indirect touch dispatch.
pub trait PointerInputHandler {
    fn on_indirect_touch_event(&mut self, event: &mut IndirectTouchEvent, pass: PointerEventPass);
}

/// Queues frames from the platform and delivers them pass by pass.
#[derive(Default)]
pub struct PassDispatcher {
    queue: VecDeque<IndirectTouchEvent>,
}

impl PassDispatcher {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn push(&mut self, event: IndirectTouchEvent) {
        self.queue.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Dispatches every queued frame, oldest first, and hands each frame back
    /// to `processed` with its final consumption state.
    pub fn drain<F>(&mut self, handlers: &mut [&mut dyn PointerInputHandler], mut processed: F)
    where
        F: FnMut(IndirectTouchEvent),
    {
        while let Some(mut event) = self.queue.pop_front() {
            Self::dispatch(&mut event, handlers);
            processed(event);
        }
    }

    /// Delivers `event` to `handlers` for all three passes.
    ///
    /// `handlers` is ordered from the outermost (root-most) handler to the
    /// innermost one.
    pub fn dispatch(
        event: &mut IndirectTouchEvent,
        handlers: &mut [&mut dyn PointerInputHandler],
    ) {
        for pass in PointerEventPass::ALL {
            Self::dispatch_pass(event, handlers, pass);
        }
    }

    pub fn dispatch_pass(
        event: &mut IndirectTouchEvent,
        handlers: &mut [&mut dyn PointerInputHandler],
        pass: PointerEventPass,
    ) {
        match pass {
            PointerEventPass::Initial => {
                for handler in handlers.iter_mut() {
                    handler.on_indirect_touch_event(event, pass);
                }
            }
            PointerEventPass::Main | PointerEventPass::Final => {
                for handler in handlers.iter_mut().rev() {
                    handler.on_indirect_touch_event(event, pass);
                }
            }
        }
    }
}
