//! A competing recognizer that claims frames on a chosen pass.

use dragcycle_foundation::{IndirectTouchEvent, PointerEventPass, PointerInputHandler};

/// Consumes every change of a frame on `pass` while it is active.
///
/// Frames are counted on the Initial pass, starting at 0, so a handler can
/// be told to steal only a window of the gesture, e.g. a scrolling parent
/// that claims the pointer for a few frames and then lets go.
#[derive(Clone, Debug)]
pub struct ConsumingHandler {
    pass: PointerEventPass,
    from_frame: usize,
    until_frame: Option<usize>,
    frames_seen: usize,
    consumed_frames: Vec<usize>,
}

impl ConsumingHandler {
    /// Consumes on `pass` for every frame.
    pub fn new(pass: PointerEventPass) -> Self {
        Self {
            pass,
            from_frame: 0,
            until_frame: None,
            frames_seen: 0,
            consumed_frames: Vec::new(),
        }
    }

    /// Starts consuming at frame `index`.
    pub fn starting_at_frame(mut self, index: usize) -> Self {
        self.from_frame = index;
        self
    }

    /// Stops consuming at frame `index` (exclusive).
    pub fn stopping_at_frame(mut self, index: usize) -> Self {
        self.until_frame = Some(index);
        self
    }

    /// Indices of the frames this handler consumed.
    pub fn consumed_frames(&self) -> &[usize] {
        &self.consumed_frames
    }

    fn current_frame(&self) -> usize {
        self.frames_seen.saturating_sub(1)
    }

    fn is_active(&self) -> bool {
        let frame = self.current_frame();
        frame >= self.from_frame && self.until_frame.map_or(true, |until| frame < until)
    }
}

impl PointerInputHandler for ConsumingHandler {
    fn on_indirect_touch_event(&mut self, event: &mut IndirectTouchEvent, pass: PointerEventPass) {
        if pass == PointerEventPass::Initial {
            self.frames_seen += 1;
        }
        if pass != self.pass || !self.is_active() {
            return;
        }
        log::trace!("consuming frame {} on {:?}", self.current_frame(), pass);
        event.consume();
        self.consumed_frames.push(self.current_frame());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::GestureScript;
    use dragcycle_geometry::Point;

    #[test]
    fn consumes_only_inside_window() {
        let mut handler = ConsumingHandler::new(PointerEventPass::Main)
            .starting_at_frame(1)
            .stopping_at_frame(2);
        let mut script = GestureScript::new();
        let mut frames = vec![
            script.down(0, Point::ZERO),
            script.move_by(0, Point::new(0.0, 4.0)),
            script.move_by(0, Point::new(0.0, 4.0)),
        ];

        for frame in &mut frames {
            for pass in PointerEventPass::ALL {
                handler.on_indirect_touch_event(frame, pass);
            }
        }

        assert!(!frames[0].is_consumed());
        assert!(frames[1].is_consumed());
        assert!(!frames[2].is_consumed());
        assert_eq!(handler.consumed_frames(), &[1]);
    }
}
