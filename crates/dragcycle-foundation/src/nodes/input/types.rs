use dragcycle_geometry::Point;
use smallvec::SmallVec;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerType {
    Mouse,
    Touch,
    Stylus,
    Eraser,
    Unknown,
}

/// One of the three ordered deliveries of the same frame to every handler.
///
/// Initial travels from the root towards the leaves, Main and Final travel
/// back up. A frame is always delivered in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventPass {
    Initial,
    Main,
    Final,
}

impl PointerEventPass {
    pub const ALL: [PointerEventPass; 3] = [
        PointerEventPass::Initial,
        PointerEventPass::Main,
        PointerEventPass::Final,
    ];
}

/// Axis along which an indirect touch surface reports its dominant motion.
///
/// Touchpads on some devices are long and thin; the platform tells us which
/// raw axis carries the meaningful motion so it can be remapped onto the
/// consumer's orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimaryDirectionalMotionAxis {
    X,
    Y,
}

/// Describes a change in one indirect pointer between two frames.
///
/// The `consumed` flag is the only state shared between recognizers
/// competing for the same frame. It is plain data: the frame is handed to each
/// recognizer by `&mut` for the duration of one pass.
#[derive(Clone, Debug, PartialEq)]
pub struct IndirectPointerInputChange {
    pub id: PointerId,
    pub uptime_millis: u64,
    pub position: Point,
    pub pressed: bool,
    pub previous_uptime_millis: u64,
    pub previous_position: Point,
    pub previous_pressed: bool,
    pub type_: PointerType,
    consumed: bool,
}

impl IndirectPointerInputChange {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: PointerId,
        uptime_millis: u64,
        position: Point,
        pressed: bool,
        previous_uptime_millis: u64,
        previous_position: Point,
        previous_pressed: bool,
        type_: PointerType,
    ) -> Self {
        Self {
            id,
            uptime_millis,
            position,
            pressed,
            previous_uptime_millis,
            previous_position,
            previous_pressed,
            type_,
            consumed: false,
        }
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    pub fn consume(&mut self) {
        self.consumed = true;
    }

    pub fn changed_to_down(&self) -> bool {
        !self.is_consumed() && !self.previous_pressed && self.pressed
    }

    pub fn changed_to_down_ignore_consumed(&self) -> bool {
        !self.previous_pressed && self.pressed
    }

    pub fn changed_to_up(&self) -> bool {
        !self.is_consumed() && self.previous_pressed && !self.pressed
    }

    pub fn changed_to_up_ignore_consumed(&self) -> bool {
        self.previous_pressed && !self.pressed
    }

    /// Raw position delta for this frame, or zero if someone consumed it.
    pub fn position_change(&self) -> Point {
        self.position_change_internal(false)
    }

    pub fn position_change_ignore_consumed(&self) -> Point {
        self.position_change_internal(true)
    }

    fn position_change_internal(&self, ignore_consumed: bool) -> Point {
        let offset = self.position - self.previous_position;
        if !ignore_consumed && self.is_consumed() {
            Point::ZERO
        } else {
            offset
        }
    }
}

/// All pointer changes of one indirect touch frame.
#[derive(Clone, Debug, PartialEq)]
pub struct IndirectTouchEvent {
    pub changes: SmallVec<[IndirectPointerInputChange; 2]>,
    pub uptime_millis: u64,
    pub primary_axis: Option<PrimaryDirectionalMotionAxis>,
}

impl IndirectTouchEvent {
    pub fn new(
        changes: impl IntoIterator<Item = IndirectPointerInputChange>,
        uptime_millis: u64,
    ) -> Self {
        Self {
            changes: changes.into_iter().collect(),
            uptime_millis,
            primary_axis: None,
        }
    }

    pub fn with_primary_axis(mut self, axis: PrimaryDirectionalMotionAxis) -> Self {
        self.primary_axis = Some(axis);
        self
    }

    pub fn change(&self, id: PointerId) -> Option<&IndirectPointerInputChange> {
        self.changes.iter().find(|change| change.id == id)
    }

    pub fn change_mut(&mut self, id: PointerId) -> Option<&mut IndirectPointerInputChange> {
        self.changes.iter_mut().find(|change| change.id == id)
    }

    /// First pointer that is currently held down, if any.
    pub fn first_pressed(&self) -> Option<&IndirectPointerInputChange> {
        self.changes.iter().find(|change| change.pressed)
    }

    pub fn any_pressed(&self) -> bool {
        self.changes.iter().any(|change| change.pressed)
    }

    pub fn is_consumed(&self) -> bool {
        self.changes.iter().any(|change| change.is_consumed())
    }

    pub fn consume(&mut self) {
        for change in &mut self.changes {
            change.consume();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(previous_pressed: bool, pressed: bool) -> IndirectPointerInputChange {
        IndirectPointerInputChange::new(
            7,
            16,
            Point::new(10.0, 4.0),
            pressed,
            8,
            Point::new(6.0, 1.0),
            previous_pressed,
            PointerType::Touch,
        )
    }

    #[test]
    fn down_and_up_transitions() {
        assert!(change(false, true).changed_to_down());
        assert!(!change(true, true).changed_to_down());
        assert!(change(true, false).changed_to_up());
        assert!(!change(false, false).changed_to_up());
    }

    #[test]
    fn consumption_hides_transitions_unless_ignored() {
        let mut down = change(false, true);
        down.consume();
        assert!(!down.changed_to_down());
        assert!(down.changed_to_down_ignore_consumed());
    }

    #[test]
    fn position_change_respects_consumption() {
        let mut moved = change(true, true);
        assert_eq!(moved.position_change(), Point::new(4.0, 3.0));

        moved.consume();
        assert_eq!(moved.position_change(), Point::ZERO);
        assert_eq!(moved.position_change_ignore_consumed(), Point::new(4.0, 3.0));
    }

    #[test]
    fn event_lookup_and_consumption() {
        let mut released = change(true, false);
        released.id = 3;
        let mut event = IndirectTouchEvent::new([released, change(true, true)], 16);

        assert_eq!(event.first_pressed().map(|c| c.id), Some(7));
        assert!(event.any_pressed());
        assert!(!event.is_consumed());

        if let Some(change) = event.change_mut(3) {
            change.consume();
        }
        assert!(event.is_consumed());
        assert!(!event.change(7).map_or(true, |c| c.is_consumed()));

        event.consume();
        assert!(event.changes.iter().all(|c| c.is_consumed()));
    }
}
