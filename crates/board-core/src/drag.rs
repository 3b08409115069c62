//! Drag Operation
//!
//! Transient record of one drag gesture: created on drag start, updated while
//! the pointer moves, consumed exactly once on drop.

use crate::reconcile::DropTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragOperation {
    active_id: u32,
    over: Option<DropTarget>,
}

impl DragOperation {
    pub fn start(active_id: u32) -> Self {
        Self { active_id, over: None }
    }

    pub fn active_id(&self) -> u32 {
        self.active_id
    }

    pub fn over(&self) -> Option<DropTarget> {
        self.over
    }

    /// Pointer entered a target. Hovering the dragged item itself is ignored.
    pub fn hover(&mut self, target: DropTarget) {
        if target != DropTarget::Item(self.active_id) {
            self.over = Some(target);
        }
    }

    /// Pointer left the current target
    pub fn leave(&mut self) {
        self.over = None;
    }

    /// Consume the gesture, yielding `(active_id, target)` if it ended over
    /// a target.
    pub fn finish(self) -> Option<(u32, DropTarget)> {
        self.over.map(|target| (self.active_id, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Status;

    #[test]
    fn test_drag_lifecycle() {
        let mut drag = DragOperation::start(4);
        drag.hover(DropTarget::Item(9));
        drag.hover(DropTarget::Column(Status::Resolved));
        assert_eq!(drag.finish(), Some((4, DropTarget::Column(Status::Resolved))));
    }

    #[test]
    fn test_drop_without_target() {
        let mut drag = DragOperation::start(4);
        drag.hover(DropTarget::Item(9));
        drag.leave();
        assert_eq!(drag.finish(), None);
    }

    #[test]
    fn test_hover_self_ignored() {
        let mut drag = DragOperation::start(4);
        drag.hover(DropTarget::Item(4));
        assert_eq!(drag.over(), None);
        assert_eq!(drag.active_id(), 4);
    }
}
