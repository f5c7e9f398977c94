// SPDX-License-Identifier: MPL-2.0
//! Drag-to-reorder with optimistic local state.
//!
//! The gesture applies the new order locally the moment the drag ends, then
//! persists it through the host's reorder endpoint. On failure the
//! pre-drag order is restored and the failure logged; the UI simply snaps
//! back. An 8px activation distance keeps plain clicks from starting a
//! drag.

use crate::host::MoveDirection;
use crate::media::{DocId, MediaItem};

/// Persistence request produced by a completed drag.
#[derive(Debug, Clone)]
pub struct ReorderRequest {
    pub moved: DocId,
    pub target: DocId,
    pub direction: MoveDirection,
}

/// Effects produced by reorder operations.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    /// The order changed locally; persist it through the host endpoint.
    Persist(ReorderRequest),
}

#[derive(Debug, Clone, Default)]
pub struct ReorderController {
    active: Option<DocId>,
    /// Snapshot of the order before the active drag, for rollback.
    pre_drag: Option<Vec<MediaItem>>,
}

impl ReorderController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn active_id(&self) -> Option<&DocId> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Begins a drag, snapshotting the current order.
    pub fn drag_started(&mut self, id: DocId, items: &[MediaItem]) {
        self.active = Some(id);
        self.pre_drag = Some(items.to_vec());
    }

    /// Ends the drag over `target`, applying the move to `items`
    /// optimistically. Returns the persistence request when the order
    /// actually changed.
    pub fn drag_ended(&mut self, items: &mut Vec<MediaItem>, target: Option<&DocId>) -> Effect {
        let Some(moved) = self.active.take() else {
            return Effect::None;
        };
        let Some(target) = target else {
            // Released with no drop target: cancel, keep the order.
            self.pre_drag = None;
            return Effect::None;
        };
        if *target == moved {
            self.pre_drag = None;
            return Effect::None;
        }

        let old_index = items.iter().position(|i| i.id == moved);
        let new_index = items.iter().position(|i| i.id == *target);
        let (Some(old_index), Some(new_index)) = (old_index, new_index) else {
            self.pre_drag = None;
            return Effect::None;
        };

        array_move(items, old_index, new_index);

        let direction = if new_index > old_index {
            MoveDirection::Greater
        } else {
            MoveDirection::Less
        };
        Effect::Persist(ReorderRequest {
            moved,
            target: target.clone(),
            direction,
        })
    }

    /// Persistence succeeded; the optimistic order is now authoritative.
    pub fn confirm(&mut self) {
        self.pre_drag = None;
    }

    /// Persistence failed; restores the pre-drag order.
    pub fn rollback(&mut self, items: &mut Vec<MediaItem>) {
        if let Some(previous) = self.pre_drag.take() {
            *items = previous;
        }
    }
}

/// Moves the element at `from` to position `to`, shifting the rest.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(count: usize) -> Vec<MediaItem> {
        (0..count)
            .map(|i| MediaItem::new(DocId::from(i as i64), format!("{i}.jpg"), format!("{i}.jpg")))
            .collect()
    }

    fn order(items: &[MediaItem]) -> Vec<DocId> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn drag_forward_moves_item_and_reports_greater() {
        let mut docs = items(5);
        let mut ctl = ReorderController::new();
        ctl.drag_started(DocId::from(1), &docs);
        let target = DocId::from(3);
        let effect = ctl.drag_ended(&mut docs, Some(&target));

        let Effect::Persist(req) = effect else {
            panic!("expected persist effect");
        };
        assert_eq!(req.direction, MoveDirection::Greater);
        assert_eq!(
            order(&docs),
            vec![
                DocId::from(0),
                DocId::from(2),
                DocId::from(3),
                DocId::from(1),
                DocId::from(4)
            ]
        );
    }

    #[test]
    fn drag_backward_reports_less() {
        let mut docs = items(5);
        let mut ctl = ReorderController::new();
        ctl.drag_started(DocId::from(3), &docs);
        let target = DocId::from(1);
        let effect = ctl.drag_ended(&mut docs, Some(&target));

        let Effect::Persist(req) = effect else {
            panic!("expected persist effect");
        };
        assert_eq!(req.direction, MoveDirection::Less);
        assert_eq!(docs[1].id, DocId::from(3));
    }

    #[test]
    fn drop_without_target_is_a_no_op() {
        let mut docs = items(4);
        let before = order(&docs);
        let mut ctl = ReorderController::new();
        ctl.drag_started(DocId::from(2), &docs);
        let effect = ctl.drag_ended(&mut docs, None);
        assert!(matches!(effect, Effect::None));
        assert_eq!(order(&docs), before);
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn drop_on_self_is_a_no_op() {
        let mut docs = items(4);
        let before = order(&docs);
        let mut ctl = ReorderController::new();
        ctl.drag_started(DocId::from(2), &docs);
        let target = DocId::from(2);
        assert!(matches!(ctl.drag_ended(&mut docs, Some(&target)), Effect::None));
        assert_eq!(order(&docs), before);
    }

    #[test]
    fn rollback_restores_pre_drag_order() {
        let mut docs = items(5);
        let before = order(&docs);
        let mut ctl = ReorderController::new();
        ctl.drag_started(DocId::from(0), &docs);
        let target = DocId::from(4);
        ctl.drag_ended(&mut docs, Some(&target));
        assert_ne!(order(&docs), before);

        ctl.rollback(&mut docs);
        assert_eq!(order(&docs), before);
    }

    #[test]
    fn confirm_discards_the_snapshot() {
        let mut docs = items(3);
        let mut ctl = ReorderController::new();
        ctl.drag_started(DocId::from(0), &docs);
        let target = DocId::from(2);
        ctl.drag_ended(&mut docs, Some(&target));
        ctl.confirm();

        let after = order(&docs);
        ctl.rollback(&mut docs);
        assert_eq!(order(&docs), after);
    }

    #[test]
    fn array_move_bounds_are_defensive() {
        let mut values = vec![1, 2, 3];
        array_move(&mut values, 5, 1);
        assert_eq!(values, vec![1, 2, 3]);
        array_move(&mut values, 0, 2);
        assert_eq!(values, vec![2, 3, 1]);
    }
}
