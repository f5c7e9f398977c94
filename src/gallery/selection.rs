// SPDX-License-Identifier: MPL-2.0
//! Selection set shared by every input source.
//!
//! Click handlers, keyboard activation, and the marquee controller all
//! mutate selection through this one model so id normalization and
//! idempotency are enforced in a single place. The model is owned by the
//! gallery manager per mount; child renderers receive derived flags, never
//! a copy of the set.

use crate::media::{DocId, MediaItem};
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    selected: HashSet<DocId>,
}

impl SelectionModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the id, in any equivalent representation, is selected.
    #[must_use]
    pub fn is_selected(&self, id: &DocId) -> bool {
        self.selected.contains(id)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Flips the selection state of one id and returns the new state.
    pub fn toggle(&mut self, id: DocId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Forces one id to the given state.
    pub fn set(&mut self, id: DocId, selected: bool) {
        if selected {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }
    }

    /// Applies `target_state` to every item in the inclusive index range.
    ///
    /// Only items not already in the target state are touched, so
    /// re-applying the same range is a no-op. The caller derives
    /// `target_state` from the clicked item (clicking a selected item in
    /// range mode deselects the whole range).
    pub fn range_select(
        &mut self,
        items: &[MediaItem],
        anchor: usize,
        target: usize,
        target_state: bool,
    ) {
        if items.is_empty() {
            return;
        }
        let last = items.len() - 1;
        let start = anchor.min(target).min(last);
        let end = anchor.max(target).min(last);
        for item in &items[start..=end] {
            if self.is_selected(&item.id) != target_state {
                self.set(item.id.clone(), target_state);
            }
        }
    }

    /// Selects every id unconditionally. Idempotent.
    pub fn select_all<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a DocId>,
    {
        for id in ids {
            self.selected.insert(id.clone());
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Commits a finished marquee gesture.
    ///
    /// In append mode the hit set unions with the prior selection; items hit
    /// become selected and everything else keeps its state. Otherwise the
    /// final selection is exactly the hit set.
    pub fn commit_marquee(&mut self, items: &[MediaItem], hits: &HashSet<DocId>, append: bool) {
        for item in items {
            let currently = self.is_selected(&item.id);
            let should = hits.contains(&item.id) || (append && currently);
            if currently != should {
                self.set(item.id.clone(), should);
            }
        }
    }

    /// Ids currently selected, in arbitrary order.
    pub fn ids(&self) -> impl Iterator<Item = &DocId> {
        self.selected.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(count: usize) -> Vec<MediaItem> {
        (0..count)
            .map(|i| MediaItem::new(DocId::from(i as i64), format!("{i}.jpg"), format!("{i}.jpg")))
            .collect()
    }

    #[test]
    fn toggle_is_stable_across_id_representations() {
        let mut model = SelectionModel::new();
        model.toggle(DocId::from(5));

        assert!(model.is_selected(&DocId::from("5")));
        assert_eq!(
            model.is_selected(&DocId::from("5")),
            model.is_selected(&DocId::from(5))
        );

        // Toggling via the other representation deselects, never duplicates.
        model.toggle(DocId::from("5"));
        assert!(!model.is_selected(&DocId::from(5)));
        assert_eq!(model.count(), 0);
    }

    #[test]
    fn range_select_is_idempotent() {
        let docs = items(8);
        let mut model = SelectionModel::new();

        model.range_select(&docs, 2, 5, true);
        let first: HashSet<DocId> = model.ids().cloned().collect();

        model.range_select(&docs, 2, 5, true);
        let second: HashSet<DocId> = model.ids().cloned().collect();

        assert_eq!(first, second);
        assert_eq!(model.count(), 4);
    }

    #[test]
    fn range_select_deselects_when_target_state_is_false() {
        let docs = items(6);
        let mut model = SelectionModel::new();
        model.select_all(docs.iter().map(|d| &d.id));

        model.range_select(&docs, 1, 3, false);
        assert!(!model.is_selected(&docs[1].id));
        assert!(!model.is_selected(&docs[2].id));
        assert!(!model.is_selected(&docs[3].id));
        assert!(model.is_selected(&docs[0].id));
        assert!(model.is_selected(&docs[4].id));
    }

    #[test]
    fn range_select_clamps_out_of_bounds_indices() {
        let docs = items(3);
        let mut model = SelectionModel::new();
        model.range_select(&docs, 1, 99, true);
        assert_eq!(model.count(), 2);
    }

    #[test]
    fn commit_marquee_append_unions_with_existing() {
        let docs = items(4);
        let mut model = SelectionModel::new();
        model.set(docs[1].id.clone(), true);

        let hits: HashSet<DocId> = [docs[2].id.clone(), docs[3].id.clone()].into();
        model.commit_marquee(&docs, &hits, true);

        assert!(model.is_selected(&docs[1].id));
        assert!(model.is_selected(&docs[2].id));
        assert!(model.is_selected(&docs[3].id));
        assert_eq!(model.count(), 3);
    }

    #[test]
    fn commit_marquee_replace_drops_prior_selection() {
        let docs = items(4);
        let mut model = SelectionModel::new();
        model.set(docs[1].id.clone(), true);

        let hits: HashSet<DocId> = [docs[2].id.clone(), docs[3].id.clone()].into();
        model.commit_marquee(&docs, &hits, false);

        assert!(!model.is_selected(&docs[1].id));
        assert!(model.is_selected(&docs[2].id));
        assert!(model.is_selected(&docs[3].id));
        assert_eq!(model.count(), 2);
    }

    #[test]
    fn select_all_then_clear() {
        let docs = items(5);
        let mut model = SelectionModel::new();
        model.select_all(docs.iter().map(|d| &d.id));
        assert_eq!(model.count(), 5);

        // Selecting all again changes nothing.
        model.select_all(docs.iter().map(|d| &d.id));
        assert_eq!(model.count(), 5);

        model.clear();
        assert!(model.is_empty());
    }
}
