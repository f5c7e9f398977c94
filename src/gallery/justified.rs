// SPDX-License-Identifier: MPL-2.0
//! Row packing for the justified layout.
//!
//! Items are packed greedily into rows: a row is committed once scaling it
//! to the container width would bring its height down to the target. The
//! final orphan row keeps the target height instead of being stretched.
//! Layouts are value objects, recomputed wholesale on every width or list
//! change and never mutated in place.

use crate::config::{GALLERY_GAP, JUSTIFIED_MAX_ROW_HEIGHT, JUSTIFIED_TARGET_ROW_HEIGHT};
use crate::media::MediaItem;

/// One item's computed slot within a row. `index` is the item's position in
/// the original list; row membership never changes list order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSlot {
    pub index: usize,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub height: f32,
    pub slots: Vec<RowSlot>,
}

impl Row {
    /// Center-x of the slot at `col`, measured from the row's left edge and
    /// accounting for inter-item gaps.
    #[must_use]
    pub fn center_x(&self, col: usize) -> f32 {
        let mut x = 0.0;
        for slot in &self.slots[..col] {
            x += slot.width + GALLERY_GAP;
        }
        x + self.slots[col].width / 2.0
    }

    /// Index (into the item list) of the slot horizontally closest to
    /// `target_x`.
    #[must_use]
    pub fn closest_to(&self, target_x: f32) -> usize {
        let mut closest_dist = f32::INFINITY;
        let mut closest_index = self.slots[0].index;
        let mut x = 0.0;
        for slot in &self.slots {
            let center = x + slot.width / 2.0;
            let dist = (center - target_x).abs();
            if dist < closest_dist {
                closest_dist = dist;
                closest_index = slot.index;
            }
            x += slot.width + GALLERY_GAP;
        }
        closest_index
    }
}

/// Computed justified layout. Ephemeral; rebuilt on any input change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowLayout {
    rows: Vec<Row>,
}

impl RowLayout {
    /// Packs `items` into rows for the given container width.
    ///
    /// A zero or negative width occurs transiently while the container is
    /// unmeasured; it yields an empty layout rather than an error.
    #[must_use]
    pub fn compute(items: &[MediaItem], container_width: f32) -> Self {
        if items.is_empty() || container_width <= 0.0 {
            return Self::default();
        }

        let mut rows = Vec::new();
        let mut current: Vec<(usize, f32)> = Vec::new();
        let mut ratio_sum = 0.0_f32;

        for (index, item) in items.iter().enumerate() {
            let ratio = item.layout_aspect_ratio();
            current.push((index, ratio));
            ratio_sum += ratio;

            let gap_total = (current.len() - 1) as f32 * GALLERY_GAP;
            let estimated_height = (container_width - gap_total) / ratio_sum;

            if estimated_height <= JUSTIFIED_TARGET_ROW_HEIGHT {
                // 1px safety margin absorbs per-item rounding.
                let available = container_width - gap_total - 1.0;
                let height = (available / ratio_sum).min(JUSTIFIED_MAX_ROW_HEIGHT);
                rows.push(commit_row(&current, height));
                current.clear();
                ratio_sum = 0.0;
            }
        }

        // Orphan row keeps the target height instead of stretching.
        if !current.is_empty() {
            rows.push(commit_row(&current, JUSTIFIED_TARGET_ROW_HEIGHT));
        }

        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Locates an item index within the layout as `(row, column)`.
    #[must_use]
    pub fn locate(&self, index: usize) -> Option<(usize, usize)> {
        for (r, row) in self.rows.iter().enumerate() {
            for (c, slot) in row.slots.iter().enumerate() {
                if slot.index == index {
                    return Some((r, c));
                }
            }
        }
        None
    }

    /// Total content height including inter-row gaps.
    #[must_use]
    pub fn content_height(&self) -> f32 {
        let heights: f32 = self.rows.iter().map(|r| r.height).sum();
        let gaps = self.rows.len().saturating_sub(1) as f32 * GALLERY_GAP;
        heights + gaps
    }
}

fn commit_row(entries: &[(usize, f32)], height: f32) -> Row {
    Row {
        height,
        slots: entries
            .iter()
            .map(|&(index, ratio)| RowSlot {
                index,
                width: ratio * height,
                height,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::DocId;

    fn square_items(count: usize) -> Vec<MediaItem> {
        (0..count)
            .map(|i| {
                MediaItem::new(DocId::from(i as i64), format!("{i}.jpg"), format!("{i}.jpg"))
                    .with_dimensions(500, 500)
            })
            .collect()
    }

    #[test]
    fn zero_width_yields_empty_layout() {
        let layout = RowLayout::compute(&square_items(5), 0.0);
        assert!(layout.is_empty());
    }

    #[test]
    fn indices_stay_in_list_order() {
        let layout = RowLayout::compute(&square_items(12), 1200.0);
        let flattened: Vec<usize> = layout
            .rows()
            .iter()
            .flat_map(|r| r.slots.iter().map(|s| s.index))
            .collect();
        assert_eq!(flattened, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn committed_rows_fill_container_width() {
        let layout = RowLayout::compute(&square_items(12), 1200.0);
        assert!(layout.rows().len() > 1);

        // Every row except a possible orphan spans close to the container.
        for row in &layout.rows()[..layout.rows().len() - 1] {
            let gap_total = (row.slots.len() - 1) as f32 * GALLERY_GAP;
            let width: f32 = row.slots.iter().map(|s| s.width).sum::<f32>() + gap_total;
            assert!((width - 1200.0).abs() < 2.0, "row width {width}");
        }
    }

    #[test]
    fn orphan_row_keeps_target_height() {
        // One wide-ish item alone cannot fill a row.
        let items = square_items(1);
        let layout = RowLayout::compute(&items, 1200.0);
        assert_eq!(layout.rows().len(), 1);
        assert!((layout.rows()[0].height - JUSTIFIED_TARGET_ROW_HEIGHT).abs() < f32::EPSILON);
    }

    #[test]
    fn recompute_replaces_rows_wholesale() {
        let items = square_items(12);
        let wide = RowLayout::compute(&items, 1200.0);
        let narrow = RowLayout::compute(&items, 700.0);
        assert_ne!(wide, narrow);

        // Item indices remain addressable after a resize; only geometry moved.
        assert!(narrow.locate(7).is_some());
        assert!(wide.locate(7).is_some());
    }

    #[test]
    fn locate_finds_row_and_column() {
        let layout = RowLayout::compute(&square_items(12), 1200.0);
        let (row, col) = layout.locate(0).expect("first item must be locatable");
        assert_eq!((row, col), (0, 0));
        assert_eq!(layout.locate(99), None);
    }

    #[test]
    fn closest_to_picks_nearest_center() {
        let layout = RowLayout::compute(&square_items(12), 1200.0);
        let row = &layout.rows()[0];
        // The first slot's own center maps back to the first slot.
        let first_center = row.center_x(0);
        assert_eq!(row.closest_to(first_center), row.slots[0].index);
        // A point far right maps to the last slot in the row.
        assert_eq!(row.closest_to(1e6), row.slots[row.slots.len() - 1].index);
    }

    #[test]
    fn content_height_includes_row_gaps() {
        let layout = RowLayout::compute(&square_items(12), 1200.0);
        let sum: f32 = layout.rows().iter().map(|r| r.height).sum();
        let expected = sum + (layout.rows().len() - 1) as f32 * GALLERY_GAP;
        assert!((layout.content_height() - expected).abs() < f32::EPSILON);
    }
}
