// SPDX-License-Identifier: MPL-2.0
//! Spatial keyboard navigation per layout.
//!
//! Each layout supplies a [`GeometryAdapter`] mapping a focused index plus
//! an arrow direction to the next index, given the layout's actual 2D
//! arrangement. Adapters are pure and always return a valid index; at the
//! first and last rows, vertical movement holds position instead of
//! wrapping.

use crate::gallery::justified::RowLayout;

/// Arrow-key direction, decoupled from any windowing toolkit key type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Left,
    Right,
    Up,
    Down,
}

pub trait GeometryAdapter {
    /// Next focus index for a directional move. Must return a value in
    /// `[0, total - 1]` whenever `total > 0`, and `current` when the move
    /// cannot be resolved.
    fn next_index(&self, current: usize, direction: NavDirection, total: usize) -> usize;
}

/// Uniform-column navigation used by the grid and masonry layouts.
///
/// Masonry deals items into columns round-robin, so `current ± columns`
/// lands on the vertical neighbor there just as it does in the grid.
#[derive(Debug, Clone, Copy)]
pub struct ColumnGeometry {
    columns: usize,
}

impl ColumnGeometry {
    #[must_use]
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
        }
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }
}

impl GeometryAdapter for ColumnGeometry {
    fn next_index(&self, current: usize, direction: NavDirection, total: usize) -> usize {
        if total == 0 {
            return current;
        }
        let last = total - 1;
        let current = current.min(last);
        match direction {
            NavDirection::Right => (current + 1).min(last),
            NavDirection::Left => current.saturating_sub(1),
            NavDirection::Down => (current + self.columns).min(last),
            NavDirection::Up => current.saturating_sub(self.columns),
        }
    }
}

/// Row-aware navigation for the justified layout.
///
/// Row membership and item widths vary, so vertical movement finds the
/// geometrically closest item in the adjacent row by horizontal center
/// distance rather than applying a fixed column offset.
#[derive(Debug, Clone, Copy)]
pub struct JustifiedGeometry<'a> {
    rows: &'a RowLayout,
}

impl<'a> JustifiedGeometry<'a> {
    #[must_use]
    pub fn new(rows: &'a RowLayout) -> Self {
        Self { rows }
    }
}

impl GeometryAdapter for JustifiedGeometry<'_> {
    fn next_index(&self, current: usize, direction: NavDirection, total: usize) -> usize {
        if total == 0 {
            return current;
        }
        let last = total - 1;
        match direction {
            NavDirection::Right => return (current + 1).min(last),
            NavDirection::Left => return current.saturating_sub(1),
            NavDirection::Up | NavDirection::Down => {}
        }

        // Defensive no-op when the index cannot be located in any row
        // (layout not yet computed for the current list).
        let Some((row_idx, col_idx)) = self.rows.locate(current) else {
            return current;
        };
        let rows = self.rows.rows();

        let target_row = match direction {
            NavDirection::Up if row_idx > 0 => &rows[row_idx - 1],
            NavDirection::Down if row_idx + 1 < rows.len() => &rows[row_idx + 1],
            _ => return current,
        };

        let target_x = rows[row_idx].center_x(col_idx);
        target_row.closest_to(target_x).min(last)
    }
}
