// SPDX-License-Identifier: MPL-2.0
//! Progressive high-resolution loading guard.
//!
//! The lightbox initially shows a sized-down rendition and only fetches the
//! original once the user zooms past a threshold. This tracker enforces the
//! single-flight rule (one fetch per item at a time) and discards stale
//! completions that arrive after the viewed item changed. A failed decode
//! clears the in-flight flag and the already-displayed rendition stays up.

use crate::config::HIGH_RES_SCALE_THRESHOLD;
use crate::media::MediaKind;

#[derive(Debug, Clone, Default)]
pub struct HighResLoader {
    loading_for: Option<usize>,
    loaded_for: Option<usize>,
}

impl HighResLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a fetch should start for the item at `index` given the
    /// current zoom scale.
    #[must_use]
    pub fn should_load(&self, index: usize, scale: f32, kind: MediaKind) -> bool {
        kind == MediaKind::Image
            && scale > HIGH_RES_SCALE_THRESHOLD
            && self.loaded_for != Some(index)
            && self.loading_for != Some(index)
    }

    /// Marks a fetch as in flight.
    pub fn begin(&mut self, index: usize) {
        self.loading_for = Some(index);
    }

    /// Records a completed fetch. Returns `false` when the completion is
    /// stale (the viewer moved on) and the result must be discarded.
    pub fn complete(&mut self, index: usize) -> bool {
        if self.loading_for != Some(index) {
            return false;
        }
        self.loading_for = None;
        self.loaded_for = Some(index);
        true
    }

    /// Records a failed fetch, clearing the in-flight flag so a later zoom
    /// may retry.
    pub fn fail(&mut self, index: usize) {
        if self.loading_for == Some(index) {
            self.loading_for = None;
        }
    }

    /// Forgets all tracking when the displayed index changes.
    pub fn reset(&mut self) {
        self.loading_for = None;
        self.loaded_for = None;
    }

    #[must_use]
    pub fn is_loaded(&self, index: usize) -> bool {
        self.loaded_for == Some(index)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading_for.is_some()
    }
}
