// SPDX-License-Identifier: MPL-2.0
//! Full-screen lightbox viewer.
//!
//! The container runs its own little lifecycle, `Opening -> Open -> Closing`,
//! driven by a fixed transition window; the orchestrator unmounts on the
//! [`Effect::Closed`] it emits at the end of the exit transition. Closing is
//! not user-cancelable mid-transition except by re-triggering the close.
//! Each mounted image surface hosts one [`zoom_pan::ZoomPanEngine`]; zoom
//! and pan state resets whenever the displayed index changes.

pub mod highres;
pub mod zoom_pan;

use crate::media::{DocId, MediaItem, MediaKind};
use highres::HighResLoader;
use iced::{Point, Size};
use zoom_pan::{SwipeAction, ZoomPanEngine};

/// Lifecycle of the mounted lightbox. "Closed" is represented by the
/// orchestrator dropping the component after [`Effect::Closed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Opening,
    Open,
    Closing,
}

/// Messages for the lightbox container.
#[derive(Debug, Clone)]
pub enum Message {
    /// The entry/exit transition window elapsed.
    TransitionElapsed,
    Next,
    Previous,
    SelectIndex(usize),
    CloseRequested,
    TogglePlay,
    /// Slideshow auto-advance cadence.
    SlideshowTick,
    ToggleThumbnails,
    EditRequested,
    MediaLoaded { index: usize },
    MediaLoadFailed { index: usize },
}

/// Effects produced by lightbox operations.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    /// Exit transition finished; the orchestrator should unmount.
    Closed,
    /// Open the host's edit view for the current document.
    Edit(DocId),
    /// Start fetching the original-resolution asset for `index`.
    LoadHighRes { index: usize, src: String },
    /// Warm the cache for the given neighbor assets.
    PrefetchNeighbors { sources: Vec<(usize, String)> },
}

#[derive(Debug, Clone)]
pub struct Lightbox {
    phase: Phase,
    items: Vec<MediaItem>,
    current: usize,
    playing: bool,
    /// Current media still decoding; gates the slideshow and the spinner.
    loading: bool,
    show_thumbnails: bool,
    zoom_pan: ZoomPanEngine,
    high_res: HighResLoader,
}

impl Lightbox {
    /// Mounts the lightbox on `initial` within `items`.
    #[must_use]
    pub fn open(items: Vec<MediaItem>, initial: usize) -> Self {
        let current = if items.is_empty() {
            0
        } else {
            initial.min(items.len() - 1)
        };
        let loading = items
            .get(current)
            .is_some_and(|item| item.kind == MediaKind::Image);
        Self {
            phase: Phase::Opening,
            items,
            current,
            playing: false,
            loading,
            show_thumbnails: true,
            zoom_pan: ZoomPanEngine::new(),
            high_res: HighResLoader::new(),
        }
    }

    /// Handle a container message.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::TransitionElapsed => match self.phase {
                Phase::Opening => {
                    self.phase = Phase::Open;
                    self.prefetch_effect()
                }
                Phase::Closing => Effect::Closed,
                Phase::Open => Effect::None,
            },
            Message::CloseRequested => {
                self.phase = Phase::Closing;
                // Clears any pending auto-advance.
                self.playing = false;
                Effect::None
            }
            Message::Next => self.navigate(self.wrapped(1)),
            Message::Previous => self.navigate(self.wrapped(-1)),
            Message::SelectIndex(index) => self.navigate(index),
            Message::TogglePlay => {
                self.playing = !self.playing;
                Effect::None
            }
            Message::SlideshowTick => {
                // Advance only once the current media finished loading.
                if self.playing && !self.loading && self.phase == Phase::Open {
                    self.navigate(self.wrapped(1))
                } else {
                    Effect::None
                }
            }
            Message::ToggleThumbnails => {
                self.show_thumbnails = !self.show_thumbnails;
                Effect::None
            }
            Message::EditRequested => match self.current_item() {
                Some(item) => Effect::Edit(item.id.clone()),
                None => Effect::None,
            },
            Message::MediaLoaded { index } => {
                if index == self.current {
                    self.loading = false;
                }
                Effect::None
            }
            Message::MediaLoadFailed { index } => {
                // Keep showing whatever is already on screen.
                if index == self.current {
                    self.loading = false;
                }
                Effect::None
            }
        }
    }

    fn wrapped(&self, step: isize) -> usize {
        let len = self.items.len();
        if len == 0 {
            return 0;
        }
        (self.current as isize + step).rem_euclid(len as isize) as usize
    }

    fn navigate(&mut self, index: usize) -> Effect {
        if self.items.is_empty() || index >= self.items.len() {
            return Effect::None;
        }
        self.current = index;
        self.zoom_pan.reset();
        self.high_res.reset();
        self.loading = self.items[index].kind == MediaKind::Image;
        self.prefetch_effect()
    }

    fn prefetch_effect(&self) -> Effect {
        if self.items.len() < 2 {
            return Effect::None;
        }
        let sources: Vec<(usize, String)> = [self.wrapped(1), self.wrapped(-1)]
            .into_iter()
            .filter(|&i| i != self.current)
            .filter(|&i| self.items[i].kind == MediaKind::Image)
            .map(|i| (i, self.items[i].src.clone()))
            .collect();
        if sources.is_empty() {
            Effect::None
        } else {
            Effect::PrefetchNeighbors { sources }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ZOOM-PAN ROUTING
    // ═══════════════════════════════════════════════════════════════════════

    /// Updates measured surface sizes before gesture handling.
    pub fn set_viewport(&mut self, container: Size, content: Size) {
        self.zoom_pan.set_viewport(container, content);
    }

    pub fn wheel(&mut self, delta_y: f32, cursor: Point) -> Effect {
        if !self.current_is_image() {
            return Effect::None;
        }
        self.zoom_pan.wheel(delta_y, cursor);
        self.maybe_load_high_res()
    }

    pub fn tap(&mut self, cursor: Point) -> Effect {
        if !self.current_is_image() {
            return Effect::None;
        }
        self.zoom_pan.tap(cursor);
        self.maybe_load_high_res()
    }

    pub fn double_tap(&mut self, cursor: Point) -> Effect {
        if !self.current_is_image() {
            return Effect::None;
        }
        self.zoom_pan.double_tap(cursor);
        self.maybe_load_high_res()
    }

    pub fn pointer_pressed(&mut self, cursor: Point) {
        if self.current_is_image() {
            self.zoom_pan.pointer_pressed(cursor);
        }
    }

    pub fn pointer_moved(&mut self, cursor: Point) {
        self.zoom_pan.pointer_moved(cursor);
    }

    pub fn pointer_released(&mut self) {
        self.zoom_pan.pointer_released();
    }

    pub fn touch_pressed(&mut self, finger: u64, position: Point) {
        self.zoom_pan.touch_pressed(finger, position);
    }

    pub fn touch_moved(&mut self, finger: u64, position: Point) -> Effect {
        self.zoom_pan.touch_moved(finger, position);
        self.maybe_load_high_res()
    }

    pub fn touch_released(&mut self, finger: u64, position: Point) -> Effect {
        match self.zoom_pan.touch_released(finger, position) {
            Some(SwipeAction::Next) => self.navigate(self.wrapped(1)),
            Some(SwipeAction::Previous) => self.navigate(self.wrapped(-1)),
            None => Effect::None,
        }
    }

    fn maybe_load_high_res(&mut self) -> Effect {
        let Some(item) = self.items.get(self.current) else {
            return Effect::None;
        };
        if self
            .high_res
            .should_load(self.current, self.zoom_pan.scale(), item.kind)
        {
            self.high_res.begin(self.current);
            Effect::LoadHighRes {
                index: self.current,
                src: item.src.clone(),
            }
        } else {
            Effect::None
        }
    }

    /// Records a finished high-res fetch. Returns `true` when the result is
    /// current and should be swapped in; stale or failed results leave the
    /// existing rendition on screen.
    pub fn high_res_finished(&mut self, index: usize, ok: bool) -> bool {
        if ok {
            self.high_res.complete(index)
        } else {
            self.high_res.fail(index);
            false
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Opening | Phase::Closing)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&MediaItem> {
        self.items.get(self.current)
    }

    fn current_is_image(&self) -> bool {
        self.current_item()
            .is_some_and(|item| item.kind == MediaKind::Image)
    }

    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn show_thumbnails(&self) -> bool {
        self.show_thumbnails
    }

    #[must_use]
    pub fn high_res_loaded(&self) -> bool {
        self.high_res.is_loaded(self.current)
    }

    #[must_use]
    pub fn zoom_pan(&self) -> &ZoomPanEngine {
        &self.zoom_pan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(count: usize) -> Vec<MediaItem> {
        (0..count)
            .map(|i| {
                MediaItem::new(DocId::from(i as i64), format!("{i}.jpg"), format!("{i}.jpg"))
                    .with_dimensions(800, 600)
            })
            .collect()
    }

    fn open_lightbox(count: usize) -> Lightbox {
        let mut lightbox = Lightbox::open(items(count), 0);
        lightbox.set_viewport(Size::new(800.0, 600.0), Size::new(800.0, 600.0));
        lightbox.handle(Message::TransitionElapsed);
        assert_eq!(lightbox.phase(), Phase::Open);
        lightbox
    }

    #[test]
    fn open_close_lifecycle() {
        let mut lightbox = Lightbox::open(items(3), 1);
        assert_eq!(lightbox.phase(), Phase::Opening);

        lightbox.handle(Message::TransitionElapsed);
        assert_eq!(lightbox.phase(), Phase::Open);

        lightbox.handle(Message::CloseRequested);
        assert_eq!(lightbox.phase(), Phase::Closing);

        let effect = lightbox.handle(Message::TransitionElapsed);
        assert!(matches!(effect, Effect::Closed));
    }

    #[test]
    fn open_clamps_out_of_range_initial_index() {
        let lightbox = Lightbox::open(items(3), 99);
        assert_eq!(lightbox.current_index(), 2);
    }

    #[test]
    fn navigation_wraps_and_resets_zoom() {
        let mut lightbox = open_lightbox(3);
        lightbox.handle(Message::MediaLoaded { index: 0 });
        lightbox.tap(Point::new(500.0, 350.0));
        assert!(lightbox.zoom_pan().is_zoomed());

        lightbox.handle(Message::Next);
        assert_eq!(lightbox.current_index(), 1);
        assert!(!lightbox.zoom_pan().is_zoomed());

        lightbox.handle(Message::Previous);
        lightbox.handle(Message::Previous);
        assert_eq!(lightbox.current_index(), 2, "previous from 0 wraps to the end");

        lightbox.handle(Message::Next);
        assert_eq!(lightbox.current_index(), 0, "next from the end wraps to 0");
    }

    #[test]
    fn slideshow_advances_only_when_playing_and_loaded() {
        let mut lightbox = open_lightbox(3);

        // Not playing: tick is inert.
        lightbox.handle(Message::SlideshowTick);
        assert_eq!(lightbox.current_index(), 0);

        lightbox.handle(Message::TogglePlay);
        // Still loading: advance is deferred.
        lightbox.handle(Message::SlideshowTick);
        assert_eq!(lightbox.current_index(), 0);

        lightbox.handle(Message::MediaLoaded { index: 0 });
        lightbox.handle(Message::SlideshowTick);
        assert_eq!(lightbox.current_index(), 1);
    }

    #[test]
    fn close_clears_pending_slideshow() {
        let mut lightbox = open_lightbox(3);
        lightbox.handle(Message::TogglePlay);
        assert!(lightbox.is_playing());

        lightbox.handle(Message::CloseRequested);
        assert!(!lightbox.is_playing());
        lightbox.handle(Message::MediaLoaded { index: 0 });
        lightbox.handle(Message::SlideshowTick);
        assert_eq!(lightbox.current_index(), 0);
    }

    #[test]
    fn zoom_past_threshold_requests_high_res_once() {
        let mut lightbox = open_lightbox(2);
        lightbox.handle(Message::MediaLoaded { index: 0 });

        // Below threshold: no request.
        let effect = lightbox.wheel(-100.0, Point::new(400.0, 300.0)); // scale 1.2
        assert!(matches!(effect, Effect::None));

        // Past threshold: exactly one request.
        let effect = lightbox.wheel(-100.0, Point::new(400.0, 300.0)); // scale 1.4
        assert!(matches!(effect, Effect::LoadHighRes { index: 0, .. }));
        let effect = lightbox.wheel(-100.0, Point::new(400.0, 300.0));
        assert!(matches!(effect, Effect::None));
    }

    #[test]
    fn stale_high_res_result_is_discarded_on_navigation() {
        let mut lightbox = open_lightbox(2);
        let effect = lightbox.wheel(-400.0, Point::new(400.0, 300.0));
        assert!(matches!(effect, Effect::LoadHighRes { index: 0, .. }));

        lightbox.handle(Message::Next);
        assert!(!lightbox.high_res_finished(0, true));
        assert!(!lightbox.high_res_loaded());
    }

    #[test]
    fn failed_high_res_fetch_keeps_current_rendition() {
        let mut lightbox = open_lightbox(2);
        let effect = lightbox.wheel(-400.0, Point::new(400.0, 300.0));
        assert!(matches!(effect, Effect::LoadHighRes { index: 0, .. }));

        assert!(!lightbox.high_res_finished(0, false));
        assert!(!lightbox.high_res_loaded());

        // The next zoom movement may retry.
        let effect = lightbox.wheel(-100.0, Point::new(400.0, 300.0));
        assert!(matches!(effect, Effect::LoadHighRes { index: 0, .. }));
    }

    #[test]
    fn navigation_emits_neighbor_prefetch() {
        let mut lightbox = open_lightbox(4);
        let effect = lightbox.handle(Message::Next);
        let Effect::PrefetchNeighbors { sources } = effect else {
            panic!("expected prefetch effect");
        };
        let indices: Vec<usize> = sources.iter().map(|(i, _)| *i).collect();
        assert!(indices.contains(&2));
        assert!(indices.contains(&0));
    }

    #[test]
    fn swipe_release_navigates() {
        let mut lightbox = open_lightbox(3);
        lightbox.touch_pressed(1, Point::new(400.0, 300.0));
        lightbox.touch_released(1, Point::new(300.0, 300.0));
        assert_eq!(lightbox.current_index(), 1);
    }

    #[test]
    fn non_image_items_ignore_zoom_gestures() {
        let mut docs = items(2);
        docs[0] = MediaItem::new(DocId::from(0), "clip.mp4", "clip.mp4");
        let mut lightbox = Lightbox::open(docs, 0);
        lightbox.set_viewport(Size::new(800.0, 600.0), Size::new(800.0, 600.0));
        lightbox.handle(Message::TransitionElapsed);

        lightbox.tap(Point::new(500.0, 300.0));
        assert!(!lightbox.zoom_pan().is_zoomed());
        let effect = lightbox.wheel(-400.0, Point::new(400.0, 300.0));
        assert!(matches!(effect, Effect::None));
    }
}
