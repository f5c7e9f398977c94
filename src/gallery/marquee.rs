// SPDX-License-Identifier: MPL-2.0
//! Marquee (rubber-band) selection controller.
//!
//! State machine: `Idle -> Armed -> Dragging -> Idle`. A background press
//! arms the controller and snapshots every item's bounding box in document
//! coordinates; the snapshot is captured once and never recomputed mid-drag
//! (items are static for the duration of one gesture). The drag activates
//! after 5px of travel, so a plain click on background area never changes
//! the selection. Near the viewport's top and bottom edges the controller
//! reports an auto-scroll velocity that the host applies on animation
//! ticks.

use crate::config::{
    AUTO_SCROLL_EDGE_ZONE, AUTO_SCROLL_MIN_SPEED, MARQUEE_ACTIVATION_DISTANCE,
};
use crate::media::DocId;
use iced::{Point, Rectangle};
use std::collections::HashSet;

/// One item's cached bounding box in document coordinates.
#[derive(Debug, Clone)]
pub struct ItemBounds {
    pub id: DocId,
    pub bounds: Rectangle,
}

/// Measured geometry the controller depends on, supplied by injection so
/// the hit-testing logic is unit-testable with fake metrics.
#[derive(Debug, Clone, Default)]
pub struct LayoutMetrics {
    /// Visible viewport height, for the auto-scroll edge zones.
    pub viewport_height: f32,
    /// Item boxes in document coordinates, in list order.
    pub items: Vec<ItemBounds>,
}

/// Rectangle for the visual overlay, in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarqueeState {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub active: bool,
}

/// Final hit set delivered on pointer release.
#[derive(Debug, Clone)]
pub struct MarqueeCommit {
    pub hits: HashSet<DocId>,
    pub append: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Armed,
    Dragging,
}

#[derive(Debug, Clone)]
pub struct MarqueeController {
    phase: Phase,
    start_viewport: Point,
    /// Scroll offset at press time; the press point is fixed in document
    /// space even while auto-scroll moves the viewport under it.
    start_scroll: f32,
    last_viewport: Point,
    current_scroll: f32,
    metrics: Option<LayoutMetrics>,
    append: bool,
    state: MarqueeState,
    hits: HashSet<DocId>,
    auto_scroll: Option<f32>,
}

impl Default for MarqueeController {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            start_viewport: Point::ORIGIN,
            start_scroll: 0.0,
            last_viewport: Point::ORIGIN,
            current_scroll: 0.0,
            metrics: None,
            append: false,
            state: MarqueeState::default(),
            hits: HashSet::new(),
            auto_scroll: None,
        }
    }
}

impl MarqueeController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the controller on a primary-button press over background area.
    ///
    /// The caller is responsible for excluding presses on interactive
    /// controls (buttons, checkboxes, cards' action areas) before calling.
    pub fn pointer_pressed(
        &mut self,
        position: Point,
        scroll_offset: f32,
        append: bool,
        metrics: LayoutMetrics,
    ) {
        self.phase = Phase::Armed;
        self.start_viewport = position;
        self.start_scroll = scroll_offset;
        self.last_viewport = position;
        self.current_scroll = scroll_offset;
        self.metrics = Some(metrics);
        self.append = append;
        self.hits.clear();
        self.auto_scroll = None;
        self.state = MarqueeState::default();
    }

    /// Feeds a pointer move. Returns `true` once the marquee is visibly
    /// dragging and its state or hit set may have changed.
    pub fn pointer_moved(&mut self, position: Point, scroll_offset: f32, append: bool) -> bool {
        match self.phase {
            Phase::Idle => return false,
            Phase::Armed => {
                let distance = self.start_viewport.distance(position);
                if distance < MARQUEE_ACTIVATION_DISTANCE {
                    self.last_viewport = position;
                    self.current_scroll = scroll_offset;
                    return false;
                }
                self.phase = Phase::Dragging;
            }
            Phase::Dragging => {}
        }

        self.last_viewport = position;
        self.current_scroll = scroll_offset;
        self.append = append;
        self.recompute();
        true
    }

    /// Re-runs hit-testing after the host scrolled under a stationary
    /// pointer during auto-scroll.
    pub fn auto_scroll_tick(&mut self, scroll_offset: f32) {
        if self.phase != Phase::Dragging {
            return;
        }
        self.current_scroll = scroll_offset;
        self.recompute();
    }

    /// Ends the gesture. Returns the final hit set only when a real drag
    /// happened; a press-and-release without movement is a plain click and
    /// must not touch the selection.
    pub fn pointer_released(&mut self) -> Option<MarqueeCommit> {
        let commit = if self.phase == Phase::Dragging {
            Some(MarqueeCommit {
                hits: std::mem::take(&mut self.hits),
                append: self.append,
            })
        } else {
            None
        };
        self.reset();
        commit
    }

    /// Abandons any gesture in progress (component teardown, lost pointer).
    pub fn cancel(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.metrics = None;
        self.hits.clear();
        self.auto_scroll = None;
        self.state = MarqueeState::default();
    }

    fn recompute(&mut self) {
        let position = self.last_viewport;

        self.state = MarqueeState {
            x: position.x.min(self.start_viewport.x),
            y: position.y.min(self.start_viewport.y),
            width: (position.x - self.start_viewport.x).abs(),
            height: (position.y - self.start_viewport.y).abs(),
            active: true,
        };

        let Some(metrics) = &self.metrics else {
            // Released container reference; treat as a cancelled gesture.
            return;
        };

        // Document-space rectangle for hit-testing; the start point uses the
        // scroll offset captured at press time.
        let start_doc_y = self.start_viewport.y + self.start_scroll;
        let current_doc_y = position.y + self.current_scroll;
        let x = position.x.min(self.start_viewport.x);
        let y = current_doc_y.min(start_doc_y);
        let width = (position.x - self.start_viewport.x).abs();
        let height = (current_doc_y - start_doc_y).abs();

        self.hits = metrics
            .items
            .iter()
            .filter(|item| {
                let b = item.bounds;
                x < b.x + b.width && x + width > b.x && y < b.y + b.height && y + height > b.y
            })
            .map(|item| item.id.clone())
            .collect();

        // Proportional acceleration toward the viewport edges.
        let top_dist = position.y;
        let bottom_dist = metrics.viewport_height - position.y;
        self.auto_scroll = if top_dist < AUTO_SCROLL_EDGE_ZONE {
            Some(-((AUTO_SCROLL_EDGE_ZONE - top_dist) / 2.0).max(AUTO_SCROLL_MIN_SPEED))
        } else if bottom_dist < AUTO_SCROLL_EDGE_ZONE {
            Some(((AUTO_SCROLL_EDGE_ZONE - bottom_dist) / 2.0).max(AUTO_SCROLL_MIN_SPEED))
        } else {
            None
        };
    }

    /// True once the visible marquee rectangle is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Dragging
    }

    /// True from press until release, including the pre-threshold window.
    #[must_use]
    pub fn is_engaged(&self) -> bool {
        self.phase != Phase::Idle
    }

    #[must_use]
    pub fn state(&self) -> MarqueeState {
        self.state
    }

    /// Live hit set for the selection preview during a drag.
    #[must_use]
    pub fn hits(&self) -> &HashSet<DocId> {
        &self.hits
    }

    #[must_use]
    pub fn append_mode(&self) -> bool {
        self.append
    }

    /// Pixels-per-tick scroll velocity while the pointer is in an edge
    /// zone; `None` stops the auto-scroll loop.
    #[must_use]
    pub fn auto_scroll_velocity(&self) -> Option<f32> {
        self.auto_scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::Size;

    fn metrics(viewport_height: f32) -> LayoutMetrics {
        LayoutMetrics {
            viewport_height,
            items: vec![
                ItemBounds {
                    id: DocId::from(1),
                    bounds: Rectangle::new(Point::new(0.0, 0.0), Size::new(100.0, 100.0)),
                },
                ItemBounds {
                    id: DocId::from(2),
                    bounds: Rectangle::new(Point::new(200.0, 0.0), Size::new(100.0, 100.0)),
                },
            ],
        }
    }

    #[test]
    fn press_alone_does_not_activate() {
        let mut marquee = MarqueeController::new();
        marquee.pointer_pressed(Point::new(50.0, 50.0), 0.0, false, metrics(600.0));
        assert!(marquee.is_engaged());
        assert!(!marquee.is_active());

        // Sub-threshold movement stays armed.
        assert!(!marquee.pointer_moved(Point::new(52.0, 52.0), 0.0, false));
        assert!(!marquee.is_active());
    }

    #[test]
    fn release_while_armed_commits_nothing() {
        let mut marquee = MarqueeController::new();
        marquee.pointer_pressed(Point::new(50.0, 50.0), 0.0, false, metrics(600.0));
        marquee.pointer_moved(Point::new(52.0, 51.0), 0.0, false);
        assert!(marquee.pointer_released().is_none());
        assert!(!marquee.is_engaged());
    }

    #[test]
    fn hit_test_requires_overlap_on_both_axes() {
        let mut marquee = MarqueeController::new();
        // Drag from (50,50) to (150,150): spans x [50,150], y [50,150].
        marquee.pointer_pressed(Point::new(50.0, 50.0), 0.0, false, metrics(600.0));
        assert!(marquee.pointer_moved(Point::new(150.0, 150.0), 0.0, false));

        assert!(marquee.hits().contains(&DocId::from(1)));
        assert!(!marquee.hits().contains(&DocId::from(2)));
    }

    #[test]
    fn commit_carries_last_hit_set_and_append_flag() {
        let mut marquee = MarqueeController::new();
        marquee.pointer_pressed(Point::new(50.0, 50.0), 0.0, true, metrics(600.0));
        marquee.pointer_moved(Point::new(310.0, 150.0), 0.0, true);

        let commit = marquee.pointer_released().expect("drag must commit");
        assert!(commit.append);
        assert!(commit.hits.contains(&DocId::from(1)));
        assert!(commit.hits.contains(&DocId::from(2)));
        assert!(!marquee.is_engaged());
    }

    #[test]
    fn scroll_offset_shifts_document_hit_testing() {
        let mut marquee = MarqueeController::new();
        // Items live at document y [0,100]; viewport is scrolled 80px down,
        // so a drag over viewport y [0,40] covers document y [80,120].
        marquee.pointer_pressed(Point::new(10.0, 0.0), 80.0, false, metrics(600.0));
        marquee.pointer_moved(Point::new(90.0, 40.0), 80.0, false);
        assert!(marquee.hits().contains(&DocId::from(1)));

        // Scrolled past the item entirely: document y [150, 190].
        let mut below = MarqueeController::new();
        below.pointer_pressed(Point::new(10.0, 0.0), 150.0, false, metrics(600.0));
        below.pointer_moved(Point::new(90.0, 40.0), 150.0, false);
        assert!(below.hits().is_empty());
    }

    #[test]
    fn auto_scroll_engages_near_edges_only() {
        let mut marquee = MarqueeController::new();
        marquee.pointer_pressed(Point::new(50.0, 300.0), 0.0, false, metrics(600.0));

        marquee.pointer_moved(Point::new(60.0, 300.0), 0.0, false);
        assert_eq!(marquee.auto_scroll_velocity(), None);

        marquee.pointer_moved(Point::new(60.0, 10.0), 0.0, false);
        let up = marquee.auto_scroll_velocity().expect("top zone scrolls");
        assert!(up < 0.0);
        assert!(up.abs() >= AUTO_SCROLL_MIN_SPEED);

        marquee.pointer_moved(Point::new(60.0, 595.0), 0.0, false);
        let down = marquee.auto_scroll_velocity().expect("bottom zone scrolls");
        assert!(down > 0.0);

        // Speed grows as the pointer approaches the edge.
        marquee.pointer_moved(Point::new(60.0, 599.0), 0.0, false);
        let faster = marquee.auto_scroll_velocity().expect("still scrolling");
        assert!(faster > down);
    }

    #[test]
    fn auto_scroll_tick_recomputes_hits_with_stationary_pointer() {
        let tall = LayoutMetrics {
            viewport_height: 200.0,
            items: vec![
                ItemBounds {
                    id: DocId::from(1),
                    bounds: Rectangle::new(Point::new(0.0, 0.0), Size::new(100.0, 100.0)),
                },
                ItemBounds {
                    id: DocId::from(2),
                    bounds: Rectangle::new(Point::new(0.0, 300.0), Size::new(100.0, 100.0)),
                },
            ],
        };
        let mut marquee = MarqueeController::new();
        marquee.pointer_pressed(Point::new(10.0, 10.0), 0.0, false, tall);
        marquee.pointer_moved(Point::new(90.0, 195.0), 0.0, false);
        // Drag spans document y [10,195]: only the first item is hit.
        assert!(marquee.hits().contains(&DocId::from(1)));
        assert!(!marquee.hits().contains(&DocId::from(2)));

        // Host scrolled 150px down under the stationary pointer; the press
        // point stays anchored in document space while the live corner
        // follows the viewport, sweeping the second item into the span.
        marquee.auto_scroll_tick(150.0);
        assert!(marquee.hits().contains(&DocId::from(2)));
    }

    #[test]
    fn snapshot_is_captured_once_per_gesture() {
        let mut marquee = MarqueeController::new();
        marquee.pointer_pressed(Point::new(0.0, 0.0), 0.0, false, metrics(600.0));
        marquee.pointer_moved(Point::new(120.0, 120.0), 0.0, false);
        let first: HashSet<DocId> = marquee.hits().clone();

        // Same gesture, same rectangle: identical hits even if the real
        // layout changed underneath, because the snapshot is fixed.
        marquee.pointer_moved(Point::new(120.0, 120.0), 0.0, false);
        assert_eq!(&first, marquee.hits());
    }
}
