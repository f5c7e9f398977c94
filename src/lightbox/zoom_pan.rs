// SPDX-License-Identifier: MPL-2.0
//! Zoom and pan gesture engine for one lightbox image surface.
//!
//! One engine instance owns the full gesture state for a single pannable,
//! zoomable surface: wheel-zoom-to-cursor, click/double-click focal zoom,
//! single-pointer pan, two-finger pinch with focal-point preservation, and
//! swipe-to-navigate. All gesture paths share the same bounds clamping,
//! always computed against the *target* scale. Invariant: `scale == 1`
//! implies `position == (0, 0)`.
//!
//! Positions are measured relative to the container center, matching the
//! transform the presentational layer applies.

use crate::config::{
    BOUNDS_BUFFER, DRAG_ACTIVATION_DISTANCE, FOCAL_ZOOM_SCALE, MAX_SCALE, MIN_SCALE,
    SWIPE_NAVIGATION_DISTANCE, WHEEL_ZOOM_RATE,
};
use iced::{Point, Size, Vector};
use std::collections::BTreeMap;

/// Navigation triggered by a horizontal swipe while unzoomed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAction {
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy)]
struct DragGesture {
    /// Pointer position minus pan position at press; pan follows the
    /// pointer by subtracting this grab offset.
    grab: Vector,
    origin: Point,
    has_dragged: bool,
}

#[derive(Debug, Clone, Copy)]
struct PinchGesture {
    start_distance: f32,
    initial_scale: f32,
    /// Pinch midpoint at gesture start, relative to the container center.
    start_center: Vector,
    start_position: Vector,
}

#[derive(Debug, Clone)]
pub struct ZoomPanEngine {
    scale: f32,
    position: Vector,
    container: Size,
    /// Displayed (fitted) content size at scale 1.
    content: Size,
    drag: Option<DragGesture>,
    /// Set when a drag ended with real movement; the next tap is the tail
    /// of that drag and must not toggle zoom.
    suppress_tap: bool,
    pinch: Option<PinchGesture>,
    touches: BTreeMap<u64, Point>,
    swipe_origin: Option<Point>,
}

impl Default for ZoomPanEngine {
    fn default() -> Self {
        Self {
            scale: MIN_SCALE,
            position: Vector::new(0.0, 0.0),
            container: Size::ZERO,
            content: Size::ZERO,
            drag: None,
            suppress_tap: false,
            pinch: None,
            touches: BTreeMap::new(),
            swipe_origin: None,
        }
    }
}

impl ZoomPanEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the measured container and fitted content sizes. Bounds are
    /// derived from these on every gesture, so a resize takes effect on
    /// the next movement.
    pub fn set_viewport(&mut self, container: Size, content: Size) {
        self.container = container;
        self.content = content;
    }

    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[must_use]
    pub fn position(&self) -> Vector {
        self.position
    }

    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.scale > MIN_SCALE
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Returns to the rest state. Called on every displayed-item change,
    /// regardless of any gesture in progress.
    pub fn reset(&mut self) {
        self.scale = MIN_SCALE;
        self.position = Vector::new(0.0, 0.0);
        self.drag = None;
        self.suppress_tap = false;
        self.pinch = None;
        self.touches.clear();
        self.swipe_origin = None;
    }

    /// Wheel zoom toward the cursor. `cursor` is in container coordinates
    /// (origin at the container's top-left).
    pub fn wheel(&mut self, delta_y: f32, cursor: Point) {
        let new_scale = (self.scale + delta_y * -WHEEL_ZOOM_RATE).clamp(MIN_SCALE, MAX_SCALE);
        if (new_scale - MIN_SCALE).abs() < f32::EPSILON {
            self.scale = MIN_SCALE;
            self.position = Vector::new(0.0, 0.0);
            return;
        }

        // Keep the image point under the cursor stationary across the
        // scale change.
        let mouse = self.center_relative(cursor);
        let img_x = (mouse.x - self.position.x) / self.scale;
        let img_y = (mouse.y - self.position.y) / self.scale;
        let target = Vector::new(mouse.x - img_x * new_scale, mouse.y - img_y * new_scale);

        self.position = self.clamp_position(target, new_scale);
        self.scale = new_scale;
    }

    /// Click on the image: toggles between rest and a fixed focal zoom.
    /// Swallowed when the click is the tail end of a pan drag.
    pub fn tap(&mut self, cursor: Point) {
        if self.suppress_tap {
            self.suppress_tap = false;
            return;
        }
        self.toggle_focal_zoom(cursor);
    }

    /// Double-click toggles the same focal zoom, independent of the
    /// single-click drag disambiguation.
    pub fn double_tap(&mut self, cursor: Point) {
        self.toggle_focal_zoom(cursor);
    }

    fn toggle_focal_zoom(&mut self, cursor: Point) {
        if self.is_zoomed() {
            self.reset();
        } else {
            self.focal_zoom(cursor);
        }
    }

    fn focal_zoom(&mut self, cursor: Point) {
        let mouse = self.center_relative(cursor);
        let new_scale = FOCAL_ZOOM_SCALE;
        let target = Vector::new(mouse.x * (1.0 - new_scale), mouse.y * (1.0 - new_scale));
        self.position = self.clamp_position(target, new_scale);
        self.scale = new_scale;
    }

    /// Primary-button press on the image. Only arms a pan while zoomed.
    pub fn pointer_pressed(&mut self, cursor: Point) {
        if self.is_zoomed() {
            self.drag = Some(DragGesture {
                grab: Vector::new(cursor.x - self.position.x, cursor.y - self.position.y),
                origin: cursor,
                has_dragged: false,
            });
        }
    }

    pub fn pointer_moved(&mut self, cursor: Point) {
        if !self.is_zoomed() {
            return;
        }
        let Some(drag) = &mut self.drag else {
            return;
        };

        if !drag.has_dragged && drag.origin.distance(cursor) > DRAG_ACTIVATION_DISTANCE {
            drag.has_dragged = true;
        }
        if drag.has_dragged {
            let target = Vector::new(cursor.x - drag.grab.x, cursor.y - drag.grab.y);
            self.position = self.clamp_position(target, self.scale);
        }
    }

    pub fn pointer_released(&mut self) {
        if let Some(drag) = self.drag.take() {
            // The click event that follows must not also toggle zoom.
            self.suppress_tap = drag.has_dragged;
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // TOUCH GESTURES
    // ═══════════════════════════════════════════════════════════════════════

    pub fn touch_pressed(&mut self, finger: u64, position: Point) {
        self.touches.insert(finger, position);
        match self.touches.len() {
            2 => {
                let (a, b) = self.two_touches();
                self.pinch = Some(PinchGesture {
                    start_distance: a.distance(b).max(1.0),
                    initial_scale: self.scale,
                    start_center: self.center_relative(midpoint(a, b)),
                    start_position: self.position,
                });
                // A second finger ends any single-finger gesture.
                self.drag = None;
                self.swipe_origin = None;
            }
            1 => {
                if self.is_zoomed() {
                    self.pointer_pressed(position);
                } else {
                    self.swipe_origin = Some(position);
                }
            }
            _ => {}
        }
    }

    pub fn touch_moved(&mut self, finger: u64, position: Point) {
        self.touches.insert(finger, position);
        if self.touches.len() == 2 {
            self.pinch_moved();
        } else if self.touches.len() == 1 {
            self.pointer_moved(position);
        }
    }

    /// Lifts a finger. Returns a navigation action when the gesture was an
    /// unzoomed horizontal swipe past the travel threshold.
    pub fn touch_released(&mut self, finger: u64, position: Point) -> Option<SwipeAction> {
        self.touches.remove(&finger);
        if self.touches.len() < 2 {
            self.pinch = None;
        }
        if !self.touches.is_empty() {
            return None;
        }
        self.pointer_released();

        let origin = self.swipe_origin.take()?;
        if self.is_zoomed() {
            return None;
        }
        let travel = origin.x - position.x;
        if travel.abs() > SWIPE_NAVIGATION_DISTANCE {
            Some(if travel > 0.0 {
                SwipeAction::Next
            } else {
                SwipeAction::Previous
            })
        } else {
            None
        }
    }

    fn pinch_moved(&mut self) {
        let (a, b) = self.two_touches();
        let Some(pinch) = self.pinch else {
            return;
        };

        let ratio = a.distance(b) / pinch.start_distance;
        let new_scale = (pinch.initial_scale * ratio).clamp(MIN_SCALE, MAX_SCALE);

        if new_scale > MIN_SCALE {
            // Hold the pinch midpoint stationary: translate the image-space
            // point that sat under the starting midpoint to the current one.
            let current_center = self.center_relative(midpoint(a, b));
            let scale_ratio = new_scale / pinch.initial_scale;
            let img_x = pinch.start_center.x - pinch.start_position.x;
            let img_y = pinch.start_center.y - pinch.start_position.y;
            let target = Vector::new(
                current_center.x - img_x * scale_ratio,
                current_center.y - img_y * scale_ratio,
            );
            self.position = self.clamp_position(target, new_scale);
        } else {
            self.position = Vector::new(0.0, 0.0);
        }
        self.scale = new_scale;
    }

    fn two_touches(&self) -> (Point, Point) {
        let mut iter = self.touches.values();
        let a = iter.next().copied().unwrap_or(Point::ORIGIN);
        let b = iter.next().copied().unwrap_or(a);
        (a, b)
    }

    /// Converts container coordinates to center-relative coordinates.
    fn center_relative(&self, point: Point) -> Vector {
        Vector::new(
            point.x - self.container.width / 2.0,
            point.y - self.container.height / 2.0,
        )
    }

    /// Per-axis pan limits for a given target scale: half the overflow of
    /// the scaled content past the container, plus a fixed buffer.
    fn bounds(&self, target_scale: f32) -> (f32, f32) {
        let scaled_w = self.content.width * target_scale;
        let scaled_h = self.content.height * target_scale;
        let x_limit = if scaled_w <= self.container.width {
            0.0
        } else {
            (scaled_w - self.container.width) / 2.0
        } + BOUNDS_BUFFER;
        let y_limit = if scaled_h <= self.container.height {
            0.0
        } else {
            (scaled_h - self.container.height) / 2.0
        } + BOUNDS_BUFFER;
        (x_limit, y_limit)
    }

    fn clamp_position(&self, target: Vector, target_scale: f32) -> Vector {
        let (x_limit, y_limit) = self.bounds(target_scale);
        Vector::new(
            target.x.clamp(-x_limit, x_limit),
            target.y.clamp(-y_limit, y_limit),
        )
    }
}

fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}
