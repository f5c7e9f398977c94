// SPDX-License-Identifier: MPL-2.0
//! Gallery manager cluster - selection, focus, and keyboard navigation
//! managed together.
//!
//! This cluster composes the selection model, the marquee controller, and
//! the per-layout geometry adapters into one controller per mounted
//! gallery. UI event handlers stay thin: they translate platform events
//! into [`Message`]s and apply the returned [`Effect`]s; all policy lives
//! here.
//!
//! ## Composition
//!
//! - `SelectionModel`: the single selection store every input source funnels
//!   through
//! - `MarqueeController`: rubber-band selection with live preview
//! - `ColumnGeometry` / `JustifiedGeometry`: arrow-key navigation per layout

use crate::config::GALLERY_GAP;
use crate::gallery::geometry::{
    ColumnGeometry, GeometryAdapter, JustifiedGeometry, NavDirection,
};
use crate::gallery::justified::RowLayout;
use crate::gallery::marquee::{
    ItemBounds, LayoutMetrics, MarqueeCommit, MarqueeController, MarqueeState,
};
use crate::gallery::selection::SelectionModel;
use crate::gallery::{columns_for_width, LayoutMode};
use crate::media::{DocId, MediaItem};
use iced::{Point, Rectangle, Size};

/// Modifier keys active on a pointer press.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickModifiers {
    pub shift: bool,
    /// Cmd on macOS, Ctrl elsewhere.
    pub command: bool,
}

/// Keyboard input already mapped from platform key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Direction(NavDirection),
    Home,
    End,
    /// Toggles selection of the focused item (Cmd-click equivalent).
    Space,
    /// Activates (opens) the focused item.
    Enter,
    /// Cmd/Ctrl+A.
    SelectAll,
}

/// Messages for the gallery manager cluster.
#[derive(Debug, Clone)]
pub enum Message {
    /// The host re-fetched the collection; indices become meaningless.
    ItemsReplaced(Vec<MediaItem>),
    LayoutChanged(LayoutMode),
    ContainerResized { width: f32 },
    /// Primary-button press on an item card.
    ItemPressed {
        index: usize,
        modifiers: ClickModifiers,
    },
    /// Checkbox-style toggle on an item card.
    SelectionToggled { index: usize },
    ItemFocused { index: usize },
    /// Toolbar deselect action.
    ClearSelection,
    KeyPressed { key: KeyInput },
    QuickEditRequested { index: usize },
    LightboxRequested { index: usize },
    /// Primary-button press on background area (not an interactive control).
    BackgroundPressed {
        position: Point,
        scroll_offset: f32,
        append: bool,
        viewport_height: f32,
    },
    PointerMoved {
        position: Point,
        scroll_offset: f32,
        append: bool,
    },
    PointerReleased,
    /// The host applied one auto-scroll step during a marquee drag.
    AutoScrolled { scroll_offset: f32 },
}

/// Effects produced by gallery operations, applied by the orchestrator.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    /// Navigate to the document's edit view (Enter on a focused item).
    OpenDocument(DocId),
    /// Open the quick-edit drawer for the document.
    QuickEdit(DocId),
    /// Open the lightbox at the given item index.
    OpenLightbox(usize),
}

/// Derived flags for one rendered item card.
#[derive(Debug, Clone, Copy)]
pub struct ItemProps {
    pub selected: bool,
    pub focused: bool,
    pub selected_count: usize,
}

/// Per-mount gallery controller.
#[derive(Debug, Clone)]
pub struct GalleryManager {
    items: Vec<MediaItem>,
    layout: LayoutMode,
    columns: usize,
    rows: RowLayout,
    container_width: f32,
    selection: SelectionModel,
    marquee: MarqueeController,
    /// Keyboard focus; drives the focus ring and Enter/Space target.
    focused: Option<usize>,
    /// Range anchor for shift-click, advanced on every selection gesture.
    anchor: Option<usize>,
}

impl GalleryManager {
    #[must_use]
    pub fn new(items: Vec<MediaItem>, layout: LayoutMode, container_width: f32) -> Self {
        let columns = columns_for_width(container_width);
        let rows = RowLayout::compute(&items, container_width);
        Self {
            items,
            layout,
            columns,
            rows,
            container_width,
            selection: SelectionModel::new(),
            marquee: MarqueeController::new(),
            focused: None,
            anchor: None,
        }
    }

    /// Handle a cluster message.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::ItemsReplaced(items) => {
                self.items = items;
                self.focused = None;
                self.anchor = None;
                self.marquee.cancel();
                self.recompute_layout();
                Effect::None
            }
            Message::LayoutChanged(layout) => {
                self.layout = layout;
                self.recompute_layout();
                Effect::None
            }
            Message::ContainerResized { width } => {
                self.container_width = width;
                self.columns = columns_for_width(width);
                self.recompute_layout();
                Effect::None
            }
            Message::ItemPressed { index, modifiers } => {
                self.item_pressed(index, modifiers);
                Effect::None
            }
            Message::SelectionToggled { index } => {
                if let Some(item) = self.items.get(index) {
                    let id = item.id.clone();
                    self.selection.toggle(id);
                    self.anchor = Some(index);
                    self.focused = Some(index);
                }
                Effect::None
            }
            Message::ItemFocused { index } => {
                if index < self.items.len() {
                    self.focused = Some(index);
                }
                Effect::None
            }
            Message::ClearSelection => {
                self.selection.clear();
                Effect::None
            }
            Message::KeyPressed { key } => self.key_pressed(key),
            Message::QuickEditRequested { index } => match self.items.get(index) {
                Some(item) => Effect::QuickEdit(item.id.clone()),
                None => Effect::None,
            },
            Message::LightboxRequested { index } => {
                if index < self.items.len() {
                    Effect::OpenLightbox(index)
                } else {
                    Effect::None
                }
            }
            Message::BackgroundPressed {
                position,
                scroll_offset,
                append,
                viewport_height,
            } => {
                let metrics = self.layout_metrics(viewport_height);
                self.marquee
                    .pointer_pressed(position, scroll_offset, append, metrics);
                Effect::None
            }
            Message::PointerMoved {
                position,
                scroll_offset,
                append,
            } => {
                if self.marquee.is_engaged() {
                    self.marquee.pointer_moved(position, scroll_offset, append);
                }
                Effect::None
            }
            Message::PointerReleased => {
                if let Some(MarqueeCommit { hits, append }) = self.marquee.pointer_released() {
                    self.selection.commit_marquee(&self.items, &hits, append);
                }
                Effect::None
            }
            Message::AutoScrolled { scroll_offset } => {
                self.marquee.auto_scroll_tick(scroll_offset);
                Effect::None
            }
        }
    }

    fn item_pressed(&mut self, index: usize, modifiers: ClickModifiers) {
        let Some(item) = self.items.get(index) else {
            return;
        };
        let id = item.id.clone();
        self.focused = Some(index);

        if modifiers.command {
            self.selection.toggle(id);
            self.anchor = Some(index);
        } else if modifiers.shift {
            match self.anchor {
                // No starting point yet: treat it as a Cmd click.
                None => {
                    self.selection.toggle(id);
                    self.anchor = Some(index);
                }
                Some(anchor) => {
                    // Target state follows the clicked item, not the anchor:
                    // shift-clicking a selected item deselects the range.
                    let target_state = !self.selection.is_selected(&id);
                    self.selection
                        .range_select(&self.items, anchor, index, target_state);
                    self.anchor = Some(index);
                }
            }
        } else {
            self.selection.clear();
            self.selection.set(id, true);
            self.anchor = Some(index);
        }
    }

    fn key_pressed(&mut self, key: KeyInput) -> Effect {
        if self.items.is_empty() {
            return Effect::None;
        }
        let current = self.focused.unwrap_or(0);
        match key {
            KeyInput::Direction(direction) => {
                let next = self.next_index(current, direction);
                if next != current || self.focused.is_none() {
                    self.focused = Some(next);
                    // Anchor follows keyboard focus so a later shift-click
                    // ranges from where the user navigated to.
                    self.anchor = Some(next);
                }
                Effect::None
            }
            KeyInput::Home => {
                self.focused = Some(0);
                self.anchor = Some(0);
                Effect::None
            }
            KeyInput::End => {
                let last = self.items.len() - 1;
                self.focused = Some(last);
                self.anchor = Some(last);
                Effect::None
            }
            KeyInput::Space => {
                let id = self.items[current].id.clone();
                self.selection.toggle(id);
                self.focused = Some(current);
                self.anchor = Some(current);
                Effect::None
            }
            KeyInput::Enter => Effect::OpenDocument(self.items[current].id.clone()),
            KeyInput::SelectAll => {
                self.selection.select_all(self.items.iter().map(|i| &i.id));
                Effect::None
            }
        }
    }

    fn next_index(&self, current: usize, direction: NavDirection) -> usize {
        let total = self.items.len();
        match self.layout {
            LayoutMode::Grid | LayoutMode::Masonry => {
                ColumnGeometry::new(self.columns).next_index(current, direction, total)
            }
            LayoutMode::Justified => {
                JustifiedGeometry::new(&self.rows).next_index(current, direction, total)
            }
        }
    }

    fn recompute_layout(&mut self) {
        self.rows = RowLayout::compute(&self.items, self.container_width);
    }

    /// Render flags for one item. During an active marquee drag the
    /// `selected` flag previews the live hit set (unioned with the
    /// committed selection in append mode) without mutating the model.
    #[must_use]
    pub fn item_props(&self, index: usize) -> ItemProps {
        let selected = self.items.get(index).is_some_and(|item| {
            if self.marquee.is_active() {
                let hit = self.marquee.hits().contains(&item.id);
                if self.marquee.append_mode() {
                    hit || self.selection.is_selected(&item.id)
                } else {
                    hit
                }
            } else {
                self.selection.is_selected(&item.id)
            }
        });
        ItemProps {
            selected,
            focused: self.focused == Some(index),
            selected_count: self.selection.count(),
        }
    }

    /// Item bounding boxes in document coordinates for the current layout.
    ///
    /// The same arithmetic positions the rendered cards, so the marquee
    /// hit-tests against exactly what the user sees. Fake widths make the
    /// geometry deterministic under test.
    #[must_use]
    pub fn layout_metrics(&self, viewport_height: f32) -> LayoutMetrics {
        LayoutMetrics {
            viewport_height,
            items: self.item_bounds(),
        }
    }

    fn item_bounds(&self) -> Vec<ItemBounds> {
        match self.layout {
            LayoutMode::Grid => {
                let cell = self.grid_cell_width();
                self.items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let col = i % self.columns;
                        let row = i / self.columns;
                        ItemBounds {
                            id: item.id.clone(),
                            bounds: Rectangle::new(
                                Point::new(
                                    col as f32 * (cell + GALLERY_GAP),
                                    row as f32 * (cell + GALLERY_GAP),
                                ),
                                Size::new(cell, cell),
                            ),
                        }
                    })
                    .collect()
            }
            LayoutMode::Masonry => {
                let cell = self.grid_cell_width();
                let mut column_y = vec![0.0_f32; self.columns];
                self.items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let col = i % self.columns;
                        let height = cell / item.layout_aspect_ratio();
                        let y = column_y[col];
                        column_y[col] += height + GALLERY_GAP;
                        ItemBounds {
                            id: item.id.clone(),
                            bounds: Rectangle::new(
                                Point::new(col as f32 * (cell + GALLERY_GAP), y),
                                Size::new(cell, height),
                            ),
                        }
                    })
                    .collect()
            }
            LayoutMode::Justified => {
                let mut bounds = Vec::with_capacity(self.items.len());
                let mut y = 0.0_f32;
                for row in self.rows.rows() {
                    let mut x = 0.0_f32;
                    for slot in &row.slots {
                        if let Some(item) = self.items.get(slot.index) {
                            bounds.push(ItemBounds {
                                id: item.id.clone(),
                                bounds: Rectangle::new(
                                    Point::new(x, y),
                                    Size::new(slot.width, slot.height),
                                ),
                            });
                        }
                        x += slot.width + GALLERY_GAP;
                    }
                    y += row.height + GALLERY_GAP;
                }
                bounds
            }
        }
    }

    /// Full content height of the current layout, for scroll clamping.
    #[must_use]
    pub fn content_height(&self) -> f32 {
        match self.layout {
            LayoutMode::Grid => {
                if self.items.is_empty() {
                    return 0.0;
                }
                let cell = self.grid_cell_width();
                let rows = self.items.len().div_ceil(self.columns);
                rows as f32 * cell + rows.saturating_sub(1) as f32 * GALLERY_GAP
            }
            LayoutMode::Masonry => {
                let cell = self.grid_cell_width();
                let mut column_y = vec![0.0_f32; self.columns];
                for (i, item) in self.items.iter().enumerate() {
                    let col = i % self.columns;
                    column_y[col] += cell / item.layout_aspect_ratio() + GALLERY_GAP;
                }
                column_y
                    .into_iter()
                    .fold(0.0_f32, f32::max)
                    .max(0.0)
            }
            LayoutMode::Justified => self.rows.content_height(),
        }
    }

    fn grid_cell_width(&self) -> f32 {
        let gaps = (self.columns.saturating_sub(1)) as f32 * GALLERY_GAP;
        ((self.container_width - gaps) / self.columns as f32).max(1.0)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════

    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    #[must_use]
    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &RowLayout {
        &self.rows
    }

    #[must_use]
    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    #[must_use]
    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    #[must_use]
    pub fn anchor_index(&self) -> Option<usize> {
        self.anchor
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    #[must_use]
    pub fn marquee_state(&self) -> MarqueeState {
        self.marquee.state()
    }

    #[must_use]
    pub fn marquee_engaged(&self) -> bool {
        self.marquee.is_engaged()
    }

    /// Velocity for the auto-scroll loop; `Some` keeps the tick
    /// subscription alive, `None` lets it stop.
    #[must_use]
    pub fn auto_scroll_velocity(&self) -> Option<f32> {
        self.marquee.auto_scroll_velocity()
    }
}
