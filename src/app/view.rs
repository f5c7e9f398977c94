// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The views here are deliberately thin adapters: they read derived flags
//! from the gallery manager and lightbox and emit top-level messages. All
//! interaction policy lives in the component clusters.

use super::{App, Message};
use crate::config::GALLERY_GAP;
use crate::gallery::marquee::MarqueeState;
use crate::gallery::LayoutMode;
use crate::lightbox::Lightbox;
use crate::media::{MediaItem, MediaKind};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::scrollable::{Direction, Scrollbar, Viewport};
use iced::widget::{
    button, canvas, checkbox, container, image, mouse_area, scrollable, text, Column, Container,
    Id, Row, Space, Stack,
};
use iced::{mouse, Background, Border, Color, ContentFit, Element, Length, Padding, Theme};

pub const GALLERY_SCROLLABLE_ID: &str = "gallery-scrollable";
pub const LIGHTBOX_SCROLLABLE_ID: &str = "lightbox-scrollable";

pub(super) const TOOLBAR_HEIGHT: f32 = 56.0;
pub(super) const LIGHTBOX_HEADER_HEIGHT: f32 = 56.0;
pub(super) const LIGHTBOX_FOOTER_HEIGHT: f32 = 76.0;

const THUMBNAIL_WIDTH: f32 = 64.0;
const THUMBNAIL_HEIGHT: f32 = 48.0;

pub(super) fn view(app: &App) -> Element<'_, Message> {
    let base = Column::new()
        .push(toolbar(app))
        .push(gallery_body(app))
        .width(Length::Fill)
        .height(Length::Fill);

    let mut layers = Stack::new().push(base);

    let marquee = app.gallery.marquee_state();
    if marquee.active {
        layers = layers.push(
            Container::new(
                canvas(MarqueeOverlay { state: marquee })
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .padding(Padding::ZERO.top(TOOLBAR_HEIGHT))
            .width(Length::Fill)
            .height(Length::Fill),
        );
    }

    if let Some(lightbox) = &app.lightbox {
        layers = layers.push(lightbox_view(app, lightbox));
    }

    layers.into()
}

// ═══════════════════════════════════════════════════════════════════════════
// TOOLBAR
// ═══════════════════════════════════════════════════════════════════════════

fn toolbar(app: &App) -> Element<'_, Message> {
    let selected_count = app.gallery.selection().count();

    let mut bar = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(text(app.collection_slug.clone()).size(18))
        .push(Space::new().width(Length::Fill));

    if selected_count > 0 {
        bar = bar
            .push(text(format!("{selected_count} selected")).size(14))
            .push(
                button(text("Deselect").size(14))
                    .style(button::text)
                    .on_press(Message::ClearSelectionPressed),
            );
    }

    for mode in LayoutMode::ALL {
        let label = button(text(mode.label()).size(14));
        let styled = if app.gallery.layout() == mode {
            label.style(button::primary)
        } else {
            label.style(button::secondary)
        };
        bar = bar.push(styled.on_press(Message::ViewModeSelected(mode)));
    }

    Container::new(bar)
        .padding(Padding::new(12.0))
        .width(Length::Fill)
        .height(Length::Fixed(TOOLBAR_HEIGHT))
        .into()
}

// ═══════════════════════════════════════════════════════════════════════════
// GALLERY
// ═══════════════════════════════════════════════════════════════════════════

fn gallery_body(app: &App) -> Element<'_, Message> {
    if app.gallery.items().is_empty() {
        let notice = match &app.load_error {
            Some(err) => format!("Failed to load collection: {err}"),
            None => "No media found".to_string(),
        };
        return Container::new(text(notice).size(16))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .into();
    }

    let content = match app.gallery.layout() {
        LayoutMode::Grid => grid_view(app),
        LayoutMode::Masonry => masonry_view(app),
        LayoutMode::Justified => justified_view(app),
    };

    scrollable(content)
        .id(Id::new(GALLERY_SCROLLABLE_ID))
        .width(Length::Fill)
        .height(Length::Fill)
        .on_scroll(|viewport: Viewport| Message::GalleryScrolled(viewport.absolute_offset()))
        .into()
}

fn grid_view(app: &App) -> Element<'_, Message> {
    let columns = app.gallery.columns().max(1);
    let cell = cell_width(app, columns);

    let mut grid = Column::new().spacing(GALLERY_GAP);
    for (row_index, chunk) in app.gallery.items().chunks(columns).enumerate() {
        let mut row = Row::new().spacing(GALLERY_GAP);
        for (col_index, item) in chunk.iter().enumerate() {
            let index = row_index * columns + col_index;
            row = row.push(card(app, item, index, cell, cell));
        }
        grid = grid.push(row);
    }
    grid.into()
}

fn masonry_view(app: &App) -> Element<'_, Message> {
    let columns = app.gallery.columns().max(1);
    let cell = cell_width(app, columns);

    // Items are dealt into columns round-robin so list order stays the
    // navigation order.
    let mut buckets: Vec<Vec<Element<'_, Message>>> =
        (0..columns).map(|_| Vec::new()).collect();
    for (index, item) in app.gallery.items().iter().enumerate() {
        let height = cell / item.layout_aspect_ratio();
        buckets[index % columns].push(card(app, item, index, cell, height));
    }

    let mut row = Row::new().spacing(GALLERY_GAP);
    for bucket in buckets {
        row = row.push(Column::with_children(bucket).spacing(GALLERY_GAP));
    }
    row.into()
}

fn justified_view(app: &App) -> Element<'_, Message> {
    let items = app.gallery.items();
    let mut body = Column::new().spacing(GALLERY_GAP);
    for row_layout in app.gallery.rows().rows() {
        let mut row = Row::new().spacing(GALLERY_GAP);
        for slot in &row_layout.slots {
            if let Some(item) = items.get(slot.index) {
                row = row.push(card(app, item, slot.index, slot.width, slot.height));
            }
        }
        body = body.push(row);
    }
    body.into()
}

fn cell_width(app: &App, columns: usize) -> f32 {
    let gaps = columns.saturating_sub(1) as f32 * GALLERY_GAP;
    ((app.gallery.container_width() - gaps) / columns as f32).max(1.0)
}

fn card<'a>(
    app: &'a App,
    item: &'a MediaItem,
    index: usize,
    width: f32,
    height: f32,
) -> Element<'a, Message> {
    let props = app.gallery.item_props(index);

    let preview: Element<'_, Message> = match item.kind {
        MediaKind::Image => image(image::Handle::from_path(item.preview_src()))
            .content_fit(ContentFit::Cover)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        other => Container::new(text(kind_glyph(other)).size(28))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .into(),
    };

    let controls = Row::new()
        .spacing(4)
        .align_y(Vertical::Center)
        .push(checkbox(props.selected).on_toggle(move |_| Message::CardToggled(index)))
        .push(Space::new().width(Length::Fill))
        .push(
            button(text("⤢").size(12))
                .style(button::secondary)
                .on_press(Message::CardExpandPressed(index)),
        )
        .push(
            button(text("✎").size(12))
                .style(button::secondary)
                .on_press(Message::CardEditPressed(index)),
        );

    let overlay = Container::new(controls)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_y(Vertical::Bottom)
        .padding(4);

    let selected = props.selected;
    let focused = props.focused;
    let content = Container::new(Stack::new().push(preview).push(overlay))
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .style(move |theme: &Theme| card_style(theme, selected, focused));

    mouse_area(content)
        .interaction(mouse::Interaction::Pointer)
        .on_press(Message::CardPressed(index))
        .into()
}

fn card_style(theme: &Theme, selected: bool, focused: bool) -> container::Style {
    let palette = theme.extended_palette();
    let border_color = if selected {
        palette.primary.strong.color
    } else if focused {
        palette.background.strong.color
    } else {
        Color::TRANSPARENT
    };
    container::Style {
        background: Some(Background::Color(palette.background.weak.color)),
        border: Border {
            color: border_color,
            width: 2.0,
            radius: 6.0.into(),
        },
        ..container::Style::default()
    }
}

fn kind_glyph(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "",
        MediaKind::Video => "▶",
        MediaKind::Audio => "♪",
        MediaKind::Document => "🗎",
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// MARQUEE OVERLAY
// ═══════════════════════════════════════════════════════════════════════════

/// Canvas overlay drawing the live marquee rectangle. Ignores every event,
/// so gestures keep flowing to the widgets underneath.
struct MarqueeOverlay {
    state: MarqueeState,
}

impl canvas::Program<Message> for MarqueeOverlay {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        theme: &Theme,
        bounds: iced::Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        if self.state.active {
            let accent = theme.extended_palette().primary.base.color;
            let top_left = iced::Point::new(self.state.x, self.state.y);
            let size = iced::Size::new(self.state.width, self.state.height);
            frame.fill_rectangle(top_left, size, Color { a: 0.15, ..accent });
            frame.stroke(
                &canvas::Path::rectangle(top_left, size),
                canvas::Stroke::default().with_color(accent).with_width(1.0),
            );
        }
        vec![frame.into_geometry()]
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// LIGHTBOX
// ═══════════════════════════════════════════════════════════════════════════

fn lightbox_view<'a>(app: &'a App, lightbox: &'a Lightbox) -> Element<'a, Message> {
    let body = Column::new()
        .push(lightbox_header(lightbox))
        .push(lightbox_body(app, lightbox))
        .push(lightbox_footer(lightbox))
        .width(Length::Fill)
        .height(Length::Fill);

    Container::new(body)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme: &Theme| container::Style {
            background: Some(Background::Color(Color {
                a: 0.92,
                ..Color::BLACK
            })),
            ..container::Style::default()
        })
        .into()
}

fn lightbox_header(lightbox: &Lightbox) -> Element<'_, Message> {
    let counter = format!(
        "{} / {}",
        lightbox.current_index() + 1,
        lightbox.items().len()
    );
    let play_glyph = if lightbox.is_playing() { "⏸" } else { "▶" };

    let bar = Row::new()
        .spacing(8)
        .align_y(Vertical::Center)
        .push(text(counter).size(14))
        .push(Space::new().width(Length::Fill))
        .push(
            button(text(play_glyph).size(14))
                .style(button::text)
                .on_press(Message::Lightbox(crate::lightbox::Message::TogglePlay)),
        )
        .push(
            button(text("▦").size(14))
                .style(button::text)
                .on_press(Message::Lightbox(crate::lightbox::Message::ToggleThumbnails)),
        )
        .push(
            button(text("Edit").size(14))
                .style(button::text)
                .on_press(Message::Lightbox(crate::lightbox::Message::EditRequested)),
        )
        .push(
            button(text("✕").size(16))
                .style(button::text)
                .on_press(Message::Lightbox(crate::lightbox::Message::CloseRequested)),
        );

    Container::new(bar)
        .padding(Padding::new(12.0))
        .width(Length::Fill)
        .height(Length::Fixed(LIGHTBOX_HEADER_HEIGHT))
        .into()
}

fn lightbox_body<'a>(app: &'a App, lightbox: &'a Lightbox) -> Element<'a, Message> {
    let surface = lightbox_surface(app, lightbox);

    let nav = Row::new()
        .align_y(Vertical::Center)
        .push(
            button(text("❮").size(24))
                .style(button::text)
                .on_press(Message::Lightbox(crate::lightbox::Message::Previous)),
        )
        .push(Space::new().width(Length::Fill))
        .push(
            button(text("❯").size(24))
                .style(button::text)
                .on_press(Message::Lightbox(crate::lightbox::Message::Next)),
        );
    let nav_layer = Container::new(nav)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_y(Vertical::Center)
        .padding(8);

    let mut stack = Stack::new().push(surface).push(nav_layer);

    if lightbox.is_loading() {
        stack = stack.push(
            Container::new(text("Loading…").size(14))
                .width(Length::Fill)
                .align_x(Horizontal::Center)
                .padding(16),
        );
    }

    Container::new(stack)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn lightbox_surface<'a>(app: &'a App, lightbox: &'a Lightbox) -> Element<'a, Message> {
    let Some(item) = lightbox.current_item() else {
        return Space::new().into();
    };

    match item.kind {
        MediaKind::Image => {
            let container_size = app.lightbox_container();
            let fit = app.current_fit_size();
            let engine = lightbox.zoom_pan();
            let scaled_w = fit.width * engine.scale();
            let scaled_h = fit.height * engine.scale();

            let handle = app
                .images
                .peek(&item.src)
                .cloned()
                .unwrap_or_else(|| image::Handle::from_path(&item.src));

            let interaction = if engine.is_dragging() {
                mouse::Interaction::Grabbing
            } else if engine.is_zoomed() {
                mouse::Interaction::Grab
            } else {
                mouse::Interaction::ZoomIn
            };

            let surface = mouse_area(
                image(handle)
                    .content_fit(ContentFit::Fill)
                    .width(Length::Fixed(scaled_w))
                    .height(Length::Fixed(scaled_h)),
            )
            .interaction(interaction)
            .on_press(Message::LightboxImagePressed)
            .on_release(Message::LightboxImageReleased);

            // The canvas the image pans within: at least the viewport, so
            // sub-viewport axes stay centered while the scroll offsets
            // realize the engine's transform on the overflowing axes.
            let canvas_w = scaled_w.max(container_size.width);
            let canvas_h = scaled_h.max(container_size.height);

            scrollable(
                Container::new(surface)
                    .width(Length::Fixed(canvas_w))
                    .height(Length::Fixed(canvas_h))
                    .align_x(Horizontal::Center)
                    .align_y(Vertical::Center),
            )
            .id(Id::new(LIGHTBOX_SCROLLABLE_ID))
            .width(Length::Fill)
            .height(Length::Fill)
            .direction(Direction::Both {
                vertical: Scrollbar::hidden(),
                horizontal: Scrollbar::hidden(),
            })
            .into()
        }
        other => Container::new(
            Column::new()
                .spacing(12)
                .align_x(Horizontal::Center)
                .push(text(kind_glyph(other)).size(64))
                .push(text(item.filename.clone()).size(16)),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into(),
    }
}

fn lightbox_footer(lightbox: &Lightbox) -> Element<'_, Message> {
    let content: Element<'_, Message> = if lightbox.show_thumbnails() {
        let mut strip = Row::new().spacing(4).align_y(Vertical::Center);
        for (index, item) in lightbox.items().iter().enumerate() {
            let thumb: Element<'_, Message> = match item.kind {
                MediaKind::Image => image(image::Handle::from_path(item.preview_src()))
                    .content_fit(ContentFit::Cover)
                    .width(Length::Fixed(THUMBNAIL_WIDTH))
                    .height(Length::Fixed(THUMBNAIL_HEIGHT))
                    .into(),
                other => Container::new(text(kind_glyph(other)).size(18))
                    .width(Length::Fixed(THUMBNAIL_WIDTH))
                    .height(Length::Fixed(THUMBNAIL_HEIGHT))
                    .align_x(Horizontal::Center)
                    .align_y(Vertical::Center)
                    .into(),
            };
            let current = index == lightbox.current_index();
            strip = strip.push(
                mouse_area(
                    Container::new(thumb).style(move |theme: &Theme| {
                        card_style(theme, current, false)
                    }),
                )
                .interaction(mouse::Interaction::Pointer)
                .on_press(Message::Lightbox(crate::lightbox::Message::SelectIndex(
                    index,
                ))),
            );
        }
        scrollable(strip)
            .direction(Direction::Horizontal(Scrollbar::hidden()))
            .width(Length::Fill)
            .into()
    } else {
        text(
            lightbox
                .current_item()
                .map(|item| item.filename.clone())
                .unwrap_or_default(),
        )
        .size(14)
        .into()
    };

    Container::new(content)
        .padding(Padding::new(8.0))
        .width(Length::Fill)
        .height(Length::Fixed(LIGHTBOX_FOOTER_HEIGHT))
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}
