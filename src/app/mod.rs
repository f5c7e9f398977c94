// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the gallery and the
//! lightbox overlay.
//!
//! The `App` struct wires the gallery manager, the optional lightbox, and
//! the host ports together, and translates component effects into side
//! effects like preference persistence, reorder calls, and image fetches.
//! This file keeps policy decisions (event routing, coordinate mapping,
//! cache sizing) close to the main update loop so user-facing behavior is
//! easy to audit.

mod message;
mod subscription;
mod view;

pub use message::{Flags, Message};

use crate::config::{
    FRAME_TICK, LIGHTBOX_TRANSITION, PREFETCH_CACHE_ENTRIES, REORDER_ACTIVATION_DISTANCE,
    VIEW_MODE_PREFERENCE_KEY, WINDOW_DEFAULT_HEIGHT, WINDOW_DEFAULT_WIDTH,
};
use crate::gallery::manager::{self, ClickModifiers, GalleryManager, KeyInput};
use crate::gallery::geometry::NavDirection;
use crate::gallery::order::{self, ReorderController};
use crate::gallery::LayoutMode;
use crate::host::{
    CollectionSource, DirectorySource, DocumentDrawer, HttpMediaFetcher, LocalReorder,
    LoggingDrawer, MediaFetcher, PreferenceStore, ReorderApi, TomlPreferenceStore,
};
use crate::lightbox::{self, Lightbox};
use crate::media::{DocId, MediaKind};
use iced::widget::image::Handle;
use iced::widget::scrollable::AbsoluteOffset;
use iced::widget::{operation, Id};
use iced::{keyboard, time, touch, window, Element, Point, Size, Subscription, Task, Theme};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

pub use view::{GALLERY_SCROLLABLE_ID, LIGHTBOX_SCROLLABLE_ID};

/// A pressed item card, a candidate origin for a reorder drag.
#[derive(Debug, Clone, Copy)]
struct CardPress {
    index: usize,
    origin: Point,
}

/// Root Iced application state bridging the gallery interaction engine,
/// the lightbox overlay, and the host environment ports.
pub struct App {
    collection_slug: String,
    gallery: GalleryManager,
    lightbox: Option<Lightbox>,
    reorder: ReorderController,
    prefs: Box<dyn PreferenceStore>,
    reorder_api: Arc<dyn ReorderApi>,
    fetcher: Arc<dyn MediaFetcher>,
    drawer: Box<dyn DocumentDrawer>,
    slideshow_interval: Duration,
    modifiers: keyboard::Modifiers,
    cursor: Point,
    scroll_offset: f32,
    window_size: Size,
    /// Decoded image handles keyed by source URL (prefetch + high-res).
    images: LruCache<String, Handle>,
    card_press: Option<CardPress>,
    load_error: Option<String>,
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(Size::new(640.0, 480.0)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait requirement
    // while only consuming flags once (iced requires Fn, not FnOnce).
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let prefs = TomlPreferenceStore::load_default();
        let slideshow_interval = prefs.config().slideshow_interval();
        let layout = prefs
            .get(VIEW_MODE_PREFERENCE_KEY)
            .and_then(|value| LayoutMode::from_preference(&value))
            .unwrap_or_default();

        let root = flags.media_dir.unwrap_or_else(|| ".".to_string());
        let source = DirectorySource::new(root.into());
        let collection_slug = source.collection_slug().to_string();

        let app = App {
            collection_slug,
            gallery: GalleryManager::new(Vec::new(), layout, WINDOW_DEFAULT_WIDTH),
            lightbox: None,
            reorder: ReorderController::new(),
            prefs: Box::new(prefs),
            reorder_api: Arc::new(LocalReorder),
            fetcher: Arc::new(HttpMediaFetcher::new()),
            drawer: Box::new(LoggingDrawer),
            slideshow_interval,
            modifiers: keyboard::Modifiers::default(),
            cursor: Point::ORIGIN,
            scroll_offset: 0.0,
            window_size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
            images: LruCache::new(
                NonZeroUsize::new(PREFETCH_CACHE_ENTRIES).expect("cache capacity is nonzero"),
            ),
            card_press: None,
            load_error: None,
        };

        let load = Task::perform(
            async move { source.list().map_err(|e| e.to_string()) },
            Message::CollectionLoaded,
        );
        (app, load)
    }

    fn title(&self) -> String {
        format!("{} - Media Gallery", self.collection_slug)
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        let mut subs = vec![subscription::create_event_subscription(
            self.lightbox.is_some(),
        )];

        if self.gallery.auto_scroll_velocity().is_some() {
            subs.push(time::every(FRAME_TICK).map(|_| Message::AutoScrollTick));
        }
        if let Some(lightbox) = &self.lightbox {
            if lightbox.is_transitioning() {
                subs.push(time::every(LIGHTBOX_TRANSITION).map(|_| Message::TransitionTick));
            }
            if lightbox.is_playing() && lightbox.phase() == lightbox::Phase::Open {
                subs.push(time::every(self.slideshow_interval).map(|_| Message::SlideshowTick));
            }
        }
        Subscription::batch(subs)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CollectionLoaded(Ok(items)) => {
                self.load_error = None;
                self.gallery.handle(manager::Message::ItemsReplaced(items));
                Task::none()
            }
            Message::CollectionLoaded(Err(err)) => {
                eprintln!("Failed to load collection: {err}");
                self.load_error = Some(err);
                Task::none()
            }
            Message::Gallery(msg) => {
                let effect = self.gallery.handle(msg);
                self.apply_gallery_effect(effect)
            }
            Message::Lightbox(msg) => self.lightbox_update(msg),
            Message::ViewModeSelected(mode) => {
                self.gallery.handle(manager::Message::LayoutChanged(mode));
                self.prefs
                    .set(VIEW_MODE_PREFERENCE_KEY, mode.preference_value());
                Task::none()
            }
            Message::ClearSelectionPressed => {
                self.gallery.handle(manager::Message::ClearSelection);
                Task::none()
            }
            Message::CardPressed(index) => {
                let modifiers = ClickModifiers {
                    shift: self.modifiers.shift(),
                    command: self.modifiers.command(),
                };
                self.card_press = Some(CardPress {
                    index,
                    origin: self.cursor,
                });
                self.gallery
                    .handle(manager::Message::ItemPressed { index, modifiers });
                Task::none()
            }
            Message::CardExpandPressed(index) => {
                let effect = self
                    .gallery
                    .handle(manager::Message::LightboxRequested { index });
                self.apply_gallery_effect(effect)
            }
            Message::CardEditPressed(index) => {
                let effect = self
                    .gallery
                    .handle(manager::Message::QuickEditRequested { index });
                self.apply_gallery_effect(effect)
            }
            Message::CardToggled(index) => {
                self.gallery
                    .handle(manager::Message::SelectionToggled { index });
                Task::none()
            }
            Message::GalleryScrolled(offset) => {
                self.scroll_offset = offset.y;
                Task::none()
            }
            Message::WindowResized(size) => {
                self.window_size = size;
                self.gallery.handle(manager::Message::ContainerResized {
                    width: size.width,
                });
                self.refresh_lightbox_viewport();
                Task::none()
            }
            Message::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers;
                Task::none()
            }
            Message::CursorMoved(position) => self.cursor_moved(position),
            Message::BackgroundPressed => self.background_pressed(),
            Message::PointerReleased => self.pointer_released(),
            Message::KeyPressed { key, modifiers } => self.key_pressed(key, modifiers),
            Message::WheelScrolled(pixels_up) => {
                let cursor = self.lightbox_cursor();
                let Some(lightbox) = &mut self.lightbox else {
                    return Task::none();
                };
                // Browser-style deltaY is positive downward.
                let effect = lightbox.wheel(-pixels_up, cursor);
                Task::batch([self.apply_lightbox_effect(effect), self.sync_lightbox_scroll()])
            }
            Message::Touch(event) => self.touch_event(event),
            Message::LightboxImagePressed => {
                let cursor = self.lightbox_cursor();
                if let Some(lightbox) = &mut self.lightbox {
                    lightbox.pointer_pressed(cursor);
                }
                Task::none()
            }
            Message::LightboxImageReleased => {
                let cursor = self.lightbox_cursor();
                let Some(lightbox) = &mut self.lightbox else {
                    return Task::none();
                };
                lightbox.pointer_released();
                // A release without a real drag is the tap that toggles the
                // focal zoom; the engine swallows it after a pan.
                let effect = lightbox.tap(cursor);
                Task::batch([self.apply_lightbox_effect(effect), self.sync_lightbox_scroll()])
            }
            Message::AutoScrollTick => self.auto_scroll_tick(),
            Message::TransitionTick => self.lightbox_update(lightbox::Message::TransitionElapsed),
            Message::SlideshowTick => self.lightbox_update(lightbox::Message::SlideshowTick),
            Message::MediaDecoded { index, src, result } => {
                let msg = match result {
                    Ok(image) => {
                        self.images
                            .put(src, Handle::from_rgba(image.width, image.height, image.rgba));
                        lightbox::Message::MediaLoaded { index }
                    }
                    Err(err) => {
                        eprintln!("Failed to decode media: {err}");
                        lightbox::Message::MediaLoadFailed { index }
                    }
                };
                self.lightbox_update(msg)
            }
            Message::Prefetched { src, result } => {
                match result {
                    Ok(image) => {
                        self.images
                            .put(src, Handle::from_rgba(image.width, image.height, image.rgba));
                    }
                    Err(err) => eprintln!("Prefetch failed: {err}"),
                }
                Task::none()
            }
            Message::HighResFetched { index, src, result } => {
                let Some(lightbox) = &mut self.lightbox else {
                    return Task::none();
                };
                match result {
                    Ok(image) => {
                        // Stale completions (viewer moved on) are dropped.
                        if lightbox.high_res_finished(index, true) {
                            self.images.put(
                                src,
                                Handle::from_rgba(image.width, image.height, image.rgba),
                            );
                        }
                    }
                    Err(err) => {
                        eprintln!("High-res fetch failed: {err}");
                        lightbox.high_res_finished(index, false);
                    }
                }
                Task::none()
            }
            Message::ReorderFinished(Ok(())) => {
                self.reorder.confirm();
                Task::none()
            }
            Message::ReorderFinished(Err(err)) => {
                eprintln!("Reorder failed, restoring previous order: {err}");
                let mut items = self.gallery.items().to_vec();
                self.reorder.rollback(&mut items);
                self.gallery.handle(manager::Message::ItemsReplaced(items));
                Task::none()
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // POINTER ROUTING
    // ═══════════════════════════════════════════════════════════════════════

    fn cursor_moved(&mut self, position: Point) -> Task<Message> {
        self.cursor = position;

        if self.lightbox.is_some() {
            let cursor = self.lightbox_cursor();
            let mut panning = false;
            if let Some(lightbox) = &mut self.lightbox {
                lightbox.pointer_moved(cursor);
                panning = lightbox.zoom_pan().is_dragging();
            }
            return if panning {
                self.sync_lightbox_scroll()
            } else {
                Task::none()
            };
        }

        if self.gallery.marquee_engaged() {
            let viewport_point = self.gallery_viewport_point(position);
            let append = self.append_modifier();
            self.gallery.handle(manager::Message::PointerMoved {
                position: viewport_point,
                scroll_offset: self.scroll_offset,
                append,
            });
        } else if let Some(press) = self.card_press {
            if !self.reorder.is_dragging()
                && press.origin.distance(position) > REORDER_ACTIVATION_DISTANCE
            {
                if let Some(item) = self.gallery.items().get(press.index) {
                    self.reorder.drag_started(item.id.clone(), self.gallery.items());
                }
            }
        }
        Task::none()
    }

    fn background_pressed(&mut self) -> Task<Message> {
        if self.lightbox.is_some() {
            // Clicking the overlay outside the image closes the lightbox.
            return self.lightbox_update(lightbox::Message::CloseRequested);
        }
        let position = self.gallery_viewport_point(self.cursor);
        if position.y < 0.0 {
            // Press landed on the toolbar.
            return Task::none();
        }
        let append = self.append_modifier();
        let viewport_height = self.gallery_viewport_height();
        self.gallery.handle(manager::Message::BackgroundPressed {
            position,
            scroll_offset: self.scroll_offset,
            append,
            viewport_height,
        });
        Task::none()
    }

    fn pointer_released(&mut self) -> Task<Message> {
        self.card_press = None;

        if self.lightbox.is_some() {
            if let Some(lightbox) = &mut self.lightbox {
                lightbox.pointer_released();
            }
            return Task::none();
        }

        if self.reorder.is_dragging() {
            let target = self.hit_test_item(self.cursor);
            let mut items = self.gallery.items().to_vec();
            let effect = self.reorder.drag_ended(&mut items, target.as_ref());
            if let order::Effect::Persist(request) = effect {
                self.gallery.handle(manager::Message::ItemsReplaced(items));
                let api = self.reorder_api.clone();
                let slug = self.collection_slug.clone();
                return Task::perform(
                    async move {
                        api.reorder(&slug, request.moved, request.target, request.direction)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    Message::ReorderFinished,
                );
            }
            return Task::none();
        }

        self.gallery.handle(manager::Message::PointerReleased);
        Task::none()
    }

    fn touch_event(&mut self, event: touch::Event) -> Task<Message> {
        let Some(lightbox) = &mut self.lightbox else {
            return Task::none();
        };
        let before = lightbox.current_index();
        let effect = match event {
            touch::Event::FingerPressed { id, position } => {
                lightbox.touch_pressed(id.0, position);
                lightbox::Effect::None
            }
            touch::Event::FingerMoved { id, position } => lightbox.touch_moved(id.0, position),
            touch::Event::FingerLifted { id, position }
            | touch::Event::FingerLost { id, position } => {
                lightbox.touch_released(id.0, position)
            }
        };
        let changed = self
            .lightbox
            .as_ref()
            .is_some_and(|lb| lb.current_index() != before);
        let mut tasks = vec![self.apply_lightbox_effect(effect), self.sync_lightbox_scroll()];
        if changed {
            self.refresh_lightbox_viewport();
            tasks.push(self.decode_current());
        }
        Task::batch(tasks)
    }

    fn auto_scroll_tick(&mut self) -> Task<Message> {
        let Some(velocity) = self.gallery.auto_scroll_velocity() else {
            return Task::none();
        };
        let viewport_height = self.gallery_viewport_height();
        let max_scroll = (self.gallery.content_height() - viewport_height).max(0.0);
        let next = (self.scroll_offset + velocity).clamp(0.0, max_scroll);
        self.scroll_offset = next;
        self.gallery.handle(manager::Message::AutoScrolled {
            scroll_offset: next,
        });
        operation::scroll_to(
            Id::new(GALLERY_SCROLLABLE_ID),
            AbsoluteOffset { x: 0.0, y: next },
        )
    }

    // ═══════════════════════════════════════════════════════════════════════
    // KEYBOARD ROUTING
    // ═══════════════════════════════════════════════════════════════════════

    fn key_pressed(&mut self, key: keyboard::Key, modifiers: keyboard::Modifiers) -> Task<Message> {
        use keyboard::key::Named;

        if self.lightbox.is_some() {
            let msg = match key {
                keyboard::Key::Named(Named::ArrowRight) => Some(lightbox::Message::Next),
                keyboard::Key::Named(Named::ArrowLeft) => Some(lightbox::Message::Previous),
                keyboard::Key::Named(Named::Escape) => Some(lightbox::Message::CloseRequested),
                keyboard::Key::Named(Named::Space) => Some(lightbox::Message::TogglePlay),
                _ => None,
            };
            return match msg {
                Some(msg) => self.lightbox_update(msg),
                None => Task::none(),
            };
        }

        let input = match key {
            keyboard::Key::Named(Named::ArrowRight) => {
                Some(KeyInput::Direction(NavDirection::Right))
            }
            keyboard::Key::Named(Named::ArrowLeft) => Some(KeyInput::Direction(NavDirection::Left)),
            keyboard::Key::Named(Named::ArrowUp) => Some(KeyInput::Direction(NavDirection::Up)),
            keyboard::Key::Named(Named::ArrowDown) => Some(KeyInput::Direction(NavDirection::Down)),
            keyboard::Key::Named(Named::Home) => Some(KeyInput::Home),
            keyboard::Key::Named(Named::End) => Some(KeyInput::End),
            keyboard::Key::Named(Named::Space) => Some(KeyInput::Space),
            keyboard::Key::Named(Named::Enter) => Some(KeyInput::Enter),
            keyboard::Key::Character(ref c) if c.as_str() == "a" && modifiers.command() => {
                Some(KeyInput::SelectAll)
            }
            _ => None,
        };

        if let keyboard::Key::Named(Named::Escape) = key {
            self.gallery.handle(manager::Message::ClearSelection);
            return Task::none();
        }

        match input {
            Some(key) => {
                let effect = self.gallery.handle(manager::Message::KeyPressed { key });
                self.apply_gallery_effect(effect)
            }
            None => Task::none(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // EFFECT APPLICATION
    // ═══════════════════════════════════════════════════════════════════════

    fn apply_gallery_effect(&mut self, effect: manager::Effect) -> Task<Message> {
        match effect {
            manager::Effect::None => Task::none(),
            manager::Effect::OpenDocument(id) | manager::Effect::QuickEdit(id) => {
                self.drawer.open(&id);
                Task::none()
            }
            manager::Effect::OpenLightbox(index) => self.open_lightbox(index),
        }
    }

    fn open_lightbox(&mut self, index: usize) -> Task<Message> {
        let items = self.gallery.items().to_vec();
        if items.is_empty() {
            return Task::none();
        }
        self.lightbox = Some(Lightbox::open(items, index));
        self.refresh_lightbox_viewport();
        self.decode_current()
    }

    fn lightbox_update(&mut self, msg: lightbox::Message) -> Task<Message> {
        let Some(lightbox) = &mut self.lightbox else {
            return Task::none();
        };
        let before = lightbox.current_index();
        let effect = lightbox.handle(msg);
        let changed = lightbox.current_index() != before;

        let mut tasks = vec![self.apply_lightbox_effect(effect)];
        if changed {
            self.refresh_lightbox_viewport();
            tasks.push(self.decode_current());
            tasks.push(self.sync_lightbox_scroll());
        }
        Task::batch(tasks)
    }

    fn apply_lightbox_effect(&mut self, effect: lightbox::Effect) -> Task<Message> {
        match effect {
            lightbox::Effect::None => Task::none(),
            lightbox::Effect::Closed => {
                self.lightbox = None;
                Task::none()
            }
            lightbox::Effect::Edit(id) => {
                self.drawer.open(&id);
                Task::none()
            }
            lightbox::Effect::LoadHighRes { index, src } => {
                if self.images.contains(&src) {
                    // Original already decoded earlier; mark it applied.
                    if let Some(lightbox) = &mut self.lightbox {
                        lightbox.high_res_finished(index, true);
                    }
                    return Task::none();
                }
                let fetcher = self.fetcher.clone();
                Task::perform(
                    async move {
                        let result = fetcher.fetch(src.clone()).await.map_err(|e| e.to_string());
                        (index, src, result)
                    },
                    |(index, src, result)| Message::HighResFetched { index, src, result },
                )
            }
            lightbox::Effect::PrefetchNeighbors { sources } => {
                let tasks: Vec<Task<Message>> = sources
                    .into_iter()
                    .filter(|(_, src)| !self.images.contains(src))
                    .map(|(_, src)| {
                        let fetcher = self.fetcher.clone();
                        Task::perform(
                            async move {
                                let result =
                                    fetcher.fetch(src.clone()).await.map_err(|e| e.to_string());
                                (src, result)
                            },
                            |(src, result)| Message::Prefetched { src, result },
                        )
                    })
                    .collect();
                Task::batch(tasks)
            }
        }
    }

    /// Kicks the decode of the currently displayed lightbox item so the
    /// spinner clears (and the slideshow may advance) once it is ready.
    fn decode_current(&mut self) -> Task<Message> {
        let Some(lightbox) = &self.lightbox else {
            return Task::none();
        };
        let index = lightbox.current_index();
        let Some(item) = lightbox.current_item() else {
            return Task::none();
        };
        if item.kind != MediaKind::Image {
            return Task::none();
        }
        let src = item.src.clone();
        if self.images.contains(&src) {
            return self.lightbox_update(lightbox::Message::MediaLoaded { index });
        }
        let fetcher = self.fetcher.clone();
        Task::perform(
            async move {
                let result = fetcher.fetch(src.clone()).await.map_err(|e| e.to_string());
                (index, src, result)
            },
            |(index, src, result)| Message::MediaDecoded { index, src, result },
        )
    }

    // ═══════════════════════════════════════════════════════════════════════
    // COORDINATE MAPPING
    // ═══════════════════════════════════════════════════════════════════════

    fn gallery_viewport_point(&self, position: Point) -> Point {
        Point::new(position.x, position.y - view::TOOLBAR_HEIGHT)
    }

    fn gallery_viewport_height(&self) -> f32 {
        (self.window_size.height - view::TOOLBAR_HEIGHT).max(0.0)
    }

    /// Finds the item under a window-space point, in document coordinates.
    fn hit_test_item(&self, position: Point) -> Option<DocId> {
        let viewport = self.gallery_viewport_point(position);
        if viewport.y < 0.0 {
            return None;
        }
        let document = Point::new(viewport.x, viewport.y + self.scroll_offset);
        let metrics = self.gallery.layout_metrics(self.gallery_viewport_height());
        metrics
            .items
            .iter()
            .find(|item| item.bounds.contains(document))
            .map(|item| item.id.clone())
    }

    fn lightbox_cursor(&self) -> Point {
        Point::new(self.cursor.x, self.cursor.y - view::LIGHTBOX_HEADER_HEIGHT)
    }

    fn lightbox_container(&self) -> Size {
        Size::new(
            self.window_size.width,
            (self.window_size.height - view::LIGHTBOX_HEADER_HEIGHT - view::LIGHTBOX_FOOTER_HEIGHT)
                .max(1.0),
        )
    }

    /// Fitted (scale 1) display size of the current lightbox item.
    fn current_fit_size(&self) -> Size {
        let container = self.lightbox_container();
        let Some(item) = self.lightbox.as_ref().and_then(Lightbox::current_item) else {
            return container;
        };
        let (w, h) = match (item.width, item.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => (w as f32, h as f32),
            _ => (container.width, container.height),
        };
        let fit = (container.width / w).min(container.height / h);
        Size::new(w * fit, h * fit)
    }

    fn refresh_lightbox_viewport(&mut self) {
        let container = self.lightbox_container();
        let content = self.current_fit_size();
        if let Some(lightbox) = &mut self.lightbox {
            lightbox.set_viewport(container, content);
        }
    }

    /// Applies the zoom-pan engine's center-relative position as scroll
    /// offsets of the lightbox surface.
    fn sync_lightbox_scroll(&self) -> Task<Message> {
        let Some(lightbox) = &self.lightbox else {
            return Task::none();
        };
        let container = self.lightbox_container();
        let content = self.current_fit_size();
        let engine = lightbox.zoom_pan();
        let scaled_w = content.width * engine.scale();
        let scaled_h = content.height * engine.scale();
        let x = ((scaled_w - container.width) / 2.0 - engine.position().x).max(0.0);
        let y = ((scaled_h - container.height) / 2.0 - engine.position().y).max(0.0);
        operation::scroll_to(
            Id::new(LIGHTBOX_SCROLLABLE_ID),
            AbsoluteOffset { x, y },
        )
    }

    fn append_modifier(&self) -> bool {
        self.modifiers.shift() || self.modifiers.command()
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }
}
