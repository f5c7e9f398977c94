// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::gallery::{manager, LayoutMode};
use crate::host::FetchedImage;
use crate::lightbox;
use crate::media::MediaItem;
use iced::widget::scrollable::AbsoluteOffset;
use iced::{keyboard, touch, Point, Size};

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    /// Result of the async collection list query.
    CollectionLoaded(Result<Vec<MediaItem>, String>),
    Gallery(manager::Message),
    Lightbox(lightbox::Message),
    ViewModeSelected(LayoutMode),
    ClearSelectionPressed,
    /// Press on an item card (selection + potential reorder drag origin).
    CardPressed(usize),
    /// Expand button on an item card.
    CardExpandPressed(usize),
    /// Edit button on an item card.
    CardEditPressed(usize),
    /// Checkbox toggle on an item card.
    CardToggled(usize),
    /// The gallery scrollable reported a new viewport.
    GalleryScrolled(AbsoluteOffset),
    WindowResized(Size),
    ModifiersChanged(keyboard::Modifiers),
    CursorMoved(Point),
    /// Primary press not captured by any widget (marquee candidate, or
    /// lightbox overlay close).
    BackgroundPressed,
    /// Primary release, captured or not (gesture terminator).
    PointerReleased,
    KeyPressed {
        key: keyboard::Key,
        modifiers: keyboard::Modifiers,
    },
    WheelScrolled(f32),
    Touch(touch::Event),
    /// Press/release on the mounted lightbox image surface.
    LightboxImagePressed,
    LightboxImageReleased,
    /// Marquee auto-scroll cadence.
    AutoScrollTick,
    /// Lightbox open/close transition cadence.
    TransitionTick,
    SlideshowTick,
    /// Result of a current-item decode (drives the loading spinner).
    MediaDecoded {
        index: usize,
        src: String,
        result: Result<FetchedImage, String>,
    },
    /// Result of a neighbor prefetch.
    Prefetched {
        src: String,
        result: Result<FetchedImage, String>,
    },
    /// Result of a progressive high-resolution fetch.
    HighResFetched {
        index: usize,
        src: String,
        result: Result<FetchedImage, String>,
    },
    /// Result of persisting a reorder.
    ReorderFinished(Result<(), String>),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Directory to browse; defaults to the current working directory.
    pub media_dir: Option<String>,
}
