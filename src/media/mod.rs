// SPDX-License-Identifier: MPL-2.0
//! Media document projection shared by every gallery layout and the lightbox.
//!
//! Host documents of unknown shape are normalized into [`MediaItem`] at the
//! system boundary; interaction logic never reads host fields directly.
//! [`DocId`] carries the identifier-normalization invariant: an id stored as
//! the number `5` and an id stored as the string `"5"` denote the same
//! document, so equality and hashing go through one canonical form.

use std::fmt;
use std::hash::{Hash, Hasher};

pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "svg", "avif", "bmp", "ico", "tiff",
];
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "webm", "ogg", "mov", "avi", "mkv", "flv", "wmv", "m4v",
];
pub const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "m4a", "ogg", "flac", "aac", "wma", "m4r", "aiff", "alac",
];
pub const DOCUMENT_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt", "rtf", "csv", "zip", "rar", "7z",
];

/// Document identifier tolerant of string/number representation drift.
///
/// Host APIs deliver ids inconsistently: a relational backend hands out
/// numbers while the HTTP layer stringifies them. `DocId` hashes and
/// compares on the canonical form so `DocId::from(5)` and
/// `DocId::from("5")` are the same key in any selection set.
#[derive(Debug, Clone)]
pub enum DocId {
    Number(i64),
    Text(String),
}

enum Canonical<'a> {
    Number(i64),
    Text(&'a str),
}

impl DocId {
    fn canonical(&self) -> Canonical<'_> {
        match self {
            DocId::Number(n) => Canonical::Number(*n),
            DocId::Text(s) => match s.parse::<i64>() {
                Ok(n) => Canonical::Number(n),
                Err(_) => Canonical::Text(s),
            },
        }
    }
}

impl PartialEq for DocId {
    fn eq(&self, other: &Self) -> bool {
        match (self.canonical(), other.canonical()) {
            (Canonical::Number(a), Canonical::Number(b)) => a == b,
            (Canonical::Text(a), Canonical::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for DocId {}

impl Hash for DocId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.canonical() {
            Canonical::Number(n) => {
                state.write_u8(0);
                n.hash(state);
            }
            Canonical::Text(s) => {
                state.write_u8(1);
                s.hash(state);
            }
        }
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocId::Number(n) => write!(f, "{n}"),
            DocId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for DocId {
    fn from(n: i64) -> Self {
        DocId::Number(n)
    }
}

impl From<&str> for DocId {
    fn from(s: &str) -> Self {
        DocId::Text(s.to_string())
    }
}

impl From<String> for DocId {
    fn from(s: String) -> Self {
        DocId::Text(s)
    }
}

/// Broad media category, derived from mime type first and filename
/// extension second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Document,
}

impl MediaKind {
    /// Detects the media kind. An explicit mime type wins over the
    /// extension; anything unrecognized is treated as a generic document.
    #[must_use]
    pub fn detect(mime_type: Option<&str>, filename: &str) -> Self {
        if let Some(mime) = mime_type {
            if mime.starts_with("image/") {
                return MediaKind::Image;
            }
            if mime.starts_with("video/") {
                return MediaKind::Video;
            }
            if mime.starts_with("audio/") {
                return MediaKind::Audio;
            }
            if !mime.is_empty() {
                return MediaKind::Document;
            }
        }
        let ext = extension_of(filename);
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Image
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Video
        } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Audio
        } else {
            MediaKind::Document
        }
    }
}

fn extension_of(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Best-effort mime type inferred from a filename extension.
#[must_use]
pub fn mime_from_filename(filename: &str) -> Option<String> {
    let ext = extension_of(filename);
    if ext.is_empty() {
        return None;
    }
    let prefix = if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        "image"
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        "video"
    } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
        "audio"
    } else if DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
        "application"
    } else {
        return None;
    };
    Some(format!("{prefix}/{ext}"))
}

/// Read-only projection of one host document.
///
/// Items are immutable snapshots; the list is replaced wholesale when the
/// host re-fetches, never mutated in place.
#[derive(Debug, Clone)]
pub struct MediaItem {
    pub id: DocId,
    pub filename: String,
    pub mime_type: Option<String>,
    /// Original asset URL (or local path for the stand-alone binary).
    pub src: String,
    /// Derived preview URL, when the host generated one.
    pub thumbnail: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Focal point percentages, when the host stores them.
    pub focal_x: Option<f32>,
    pub focal_y: Option<f32>,
    pub kind: MediaKind,
}

impl MediaItem {
    /// Builds an item, deriving the kind from mime type then extension.
    #[must_use]
    pub fn new(id: DocId, filename: impl Into<String>, src: impl Into<String>) -> Self {
        let filename = filename.into();
        let mime_type = mime_from_filename(&filename);
        let kind = MediaKind::detect(mime_type.as_deref(), &filename);
        Self {
            id,
            filename,
            mime_type,
            src: src.into(),
            thumbnail: None,
            width: None,
            height: None,
            focal_x: None,
            focal_y: None,
            kind,
        }
    }

    #[must_use]
    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        let mime = mime.into();
        self.kind = MediaKind::detect(Some(&mime), &self.filename);
        self.mime_type = Some(mime);
        self
    }

    #[must_use]
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// URL the gallery card should render. Prefers the derived thumbnail.
    #[must_use]
    pub fn preview_src(&self) -> &str {
        self.thumbnail.as_deref().unwrap_or(&self.src)
    }

    /// Aspect ratio for layout purposes, clamped to a sane range.
    ///
    /// Items without dimensions fall back to 16:9 for video and 1:1
    /// otherwise so a metadata gap cannot break row packing.
    #[must_use]
    pub fn layout_aspect_ratio(&self) -> f32 {
        let raw = match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => w as f32 / h as f32,
            _ => match self.kind {
                MediaKind::Video => 1280.0 / 720.0,
                _ => 1.0,
            },
        };
        raw.clamp(
            crate::config::MIN_ASPECT_RATIO,
            crate::config::MAX_ASPECT_RATIO,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn numeric_and_text_ids_are_equivalent() {
        let a = DocId::from(5);
        let b = DocId::from("5");
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn non_numeric_text_ids_compare_by_string() {
        assert_eq!(DocId::from("abc123"), DocId::from("abc123"));
        assert_ne!(DocId::from("abc123"), DocId::from("abc124"));
        assert_ne!(DocId::from("5"), DocId::from("05x"));
    }

    #[test]
    fn mime_type_wins_over_extension() {
        // A .png filename with a video mime type is a video.
        let kind = MediaKind::detect(Some("video/mp4"), "capture.png");
        assert_eq!(kind, MediaKind::Video);
    }

    #[test]
    fn extension_used_when_mime_missing() {
        assert_eq!(MediaKind::detect(None, "photo.JPG"), MediaKind::Image);
        assert_eq!(MediaKind::detect(None, "clip.mkv"), MediaKind::Video);
        assert_eq!(MediaKind::detect(None, "song.flac"), MediaKind::Audio);
        assert_eq!(MediaKind::detect(None, "report.pdf"), MediaKind::Document);
        assert_eq!(MediaKind::detect(None, "unknown.xyz"), MediaKind::Document);
    }

    #[test]
    fn mime_from_filename_maps_known_extensions() {
        assert_eq!(mime_from_filename("a.webp").as_deref(), Some("image/webp"));
        assert_eq!(mime_from_filename("b.mov").as_deref(), Some("video/mov"));
        assert_eq!(mime_from_filename("noext"), None);
    }

    #[test]
    fn aspect_ratio_falls_back_by_kind() {
        let video = MediaItem::new(DocId::from(1), "clip.mp4", "clip.mp4");
        assert!((video.layout_aspect_ratio() - 1280.0 / 720.0).abs() < f32::EPSILON);

        let image = MediaItem::new(DocId::from(2), "photo.jpg", "photo.jpg");
        assert!((image.layout_aspect_ratio() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn aspect_ratio_is_clamped() {
        let narrow = MediaItem::new(DocId::from(3), "strip.png", "strip.png")
            .with_dimensions(10, 1000);
        assert!((narrow.layout_aspect_ratio() - 0.2).abs() < f32::EPSILON);

        let wide = MediaItem::new(DocId::from(4), "pano.png", "pano.png")
            .with_dimensions(10000, 100);
        assert!((wide.layout_aspect_ratio() - 5.0).abs() < f32::EPSILON);
    }
}
