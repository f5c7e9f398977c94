// SPDX-License-Identifier: MPL-2.0
//! Tuning constants and persisted user preferences.
//!
//! Preferences are stored in a `settings.toml` file under the platform
//! config directory. Interaction tuning constants live here so every gesture
//! threshold is auditable in one place.
//!
//! # Examples
//!
//! ```no_run
//! use iced_gallery::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.set_preference("media-gallery-view", "masonry");
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "IcedGallery";

// Zoom-pan gesture tuning.
pub const MIN_SCALE: f32 = 1.0;
pub const MAX_SCALE: f32 = 4.0;
/// Wheel delta to scale conversion rate (scroll up zooms in).
pub const WHEEL_ZOOM_RATE: f32 = 0.002;
/// Fixed scale applied by click-to-zoom and double-click zoom.
pub const FOCAL_ZOOM_SCALE: f32 = 2.5;
/// Extra panning slack past the strict edge of the scaled image.
pub const BOUNDS_BUFFER: f32 = 80.0;
/// Zoom level past which the original-resolution image is fetched.
pub const HIGH_RES_SCALE_THRESHOLD: f32 = 1.3;
/// Pointer travel before a press-and-move counts as a pan, not a tap.
pub const DRAG_ACTIVATION_DISTANCE: f32 = 5.0;
/// Horizontal touch travel that triggers next/previous navigation.
pub const SWIPE_NAVIGATION_DISTANCE: f32 = 50.0;

// Marquee selection tuning.
/// Pointer travel before a background press becomes a marquee drag.
pub const MARQUEE_ACTIVATION_DISTANCE: f32 = 5.0;
/// Height of the viewport edge zones that trigger auto-scroll.
pub const AUTO_SCROLL_EDGE_ZONE: f32 = 50.0;
/// Floor for the auto-scroll speed inside an edge zone, px per tick.
pub const AUTO_SCROLL_MIN_SPEED: f32 = 2.0;

// Drag-to-reorder tuning.
/// Pointer travel before a card press becomes a reorder drag.
pub const REORDER_ACTIVATION_DISTANCE: f32 = 8.0;

// Justified layout tuning.
pub const JUSTIFIED_TARGET_ROW_HEIGHT: f32 = 300.0;
pub const JUSTIFIED_MAX_ROW_HEIGHT: f32 = 600.0;
pub const GALLERY_GAP: f32 = 4.0;
/// Aspect ratios outside this range are clamped so a pathological item
/// cannot break row packing.
pub const MIN_ASPECT_RATIO: f32 = 0.2;
pub const MAX_ASPECT_RATIO: f32 = 5.0;

// Lightbox timing.
pub const LIGHTBOX_TRANSITION: Duration = Duration::from_millis(300);
pub const SLIDESHOW_INTERVAL: Duration = Duration::from_secs(3);
/// Cadence of the marquee auto-scroll and transition subscriptions.
pub const FRAME_TICK: Duration = Duration::from_millis(16);

/// Number of decoded neighbor images kept around the lightbox.
pub const PREFETCH_CACHE_ENTRIES: usize = 16;

/// Preference key for the last-selected gallery layout.
pub const VIEW_MODE_PREFERENCE_KEY: &str = "media-gallery-view";

pub const WINDOW_DEFAULT_WIDTH: f32 = 1100.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 760.0;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Free-form string preferences keyed by the host preference API names.
    #[serde(default)]
    pub preferences: BTreeMap<String, String>,
    #[serde(default)]
    pub slideshow_interval_secs: Option<u64>,
}

impl Config {
    #[must_use]
    pub fn preference(&self, key: &str) -> Option<&str> {
        self.preferences.get(key).map(String::as_str)
    }

    pub fn set_preference(&mut self, key: &str, value: &str) {
        self.preferences.insert(key.to_string(), value.to_string());
    }

    #[must_use]
    pub fn slideshow_interval(&self) -> Duration {
        self.slideshow_interval_secs
            .map_or(SLIDESHOW_INTERVAL, Duration::from_secs)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content =
        toml::to_string_pretty(config).map_err(|e| crate::error::Error::Config(e.to_string()))?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_preferences() {
        let mut config = Config::default();
        config.set_preference(VIEW_MODE_PREFERENCE_KEY, "justified");
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(
            loaded.preference(VIEW_MODE_PREFERENCE_KEY),
            Some("justified")
        );
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.preferences.is_empty());
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("settings.toml");
        let config = Config::default();

        save_to_path(&config, &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn slideshow_interval_falls_back_to_default() {
        let config = Config::default();
        assert_eq!(config.slideshow_interval(), SLIDESHOW_INTERVAL);

        let config = Config {
            slideshow_interval_secs: Some(5),
            ..Config::default()
        };
        assert_eq!(config.slideshow_interval(), Duration::from_secs(5));
    }
}
