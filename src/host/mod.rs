// SPDX-License-Identifier: MPL-2.0
//! Host environment ports and their default adapters.
//!
//! The gallery core treats the surrounding admin framework as a set of
//! black boxes: a document source, a preference store, a reorder endpoint,
//! a quick-edit drawer, and an image fetcher. Each is a trait here so the
//! interaction logic can be exercised with fakes, while the default
//! adapters let the binary run stand-alone against a local directory.

use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::media::{mime_from_filename, DocId, MediaItem};
use futures_util::future::BoxFuture;
use std::path::{Path, PathBuf};

/// Whether a moved document lands after (`Greater`) or before (`Less`) the
/// drop target in the host's ordering key space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Greater,
    Less,
}

/// Supplies the ordered document list (the host's list query).
pub trait CollectionSource {
    /// Collection identifier passed back to reorder/open calls.
    fn collection_slug(&self) -> &str;

    /// Fetches the ordered document list.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing source cannot be read.
    fn list(&self) -> Result<Vec<MediaItem>>;
}

/// String preference storage (the host's per-user preference API).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Persists one document move. Latency is fire-and-forget: the caller has
/// already applied the move optimistically and rolls back on `Err`.
pub trait ReorderApi: Send + Sync {
    fn reorder(
        &self,
        collection: &str,
        moved: DocId,
        target: DocId,
        direction: MoveDirection,
    ) -> BoxFuture<'static, Result<()>>;
}

/// Opens the host's quick-edit drawer for a document.
pub trait DocumentDrawer {
    fn open(&self, id: &DocId);
}

/// Decoded RGBA image delivered by a fetcher, presentation-agnostic.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Fetches and decodes an image asset by URL or local path. Used by the
/// lightbox for progressive high-resolution loading and neighbor prefetch.
pub trait MediaFetcher: Send + Sync {
    fn fetch(&self, src: String) -> BoxFuture<'static, Result<FetchedImage>>;
}

// =============================================================================
// Default adapters
// =============================================================================

/// Collection source backed by a local directory scan.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    slug: String,
}

impl DirectorySource {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        let slug = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "media".to_string());
        Self { root, slug }
    }
}

impl CollectionSource for DirectorySource {
    fn collection_slug(&self) -> &str {
        &self.slug
    }

    fn list(&self) -> Result<Vec<MediaItem>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && is_supported_media(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        Ok(paths
            .into_iter()
            .map(|path| {
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                let mut item = MediaItem::new(
                    DocId::Text(filename.clone()),
                    filename,
                    path.to_string_lossy().to_string(),
                );
                // Header-only dimension probe; items without readable
                // dimensions fall back to layout heuristics.
                if let Ok((w, h)) = image_rs::image_dimensions(&path) {
                    item = item.with_dimensions(w, h);
                }
                item
            })
            .collect())
    }
}

fn is_supported_media(path: &Path) -> bool {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
        return false;
    };
    mime_from_filename(&name).is_some_and(|mime| !mime.starts_with("application/"))
}

/// Preference store backed by the crate's TOML config file.
#[derive(Debug)]
pub struct TomlPreferenceStore {
    config: Config,
    path: Option<PathBuf>,
}

impl TomlPreferenceStore {
    /// Loads from the default config location; a missing or unreadable
    /// file degrades to defaults.
    #[must_use]
    pub fn load_default() -> Self {
        let config = config::load().unwrap_or_default();
        Self { config, path: None }
    }

    /// Store pinned to a specific file, used by tests.
    #[must_use]
    pub fn at_path(path: PathBuf) -> Self {
        let config = config::load_from_path(&path).unwrap_or_default();
        Self {
            config,
            path: Some(path),
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl PreferenceStore for TomlPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.config.preference(key).map(str::to_string)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.config.set_preference(key, value);
        let result = match &self.path {
            Some(path) => config::save_to_path(&self.config, path),
            None => config::save(&self.config),
        };
        if let Err(err) = result {
            eprintln!("Failed to persist preference {key}: {err}");
        }
    }
}

/// Reorder endpoint for the stand-alone binary: accepts every move.
#[derive(Debug, Clone, Default)]
pub struct LocalReorder;

impl ReorderApi for LocalReorder {
    fn reorder(
        &self,
        _collection: &str,
        _moved: DocId,
        _target: DocId,
        _direction: MoveDirection,
    ) -> BoxFuture<'static, Result<()>> {
        Box::pin(async { Ok(()) })
    }
}

/// Quick-edit drawer stand-in that just logs the request.
#[derive(Debug, Clone, Default)]
pub struct LoggingDrawer;

impl DocumentDrawer for LoggingDrawer {
    fn open(&self, id: &DocId) {
        eprintln!("Quick edit requested for document {id}");
    }
}

/// Fetcher that resolves `http(s)` URLs over the network and anything else
/// as a local path, decoding to RGBA off the UI thread.
#[derive(Debug, Clone)]
pub struct HttpMediaFetcher {
    client: reqwest::Client,
}

impl HttpMediaFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpMediaFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaFetcher for HttpMediaFetcher {
    fn fetch(&self, src: String) -> BoxFuture<'static, Result<FetchedImage>> {
        let client = self.client.clone();
        Box::pin(async move {
            let bytes: Vec<u8> = if src.starts_with("http://") || src.starts_with("https://") {
                let response = client
                    .get(&src)
                    .send()
                    .await
                    .map_err(|e| Error::Io(e.to_string()))?;
                response
                    .bytes()
                    .await
                    .map_err(|e| Error::Io(e.to_string()))?
                    .to_vec()
            } else {
                tokio::fs::read(&src)
                    .await
                    .map_err(|e| Error::Io(e.to_string()))?
            };

            let decoded = tokio::task::spawn_blocking(move || {
                image_rs::load_from_memory(&bytes)
                    .map(|img| {
                        let rgba = img.to_rgba8();
                        FetchedImage {
                            width: rgba.width(),
                            height: rgba.height(),
                            rgba: rgba.into_raw(),
                        }
                    })
                    .map_err(|e| Error::Decode(e.to_string()))
            })
            .await
            .map_err(|e| Error::Decode(e.to_string()))?;

            decoded
        })
    }
}
