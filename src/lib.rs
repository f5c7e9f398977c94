// SPDX-License-Identifier: MPL-2.0
//! `iced_gallery` is a media-collection gallery browser built with the Iced
//! GUI framework.
//!
//! It replaces a tabular collection list with grid, masonry, and justified
//! gallery layouts, pointer-driven multi-select (click, shift, ctrl,
//! marquee), spatial keyboard navigation, drag-to-reorder, and a lightbox
//! viewer with a zoom-pan gesture engine.

pub mod app;
pub mod config;
pub mod error;
pub mod gallery;
pub mod host;
pub mod lightbox;
pub mod media;
