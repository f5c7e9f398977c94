// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type and result alias.
//!
//! All failures in this crate are local and non-fatal: the worst outcome of
//! an interaction-layer bug is a visual glitch, so recovery is always "fall
//! back to the last known good local state". The variants below exist to
//! carry context into log lines, not to drive control flow.

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone)]
pub enum Error {
    /// Filesystem access failed (collection scan, preference file).
    Io(String),
    /// Preference file could not be read or written.
    Config(String),
    /// Fetched media bytes could not be decoded into an image.
    Decode(String),
    /// The host reorder endpoint rejected or failed a move.
    Reorder(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(msg) => write!(f, "I/O error: {msg}"),
            Error::Config(msg) => write!(f, "Configuration error: {msg}"),
            Error::Decode(msg) => write!(f, "Decode error: {msg}"),
            Error::Reorder(msg) => write!(f, "Reorder error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
