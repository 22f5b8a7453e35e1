// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Per-slot load failures are deliberately *not* part of this enum's normal
//! flow: they stay local to the slot that produced them (see
//! [`crate::application::port::media::LoadFailure`]). `Error` covers what the
//! embedding application can act on: bad configuration, bad input lists and
//! I/O in the demo host.

use crate::application::port::media::LoadFailure;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    /// A configuration value that can never produce a usable browser.
    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        field: &'static str,
        reason: &'static str,
    },

    /// Two media items resolve to the same identity key.
    #[error("Duplicate media key: {0}")]
    DuplicateMediaKey(String),

    /// An index outside `[0, len)`. Navigation clamps instead of returning
    /// this; it is only surfaced by explicit lookups.
    #[error("Index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Load Error: {0}")]
    Load(#[from] LoadFailure),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
