// SPDX-License-Identifier: MPL-2.0
//! Media resolution port definition.
//!
//! This module defines the [`MediaResolver`] trait: the injected collaborator
//! that turns a media URI into displayable pixels. The browser never fetches
//! content itself; it asks a resolver, off the update loop, and records the
//! outcome in the slot's load state.

use crate::domain::media::RawImage;
use thiserror::Error;

// =============================================================================
// LoadFailure
// =============================================================================

/// Why content for a slot could not be resolved.
///
/// A failure is terminal for the slot instance that requested it: the
/// browser does not retry automatically. Re-opening the item (remounting the
/// slot with another item, or replacing the list) starts over.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadFailure {
    /// Nothing exists at the URI.
    #[error("Media not found: {0}")]
    NotFound(String),

    /// The resolver does not handle this URI scheme.
    #[error("Unsupported URI scheme: {0}")]
    UnsupportedScheme(String),

    /// The content exists but could not be decoded.
    #[error("Could not decode media: {0}")]
    Decode(String),

    /// The content could not be read.
    #[error("I/O error: {0}")]
    Io(String),

    /// The worker running the resolution went away.
    #[error("Resolution interrupted: {0}")]
    Interrupted(String),
}

// =============================================================================
// MediaResolver Trait
// =============================================================================

/// Port for resolving media content.
///
/// Implementations may block (disk, network); the browser runtime calls
/// them on a blocking worker.
///
/// # Example
///
/// ```
/// use iced_photo_browser::application::port::media::{LoadFailure, MediaResolver};
/// use iced_photo_browser::domain::media::RawImage;
///
/// /// Resolves every URI to a single grey pixel.
/// struct Placeholder;
///
/// impl MediaResolver for Placeholder {
///     fn resolve(&self, _uri: &str) -> Result<RawImage, LoadFailure> {
///         Ok(RawImage::from_rgba(1, 1, vec![128, 128, 128, 255]))
///     }
/// }
///
/// let image = Placeholder.resolve("anything").unwrap();
/// assert_eq!(image.width(), 1);
/// ```
pub trait MediaResolver: Send + Sync {
    /// Resolves `uri` into RGBA pixels.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadFailure`] describing why the content is unavailable.
    fn resolve(&self, uri: &str) -> Result<RawImage, LoadFailure>;
}
