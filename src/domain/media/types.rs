// SPDX-License-Identifier: MPL-2.0
//! Core media types for the domain layer.
//!
//! These types represent pure data without any presentation dependencies.

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Identity of a [`MediaItem`] inside a list.
///
/// Used for rendering and load tracking; must be unique within a list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaKey(String);

impl MediaKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of the browsed collection.
///
/// Owned by the caller. The browser never rewrites the URIs; only the
/// `selected` flag changes, and every change is reported upward.
///
/// # Example
///
/// ```
/// use iced_photo_browser::domain::media::MediaItem;
///
/// let item = MediaItem::new("/photos/full/a.jpg").with_thumbnail("/photos/thumb/a.jpg");
///
/// // Without an id, the thumbnail URI is the identity key
/// assert_eq!(item.key().as_str(), "/photos/thumb/a.jpg");
/// assert_eq!(item.display_uri(), "/photos/thumb/a.jpg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    /// Caller-assigned identifier.
    pub id: Option<String>,
    /// URI of the full-size content.
    pub uri: String,
    /// URI of a smaller rendition used by the grid.
    pub thumbnail_uri: Option<String>,
    /// Optional caption shown in the top bar.
    pub caption: Option<String>,
    /// Selection flag, toggled through selection buttons.
    pub selected: bool,
}

impl MediaItem {
    /// Creates an unselected item pointing at `uri`.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            id: None,
            uri: uri.into(),
            thumbnail_uri: None,
            caption: None,
            selected: false,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail_uri: impl Into<String>) -> Self {
        self.thumbnail_uri = Some(thumbnail_uri.into());
        self
    }

    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    #[must_use]
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Identity key: `id`, falling back to the thumbnail URI, falling back
    /// to the primary URI.
    #[must_use]
    pub fn key(&self) -> MediaKey {
        let key = self
            .id
            .as_deref()
            .or(self.thumbnail_uri.as_deref())
            .unwrap_or(&self.uri);
        MediaKey(key.to_string())
    }

    /// URI used for grid thumbnails: the thumbnail when present, else the
    /// primary URI.
    #[must_use]
    pub fn display_uri(&self) -> &str {
        self.thumbnail_uri.as_deref().unwrap_or(&self.uri)
    }
}

/// Checks that no two items share an identity key.
///
/// # Errors
///
/// Returns [`Error::DuplicateMediaKey`] naming the first repeated key.
pub fn ensure_unique_keys(items: &[MediaItem]) -> Result<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        let key = item.key();
        if !seen.insert(key.clone()) {
            return Err(Error::DuplicateMediaKey(key.0));
        }
    }
    Ok(())
}

/// Raw image data without presentation dependencies.
///
/// This is the domain representation of a resolved image, containing only
/// the pixel data. The presentation layer converts it to an
/// `iced::widget::image::Handle` once, when a load completes.
///
/// # Example
///
/// ```
/// use iced_photo_browser::domain::media::RawImage;
/// use std::sync::Arc;
///
/// let pixels = vec![255u8; 100 * 100 * 4]; // 100x100 RGBA
/// let image = RawImage::new(100, 100, Arc::new(pixels));
///
/// assert_eq!(image.width(), 100);
/// assert_eq!(image.height(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct RawImage {
    width: u32,
    height: u32,
    /// RGBA pixel data (4 bytes per pixel).
    rgba_bytes: Arc<Vec<u8>>,
}

impl RawImage {
    /// Creates a new `RawImage` from dimensions and RGBA pixel data.
    ///
    /// # Panics
    ///
    /// Panics if the pixel data length doesn't match `width * height * 4`.
    #[must_use]
    pub fn new(width: u32, height: u32, rgba_bytes: Arc<Vec<u8>>) -> Self {
        let expected_len = (width as usize) * (height as usize) * 4;
        assert_eq!(
            rgba_bytes.len(),
            expected_len,
            "RGBA data length mismatch: expected {expected_len}, got {}",
            rgba_bytes.len()
        );

        Self {
            width,
            height,
            rgba_bytes,
        }
    }

    /// Creates a new `RawImage` from dimensions and owned RGBA pixel data.
    ///
    /// # Panics
    ///
    /// Panics if the pixel data length doesn't match `width * height * 4`.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, rgba_bytes: Vec<u8>) -> Self {
        Self::new(width, height, Arc::new(rgba_bytes))
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns a reference to the RGBA pixel data.
    #[must_use]
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba_bytes
    }

    /// Returns an owned copy of the pixels, as needed by image handles.
    #[must_use]
    pub fn to_rgba_vec(&self) -> Vec<u8> {
        self.rgba_bytes.as_ref().clone()
    }
}

impl PartialEq for RawImage {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.rgba_bytes == other.rgba_bytes
    }
}

impl Eq for RawImage {}
