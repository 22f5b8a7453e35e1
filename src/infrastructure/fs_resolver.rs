// SPDX-License-Identifier: MPL-2.0
//! Filesystem media resolver.
//!
//! Resolves plain paths and `file://` URIs by decoding them with the `image`
//! crate. Any other scheme is reported as [`LoadFailure::UnsupportedScheme`]
//! so hosts can plug in their own resolver for remote content.

use crate::application::port::media::{LoadFailure, MediaResolver};
use crate::domain::media::RawImage;
use image_rs::ImageError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Image file extensions the resolver (and the directory scanner) accept.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "tiff", "tif", "webp", "bmp",
];

const FILE_SCHEME: &str = "file://";

/// Decodes local image files into RGBA pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsMediaResolver {
    /// Longest edge of the decoded output; larger images are downscaled.
    max_dimension: Option<u32>,
}

impl FsMediaResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Downscales decoded images so neither edge exceeds `max_dimension`.
    #[must_use]
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = Some(max_dimension.max(1));
        self
    }

    fn decode(&self, path: &Path) -> Result<RawImage, LoadFailure> {
        let image = image_rs::open(path).map_err(|err| match err {
            ImageError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
                LoadFailure::NotFound(path.display().to_string())
            }
            ImageError::IoError(io) => LoadFailure::Io(io.to_string()),
            other => LoadFailure::Decode(other.to_string()),
        })?;

        let image = match self.max_dimension {
            Some(max) if image.width() > max || image.height() > max => image.thumbnail(max, max),
            _ => image,
        };

        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(RawImage::new(width, height, Arc::new(rgba.into_raw())))
    }
}

/// Maps a URI to a local path, or reports its foreign scheme.
fn uri_to_path(uri: &str) -> Result<PathBuf, LoadFailure> {
    if let Some(rest) = uri.strip_prefix(FILE_SCHEME) {
        return Ok(PathBuf::from(rest));
    }
    if let Some((scheme, _)) = uri.split_once("://") {
        return Err(LoadFailure::UnsupportedScheme(scheme.to_string()));
    }
    Ok(PathBuf::from(uri))
}

/// Whether `path` carries one of [`IMAGE_EXTENSIONS`].
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

impl MediaResolver for FsMediaResolver {
    fn resolve(&self, uri: &str) -> Result<RawImage, LoadFailure> {
        let path = uri_to_path(uri)?;
        if !path.exists() {
            return Err(LoadFailure::NotFound(uri.to_string()));
        }
        self.decode(&path)
    }
}
