// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`fs_resolver`]: Local files decoded with the `image` crate
//!   (implements [`MediaResolver`])
//!
//! [`MediaResolver`]: crate::application::port::MediaResolver

pub mod fs_resolver;

// Re-export main types for convenience
pub use fs_resolver::{is_supported_image, FsMediaResolver, IMAGE_EXTENSIONS};
