// SPDX-License-Identifier: MPL-2.0
//! `iced_photo_browser` is an embeddable photo browser for the Iced GUI
//! framework.
//!
//! It shows one list of media items either as a thumbnail grid or as a
//! swipeable full-screen pager, keeps the committed page index in sync with
//! the scroll position, loads pages lazily with a bounded retry for slots
//! that are not mounted yet, and drives the visibility of its bars and of
//! the host's chrome.
//!
//! The widget lives in [`ui::browser`]; [`app`] is a small demo host that
//! browses a directory.

#![doc(html_root_url = "https://docs.rs/iced_photo_browser/0.1.0")]

pub mod app;
pub mod application;
pub mod config;
pub mod directory_scanner;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
