// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern.
//!
//! - [`browser`] - Photo grid and full-screen pager with their coordinator

pub mod browser;
