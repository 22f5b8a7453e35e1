// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the demo application.

use crate::ui::browser;
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`. Everything the browser
/// produces is forwarded untouched.
#[derive(Debug, Clone)]
pub enum Message {
    Browser(browser::Message),
    /// Keyboard shortcut that toggles the host bar by hand.
    ToggleHostBar,
}

/// Runtime flags passed in from the command line to seed the application.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Directory (or a file inside it) to browse.
    pub path: Option<PathBuf>,
    /// Directory holding `browser.toml`, overriding the platform default.
    pub config_dir: Option<PathBuf>,
    pub items_per_row: Option<u32>,
    pub start_on_grid: bool,
    pub initial_index: Option<usize>,
}
