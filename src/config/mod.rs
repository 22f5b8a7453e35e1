// SPDX-License-Identifier: MPL-2.0
//! Browser configuration: the option bundle the host hands to the widget,
//! optionally loaded from a `browser.toml` file.
//!
//! # Configuration Sections
//!
//! - `[layout]` - Grid shape and the initial mode/index
//! - `[chrome]` - Bars, status bar and selection controls
//! - `[timing]` - Long press, transition, settle detection and deferred loading
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `ICED_PHOTO_BROWSER_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```
//! use iced_photo_browser::config::BrowserConfig;
//!
//! let config: BrowserConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     items_per_row = 4
//!     start_on_grid = true
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.layout.items_per_row, 4);
//! // Unspecified sections keep their defaults
//! assert!(config.chrome.display_top_bar);
//! assert!(config.validate().is_ok());
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::ui::{ItemsPerRow, MaxSlotRetries};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "browser.toml";

/// Application name used for directory naming.
const APP_NAME: &str = "IcedPhotoBrowser";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ICED_PHOTO_BROWSER_CONFIG_DIR";

// =============================================================================
// Section Structs
// =============================================================================

/// Grid shape and initial presentation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Index shown first in the pager.
    pub initial_index: usize,
    /// Thumbnails per grid row. Zero is rejected by [`BrowserConfig::validate`].
    pub items_per_row: u32,
    /// Width reserved by the host beside the grid (logical pixels).
    pub grid_offset: f32,
    /// Whether the grid presentation is available at all.
    pub enable_grid: bool,
    /// Start on the thumbnail grid instead of the pager.
    pub start_on_grid: bool,
    /// Show a selection toggle on grid cells and pager pages.
    pub display_selection_buttons: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            initial_index: 0,
            items_per_row: DEFAULT_ITEMS_PER_ROW,
            grid_offset: DEFAULT_GRID_OFFSET,
            enable_grid: true,
            start_on_grid: false,
            display_selection_buttons: false,
        }
    }
}

/// Bars, status bar and their visibility rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChromeConfig {
    /// Taps never hide the bars.
    pub always_show_controls: bool,
    /// Initial (and default) bar visibility.
    pub display_top_bar: bool,
    /// Keep the status bar visible even when the bars are hidden.
    pub always_display_status_bar: bool,
    /// Show the action (share) button in the bottom bar.
    pub display_action_button: bool,
    /// Show previous/next arrows in the bottom bar.
    pub display_nav_arrows: bool,
    /// Show a back button in the top bar.
    pub display_back_button: bool,
    /// Extra button label placed left of the action button.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_bottom_bar_label: Option<String>,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            always_show_controls: false,
            display_top_bar: true,
            always_display_status_bar: false,
            display_action_button: false,
            display_nav_arrows: false,
            display_back_button: false,
            custom_bottom_bar_label: None,
        }
    }
}

/// Durations and limits of the interaction engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub delay_long_press_ms: u64,
    pub transition_ms: u64,
    pub settle_delay_ms: u64,
    pub retry_delay_ms: u64,
    pub max_slot_retries: u32,
    pub mount_buffer: usize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            delay_long_press_ms: DEFAULT_DELAY_LONG_PRESS_MS,
            transition_ms: DEFAULT_TRANSITION_MS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            max_slot_retries: DEFAULT_MAX_SLOT_RETRIES,
            mount_buffer: DEFAULT_MOUNT_BUFFER,
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Full option bundle for one browser instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BrowserConfig {
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub chrome: ChromeConfig,

    #[serde(default)]
    pub timing: TimingConfig,
}

impl BrowserConfig {
    /// Rejects values that can never produce a usable browser.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        ItemsPerRow::try_new(self.layout.items_per_row)?;

        if !self.layout.grid_offset.is_finite() || self.layout.grid_offset < 0.0 {
            return Err(Error::InvalidConfiguration {
                field: "grid_offset",
                reason: "must be a finite, non-negative width",
            });
        }
        if self.timing.transition_ms == 0 {
            return Err(Error::InvalidConfiguration {
                field: "transition_ms",
                reason: "must be greater than zero",
            });
        }
        if self.timing.retry_delay_ms == 0 {
            return Err(Error::InvalidConfiguration {
                field: "retry_delay_ms",
                reason: "must be greater than zero",
            });
        }
        if self.timing.settle_delay_ms == 0 || self.timing.settle_delay_ms > MAX_SETTLE_DELAY_MS {
            return Err(Error::InvalidConfiguration {
                field: "settle_delay_ms",
                reason: "must be between 1 and 2000",
            });
        }
        if self.timing.mount_buffer > MAX_MOUNT_BUFFER {
            return Err(Error::InvalidConfiguration {
                field: "mount_buffer",
                reason: "must not exceed 10",
            });
        }
        Ok(())
    }

    /// Validated column count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when `items_per_row` is zero.
    pub fn items_per_row(&self) -> Result<ItemsPerRow> {
        ItemsPerRow::try_new(self.layout.items_per_row)
    }

    #[must_use]
    pub fn max_slot_retries(&self) -> MaxSlotRetries {
        MaxSlotRetries::new(self.timing.max_slot_retries)
    }

    #[must_use]
    pub fn delay_long_press(&self) -> Duration {
        Duration::from_millis(self.timing.delay_long_press_ms)
    }

    #[must_use]
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.timing.transition_ms)
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.timing.settle_delay_ms)
    }

    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.timing.retry_delay_ms)
    }

    /// Whether the browser opens on the grid. The grid must be enabled for
    /// `start_on_grid` to have any effect.
    #[must_use]
    pub fn starts_on_grid(&self) -> bool {
        self.layout.enable_grid && self.layout.start_on_grid
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory, honouring an explicit override first and
/// then the `ICED_PHOTO_BROWSER_CONFIG_DIR` environment variable.
fn get_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    get_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). A missing file is not a
/// warning; an unreadable or invalid one falls back to defaults with a
/// warning explaining what went wrong.
pub fn load() -> (BrowserConfig, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (BrowserConfig, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "ignoring browser config");
                    return (BrowserConfig::default(), Some(err.to_string()));
                }
            }
        }
    }
    (BrowserConfig::default(), None)
}

/// Loads and validates configuration from a specific path.
///
/// # Errors
///
/// Fails on I/O errors, malformed TOML, or values rejected by
/// [`BrowserConfig::validate`].
pub fn load_from_path(path: &Path) -> Result<BrowserConfig> {
    let content = fs::read_to_string(path)?;
    let config: BrowserConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Writes `config` to `path`, creating parent directories.
///
/// # Errors
///
/// Fails on I/O or serialization errors.
pub fn save_to_path(config: &BrowserConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
