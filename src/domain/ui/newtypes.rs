// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! This module provides type-safe wrappers for UI values,
//! ensuring they are always within valid ranges.

use crate::config::{DEFAULT_ITEMS_PER_ROW, DEFAULT_MAX_SLOT_RETRIES, MAX_MAX_SLOT_RETRIES};
use crate::error::{Error, Result};

// =============================================================================
// ItemsPerRow
// =============================================================================

/// Number of thumbnail columns in the grid. Never zero.
///
/// Unlike the clamped newtypes below, a zero column count is a configuration
/// error rather than something to silently repair.
///
/// # Example
///
/// ```
/// use iced_photo_browser::domain::ui::ItemsPerRow;
///
/// assert_eq!(ItemsPerRow::try_new(4).unwrap().value(), 4);
/// assert!(ItemsPerRow::try_new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemsPerRow(u32);

impl ItemsPerRow {
    /// Creates a column count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when `value` is zero.
    pub fn try_new(value: u32) -> Result<Self> {
        if value == 0 {
            return Err(Error::InvalidConfiguration {
                field: "items_per_row",
                reason: "must be greater than zero",
            });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Returns the value as usize, for index arithmetic.
    #[must_use]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl Default for ItemsPerRow {
    fn default() -> Self {
        Self(DEFAULT_ITEMS_PER_ROW)
    }
}

// =============================================================================
// TransitionProgress
// =============================================================================

/// Presentational grid/full-screen transition value, always within `0.0..=1.0`.
///
/// `0.0` is the grid, `1.0` is full screen. Nothing functional reads it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransitionProgress(f32);

impl TransitionProgress {
    pub const GRID: Self = Self(0.0);
    pub const FULL_SCREEN: Self = Self(1.0);

    /// Creates a progress value, clamping to `0.0..=1.0`. NaN maps to `0.0`.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::GRID;
        }
        Self(value.clamp(0.0, 1.0))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Linear interpolation between `self` and `target`.
    #[must_use]
    pub fn lerp(self, target: Self, t: f32) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        Self::new(self.0 + (target.0 - self.0) * t)
    }
}

// =============================================================================
// MaxSlotRetries
// =============================================================================

/// Maximum number of polling re-checks while waiting for a pager slot to
/// mount before a deferred load is abandoned.
///
/// # Example
///
/// ```
/// use iced_photo_browser::domain::ui::MaxSlotRetries;
///
/// assert_eq!(MaxSlotRetries::new(10).value(), 10);
/// // Values outside range are clamped
/// assert_eq!(MaxSlotRetries::new(0).value(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxSlotRetries(u32);

impl MaxSlotRetries {
    /// Creates a retry cap, clamping to `1..=MAX_MAX_SLOT_RETRIES`.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, MAX_MAX_SLOT_RETRIES))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for MaxSlotRetries {
    fn default() -> Self {
        Self(DEFAULT_MAX_SLOT_RETRIES)
    }
}
