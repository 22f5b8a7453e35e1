// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Layout**: Grid columns, offsets and cell margins
//! - **Timing**: Long press, mode transition, settle detection
//! - **Deferred loading**: Slot polling delay and retry cap
//! - **Virtualization**: Pager mount window

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Default number of thumbnails per grid row.
pub const DEFAULT_ITEMS_PER_ROW: u32 = 3;

/// Margin applied on each side of a grid cell (1 margin + 1 border).
pub const ITEM_MARGIN: f32 = 2.0;

/// Default horizontal space reserved by the host next to the grid.
pub const DEFAULT_GRID_OFFSET: f32 = 0.0;

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Default hold duration before a press counts as a long press (ms).
pub const DEFAULT_DELAY_LONG_PRESS_MS: u64 = 1000;

/// Default duration of the grid/full-screen crossfade (ms).
pub const DEFAULT_TRANSITION_MS: u64 = 100;

/// Default quiet period after the last scroll movement before a gesture is
/// considered settled (ms).
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 150;

/// Longest accepted settle delay (ms).
pub const MAX_SETTLE_DELAY_MS: u64 = 2000;

// ==========================================================================
// Deferred Loading Defaults
// ==========================================================================

/// Delay between two checks for a pager slot that is not mounted yet (ms).
pub const DEFAULT_RETRY_DELAY_MS: u64 = 200;

/// Default number of re-checks before a deferred load gives up.
/// 25 checks at 200 ms cover five seconds.
pub const DEFAULT_MAX_SLOT_RETRIES: u32 = 25;

/// Upper bound for the configurable retry cap.
pub const MAX_MAX_SLOT_RETRIES: u32 = 500;

// ==========================================================================
// Virtualization Defaults
// ==========================================================================

/// Pages kept mounted on each side of the page under the viewport.
pub const DEFAULT_MOUNT_BUFFER: usize = 1;

/// Largest accepted mount buffer.
pub const MAX_MOUNT_BUFFER: usize = 10;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_ITEMS_PER_ROW > 0);
    assert!(ITEM_MARGIN >= 0.0);

    assert!(DEFAULT_TRANSITION_MS > 0);
    assert!(DEFAULT_SETTLE_DELAY_MS > 0);
    assert!(DEFAULT_SETTLE_DELAY_MS <= MAX_SETTLE_DELAY_MS);

    assert!(DEFAULT_RETRY_DELAY_MS > 0);
    assert!(DEFAULT_MAX_SLOT_RETRIES > 0);
    assert!(DEFAULT_MAX_SLOT_RETRIES <= MAX_MAX_SLOT_RETRIES);

    assert!(DEFAULT_MOUNT_BUFFER <= MAX_MOUNT_BUFFER);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_defaults_match_reference_widget() {
        assert_eq!(DEFAULT_ITEMS_PER_ROW, 3);
        assert_eq!(ITEM_MARGIN, 2.0);
    }

    #[test]
    fn retry_defaults_are_bounded() {
        assert_eq!(DEFAULT_RETRY_DELAY_MS, 200);
        assert!(DEFAULT_MAX_SLOT_RETRIES <= MAX_MAX_SLOT_RETRIES);
    }

    #[test]
    fn timing_defaults_are_valid() {
        assert_eq!(DEFAULT_DELAY_LONG_PRESS_MS, 1000);
        assert_eq!(DEFAULT_TRANSITION_MS, 100);
        assert!(DEFAULT_SETTLE_DELAY_MS <= MAX_SETTLE_DELAY_MS);
    }
}
