// SPDX-License-Identifier: MPL-2.0
//! Maps a terminal scroll offset to a committed pager index.
//!
//! The pager calls this only when a gesture ends (drag release or momentum
//! stop), never per frame. The offset is the displacement from the origin of
//! the currently committed page, positive when content moved left:
//!
//! ```text
//! delta     = floor((offset + 0.5 * width) / width)
//! new_index = clamp(committed + delta, 0, item_count - 1)
//! ```
//!
//! A drag therefore has to cross half a page ([`PAGE_COMMIT_THRESHOLD`]) to
//! change page; exactly half a page commits.

/// Fraction of the viewport a drag must cross to commit to the next page.
pub const PAGE_COMMIT_THRESHOLD: f32 = 0.5;

/// Resolves the committed index after a gesture.
///
/// Degenerate input (empty list, non-positive or non-finite width, non-finite
/// offset) leaves the committed index unchanged.
///
/// # Example
///
/// ```
/// use iced_photo_browser::ui::browser::subcomponents::page_resolver::resolve_page;
///
/// let width = 400.0;
/// assert_eq!(resolve_page(2, width, 0.49 * width, 5), 2);
/// assert_eq!(resolve_page(2, width, 0.51 * width, 5), 3);
/// // Clamped at both ends
/// assert_eq!(resolve_page(0, width, -1000.0, 5), 0);
/// assert_eq!(resolve_page(4, width, 1000.0, 5), 4);
/// ```
#[must_use]
pub fn resolve_page(committed: usize, viewport_width: f32, offset: f32, item_count: usize) -> usize {
    if item_count == 0 {
        return committed;
    }
    let last = item_count - 1;
    if !viewport_width.is_finite() || viewport_width <= 0.0 || !offset.is_finite() {
        return committed.min(last);
    }

    let width = f64::from(viewport_width);
    let delta = ((f64::from(offset) + f64::from(PAGE_COMMIT_THRESHOLD) * width) / width).floor();

    // `committed` is an index into a live list, so the i64 round trip is lossless.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let target = committed as i64 + delta as i64;

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    let clamped = target.clamp(0, last as i64) as usize;
    clamped
}

/// Like [`resolve_page`], but `None` when the index does not change, so
/// callers emit nothing on a no-op settle.
#[must_use]
pub fn resolve_page_change(
    committed: usize,
    viewport_width: f32,
    offset: f32,
    item_count: usize,
) -> Option<usize> {
    let resolved = resolve_page(committed, viewport_width, offset, item_count);
    (resolved != committed).then_some(resolved)
}

/// Converts an absolute horizontal scroll position into the offset relative
/// to the committed page's origin.
#[must_use]
pub fn offset_from_absolute(absolute_x: f32, committed: usize, viewport_width: f32) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let origin = committed as f32 * viewport_width;
    absolute_x - origin
}

/// Page whose slot covers most of the viewport at `absolute_x`.
#[must_use]
pub fn page_under_viewport(absolute_x: f32, viewport_width: f32, item_count: usize) -> usize {
    resolve_page(0, viewport_width, absolute_x, item_count)
}
