// SPDX-License-Identifier: MPL-2.0
//! Per-slot load lifecycle for pager pages.
//!
//! State is keyed by slot (list index), not by item identity. A slot exists
//! while it is mounted; unmounting drops its state. Remounting a slot with a
//! different item starts it over from [`PageLoadState::Idle`].

use crate::application::port::media::LoadFailure;
use crate::domain::media::MediaKey;
use std::collections::HashMap;

/// Load state of one mounted slot.
#[derive(Debug, Clone, PartialEq)]
pub enum PageLoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    /// Terminal for this slot instance.
    Error(LoadFailure),
}

/// Payload-free view of [`PageLoadState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Error,
}

impl<T> PageLoadState<T> {
    #[must_use]
    pub fn status(&self) -> LoadStatus {
        match self {
            Self::Idle => LoadStatus::Idle,
            Self::Loading => LoadStatus::Loading,
            Self::Loaded(_) => LoadStatus::Loaded,
            Self::Error(_) => LoadStatus::Error,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    key: MediaKey,
    state: PageLoadState<T>,
}

/// What happened to a completion handed to [`MediaLoadTracker::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Recorded as the slot's new state.
    Applied,
    /// The slot was unmounted, remounted with another item, or not loading.
    Discarded,
}

/// Load states of all mounted slots.
#[derive(Debug, Clone)]
pub struct MediaLoadTracker<T> {
    slots: HashMap<usize, Slot<T>>,
}

impl<T> Default for MediaLoadTracker<T> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }
}

impl<T> MediaLoadTracker<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts `slot` for the item identified by `key`.
    ///
    /// Mounting an already mounted slot with the same key keeps its state;
    /// a different key resets it to `Idle`.
    pub fn mount(&mut self, slot: usize, key: MediaKey) {
        match self.slots.get_mut(&slot) {
            Some(existing) if existing.key == key => {}
            Some(existing) => {
                existing.key = key;
                existing.state = PageLoadState::Idle;
            }
            None => {
                self.slots.insert(
                    slot,
                    Slot {
                        key,
                        state: PageLoadState::Idle,
                    },
                );
            }
        }
    }

    /// Drops the slot and its state.
    pub fn unmount(&mut self, slot: usize) {
        self.slots.remove(&slot);
    }

    /// Unmounts every slot for which `keep` returns false.
    pub fn retain_slots(&mut self, mut keep: impl FnMut(usize) -> bool) {
        self.slots.retain(|slot, _| keep(*slot));
    }

    /// Drops every slot.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    #[must_use]
    pub fn is_mounted(&self, slot: usize) -> bool {
        self.slots.contains_key(&slot)
    }

    /// Sorted list of mounted slots.
    #[must_use]
    pub fn mounted_slots(&self) -> Vec<usize> {
        let mut slots: Vec<usize> = self.slots.keys().copied().collect();
        slots.sort_unstable();
        slots
    }

    /// Key of the item mounted in `slot`.
    #[must_use]
    pub fn key(&self, slot: usize) -> Option<&MediaKey> {
        self.slots.get(&slot).map(|s| &s.key)
    }

    /// Moves an `Idle` slot to `Loading`.
    ///
    /// Returns true only for that transition; the caller starts exactly one
    /// resolution per `true`. Unmounted, loading, loaded and failed slots
    /// return false.
    pub fn load(&mut self, slot: usize) -> bool {
        match self.slots.get_mut(&slot) {
            Some(entry) if matches!(entry.state, PageLoadState::Idle) => {
                entry.state = PageLoadState::Loading;
                true
            }
            _ => false,
        }
    }

    /// Records the outcome of a resolution started for `key` in `slot`.
    pub fn complete(
        &mut self,
        slot: usize,
        key: &MediaKey,
        result: Result<T, LoadFailure>,
    ) -> Completion {
        let Some(entry) = self.slots.get_mut(&slot) else {
            return Completion::Discarded;
        };
        if &entry.key != key || !matches!(entry.state, PageLoadState::Loading) {
            return Completion::Discarded;
        }
        entry.state = match result {
            Ok(content) => PageLoadState::Loaded(content),
            Err(failure) => PageLoadState::Error(failure),
        };
        Completion::Applied
    }

    #[must_use]
    pub fn state(&self, slot: usize) -> Option<&PageLoadState<T>> {
        self.slots.get(&slot).map(|s| &s.state)
    }

    /// Mutable access to loaded content, for relayout after a resize.
    pub fn loaded_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .filter_map(|(slot, entry)| match &mut entry.state {
                PageLoadState::Loaded(content) => Some((*slot, content)),
                _ => None,
            })
    }

    #[must_use]
    pub fn status(&self, slot: usize) -> Option<LoadStatus> {
        self.state(slot).map(PageLoadState::status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> MediaKey {
        MediaKey::new(name)
    }

    #[test]
    fn load_only_starts_from_idle() {
        let mut tracker: MediaLoadTracker<u32> = MediaLoadTracker::new();
        tracker.mount(0, key("a"));

        assert!(tracker.load(0));
        assert!(!tracker.load(0), "second load while loading is a no-op");
        assert_eq!(tracker.status(0), Some(LoadStatus::Loading));
    }

    #[test]
    fn load_on_unmounted_slot_is_ignored() {
        let mut tracker: MediaLoadTracker<u32> = MediaLoadTracker::new();
        assert!(!tracker.load(3));
        assert_eq!(tracker.status(3), None);
    }

    #[test]
    fn completion_moves_to_loaded_or_error() {
        let mut tracker = MediaLoadTracker::new();
        tracker.mount(0, key("a"));
        tracker.mount(1, key("b"));
        tracker.load(0);
        tracker.load(1);

        assert_eq!(tracker.complete(0, &key("a"), Ok(7)), Completion::Applied);
        assert_eq!(
            tracker.complete(1, &key("b"), Err(LoadFailure::Decode("bad".into()))),
            Completion::Applied
        );
        assert_eq!(tracker.state(0), Some(&PageLoadState::Loaded(7)));
        assert_eq!(tracker.status(1), Some(LoadStatus::Error));
    }

    #[test]
    fn error_is_terminal_for_the_slot_instance() {
        let mut tracker: MediaLoadTracker<u32> = MediaLoadTracker::new();
        tracker.mount(0, key("a"));
        tracker.load(0);
        tracker.complete(0, &key("a"), Err(LoadFailure::NotFound("a".into())));

        assert!(!tracker.load(0));
        // Same item again keeps the error
        tracker.mount(0, key("a"));
        assert_eq!(tracker.status(0), Some(LoadStatus::Error));
    }

    #[test]
    fn remount_with_different_item_resets_to_idle() {
        let mut tracker: MediaLoadTracker<u32> = MediaLoadTracker::new();
        tracker.mount(0, key("a"));
        tracker.load(0);
        tracker.complete(0, &key("a"), Err(LoadFailure::NotFound("a".into())));

        tracker.mount(0, key("b"));
        assert_eq!(tracker.status(0), Some(LoadStatus::Idle));
        assert!(tracker.load(0));
    }

    #[test]
    fn stale_completions_are_discarded() {
        let mut tracker = MediaLoadTracker::new();
        tracker.mount(0, key("a"));
        tracker.load(0);

        // Remounted with another item while the first resolution ran
        tracker.mount(0, key("b"));
        assert_eq!(tracker.complete(0, &key("a"), Ok(1)), Completion::Discarded);
        assert_eq!(tracker.status(0), Some(LoadStatus::Idle));

        // Unmounted entirely
        tracker.load(0);
        tracker.unmount(0);
        assert_eq!(tracker.complete(0, &key("b"), Ok(2)), Completion::Discarded);
        assert!(!tracker.is_mounted(0));
    }

    #[test]
    fn retain_slots_unmounts_outside_window() {
        let mut tracker: MediaLoadTracker<u32> = MediaLoadTracker::new();
        for slot in 0..5 {
            tracker.mount(slot, key(&slot.to_string()));
        }
        tracker.retain_slots(|slot| (1..=3).contains(&slot));
        assert_eq!(tracker.mounted_slots(), vec![1, 2, 3]);
    }
}
