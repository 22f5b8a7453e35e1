// SPDX-License-Identifier: MPL-2.0
//! Cosmetic grid/full-screen crossfade.
//!
//! Purely presentational: the mode flips when a transition starts, and
//! nothing waits for it to finish.

use crate::domain::ui::TransitionProgress;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Transition {
    from: TransitionProgress,
    to: TransitionProgress,
    started_at: Option<Instant>,
    duration: Duration,
}

impl Transition {
    /// A transition at rest on `value`.
    #[must_use]
    pub fn at_rest(value: TransitionProgress, duration: Duration) -> Self {
        Self {
            from: value,
            to: value,
            started_at: None,
            duration,
        }
    }

    /// Starts animating from the current value toward `target`.
    pub fn start(&mut self, target: TransitionProgress, now: Instant) {
        self.from = self.progress_at(now);
        self.to = target;
        self.started_at = Some(now);
    }

    #[must_use]
    pub fn progress_at(&self, now: Instant) -> TransitionProgress {
        let Some(started) = self.started_at else {
            return self.to;
        };
        if self.duration.is_zero() {
            return self.to;
        }
        let t = now.saturating_duration_since(started).as_secs_f32() / self.duration.as_secs_f32();
        self.from.lerp(self.to, t)
    }

    #[must_use]
    pub fn progress(&self) -> TransitionProgress {
        self.progress_at(Instant::now())
    }

    /// Whether the value is still moving at `now`.
    #[must_use]
    pub fn is_running_at(&self, now: Instant) -> bool {
        self.started_at
            .is_some_and(|started| now.saturating_duration_since(started) < self.duration)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.is_running_at(Instant::now())
    }

    /// Drops the start time once finished so the value reads as `to`.
    pub fn tick(&mut self, now: Instant) {
        if self.started_at.is_some() && !self.is_running_at(now) {
            self.from = self.to;
            self.started_at = None;
        }
    }

    #[must_use]
    pub fn target(&self) -> TransitionProgress {
        self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    const DURATION: Duration = Duration::from_millis(100);

    #[test]
    fn at_rest_reports_value() {
        let transition = Transition::at_rest(TransitionProgress::GRID, DURATION);
        assert_abs_diff_eq!(transition.progress().value(), 0.0);
        assert!(!transition.is_running());
    }

    #[test]
    fn interpolates_over_duration() {
        let now = Instant::now();
        let mut transition = Transition::at_rest(TransitionProgress::GRID, DURATION);
        transition.start(TransitionProgress::FULL_SCREEN, now);

        assert_abs_diff_eq!(transition.progress_at(now).value(), 0.0);
        assert_abs_diff_eq!(
            transition
                .progress_at(now + Duration::from_millis(50))
                .value(),
            0.5,
            epsilon = 1e-3
        );
        assert_abs_diff_eq!(transition.progress_at(now + DURATION).value(), 1.0);
        assert!(transition.is_running_at(now + Duration::from_millis(10)));
        assert!(!transition.is_running_at(now + DURATION));
    }

    #[test]
    fn reversing_midway_starts_from_current_value() {
        let now = Instant::now();
        let mut transition = Transition::at_rest(TransitionProgress::GRID, DURATION);
        transition.start(TransitionProgress::FULL_SCREEN, now);

        let midway = now + Duration::from_millis(50);
        transition.start(TransitionProgress::GRID, midway);
        assert_abs_diff_eq!(transition.progress_at(midway).value(), 0.5, epsilon = 1e-3);
        assert_abs_diff_eq!(transition.progress_at(midway + DURATION).value(), 0.0);
    }

    #[test]
    fn tick_settles_finished_transition() {
        let now = Instant::now();
        let mut transition = Transition::at_rest(TransitionProgress::GRID, DURATION);
        transition.start(TransitionProgress::FULL_SCREEN, now);
        transition.tick(now + DURATION * 2);

        assert!(!transition.is_running());
        assert_abs_diff_eq!(transition.progress().value(), 1.0);
    }
}
