// SPDX-License-Identifier: MPL-2.0
//! Executes browser effects as iced tasks.
//!
//! Seeks become scrollable operations, retries become abortable timers
//! and resolutions run the [`MediaResolver`] on a blocking worker. Host
//! notifications are handed back untouched.

use super::component::{Effect, Event, Message};
use super::subcomponents::pager;
use crate::application::port::media::{LoadFailure, MediaResolver};
use iced::widget::scrollable::RelativeOffset;
use iced::task;
use iced::widget::{operation, Id};
use iced::Task;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Resolver shared with blocking workers.
pub type SharedResolver = Arc<dyn MediaResolver>;

/// Armed retry timers, one per page index.
///
/// Handles abort their timer when dropped, so replacing or clearing an
/// entry stops the timer instead of letting it fire into a stale ticket.
#[derive(Default)]
pub struct RetryTimers {
    armed: HashMap<usize, task::Handle>,
}

impl fmt::Debug for RetryTimers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryTimers")
            .field("armed", &self.armed.len())
            .finish()
    }
}

impl RetryTimers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn arm(&mut self, index: usize, handle: task::Handle) {
        self.armed.insert(index, handle.abort_on_drop());
    }

    /// Stops every armed timer.
    pub fn abort_all(&mut self) {
        if !self.armed.is_empty() {
            tracing::debug!(count = self.armed.len(), "aborting retry timers");
        }
        self.armed.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.armed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }
}

/// Relative scroll position of page `index` in a pager of `count` pages.
#[must_use]
pub fn seek_offset(index: usize, count: usize) -> RelativeOffset {
    let x = if count > 1 {
        #[allow(clippy::cast_precision_loss)]
        let ratio = index.min(count - 1) as f32 / (count - 1) as f32;
        ratio
    } else {
        0.0
    };
    RelativeOffset { x, y: 0.0 }
}

/// Splits `effects` into host events and a task running everything else.
pub fn perform(
    effects: Vec<Effect>,
    item_count: usize,
    resolver: &SharedResolver,
    timers: &mut RetryTimers,
) -> (Vec<Event>, Task<Message>) {
    let mut events = Vec::new();
    let mut tasks = Vec::new();

    for effect in effects {
        match effect {
            Effect::Notify(event) => events.push(event),
            Effect::SeekTo { index, animated } => {
                tracing::trace!(index, animated, "seeking pager");
                tasks.push(operation::snap_to(
                    Id::new(pager::SCROLLABLE_ID),
                    seek_offset(index, item_count),
                ));
            }
            Effect::ScheduleRetry {
                index,
                ticket,
                delay,
            } => {
                let (timer, handle) = Task::perform(
                    async move { tokio::time::sleep(delay).await },
                    move |()| Message::Pager(pager::Message::RetryElapsed(ticket)),
                )
                .abortable();
                timers.arm(index, handle);
                tasks.push(timer);
            }
            Effect::CancelRetries => timers.abort_all(),
            Effect::Resolve { slot, key, uri } => {
                let resolver = Arc::clone(resolver);
                tasks.push(Task::perform(
                    async move {
                        tokio::task::spawn_blocking(move || resolver.resolve(&uri))
                            .await
                            .map_err(|e| LoadFailure::Interrupted(e.to_string()))?
                    },
                    move |result| Message::Pager(pager::Message::Resolved { slot, key, result }),
                ));
            }
        }
    }

    (events, Task::batch(tasks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::subcomponents::deferred::{DeferredTrigger, TriggerOutcome};
    use crate::domain::media::RawImage;
    use crate::domain::ui::MaxSlotRetries;
    use std::time::Duration;
    use crate::test_utils::assert_abs_diff_eq;

    struct NotFoundResolver;

    impl MediaResolver for NotFoundResolver {
        fn resolve(&self, uri: &str) -> Result<RawImage, LoadFailure> {
            Err(LoadFailure::NotFound(uri.to_string()))
        }
    }

    #[test]
    fn seek_offset_spreads_pages_over_unit_range() {
        assert_abs_diff_eq!(seek_offset(0, 5).x, 0.0);
        assert_abs_diff_eq!(seek_offset(2, 5).x, 0.5);
        assert_abs_diff_eq!(seek_offset(4, 5).x, 1.0);
        assert_abs_diff_eq!(seek_offset(9, 5).x, 1.0);
        assert_abs_diff_eq!(seek_offset(0, 1).x, 0.0);
        assert_abs_diff_eq!(seek_offset(0, 0).x, 0.0);
    }

    #[test]
    fn notifications_are_returned_in_order() {
        let resolver: SharedResolver = Arc::new(NotFoundResolver);
        let mut timers = RetryTimers::new();
        let (events, _task) = perform(
            vec![
                Effect::Notify(Event::IndexChanged(2)),
                Effect::Notify(Event::ChromeVisibilityChanged(false)),
            ],
            5,
            &resolver,
            &mut timers,
        );
        assert_eq!(
            events,
            vec![Event::IndexChanged(2), Event::ChromeVisibilityChanged(false)]
        );
    }

    #[test]
    fn retry_timers_are_armed_per_index_and_aborted_on_cancel() {
        let resolver: SharedResolver = Arc::new(NotFoundResolver);
        let mut timers = RetryTimers::new();
        let mut trigger = DeferredTrigger::new(Duration::from_millis(200), MaxSlotRetries::default());

        let mut schedule = |index| match trigger.request(index, false) {
            TriggerOutcome::Scheduled {
                index,
                ticket,
                delay,
            } => Effect::ScheduleRetry {
                index,
                ticket,
                delay,
            },
            other => panic!("expected a scheduled retry, got {other:?}"),
        };
        let effects = vec![schedule(3), schedule(3), schedule(4)];

        let (events, _task) = perform(effects, 5, &resolver, &mut timers);
        assert!(events.is_empty());
        // The second timer for page 3 replaced the first.
        assert_eq!(timers.len(), 2);

        let (_, _task) = perform(vec![Effect::CancelRetries], 5, &resolver, &mut timers);
        assert!(timers.is_empty());
    }
}
