// SPDX-License-Identifier: MPL-2.0
//! Deferred load trigger with a bounded polling retry.
//!
//! The pager asks for the page that just became current to load, but the
//! slot for that page may not be mounted yet. The trigger either reports the
//! slot ready right away or hands out a [`RetryTicket`] for a timer. When the
//! timer fires the slot is checked again, up to [`MaxSlotRetries`] times.
//!
//! Cancellation drops the pending entry; a timer that fires with a ticket
//! that is no longer pending is ignored.

use crate::domain::ui::MaxSlotRetries;
use std::collections::HashMap;
use std::time::Duration;

/// Identifies one scheduled re-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RetryTicket(u64);

/// Result of asking for, or re-checking, a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The slot is mounted; load it now.
    Ready(usize),
    /// Not mounted yet; arm a timer that reports `ticket` after `delay`.
    Scheduled {
        index: usize,
        ticket: RetryTicket,
        delay: Duration,
    },
    /// Gave up after `attempts` re-checks.
    Exhausted { index: usize, attempts: u32 },
    /// The ticket was cancelled or superseded.
    Stale,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    ticket: RetryTicket,
    attempts: u32,
}

/// Pending deferred loads, keyed by page index.
#[derive(Debug, Clone)]
pub struct DeferredTrigger {
    delay: Duration,
    max_retries: MaxSlotRetries,
    pending: HashMap<usize, Pending>,
    next_ticket: u64,
}

impl DeferredTrigger {
    #[must_use]
    pub fn new(delay: Duration, max_retries: MaxSlotRetries) -> Self {
        Self {
            delay,
            max_retries,
            pending: HashMap::new(),
            next_ticket: 0,
        }
    }

    fn issue(&mut self) -> RetryTicket {
        self.next_ticket += 1;
        RetryTicket(self.next_ticket)
    }

    /// Requests a load of `index`. `ready` tells whether its slot is mounted.
    ///
    /// A new request for an index that is already waiting restarts its
    /// attempt count.
    pub fn request(&mut self, index: usize, ready: bool) -> TriggerOutcome {
        if ready {
            self.pending.remove(&index);
            return TriggerOutcome::Ready(index);
        }
        let ticket = self.issue();
        self.pending.insert(
            index,
            Pending {
                ticket,
                attempts: 0,
            },
        );
        TriggerOutcome::Scheduled {
            index,
            ticket,
            delay: self.delay,
        }
    }

    /// Handles a fired timer. `is_ready` reports whether a slot is mounted.
    pub fn on_elapsed(
        &mut self,
        ticket: RetryTicket,
        is_ready: impl FnOnce(usize) -> bool,
    ) -> TriggerOutcome {
        let Some(index) = self
            .pending
            .iter()
            .find_map(|(index, p)| (p.ticket == ticket).then_some(*index))
        else {
            return TriggerOutcome::Stale;
        };

        let attempts = self.pending.get(&index).map_or(0, |p| p.attempts) + 1;

        if is_ready(index) {
            self.pending.remove(&index);
            return TriggerOutcome::Ready(index);
        }

        if attempts >= self.max_retries.value() {
            self.pending.remove(&index);
            tracing::warn!(index, attempts, "slot not ready, giving up deferred load");
            return TriggerOutcome::Exhausted { index, attempts };
        }

        let next = self.issue();
        self.pending.insert(
            index,
            Pending {
                ticket: next,
                attempts,
            },
        );
        TriggerOutcome::Scheduled {
            index,
            ticket: next,
            delay: self.delay,
        }
    }

    pub fn cancel(&mut self, index: usize) {
        self.pending.remove(&index);
    }

    /// Cancels everything; used on teardown and list replacement.
    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            tracing::debug!(count = self.pending.len(), "cancelling deferred loads");
        }
        self.pending.clear();
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_pending(&self, index: usize) -> bool {
        self.pending.contains_key(&index)
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(200);

    fn scheduled_ticket(outcome: TriggerOutcome) -> RetryTicket {
        match outcome {
            TriggerOutcome::Scheduled { ticket, delay, .. } => {
                assert_eq!(delay, DELAY);
                ticket
            }
            other => panic!("expected a scheduled retry, got {other:?}"),
        }
    }

    #[test]
    fn mounted_slot_loads_immediately() {
        let mut trigger = DeferredTrigger::new(DELAY, MaxSlotRetries::default());
        assert_eq!(trigger.request(3, true), TriggerOutcome::Ready(3));
        assert_eq!(trigger.pending_count(), 0);
    }

    #[test]
    fn slot_mounted_after_three_cycles_loads_once() {
        let mut trigger = DeferredTrigger::new(DELAY, MaxSlotRetries::default());
        let mut ready_after_check = 3;
        let mut checks = 0;
        let mut loads = 0;

        let mut outcome = trigger.request(2, false);
        loop {
            match outcome {
                TriggerOutcome::Scheduled { ticket, .. } => {
                    outcome = trigger.on_elapsed(ticket, |_| {
                        checks += 1;
                        ready_after_check -= 1;
                        ready_after_check == 0
                    });
                }
                TriggerOutcome::Ready(index) => {
                    assert_eq!(index, 2);
                    loads += 1;
                    break;
                }
                other => panic!("unexpected outcome {other:?}"),
            }
        }

        assert_eq!(loads, 1);
        assert_eq!(checks, 3);
        assert!(!trigger.is_pending(2));
    }

    #[test]
    fn retries_are_bounded() {
        let mut trigger = DeferredTrigger::new(DELAY, MaxSlotRetries::new(4));
        let mut outcome = trigger.request(1, false);
        let mut checks = 0;

        while let TriggerOutcome::Scheduled { ticket, .. } = outcome {
            checks += 1;
            outcome = trigger.on_elapsed(ticket, |_| false);
        }

        assert_eq!(
            outcome,
            TriggerOutcome::Exhausted {
                index: 1,
                attempts: 4
            }
        );
        assert_eq!(checks, 4);
        assert_eq!(trigger.pending_count(), 0);
    }

    #[test]
    fn cancelled_ticket_is_stale() {
        let mut trigger = DeferredTrigger::new(DELAY, MaxSlotRetries::default());
        let ticket = scheduled_ticket(trigger.request(0, false));
        trigger.cancel_all();

        assert_eq!(trigger.on_elapsed(ticket, |_| true), TriggerOutcome::Stale);
    }

    #[test]
    fn new_request_supersedes_old_ticket() {
        let mut trigger = DeferredTrigger::new(DELAY, MaxSlotRetries::default());
        let first = scheduled_ticket(trigger.request(0, false));
        let second = scheduled_ticket(trigger.request(0, false));

        assert_ne!(first, second);
        assert_eq!(trigger.on_elapsed(first, |_| true), TriggerOutcome::Stale);
        assert_eq!(trigger.on_elapsed(second, |_| true), TriggerOutcome::Ready(0));
    }

    #[test]
    fn cancel_one_index_keeps_others() {
        let mut trigger = DeferredTrigger::new(DELAY, MaxSlotRetries::default());
        let a = scheduled_ticket(trigger.request(0, false));
        let b = scheduled_ticket(trigger.request(1, false));
        trigger.cancel(0);

        assert_eq!(trigger.on_elapsed(a, |_| true), TriggerOutcome::Stale);
        assert_eq!(trigger.on_elapsed(b, |_| true), TriggerOutcome::Ready(1));
    }
}
