//! Delayed, coalescing rebuilds of the navigation cache.
//!
//! Content that changes underneath the tracker (first load, a reload, a jump to a section) may
//! not be fully laid out when the change is signalled, so the cache rebuild waits a short
//! moment. Only one rebuild is ever pending: a newer trigger replaces the older deadline, so a
//! burst of changes costs a single rebuild. Time is passed in by the caller, which keeps the
//! event loop in charge of waiting.

use std::time::{Duration, Instant};
use tracing::trace;

/// Delay before rebuilding after content is loaded or replaced.
pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_millis(100);

/// Delay before rebuilding after a navigation signal.
pub const DEFAULT_NAVIGATION_DELAY: Duration = Duration::from_millis(50);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Why a rebuild was requested.
pub enum RebuildTrigger {
    /// Content was laid out for the first time.
    Load,
    /// Content was swapped for a fresh copy.
    ContentChanged,
    /// The reader jumped to a section.
    Navigation,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    trigger: RebuildTrigger,
    deadline: Instant,
}

#[derive(Debug)]
/// A single cancellable rebuild deadline.
pub struct RebuildScheduler {
    load_delay: Duration,
    navigation_delay: Duration,
    pending: Option<Pending>,
}

impl Default for RebuildScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_DELAY, DEFAULT_NAVIGATION_DELAY)
    }
}

impl RebuildScheduler {
    #[must_use]
    /// Creates an idle scheduler with the given delays.
    pub fn new(load_delay: Duration, navigation_delay: Duration) -> Self {
        Self {
            load_delay,
            navigation_delay,
            pending: None,
        }
    }

    #[must_use]
    /// How long a trigger waits before its rebuild falls due.
    pub fn delay_for(&self, trigger: RebuildTrigger) -> Duration {
        match trigger {
            RebuildTrigger::Load | RebuildTrigger::ContentChanged => self.load_delay,
            RebuildTrigger::Navigation => self.navigation_delay,
        }
    }

    /// Requests a rebuild, superseding any rebuild still pending.
    pub fn schedule(&mut self, trigger: RebuildTrigger, now: Instant) {
        let deadline = now + self.delay_for(trigger);
        if let Some(previous) = self.pending.replace(Pending { trigger, deadline }) {
            trace!(superseded = ?previous.trigger, by = ?trigger, "coalesced rebuild");
        } else {
            trace!(?trigger, "scheduled rebuild");
        }
    }

    /// Drops the pending rebuild, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    /// Whether a rebuild is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Hands out the pending trigger once its deadline has passed, clearing it.
    pub fn take_due(&mut self, now: Instant) -> Option<RebuildTrigger> {
        match self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending = None;
                Some(pending.trigger)
            }
            _ => None,
        }
    }

    #[must_use]
    /// Time left until the pending rebuild is due, zero if overdue, `None` when idle.
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|pending| pending.deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
#[path = "tests/schedule.rs"]
mod tests;
