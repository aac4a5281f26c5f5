//! Debounce and throttle helpers.
//!
//! Both helpers are polled rather than callback driven: the caller asks
//! whether it may act now. Every method has an `_at` variant taking an
//! explicit instant so timing can be driven deterministically.

use std::time::Duration;
use web_time::Instant;

/// Fires once after input has been quiet for a delay.
///
/// Each [`trigger`](Self::trigger) restarts the quiet period; the pending
/// action becomes ready once the delay has passed since the last trigger.
#[derive(Debug)]
pub struct Debouncer {
    /// Quiet period required before firing.
    delay: Duration,

    /// Time of the latest trigger that has not fired yet.
    pending_since: Option<Instant>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending_since: None,
        }
    }

    /// Record new input now.
    pub fn trigger(&mut self) {
        self.trigger_at(Instant::now());
    }

    /// Record new input at `now`.
    pub fn trigger_at(&mut self, now: Instant) {
        self.pending_since = Some(now);
        log::trace!("Debounce: triggered");
    }

    /// Whether input is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Check and consume the pending action if the quiet period has passed.
    pub fn ready(&mut self) -> bool {
        self.ready_at(Instant::now())
    }

    /// Check and consume the pending action as of `now`.
    pub fn ready_at(&mut self, now: Instant) -> bool {
        let Some(since) = self.pending_since else {
            return false;
        };
        if now.saturating_duration_since(since) < self.delay {
            return false;
        }
        self.pending_since = None;
        true
    }

    /// Drop any pending action.
    pub fn cancel(&mut self) {
        self.pending_since = None;
    }
}

/// Admits at most one action per interval.
#[derive(Debug)]
pub struct Throttle {
    /// Minimum spacing between admitted actions.
    interval: Duration,

    /// Time of the last admitted action.
    last_admitted: Option<Instant>,
}

impl Throttle {
    /// Create a throttle with the given minimum interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_admitted: None,
        }
    }

    /// Try to act now.
    pub fn try_acquire(&mut self) -> bool {
        self.try_acquire_at(Instant::now())
    }

    /// Try to act at `now`. Returns true and starts a new interval if allowed.
    pub fn try_acquire_at(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_admitted {
            if now.saturating_duration_since(last) < self.interval {
                return false;
            }
        }
        self.last_admitted = Some(now);
        true
    }

    /// Forget the last admitted action.
    pub fn reset(&mut self) {
        self.last_admitted = None;
    }
}
