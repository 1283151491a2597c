//! Input Debouncer
//!
//! Turns a stream of raw values (one per keystroke) into a quiescence-triggered
//! stream: a value is released only after it has stayed unchanged for the full
//! quiet period. The debouncer is clock-agnostic; the caller supplies `now` and
//! sleeps until `deadline()`, which keeps it deterministic under test.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct PendingValue<T> {
    value: T,
    deadline: Instant,
}

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    /// Last released value. Seeded with the initial value, which counts as
    /// already released.
    current: T,
    pending: Option<PendingValue<T>>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            current: initial,
            pending: None,
        }
    }

    /// The debounced value as of the last release.
    pub fn current(&self) -> &T {
        &self.current
    }

    /// The most recent raw input, released or not.
    pub fn latest(&self) -> &T {
        match &self.pending {
            Some(pending) => &pending.value,
            None => &self.current,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes releasable, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Records a raw input. A value that differs from the latest input restarts
    /// the quiet period and replaces whatever was pending; repeating the latest
    /// input changes nothing.
    pub fn push(&mut self, value: T, now: Instant) {
        if *self.latest() == value {
            return;
        }

        self.pending = Some(PendingValue {
            value,
            deadline: now + self.delay,
        });
    }

    /// Releases the pending value once its quiet period has elapsed.
    ///
    /// Returns `None` if nothing is due, or if the settled value equals the
    /// value already released (the input went away and came back).
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = matches!(&self.pending, Some(pending) if now >= pending.deadline);
        if !due {
            return None;
        }

        let settled = self.pending.take()?.value;
        if settled == self.current {
            return None;
        }

        self.current = settled.clone();
        Some(settled)
    }

    /// Jumps straight to `value` without a quiet period and without releasing it.
    /// Any pending value is discarded.
    pub fn set_now(&mut self, value: T) {
        self.pending = None;
        self.current = value;
    }

    /// Drops the pending value, if any, so it never fires.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }
}
