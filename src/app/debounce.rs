//! Trailing-edge debounce over host timers.
//!
//! Zellij timers cannot be cancelled and their events carry no identity, only
//! the elapsed duration. The [`Debouncer`] therefore hands out a
//! [`TimerHandle`] for every scheduled value and remembers the order handles
//! were issued in. All timers share the same quiet period, so the host delivers
//! them in that order and [`Debouncer::fire_next`] can match each elapsed timer
//! to its handle.
//!
//! Only the most recently issued handle can deliver a value:
//!
//! ```text
//! schedule("j")  ──► #1 ─┐
//! schedule("ja") ──► #2 ─┤   #1 elapses → None (superseded)
//! schedule("jap")──► #3 ─┘   #2 elapses → None (superseded)
//!                            #3 elapses → Some("jap")
//! ```

use std::collections::VecDeque;
use std::time::Duration;

/// Identity of one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

/// Holds at most one pending value and releases it once its timer elapses.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet_period: Duration,
    next_id: u64,

    /// Handles whose host timer has not elapsed yet, oldest first.
    outstanding: VecDeque<TimerHandle>,

    pending: Option<(TimerHandle, T)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub const fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            next_id: 0,
            outstanding: VecDeque::new(),
            pending: None,
        }
    }

    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Replaces the pending value and returns the handle of the timer the
    /// caller must now start. Every earlier handle is invalidated.
    pub fn schedule(&mut self, value: T) -> TimerHandle {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = TimerHandle(self.next_id);
        self.outstanding.push_back(handle);
        self.pending = Some((handle, value));
        tracing::trace!(handle = handle.0, outstanding = self.outstanding.len(), "debounce scheduled");
        handle
    }

    /// Timer for `handle` elapsed. Returns the pending value if `handle` is
    /// still the latest one.
    pub fn fire(&mut self, handle: TimerHandle) -> Option<T> {
        self.outstanding.retain(|h| *h != handle);
        match &self.pending {
            Some((latest, _)) if *latest == handle => self.pending.take().map(|(_, value)| value),
            _ => {
                tracing::trace!(handle = handle.0, "superseded debounce timer elapsed");
                None
            }
        }
    }

    /// The oldest outstanding timer elapsed.
    pub fn fire_next(&mut self) -> Option<T> {
        let handle = self.outstanding.pop_front()?;
        self.fire(handle)
    }

    /// Drops the pending value. Timers already started will elapse as no-ops.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    /// Releases the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.cancel()
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of host timers still expected to elapse.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debouncer() -> Debouncer<String> {
        Debouncer::new(Duration::from_millis(300))
    }

    #[test]
    fn only_the_last_value_is_delivered() {
        let mut d = debouncer();
        d.schedule("j".into());
        d.schedule("ja".into());
        d.schedule("jap".into());

        assert_eq!(d.fire_next(), None);
        assert_eq!(d.fire_next(), None);
        assert_eq!(d.fire_next(), Some("jap".to_string()));
        assert_eq!(d.fire_next(), None);
        assert!(!d.is_pending());
        assert_eq!(d.outstanding(), 0);
    }

    #[test]
    fn explicit_handles_are_invalidated_by_newer_ones() {
        let mut d = debouncer();
        let first = d.schedule("a".into());
        let second = d.schedule("ab".into());
        assert_ne!(first, second);

        assert_eq!(d.fire(first), None);
        assert!(d.is_pending());
        assert_eq!(d.fire(second), Some("ab".to_string()));
        assert_eq!(d.fire(second), None);
    }

    #[test]
    fn cancelled_value_never_fires() {
        let mut d = debouncer();
        d.schedule("fra".into());
        assert_eq!(d.cancel(), Some("fra".to_string()));
        assert_eq!(d.fire_next(), None);
        assert_eq!(d.outstanding(), 0);
    }

    #[test]
    fn flush_releases_immediately_and_timer_becomes_noop() {
        let mut d = debouncer();
        d.schedule("nor".into());
        assert_eq!(d.flush(), Some("nor".to_string()));
        assert!(!d.is_pending());
        assert_eq!(d.fire_next(), None);
    }

    #[test]
    fn schedule_after_fire_starts_a_new_cycle() {
        let mut d = debouncer();
        d.schedule("a".into());
        assert_eq!(d.fire_next(), Some("a".to_string()));
        d.schedule("b".into());
        assert_eq!(d.fire_next(), Some("b".to_string()));
    }

    #[test]
    fn elapsed_timer_with_nothing_outstanding_is_ignored() {
        let mut d = debouncer();
        assert_eq!(d.fire_next(), None);
        assert_eq!(d.quiet_period(), Duration::from_millis(300));
    }
}
