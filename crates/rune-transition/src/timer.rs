//! One-shot phase timers on a host-driven clock.
//!
//! The queue never reads wall time. The host reports elapsed milliseconds
//! through [`TimerQueue::advance`], the same way the animation manager is
//! stepped with `update(delta_ms)`, which keeps every firing order
//! deterministic. The clock itself is kept in `f64` so long-running hosts
//! feeding small frame deltas do not drift.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Handle to a scheduled timer. Unique within the queue that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    handle: TimerHandle,
    deadline_ms: f64,
}

/// Cancelable one-shot timers.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now_ms: f64,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock reading in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Schedule a timer `delay_ms` from now. Negative delays are clamped to zero.
    pub fn schedule(&mut self, delay_ms: f64) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let deadline_ms = self.now_ms + delay_ms.max(0.0);
        self.pending.push(PendingTimer {
            handle,
            deadline_ms,
        });
        trace!(timer = handle.0, deadline_ms, "timer scheduled");
        handle
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle != handle);
        let cancelled = self.pending.len() != before;
        if cancelled {
            trace!(timer = handle.0, "timer cancelled");
        }
        cancelled
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }

    /// Milliseconds left before `handle` fires, or `None` if it is not pending.
    pub fn remaining_ms(&self, handle: TimerHandle) -> Option<f64> {
        self.pending
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| (t.deadline_ms - self.now_ms).max(0.0))
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Advance the clock and return the timers that came due, earliest first.
    ///
    /// Timers sharing a deadline fire in the order they were scheduled.
    pub fn advance(&mut self, delta_ms: f64) -> Vec<TimerHandle> {
        self.now_ms += delta_ms.max(0.0);
        let now = self.now_ms;

        let mut due: Vec<PendingTimer> = Vec::new();
        self.pending.retain(|t| {
            if t.deadline_ms <= now {
                due.push(*t);
                false
            } else {
                true
            }
        });

        due.sort_by(|a, b| {
            a.deadline_ms
                .total_cmp(&b.deadline_ms)
                .then(a.handle.0.cmp(&b.handle.0))
        });
        due.into_iter().map(|t| t.handle).collect()
    }

    /// Drop every pending timer. The clock keeps its reading.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_at_deadline() {
        let mut timers = TimerQueue::new();
        let handle = timers.schedule(10.0);

        assert!(timers.advance(9.0).is_empty());
        assert!(timers.is_pending(handle));

        assert_eq!(timers.advance(1.0), vec![handle]);
        assert!(!timers.is_pending(handle));
        assert_eq!(timers.now_ms(), 10.0);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timers = TimerQueue::new();
        let handle = timers.schedule(5.0);

        assert!(timers.cancel(handle));
        assert!(!timers.cancel(handle));
        assert!(timers.advance(100.0).is_empty());
    }

    #[test]
    fn test_due_timers_in_deadline_order() {
        let mut timers = TimerQueue::new();
        let late = timers.schedule(30.0);
        let early = timers.schedule(10.0);
        let tie = timers.schedule(10.0);

        assert_eq!(timers.advance(50.0), vec![early, tie, late]);
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn test_handles_are_unique() {
        let mut timers = TimerQueue::new();
        let a = timers.schedule(1.0);
        let b = timers.schedule(1.0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_negative_delay_is_immediate() {
        let mut timers = TimerQueue::new();
        let handle = timers.schedule(-5.0);
        assert_eq!(timers.advance(0.0), vec![handle]);
    }

    #[test]
    fn test_remaining_budget() {
        let mut timers = TimerQueue::new();
        let handle = timers.schedule(10.0);
        timers.advance(4.0);

        assert_eq!(timers.remaining_ms(handle), Some(6.0));
        timers.cancel(handle);
        assert_eq!(timers.remaining_ms(handle), None);
    }

    #[test]
    fn test_long_running_clock_keeps_frame_precision() {
        let mut timers = TimerQueue::new();
        // five hours of 16ms frames
        timers.advance(5.0 * 60.0 * 60.0 * 1000.0);
        let handle = timers.schedule(300.0);

        for _ in 0..18 {
            assert!(timers.advance(16.0).is_empty());
        }
        assert_eq!(timers.remaining_ms(handle), Some(12.0));
        assert_eq!(timers.advance(12.0), vec![handle]);
    }

    #[test]
    fn test_clear_keeps_clock() {
        let mut timers = TimerQueue::new();
        timers.advance(42.0);
        timers.schedule(1.0);
        timers.clear();

        assert_eq!(timers.pending_count(), 0);
        assert_eq!(timers.now_ms(), 42.0);
    }
}
