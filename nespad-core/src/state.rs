//! Shared pad state between the delivery context and the edge handlers.
//!
//! [`PadStateCell`] is the only data crossing the console node's two
//! execution contexts. Each field is a single machine word with one
//! writer at a time:
//!
//! - `pending` and `release_pending` are written by the notification
//!   path via [`publish`](PadStateCell::publish) and by the strobe
//!   handler via [`latch`](PadStateCell::latch); the two never run
//!   concurrently with themselves, and an interleaving of a publish with
//!   a strobe yields either the old or the new complete state.
//! - `current` is written by the notification path only and read by the
//!   visualizer emission.
//!
//! There is no queue: when several notifications land between two
//! strobes, only the most recent state is observed. All accesses are
//! relaxed atomics - no locks, nothing for the edge handlers to contend
//! on.

use nespad_proto::ButtonState;
use portable_atomic::{AtomicBool, AtomicU8, Ordering};

/// Lock-free cell holding the authoritative pad state on the console node.
#[derive(Debug)]
pub struct PadStateCell {
    /// Most recently accepted state, not yet consumed by a strobe.
    pending: AtomicU8,
    /// An all-released state arrived; confirm the clear at the next strobe.
    release_pending: AtomicBool,
    /// Latest mapped state, kept only for the diagnostic stream.
    current: AtomicU8,
}

impl PadStateCell {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: AtomicU8::new(0),
            release_pending: AtomicBool::new(false),
            current: AtomicU8::new(0),
        }
    }

    /// Accept a mapped state from the notification-delivery context.
    ///
    /// A zero state clears `pending` immediately and leaves a deferred
    /// release marker as a safety net; any other state replaces `pending`
    /// outright. `current` tracks every delivery for the visualizer.
    pub fn publish(&self, mapped: ButtonState) {
        self.current.store(mapped.raw(), Ordering::Relaxed);
        if mapped.is_empty() {
            self.pending.store(0, Ordering::Relaxed);
            self.release_pending.store(true, Ordering::Relaxed);
        } else {
            self.pending.store(mapped.raw(), Ordering::Relaxed);
            self.release_pending.store(false, Ordering::Relaxed);
        }
    }

    /// Snapshot `pending` for one output frame. Strobe handler only.
    ///
    /// When a release was deferred, the console has latched the
    /// all-released value with this call, so the marker and `pending`
    /// are cleared now, post-snapshot.
    pub fn latch(&self) -> ButtonState {
        let snapshot = self.pending.load(Ordering::Relaxed);
        if self.release_pending.load(Ordering::Relaxed) {
            self.pending.store(0, Ordering::Relaxed);
            self.release_pending.store(false, Ordering::Relaxed);
        }
        ButtonState(snapshot)
    }

    /// Latest delivered state, for the diagnostic stream.
    #[must_use]
    pub fn current(&self) -> ButtonState {
        ButtonState(self.current.load(Ordering::Relaxed))
    }

    /// State the next strobe will latch.
    #[must_use]
    pub fn pending(&self) -> ButtonState {
        ButtonState(self.pending.load(Ordering::Relaxed))
    }

    /// Whether a deferred release is waiting for the next strobe.
    #[must_use]
    pub fn release_pending(&self) -> bool {
        self.release_pending.load(Ordering::Relaxed)
    }
}

impl Default for PadStateCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_nonzero_arms_pending() {
        let cell = PadStateCell::new();
        cell.publish(ButtonState(0x05));
        assert_eq!(cell.pending(), ButtonState(0x05));
        assert_eq!(cell.current(), ButtonState(0x05));
        assert!(!cell.release_pending());
    }

    #[test]
    fn test_publish_zero_clears_immediately() {
        let cell = PadStateCell::new();
        cell.publish(ButtonState(0x30));
        cell.publish(ButtonState::NONE);
        // observable at the very next strobe, before any release handling
        assert_eq!(cell.pending(), ButtonState::NONE);
        assert!(cell.release_pending());
        assert_eq!(cell.current(), ButtonState::NONE);
    }

    #[test]
    fn test_latch_consumes_deferred_release() {
        let cell = PadStateCell::new();
        cell.publish(ButtonState::NONE);
        assert_eq!(cell.latch(), ButtonState::NONE);
        assert!(!cell.release_pending());
        assert_eq!(cell.pending(), ButtonState::NONE);
    }

    #[test]
    fn test_latch_keeps_held_state_armed() {
        let cell = PadStateCell::new();
        cell.publish(ButtonState(0x11));
        assert_eq!(cell.latch(), ButtonState(0x11));
        // held buttons must be reported again on the next strobe
        assert_eq!(cell.latch(), ButtonState(0x11));
    }

    #[test]
    fn test_last_write_wins() {
        let cell = PadStateCell::new();
        cell.publish(ButtonState(0x01));
        cell.publish(ButtonState(0x02));
        cell.publish(ButtonState(0x80));
        assert_eq!(cell.latch(), ButtonState(0x80));
    }
}
