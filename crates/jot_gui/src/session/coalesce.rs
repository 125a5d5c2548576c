//! Delay-coalescing and single-slot in-flight primitives.

use crate::backend::RequestId;
use std::time::{Duration, Instant};

/// Trailing-edge debouncer driven by an external clock.
///
/// Each [`trigger`](Self::trigger) cancels the pending fire and reschedules it
/// `delay` after the latest call; [`fire_if_due`](Self::fire_if_due) reports
/// the fire once. Callers poll it from the frame loop, so a zero delay fires
/// on the next frame after the trigger.
#[derive(Debug, Clone)]
pub(crate) struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Cancel any pending fire and schedule a new one `delay` after `now`.
    pub(crate) fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub(crate) fn cancel(&mut self) {
        self.deadline = None;
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the pending fire if its deadline has passed.
    ///
    /// # Returns
    /// `true` exactly once per trigger, on the first poll at or after the
    /// deadline.
    pub(crate) fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Holds at most one outstanding request token.
#[derive(Debug, Default, Clone)]
pub(crate) struct InFlightSlot {
    token: Option<RequestId>,
}

impl InFlightSlot {
    pub(crate) fn is_busy(&self) -> bool {
        self.token.is_some()
    }

    /// Claim the slot for `id`.
    ///
    /// # Returns
    /// `false` when another request already holds the slot.
    pub(crate) fn occupy(&mut self, id: RequestId) -> bool {
        if self.token.is_some() {
            return false;
        }
        self.token = Some(id);
        true
    }

    /// Release the slot if `id` holds it.
    ///
    /// # Returns
    /// `true` when `id` was the outstanding request.
    pub(crate) fn release(&mut self, id: RequestId) -> bool {
        if self.token == Some(id) {
            self.token = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debouncer_fires_once_after_last_trigger() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));

        debouncer.trigger(t0);
        debouncer.trigger(t0 + Duration::from_millis(60));
        assert!(!debouncer.fire_if_due(t0 + Duration::from_millis(120)));
        assert!(debouncer.fire_if_due(t0 + Duration::from_millis(160)));
        assert!(!debouncer.fire_if_due(t0 + Duration::from_millis(500)));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn cancelled_debouncer_never_fires() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        debouncer.trigger(t0);
        debouncer.cancel();
        assert!(!debouncer.fire_if_due(t0 + Duration::from_secs(1)));
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn zero_delay_fires_on_next_poll() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.trigger(t0);
        assert!(debouncer.fire_if_due(t0));
    }

    #[test]
    fn in_flight_slot_holds_one_token() {
        let mut slot = InFlightSlot::default();
        assert!(slot.occupy(RequestId(1)));
        assert!(!slot.occupy(RequestId(2)));
        assert!(!slot.release(RequestId(2)));
        assert!(slot.is_busy());
        assert!(slot.release(RequestId(1)));
        assert!(!slot.is_busy());
    }
}
