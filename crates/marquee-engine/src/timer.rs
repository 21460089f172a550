//! Single-slot tick scheduling with generation guards.
//!
//! Each animation owns exactly one [`TickSlot`]. A slot holds at most one
//! pending [`Tick`]; scheduling a new tick cancels the old one first, and
//! every cancel bumps the slot generation. A host timer that fires late
//! hands its token back through [`TickSlot::claim`], which rejects any
//! token from an older generation. That keeps a stale callback from
//! mutating an instance after `reset` or `dispose`.

/// Token for one scheduled step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    due: u64,
    generation: u64,
}

impl Tick {
    /// Time (ms) at which this tick should fire.
    pub fn due(&self) -> u64 {
        self.due
    }

    /// Generation of the slot when this tick was scheduled.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Holder for the single outstanding tick of one animation.
#[derive(Debug, Default)]
pub struct TickSlot {
    pending: Option<Tick>,
    generation: u64,
}

impl TickSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a tick at `due`, cancelling any pending one first.
    pub fn schedule(&mut self, due: u64) -> Tick {
        self.cancel();
        let tick = Tick {
            due,
            generation: self.generation,
        };
        self.pending = Some(tick);
        tick
    }

    /// Drop the pending tick, if any. Returns whether one was pending.
    ///
    /// The generation advances either way so tokens handed out earlier
    /// can never be claimed.
    pub fn cancel(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        self.pending.take().is_some()
    }

    /// The pending tick, if any.
    pub fn pending(&self) -> Option<Tick> {
        self.pending
    }

    /// Due time of the pending tick.
    pub fn deadline(&self) -> Option<u64> {
        self.pending.map(|t| t.due)
    }

    /// Whether a tick is pending.
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume `tick` if it is the pending one.
    pub fn claim(&mut self, tick: Tick) -> bool {
        if self.pending == Some(tick) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

/// A tick-driven state machine.
///
/// Implementors keep their own [`TickSlot`]. Drivers either poll
/// [`Animation::advance`] with the current time or wait for
/// [`Animation::next_tick`] and hand the token back to
/// [`Animation::fire`].
pub trait Animation {
    /// The pending tick, if the animation is waiting on one.
    fn next_tick(&self) -> Option<Tick>;

    /// Run one step for `tick`. Stale or unknown ticks are ignored.
    ///
    /// Returns whether visible state changed.
    fn fire(&mut self, tick: Tick) -> bool;

    /// Cancel the pending tick. Later `advance` calls are no-ops.
    fn dispose(&mut self);

    /// Fire every tick due at or before `now`, in order.
    ///
    /// Each fired tick must be later than the one before it, so a
    /// deadline pinned at `u64::MAX` fires once instead of forever.
    fn advance(&mut self, now: u64) -> bool {
        let mut changed = false;
        let mut last: Option<u64> = None;
        while let Some(tick) = self
            .next_tick()
            .filter(|t| t.due() <= now && last.map_or(true, |l| t.due() > l))
        {
            last = Some(tick.due());
            changed |= self.fire(tick);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_and_claim() {
        let mut slot = TickSlot::new();
        let tick = slot.schedule(100);
        assert_eq!(slot.deadline(), Some(100));
        assert!(slot.claim(tick));
        assert!(!slot.is_armed());
        // A token is single-use.
        assert!(!slot.claim(tick));
    }

    #[test]
    fn test_reschedule_cancels_previous() {
        let mut slot = TickSlot::new();
        let first = slot.schedule(100);
        let second = slot.schedule(200);
        assert_ne!(first.generation(), second.generation());
        assert!(!slot.claim(first));
        assert!(slot.claim(second));
    }

    #[test]
    fn test_cancel_rejects_stale_token() {
        let mut slot = TickSlot::new();
        let tick = slot.schedule(50);
        assert!(slot.cancel());
        assert!(!slot.cancel());
        assert!(!slot.claim(tick));
    }

    #[test]
    fn test_stale_token_with_same_due_is_rejected() {
        let mut slot = TickSlot::new();
        let old = slot.schedule(100);
        slot.cancel();
        let fresh = slot.schedule(100);
        assert_eq!(old.due(), fresh.due());
        assert!(!slot.claim(old));
        assert!(slot.claim(fresh));
    }
}
