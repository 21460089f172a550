//! Cursor blink toggle.

use crate::timer::{Animation, Tick, TickSlot};

/// Flips a visibility flag every `period_ms`. Shares nothing with the
/// text animation it decorates.
#[derive(Debug)]
pub struct Blink {
    period_ms: u64,
    visible: bool,
    slot: TickSlot,
}

impl Blink {
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            visible: true,
            slot: TickSlot::new(),
        }
    }

    /// Start blinking. Restarting cancels the previous schedule.
    pub fn start(&mut self, now: u64) {
        self.visible = true;
        self.slot.schedule(now.saturating_add(self.period_ms));
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Animation for Blink {
    fn next_tick(&self) -> Option<Tick> {
        self.slot.pending()
    }

    fn fire(&mut self, tick: Tick) -> bool {
        if !self.slot.claim(tick) {
            return false;
        }
        self.visible = !self.visible;
        self.slot.schedule(tick.due().saturating_add(self.period_ms));
        true
    }

    fn dispose(&mut self) {
        self.slot.cancel();
    }
}
