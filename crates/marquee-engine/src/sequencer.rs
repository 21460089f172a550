//! Line-by-line reveal of a script onto a log surface.
//!
//! A [`Sequencer`] owns its reveal state and a single [`TickSlot`].
//! Each tick reveals one line (or one character in the character pace)
//! and schedules at most one follow-up tick. `reset` cancels the pending
//! tick before touching state, so ticks from two generations never
//! interleave.

use crate::line::{Line, Script};
use crate::timer::{Animation, Tick, TickSlot};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// How fast a script is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "unit")]
pub enum Pace {
    /// One whole line per tick.
    Lines { interval_ms: u64 },
    /// One character per tick; the tick that finishes a line commits it.
    Characters { char_ms: u64 },
}

impl Pace {
    /// Delay between ticks, never zero.
    pub fn step_ms(self) -> u64 {
        match self {
            Self::Lines { interval_ms } => interval_ms,
            Self::Characters { char_ms } => char_ms,
        }
        .max(1)
    }
}

/// Lifecycle of a sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Created or reset, nothing scheduled.
    #[default]
    Idle,
    /// Ticks are being scheduled.
    Running,
    /// Temporarily halted; the remaining delay is kept.
    Paused,
    /// Every line has been revealed.
    Complete,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Paused => write!(f, "paused"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Mutable reveal progress. `emitted` is always `script[..cursor]`.
#[derive(Debug, Default)]
struct RevealState {
    cursor: usize,
    partial: String,
    mode: Mode,
    /// Delay left on the tick cancelled by `pause`.
    paused_remaining: Option<u64>,
}

/// Reveals a [`Script`] one unit per tick.
#[derive(Debug)]
pub struct Sequencer {
    script: Script,
    pace: Pace,
    state: RevealState,
    slot: TickSlot,
}

impl Sequencer {
    /// Create an idle sequencer.
    pub fn new(script: Script, pace: Pace) -> Self {
        Self {
            script,
            pace,
            state: RevealState::default(),
            slot: TickSlot::new(),
        }
    }

    /// Shorthand for the line pace.
    pub fn lines(script: Script, interval_ms: u64) -> Self {
        Self::new(script, Pace::Lines { interval_ms })
    }

    /// Begin revealing. Only acts from `Idle`; returns whether it did.
    ///
    /// An empty script completes immediately without scheduling a tick.
    pub fn start(&mut self, now: u64) -> bool {
        if self.state.mode != Mode::Idle {
            return false;
        }
        if self.script.is_empty() {
            self.state.mode = Mode::Complete;
            debug!("empty script, sequencer complete");
            return true;
        }
        self.state.mode = Mode::Running;
        self.slot.schedule(now.saturating_add(self.pace.step_ms()));
        debug!(lines = self.script.len(), pace = ?self.pace, "sequencer started");
        true
    }

    /// Cancel any pending tick and return to an empty `Idle` state.
    pub fn reset(&mut self) {
        self.slot.cancel();
        self.state = RevealState::default();
        debug!("sequencer reset");
    }

    /// `reset` followed by `start`.
    pub fn restart(&mut self, now: u64) {
        self.reset();
        self.start(now);
    }

    /// Halt a running sequencer, keeping the remaining delay.
    pub fn pause(&mut self, now: u64) -> bool {
        if self.state.mode != Mode::Running {
            return false;
        }
        let remaining = self
            .slot
            .deadline()
            .map_or(0, |due| due.saturating_sub(now));
        self.slot.cancel();
        self.state.paused_remaining = Some(remaining);
        self.state.mode = Mode::Paused;
        debug!(remaining, "sequencer paused");
        true
    }

    /// Continue a paused sequencer.
    pub fn resume(&mut self, now: u64) -> bool {
        if self.state.mode != Mode::Paused {
            return false;
        }
        let remaining = self
            .state
            .paused_remaining
            .take()
            .unwrap_or_else(|| self.pace.step_ms());
        self.state.mode = Mode::Running;
        self.slot.schedule(now.saturating_add(remaining));
        debug!(remaining, "sequencer resumed");
        true
    }

    /// Lines revealed so far, in script order.
    pub fn emitted(&self) -> &[Line] {
        &self.script[..self.state.cursor]
    }

    /// Index of the next line to reveal.
    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Characters of the current line revealed so far (character pace only).
    pub fn partial(&self) -> &str {
        &self.state.partial
    }

    /// Line currently being typed, if any.
    pub fn current_line(&self) -> Option<&Line> {
        if self.state.mode == Mode::Complete {
            return None;
        }
        self.script.get(self.state.cursor)
    }

    pub fn is_complete(&self) -> bool {
        self.state.mode == Mode::Complete
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn pace(&self) -> Pace {
        self.pace
    }

    /// Fraction of lines revealed, `1.0` for an empty script.
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f32 {
        if self.script.is_empty() {
            1.0
        } else {
            self.state.cursor as f32 / self.script.len() as f32
        }
    }

    fn step(&mut self, at: u64) {
        let Some(line) = self.script.get(self.state.cursor) else {
            self.state.mode = Mode::Complete;
            return;
        };

        match self.pace {
            Pace::Lines { .. } => {
                self.state.cursor += 1;
            }
            Pace::Characters { .. } => {
                let text = line.text();
                let offset = self.state.partial.len();
                if let Some(c) = text[offset..].chars().next() {
                    self.state.partial.push(c);
                }
                if self.state.partial.len() >= text.len() {
                    self.state.partial.clear();
                    self.state.cursor += 1;
                }
            }
        }
        trace!(cursor = self.state.cursor, partial = %self.state.partial, "reveal tick");

        if self.state.cursor >= self.script.len() {
            self.state.mode = Mode::Complete;
            debug!(lines = self.script.len(), "sequencer complete");
        } else {
            self.slot.schedule(at.saturating_add(self.pace.step_ms()));
        }
    }
}

impl Animation for Sequencer {
    fn next_tick(&self) -> Option<Tick> {
        self.slot.pending()
    }

    fn fire(&mut self, tick: Tick) -> bool {
        if self.state.mode != Mode::Running || !self.slot.claim(tick) {
            return false;
        }
        self.step(tick.due());
        true
    }

    fn dispose(&mut self) {
        self.slot.cancel();
    }
}
