//! Type, hold, delete, advance: the rotating-word effect.
//!
//! A [`Typewriter`] loops over its word rotation forever. There is no
//! terminal state; it stops only when disposed or dropped.

use crate::timer::{Animation, Tick, TickSlot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace};

/// Delays for each phase of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypewriterTiming {
    /// Delay per typed character.
    #[serde(default = "default_type_ms")]
    pub type_ms: u64,
    /// Pause with the full word shown.
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,
    /// Delay per deleted character.
    #[serde(default = "default_delete_ms")]
    pub delete_ms: u64,
}

fn default_type_ms() -> u64 {
    100
}

fn default_hold_ms() -> u64 {
    2000
}

fn default_delete_ms() -> u64 {
    50
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            type_ms: default_type_ms(),
            hold_ms: default_hold_ms(),
            delete_ms: default_delete_ms(),
        }
    }
}

/// Where the current word is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Typing,
    Holding,
    Deleting,
}

/// Rotating word typer.
#[derive(Debug)]
pub struct Typewriter {
    words: Arc<[String]>,
    timing: TypewriterTiming,
    word_index: usize,
    char_index: usize,
    phase: Phase,
    cycles: u64,
    started: bool,
    slot: TickSlot,
}

impl Typewriter {
    pub fn new<I, S>(words: I, timing: TypewriterTiming) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            timing,
            word_index: 0,
            char_index: 0,
            phase: Phase::Typing,
            cycles: 0,
            started: false,
            slot: TickSlot::new(),
        }
    }

    /// Start typing the first word. An empty rotation never schedules.
    pub fn start(&mut self, now: u64) -> bool {
        if self.started || self.words.is_empty() {
            return false;
        }
        self.started = true;
        debug!(words = self.words.len(), "typewriter started");
        self.enter_word(now);
        true
    }

    /// Cancel the pending tick and rewind to the first word, not started.
    pub fn reset(&mut self) {
        self.slot.cancel();
        self.word_index = 0;
        self.char_index = 0;
        self.phase = Phase::Typing;
        self.cycles = 0;
        self.started = false;
    }

    /// Visible text: the first `char_index` characters of the current word.
    pub fn display(&self) -> &str {
        let word = self.current_word();
        word.char_indices()
            .nth(self.char_index)
            .map_or(word, |(end, _)| &word[..end])
    }

    pub fn current_word(&self) -> &str {
        self.words.get(self.word_index).map_or("", String::as_str)
    }

    pub fn word_index(&self) -> usize {
        self.word_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of words fully typed and deleted so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn timing(&self) -> TypewriterTiming {
        self.timing
    }

    fn word_len(&self) -> usize {
        self.current_word().chars().count()
    }

    fn enter_word(&mut self, at: u64) {
        self.char_index = 0;
        if self.word_len() == 0 {
            self.phase = Phase::Holding;
            self.slot.schedule(at.saturating_add(self.timing.hold_ms.max(1)));
        } else {
            self.phase = Phase::Typing;
            self.slot.schedule(at.saturating_add(self.timing.type_ms.max(1)));
        }
    }

    fn next_word(&mut self, at: u64) {
        self.word_index = (self.word_index + 1) % self.words.len();
        self.cycles += 1;
        trace!(word = self.word_index, "typewriter next word");
        self.enter_word(at);
    }

    fn step(&mut self, at: u64) {
        match self.phase {
            Phase::Typing => {
                self.char_index += 1;
                if self.char_index >= self.word_len() {
                    self.phase = Phase::Holding;
                    self.slot.schedule(at.saturating_add(self.timing.hold_ms.max(1)));
                } else {
                    self.slot.schedule(at.saturating_add(self.timing.type_ms.max(1)));
                }
            }
            Phase::Holding => {
                if self.char_index == 0 {
                    self.next_word(at);
                } else {
                    self.phase = Phase::Deleting;
                    self.slot.schedule(at.saturating_add(self.timing.delete_ms.max(1)));
                }
            }
            Phase::Deleting => {
                self.char_index = self.char_index.saturating_sub(1);
                if self.char_index == 0 {
                    self.next_word(at);
                } else {
                    self.slot.schedule(at.saturating_add(self.timing.delete_ms.max(1)));
                }
            }
        }
    }
}

impl Animation for Typewriter {
    fn next_tick(&self) -> Option<Tick> {
        self.slot.pending()
    }

    fn fire(&mut self, tick: Tick) -> bool {
        if !self.slot.claim(tick) {
            return false;
        }
        self.step(tick.due());
        true
    }

    fn dispose(&mut self) {
        self.slot.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> TypewriterTiming {
        TypewriterTiming {
            type_ms: 10,
            hold_ms: 200,
            delete_ms: 5,
        }
    }

    fn fire_n(tw: &mut Typewriter, n: usize) {
        for _ in 0..n {
            let tick = tw.next_tick().expect("typewriter never stops");
            assert!(tw.fire(tick));
        }
    }

    #[test]
    fn test_full_cycle_timing() {
        let mut tw = Typewriter::new(["engineer", "artist"], fast());
        tw.start(0);

        tw.advance(80);
        assert_eq!(tw.display(), "engineer");
        assert_eq!(tw.phase(), Phase::Holding);

        tw.advance(279);
        assert_eq!(tw.phase(), Phase::Holding);
        tw.advance(280);
        assert_eq!(tw.phase(), Phase::Deleting);
        assert_eq!(tw.display(), "engineer");

        tw.advance(319);
        assert_eq!(tw.display(), "e");
        tw.advance(320);
        assert_eq!(tw.phase(), Phase::Typing);
        assert_eq!(tw.current_word(), "artist");
        assert_eq!(tw.char_index(), 0);
        assert_eq!(tw.display(), "");
    }

    #[test]
    fn test_typing_and_deleting_take_k_ticks() {
        let mut tw = Typewriter::new(["abc"], fast());
        tw.start(0);

        fire_n(&mut tw, 2);
        assert_eq!(tw.display(), "ab");
        assert_eq!(tw.phase(), Phase::Typing);
        fire_n(&mut tw, 1);
        assert_eq!(tw.display(), "abc");
        assert_eq!(tw.phase(), Phase::Holding);

        // Hold expires.
        fire_n(&mut tw, 1);
        assert_eq!(tw.phase(), Phase::Deleting);

        fire_n(&mut tw, 3);
        assert_eq!(tw.display(), "");
        assert_eq!(tw.phase(), Phase::Typing);
        assert_eq!(tw.cycles(), 1);
    }

    #[test]
    fn test_two_word_rotation_wraps() {
        let mut tw = Typewriter::new(["ab", "xyz"], fast());
        tw.start(0);
        // "ab": 2 type + 1 hold + 2 delete; "xyz": 3 + 1 + 3.
        fire_n(&mut tw, 5);
        assert_eq!(tw.current_word(), "xyz");
        fire_n(&mut tw, 7);
        assert_eq!(tw.word_index(), 0);
        assert_eq!(tw.phase(), Phase::Typing);
        assert_eq!(tw.char_index(), 0);
        assert_eq!(tw.cycles(), 2);
    }

    #[test]
    fn test_multibyte_display() {
        let mut tw = Typewriter::new(["héllo"], fast());
        tw.start(0);
        fire_n(&mut tw, 2);
        assert_eq!(tw.display(), "hé");
    }

    #[test]
    fn test_empty_word_is_skipped_after_hold() {
        let mut tw = Typewriter::new(["", "ok"], fast());
        tw.start(0);
        assert_eq!(tw.phase(), Phase::Holding);
        assert_eq!(tw.next_tick().map(|t| t.due()), Some(200));
        fire_n(&mut tw, 1);
        assert_eq!(tw.current_word(), "ok");
        assert_eq!(tw.phase(), Phase::Typing);
    }

    #[test]
    fn test_empty_rotation_never_schedules() {
        let mut tw = Typewriter::new(Vec::<String>::new(), fast());
        assert!(!tw.start(0));
        assert!(tw.next_tick().is_none());
        assert_eq!(tw.display(), "");
    }

    #[test]
    fn test_dispose_stops_late_ticks() {
        let mut tw = Typewriter::new(["engineer"], fast());
        tw.start(0);
        tw.advance(30);
        let stale = tw.next_tick().expect("pending");
        tw.dispose();
        assert!(!tw.fire(stale));
        assert!(!tw.advance(10_000));
        assert_eq!(tw.display(), "eng");
    }

    #[test]
    fn test_huge_hold_does_not_overflow() {
        let mut tw = Typewriter::new(
            ["ab"],
            TypewriterTiming {
                type_ms: 10,
                hold_ms: u64::MAX,
                delete_ms: 5,
            },
        );
        tw.start(0);
        tw.advance(20);
        assert_eq!(tw.phase(), Phase::Holding);
        assert_eq!(tw.next_tick().map(|t| t.due()), Some(u64::MAX));
    }

    #[test]
    fn test_reset_rewinds() {
        let mut tw = Typewriter::new(["ab", "cd"], fast());
        tw.start(0);
        tw.advance(1_000);
        tw.reset();
        assert_eq!(tw.word_index(), 0);
        assert_eq!(tw.display(), "");
        assert!(tw.next_tick().is_none());
        assert!(tw.start(5));
        assert_eq!(tw.next_tick().map(|t| t.due()), Some(15));
    }
}
