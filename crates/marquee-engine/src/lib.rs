//! marquee-engine: Headless core for terminal text animations
//!
//! This crate provides the display logic behind marquee, including:
//! - Cancellable single-slot tick scheduling and clocks
//! - Line-by-line and character-by-character text reveal
//! - The rotating typewriter and cursor blink
//! - Typo-tolerant blog search
//! - ROI arithmetic and the hidden-message toggle
//! - Configuration loading

pub mod blink;
pub mod clock;
pub mod config;
pub mod decode;
pub mod driver;
pub mod filter;
pub mod line;
pub mod roi;
pub mod sequencer;
pub mod timer;
pub mod typewriter;

// Re-export commonly used types
pub use blink::Blink;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{BootLog, BootLogs, Config, ConfigError, Page, TimingConfig, CONFIG_DIR, CONFIG_FILE};
pub use decode::{decode_payload, encode_payload, DecodeToggle, DECODE_FAILED};
pub use driver::AnimationTask;
pub use filter::{substring_distance, Hit, Post, Rank, SearchIndex, DEFAULT_THRESHOLD};
pub use line::{Line, LineKind, Script};
pub use roi::{RoiField, RoiInputs, RoiReport};
pub use sequencer::{Mode, Pace, Sequencer};
pub use timer::{Animation, Tick, TickSlot};
pub use typewriter::{Phase, Typewriter, TypewriterTiming};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_version() {
        let version = engine_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
