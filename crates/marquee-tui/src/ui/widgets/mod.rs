//! Reusable widgets for the marquee TUI.

mod log_viewer;
pub mod status_bar;
mod tabs;
pub mod text_input;

pub use log_viewer::LogViewer;
pub use status_bar::{KeyHint, StatusBar};
pub use tabs::{chip_row, Tabs};
pub use text_input::TextInputState;
