//! Screen definitions for the marquee TUI.

pub mod about;
pub mod blog;
pub mod contact;
pub mod home;
pub mod roi;

use crate::app::{App, Screen as ScreenKind};
use crate::ui::theme::{progress_bar, Styles};
use crate::ui::widgets::{KeyHint, LogViewer, StatusBar, Tabs};
use crate::ui::{centered_fixed, main_layout};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Trait for screens that can be rendered.
pub trait Screen {
    /// Render the screen to the buffer.
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Render the screen `app` is on, plus the help overlay if open.
pub fn render_app(app: &App, area: Rect, buf: &mut Buffer) {
    match app.screen {
        ScreenKind::Home => home::HomeScreen.render(app, area, buf),
        ScreenKind::About => about::AboutScreen.render(app, area, buf),
        ScreenKind::Blog => blog::BlogScreen.render(app, area, buf),
        ScreenKind::Contact => contact::ContactScreen.render(app, area, buf),
        ScreenKind::Roi => roi::RoiScreen.render(app, area, buf),
    }

    if app.show_help {
        render_help_overlay(area, buf);
    }
}

/// Draw the tab bar and status bar; returns the body area between them.
fn render_chrome(app: &App, hints: Vec<KeyHint>, area: Rect, buf: &mut Buffer) -> Rect {
    buf.set_style(area, Styles::default());
    let (tab_area, body, status_area) = main_layout(area);

    let titles = ScreenKind::ALL.iter().map(|s| s.title()).collect();
    Tabs::new(titles)
        .select(app.screen.index())
        .render(tab_area, buf);

    let mut status_bar = StatusBar::new(app.screen.title()).hints(hints);
    if let Some(notification) = &app.notification {
        status_bar = status_bar.right(notification);
    }
    status_bar.render(status_area, buf);

    body
}

/// Render the mounted boot log, if any, into `area`.
fn render_boot_log(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(log) = app.display.log() else {
        return;
    };
    let seq = &log.sequencer;
    let title = format!(" {} [{}] ", log.page.log_name(), seq.mode());
    let block = Block::default()
        .title(title)
        .title_style(Styles::title())
        .title_bottom(Line::styled(progress_bar(seq.progress(), 20), Styles::dim()))
        .borders(Borders::ALL)
        .border_style(Styles::border())
        .style(Styles::default());

    let mut viewer = LogViewer::new(seq.emitted()).block(block);
    if let Some(line) = seq.current_line() {
        viewer = viewer.partial(seq.partial(), line.kind());
    }
    viewer.cursor(log.cursor.is_visible()).render(area, buf);
}

/// Key hints shared by the boot-log screens.
fn log_hints() -> Vec<KeyHint> {
    vec![
        KeyHint::new("r", "Replay"),
        KeyHint::new("p", "Pause"),
        KeyHint::new("?", "Help"),
        KeyHint::new("q", "Quit"),
    ]
}

/// Render the help overlay.
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    let help_text = r"  Screens
    1-5               Home/About/Blog/Contact/ROI
    Esc               Back (clears blog search first)
  Animations
    r                 Replay from the start
    p                 Pause/resume boot log
    Ctrl+D            Decode hidden message (About)
  Blog
    /                 Search (Enter to finish)
    Tab / Shift+Tab   Cycle tag filter
    j/k or Up/Down    Move selection
  ROI
    Up/Down           Choose field
    Left/Right        Adjust value

    q                 Quit
    ?                 Toggle this help
";

    let width = 58.min(area.width.saturating_sub(4));
    let height = 19.min(area.height.saturating_sub(2));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .style(Styles::default());

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(Styles::default());

    paragraph.render(overlay_area, buf);
}
