//! Contact screen - secure channel boot log.

use crate::app::App;
use crate::screens::{log_hints, render_boot_log, render_chrome, Screen};
use ratatui::{buffer::Buffer, layout::Rect};

/// The contact screen.
pub struct ContactScreen;

impl Screen for ContactScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let body = render_chrome(app, log_hints(), area, buf);
        render_boot_log(app, body, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Screen as ScreenKind;
    use crate::event::Action;
    use crate::test_utils::{create_test_app_at_screen, render_screen_to_string};

    #[test]
    fn test_contact_log_completes() {
        let mut app = create_test_app_at_screen(ScreenKind::Contact);
        app.tick(10_000);
        let out = render_screen_to_string(&ContactScreen, &app);
        assert!(out.contains("contact.log [complete]"));
        assert!(out.contains("  [1] Direct message (recommended)"));
        assert!(out.contains("> Status: Online and monitoring ✓"));
    }

    #[test]
    fn test_contact_paused_title() {
        let mut app = create_test_app_at_screen(ScreenKind::Contact);
        app.tick(200);
        app.handle_action(Action::Pause);
        let out = render_screen_to_string(&ContactScreen, &app);
        assert!(out.contains("contact.log [paused]"));
        assert!(out.contains("Paused"));
    }
}
