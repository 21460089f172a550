//! About screen - profile boot log and the hidden message.

use crate::app::App;
use crate::screens::{log_hints, render_boot_log, render_chrome, Screen};
use crate::ui::theme::Styles;
use crate::ui::widgets::KeyHint;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// The about screen.
pub struct AboutScreen;

impl Screen for AboutScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let mut hints = log_hints();
        hints.insert(2, KeyHint::new("^D", app.decode.action_label()));
        let body = render_chrome(app, hints, area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(5)])
            .split(body);

        render_boot_log(app, chunks[0], buf);
        render_hidden_message(app, chunks[1], buf);
    }
}

fn render_hidden_message(app: &App, area: Rect, buf: &mut Buffer) {
    let (title, style) = if app.decode.is_decoded() {
        (" message.txt [decoded] ", Styles::success())
    } else {
        (" message.txt [base64] ", Styles::dim())
    };
    let block = Block::default()
        .title(title)
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border())
        .style(Styles::default());

    Paragraph::new(app.decode.text().into_owned())
        .style(style)
        .wrap(Wrap { trim: true })
        .block(block)
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Screen as ScreenKind;
    use crate::event::Action;
    use crate::test_utils::{create_test_app_at_screen, render_screen_to_string};

    #[test]
    fn test_about_reveals_profile_lines() {
        let mut app = create_test_app_at_screen(ScreenKind::About);
        app.tick(200);
        let out = render_screen_to_string(&AboutScreen, &app);
        assert!(out.contains("> Initializing user profile..."));
        assert!(out.contains("> Loading personal data..."));
        assert!(!out.contains("Scanning"));
        assert!(out.contains("bio.log [running]"));
    }

    #[test]
    fn test_about_decode_toggle_renders() {
        let mut app = create_test_app_at_screen(ScreenKind::About);
        let out = render_screen_to_string(&AboutScreen, &app);
        assert!(out.contains("[base64]"));
        assert!(out.contains("DECODE"));

        app.handle_action(Action::Decode);
        let out = render_screen_to_string(&AboutScreen, &app);
        assert!(out.contains("[decoded]"));
        assert!(out.contains("Easter egg"));
        assert!(out.contains("ENCODE"));
    }
}
