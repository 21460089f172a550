//! Home screen - the hero banner with the rotating role.

use crate::app::App;
use crate::screens::{render_chrome, Screen};
use crate::ui::centered_rect;
use crate::ui::theme::Styles;
use crate::ui::widgets::KeyHint;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// The home screen.
pub struct HomeScreen;

impl Screen for HomeScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let hints = vec![
            KeyHint::new("2", "About"),
            KeyHint::new("3", "Blog"),
            KeyHint::new("r", "Replay"),
            KeyHint::new("?", "Help"),
            KeyHint::new("q", "Quit"),
        ];
        let body = render_chrome(app, hints, area, buf);
        render_hero(app, body, buf);
    }
}

fn render_hero(app: &App, area: Rect, buf: &mut Buffer) {
    let content_area = centered_rect(80, 60, area);

    let block = Block::default()
        .title(" marquee ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border())
        .style(Styles::default());

    let inner = block.inner(content_area);
    block.render(content_area, buf);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("  > whoami", Styles::secondary())),
        Line::from(""),
    ];

    if let Some(hero) = app.display.hero() {
        let cursor = if hero.cursor.is_visible() { "█" } else { " " };
        lines.push(Line::from(vec![
            Span::styled("  I'm a ", Styles::default()),
            Span::styled(hero.typewriter.display().to_string(), Styles::highlight()),
            Span::styled(cursor, Styles::active()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press 2 to learn more, 3 to read the blog.",
        Styles::dim(),
    )));

    Paragraph::new(lines).render(inner, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app, render_screen_to_string};

    #[test]
    fn test_hero_shows_typed_prefix() {
        let mut app = create_test_app();
        app.tick(1_000);
        let out = render_screen_to_string(&HomeScreen, &app);
        assert!(out.contains("I'm a software e"));
        assert!(!out.contains("software en"));
    }

    #[test]
    fn test_hero_before_first_tick() {
        let app = create_test_app();
        let out = render_screen_to_string(&HomeScreen, &app);
        assert!(out.contains("> whoami"));
        assert!(out.contains("[1] Home"));
        assert!(out.contains(" Home "));
    }
}
