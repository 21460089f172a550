//! Blog screen - boot log, fuzzy search and tag filter.

use crate::app::App;
use crate::screens::{render_boot_log, render_chrome, Screen};
use crate::ui::theme::Styles;
use crate::ui::widgets::{chip_row, KeyHint};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// The blog screen.
pub struct BlogScreen;

impl Screen for BlogScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let hints = if app.blog.focused {
            vec![KeyHint::new("Enter", "Done"), KeyHint::new("Esc", "Clear")]
        } else {
            vec![
                KeyHint::new("/", "Search"),
                KeyHint::new("Tab", "Tag"),
                KeyHint::new("Esc", "Clear"),
                KeyHint::new("?", "Help"),
            ]
        };
        let body = render_chrome(app, hints, area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(3),
            ])
            .split(body);

        render_boot_log(app, chunks[0], buf);
        render_search(app, chunks[1], buf);

        let tags = app.index.all_tags();
        let row = chip_row(&tags, app.blog.tag.as_deref());
        buf.set_line(chunks[2].x, chunks[2].y, &row, chunks[2].width);

        render_results(app, chunks[3], buf);
    }
}

fn render_search(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(" search ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(if app.blog.focused {
            Styles::border_active()
        } else {
            Styles::border()
        })
        .style(Styles::default());

    app.blog
        .query
        .widget()
        .block(block)
        .focused(app.blog.focused)
        .placeholder("press / to search titles, excerpts and tags")
        .render(area, buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let results = app.results();
    let title = format!(" posts {}/{} ", results.len(), app.index.posts().len());
    let block = Block::default()
        .title(title)
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border())
        .style(Styles::default());

    if results.is_empty() {
        Paragraph::new(Line::from(Span::styled("  No posts match.", Styles::dim())))
            .block(block)
            .render(area, buf);
        return;
    }

    let selected = app.blog.selected.min(results.len() - 1);
    let mut lines = Vec::new();
    for (i, post) in results.iter().enumerate() {
        let is_selected = i == selected;
        let marker = if is_selected { "> " } else { "  " };
        let title_style = if is_selected {
            Styles::highlight()
        } else {
            Styles::default()
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Styles::active()),
            Span::styled(post.date.format("%Y-%m-%d").to_string(), Styles::dim()),
            Span::raw("  "),
            Span::styled(post.title.clone(), title_style),
        ]));
        if is_selected {
            lines.push(Line::from(Span::styled(
                format!("              {} · {}", post.reading_time, post.excerpt),
                Styles::dim(),
            )));
        }
    }

    // Keep the selected row in view
    let viewport = usize::from(area.height.saturating_sub(2));
    let offset = u16::try_from((selected + 2).saturating_sub(viewport)).unwrap_or(u16::MAX);
    Paragraph::new(lines)
        .block(block)
        .scroll((offset, 0))
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Screen as ScreenKind;
    use crate::test_utils::{create_test_app_at_screen, render_screen_to_string};

    #[test]
    fn test_blog_lists_posts_newest_first() {
        let mut app = create_test_app_at_screen(ScreenKind::Blog);
        app.tick(2_000);
        let out = render_screen_to_string(&BlogScreen, &app);
        assert!(out.contains("> Found 5 posts"));
        assert!(out.contains("posts 5/5"));
        let neural = out.find("Neural Networks in Cybersecurity").unwrap();
        let ctf = out.find("Art of Building CTF").unwrap();
        assert!(neural < ctf);
    }

    #[test]
    fn test_blog_shows_no_match() {
        let mut app = create_test_app_at_screen(ScreenKind::Blog);
        for c in "zebra xylophone".chars() {
            app.blog.query.insert(c);
        }
        let out = render_screen_to_string(&BlogScreen, &app);
        assert!(out.contains("No posts match."));
        assert!(out.contains("posts 0/5"));
    }

    #[test]
    fn test_blog_tag_chip_selected() {
        let mut app = create_test_app_at_screen(ScreenKind::Blog);
        app.blog.tag = Some("IoT".into());
        let out = render_screen_to_string(&BlogScreen, &app);
        assert!(out.contains("posts 1/5"));
        assert!(out.contains("IoT Security"));
    }
}
