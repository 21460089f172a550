//! Boot-log viewer that follows the newest line.

use crate::ui::theme::Styles;
use marquee_engine::{Line as LogLine, LineKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

/// Glyph drawn for a visible cursor.
const CURSOR: &str = "█";

/// A boot-log viewer widget.
///
/// Lines are wrapped to the viewport width and styled by their
/// [`LineKind`]. When the content is taller than the viewport the view
/// is pinned to the bottom.
#[derive(Debug, Clone)]
pub struct LogViewer<'a> {
    lines: &'a [LogLine],
    partial: Option<(&'a str, LineKind)>,
    cursor: Option<bool>,
    block: Option<Block<'a>>,
}

impl<'a> LogViewer<'a> {
    /// Create a viewer over revealed lines.
    pub fn new(lines: &'a [LogLine]) -> Self {
        Self {
            lines,
            partial: None,
            cursor: None,
            block: None,
        }
    }

    /// Show a line that is still being typed.
    #[must_use]
    pub fn partial(mut self, text: &'a str, kind: LineKind) -> Self {
        if !text.is_empty() {
            self.partial = Some((text, kind));
        }
        self
    }

    /// Draw a trailing cursor, lit or not.
    #[must_use]
    pub fn cursor(mut self, visible: bool) -> Self {
        self.cursor = Some(visible);
        self
    }

    /// Set the block to wrap the viewer.
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Build the wrapped display lines for a given width.
    fn display_lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut out = Vec::new();
        for line in self.lines {
            push_wrapped(&mut out, line.text(), Styles::line(line.kind()), width);
        }
        if let Some((text, kind)) = self.partial {
            push_wrapped(&mut out, text, Styles::line(kind), width);
        }
        if let Some(visible) = self.cursor {
            let glyph = if visible { CURSOR } else { " " };
            match (self.partial.is_some(), out.last_mut()) {
                (true, Some(last)) => last.push_span(Span::styled(glyph, Styles::active())),
                _ => out.push(Line::from(vec![
                    Span::styled("> ", Styles::secondary()),
                    Span::styled(glyph, Styles::active()),
                ])),
            }
        }
        out
    }
}

fn push_wrapped(out: &mut Vec<Line<'static>>, text: &str, style: ratatui::style::Style, width: usize) {
    if text.trim().is_empty() {
        out.push(Line::from(""));
        return;
    }
    for piece in textwrap::wrap(text, width.max(1)) {
        out.push(Line::from(Span::styled(piece.into_owned(), style)));
    }
}

impl Widget for LogViewer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = match &self.block {
            Some(b) => {
                let inner = b.inner(area);
                b.clone().render(area, buf);
                inner
            }
            None => area,
        };

        if area.height < 1 || area.width < 2 {
            return;
        }

        // Leave the right column for the scrollbar
        let lines = self.display_lines(usize::from(area.width - 1));
        let viewport = usize::from(area.height);
        let total = lines.len();
        let offset = total.saturating_sub(viewport);

        #[allow(clippy::cast_possible_truncation)]
        let paragraph = Paragraph::new(Text::from(lines))
            .style(Styles::default())
            .scroll((offset as u16, 0));
        paragraph.render(area, buf);

        if total > viewport {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
            let mut scrollbar_state = ScrollbarState::new(total).position(offset);
            let scrollbar_area = Rect {
                x: area.x + area.width.saturating_sub(1),
                y: area.y,
                width: 1,
                height: area.height,
            };
            scrollbar.render(scrollbar_area, buf, &mut scrollbar_state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use marquee_engine::Script;

    fn render(viewer: LogViewer<'_>, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        viewer.render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_renders_revealed_lines_only() {
        let script = Script::new(["> Init", "STATUS: Online", "> Done"]);
        let out = render(LogViewer::new(&script[..2]), 30, 5);
        assert!(out.contains("> Init"));
        assert!(out.contains("STATUS: Online"));
        assert!(!out.contains("Done"));
    }

    #[test]
    fn test_partial_line_gets_cursor() {
        let script = Script::new(["> Init"]);
        let out = render(
            LogViewer::new(&script).partial("> Load", LineKind::Prompt).cursor(true),
            30,
            4,
        );
        assert!(out.contains("> Load█"));
    }

    #[test]
    fn test_cursor_on_own_line_without_partial() {
        let script = Script::new(["> Init"]);
        let out = render(LogViewer::new(&script).cursor(true), 30, 4);
        assert!(out.lines().any(|l| l.trim_end() == "> █"));
    }

    #[test]
    fn test_long_lines_wrap() {
        let script = Script::new(["> one two three four five six"]);
        let viewer = LogViewer::new(&script);
        assert!(viewer.display_lines(10).len() > 1);
    }

    #[test]
    fn test_follows_newest_line() {
        let script: Script = (0..20).map(|i| format!("line {i}")).collect();
        let out = render(LogViewer::new(&script), 30, 5);
        assert!(out.contains("line 19"));
        assert!(!out.contains("line 0\n"));
    }
}
