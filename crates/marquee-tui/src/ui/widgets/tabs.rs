//! Tab bar and tag chip widgets.

use crate::ui::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

/// A horizontal tab bar widget with number hints.
#[derive(Debug, Clone)]
pub struct Tabs<'a> {
    titles: Vec<&'a str>,
    selected: usize,
}

impl<'a> Tabs<'a> {
    /// Create a new tabs widget.
    pub fn new(titles: Vec<&'a str>) -> Self {
        Self {
            titles,
            selected: 0,
        }
    }

    /// Set the selected tab index.
    #[must_use]
    pub fn select(mut self, index: usize) -> Self {
        self.selected = index;
        self
    }
}

impl Widget for Tabs<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let mut spans = Vec::new();
        for (i, title) in self.titles.iter().enumerate() {
            let is_selected = i == self.selected;

            if i > 0 {
                spans.push(Span::styled(" | ", Styles::dim()));
            }

            spans.push(Span::styled(
                format!("[{}] ", i + 1),
                if is_selected {
                    Styles::highlight()
                } else {
                    Styles::dim()
                },
            ));

            if is_selected {
                spans.push(Span::styled(*title, Styles::highlight()));
            } else {
                spans.push(Span::styled(*title, Styles::default()));
            }
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

/// A row of tag chips; the selected one is bracketed.
pub fn chip_row<'a>(titles: &[&'a str], selected: Option<&str>) -> Line<'a> {
    let mut spans = Vec::new();
    for (i, title) in titles.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        if selected == Some(*title) {
            spans.push(Span::styled(format!("[{title}]"), Styles::highlight()));
        } else {
            spans.push(Span::styled(format!(" {title} "), Styles::dim()));
        }
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn test_tabs_number_every_title() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        Tabs::new(vec!["Home", "Blog"]).select(1).render(area, &mut buf);
        assert_eq!(buffer_to_string(&buf), "[1] Home | [2] Blog");
    }

    #[test]
    fn test_chip_row_brackets_selection() {
        let line = chip_row(&["AI", "IoT"], Some("IoT"));
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, " AI  [IoT]");
    }
}
