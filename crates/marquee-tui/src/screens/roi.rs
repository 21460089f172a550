//! ROI screen - reminder plan savings estimate.

use crate::app::App;
use crate::screens::{render_chrome, Screen};
use crate::ui::theme::Styles;
use crate::ui::widgets::KeyHint;
use marquee_engine::{RoiField, RoiInputs};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// The ROI calculator screen.
pub struct RoiScreen;

impl Screen for RoiScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let hints = vec![
            KeyHint::new("↑↓", "Field"),
            KeyHint::new("←→", "Adjust"),
            KeyHint::new("?", "Help"),
            KeyHint::new("q", "Quit"),
        ];
        let body = render_chrome(app, hints, area, buf);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(body);

        render_inputs(app, chunks[0], buf);
        render_report(&app.roi, chunks[1], buf);
    }
}

fn format_value(inputs: &RoiInputs, field: RoiField) -> String {
    match field {
        RoiField::ConsultationFee => format!("{:.0}", inputs.consultation_fee),
        RoiField::NoShowRate => format!("{}%", inputs.no_show_rate_pct),
        _ => format!("{}", inputs.get(field)),
    }
}

fn render_inputs(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(" inputs ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .style(Styles::default());

    let mut lines = vec![Line::from("")];
    for field in RoiField::ALL {
        let is_selected = field == app.roi_field();
        let (marker, style) = if is_selected {
            ("> ", Styles::highlight())
        } else {
            ("  ", Styles::default())
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Styles::active()),
            Span::styled(format!("{:<22}", field.label()), style),
            Span::styled(format_value(&app.roi, field), style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  Plan cost: {:.0} / month", app.roi.plan_cost),
        Styles::dim(),
    )));

    Paragraph::new(lines).block(block).render(area, buf);
}

fn render_report(inputs: &RoiInputs, area: Rect, buf: &mut Buffer) {
    let report = inputs.compute();
    let block = Block::default()
        .title(" monthly estimate ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border())
        .style(Styles::default());

    let row = |label: &'static str, value: String, style| {
        Line::from(vec![
            Span::styled(format!("  {label:<18}"), Styles::dim()),
            Span::styled(value, style),
        ])
    };

    let payback = report
        .payback_days
        .map_or_else(|| "never".to_string(), |d| format!("{d:.1} days"));
    let net_style = if report.net_savings >= 0.0 {
        Styles::success()
    } else {
        Styles::error()
    };

    let lines = vec![
        Line::from(""),
        row("No-shows", format!("{:.1}", report.monthly_no_shows), Styles::default()),
        row("Revenue lost", format!("{:.0}", report.monthly_loss), Styles::warning()),
        row("Recovered", format!("{:.0}", report.monthly_savings), Styles::default()),
        row("Net savings", format!("{:.0}", report.net_savings), net_style),
        row("ROI", format!("{:.0}%", report.roi_pct), Styles::highlight()),
        row("Payback", payback, Styles::default()),
    ];

    Paragraph::new(lines).block(block).render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Screen as ScreenKind;
    use crate::event::Action;
    use crate::test_utils::{create_test_app_at_screen, render_screen_to_string};

    #[test]
    fn test_roi_default_report() {
        let app = create_test_app_at_screen(ScreenKind::Roi);
        let out = render_screen_to_string(&RoiScreen, &app);
        assert!(out.contains("> Patients per day"));
        assert!(out.contains("6150%"));
        assert!(out.contains("0.5 days"));
    }

    #[test]
    fn test_roi_free_consultations_never_pay_back() {
        let mut app = create_test_app_at_screen(ScreenKind::Roi);
        app.handle_action(Action::Down);
        app.handle_action(Action::Down);
        for _ in 0..20 {
            app.handle_action(Action::Left);
        }
        assert!(app.roi.consultation_fee.abs() < f64::EPSILON);
        let out = render_screen_to_string(&RoiScreen, &app);
        assert!(out.contains("> Consultation fee"));
        assert!(out.contains("never"));
        assert!(out.contains("0%"));
    }
}
