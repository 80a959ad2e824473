use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

use super::helpers::spans_width;

/// Render the title row and the separator line below it
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // separator
        ])
        .split(area);

    let bg_style = Style::default().bg(app.theme.background);
    let width = area.width as usize;

    let mut spans = vec![
        Span::styled(" ", bg_style),
        Span::styled(
            "\u{2713}",
            Style::default().fg(app.theme.highlight).bg(app.theme.background),
        ),
        Span::styled(
            " checklist",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.background)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let (open, done) = app.gateway.collection().counts();
    let counts = format!("{} open \u{00B7} {} done ", open, done);
    let used = spans_width(&spans);
    let counts_width = counts.chars().count();
    if used + counts_width < width {
        spans.push(Span::styled(" ".repeat(width - used - counts_width), bg_style));
        spans.push(Span::styled(
            counts,
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), chunks[0]);

    let separator = Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    );
    frame.render_widget(Paragraph::new(Line::from(separator)), chunks[1]);
}
