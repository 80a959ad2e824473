use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

use super::helpers::spans_width;

const NAVIGATE_HINTS: &str = "a add  space toggle  d delete  ? help  q quit";
const INPUT_HINTS: &str = "Enter add  Esc cancel";

/// Render the bottom row: input line, one-shot message, or key hints
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Input => {
            let (before, after) = app.input_buffer.split_at(app.input_cursor);
            let spans = vec![
                Span::styled("> ", Style::default().fg(app.theme.highlight).bg(bg)),
                Span::styled(
                    before.to_string(),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)), // ▌ cursor
                Span::styled(
                    after.to_string(),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
            ];
            with_right_hint(spans, INPUT_HINTS, app, width)
        }
        Mode::Navigate => {
            if let Some(ref message) = app.status_message {
                Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(app.theme.red).bg(bg),
                ))
            } else if app.show_key_hints {
                with_right_hint(Vec::new(), NAVIGATE_HINTS, app, width)
            } else {
                Line::from(Span::styled(" ".repeat(width), Style::default().bg(bg)))
            }
        }
    };

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

/// Right-align `hint` after `spans` when it fits
fn with_right_hint<'a>(mut spans: Vec<Span<'a>>, hint: &'a str, app: &App, width: usize) -> Line<'a> {
    let bg = app.theme.background;
    let content_width = spans_width(&spans);
    let hint_width = hint.chars().count();
    if content_width + hint_width < width {
        spans.push(Span::styled(
            " ".repeat(width - content_width - hint_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }
    Line::from(spans)
}
