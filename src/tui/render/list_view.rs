use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::ItemStatus;
use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::{checkbox_symbol, spans_width};

/// Render the checklist rows.
///
/// Rows are rebuilt from the collection on every call; nothing from the
/// previous frame is reused.
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = app.rows();

    if rows.is_empty() {
        let empty = Paragraph::new(" Nothing here yet. Press a to add an item.")
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(empty, area);
        return;
    }

    app.clamp_cursor();
    let visible_height = area.height as usize;
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if visible_height > 0 && app.cursor >= app.scroll_offset + visible_height {
        app.scroll_offset = app.cursor + 1 - visible_height;
    }

    let width = area.width as usize;
    let mut lines: Vec<Line> = Vec::new();

    for (i, row) in rows
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible_height)
    {
        let is_cursor = i == app.cursor;
        let bg = if is_cursor {
            app.theme.selection_bg
        } else {
            app.theme.background
        };

        let mut spans: Vec<Span> = Vec::new();
        let marker = if is_cursor { "\u{25B8}" } else { " " };
        spans.push(Span::styled(
            marker,
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
        spans.push(Span::styled(
            checkbox_symbol(row.checked),
            Style::default()
                .fg(app.theme.status_color(ItemStatus::from_done(row.checked)))
                .bg(bg),
        ));
        spans.push(Span::styled(" ", Style::default().bg(bg)));

        let mut label_style = if row.struck {
            Style::default()
                .fg(app.theme.dim)
                .bg(bg)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(app.theme.text_bright).bg(bg)
        };
        if is_cursor {
            label_style = label_style.add_modifier(Modifier::BOLD);
        }
        let label_budget = width.saturating_sub(spans_width(&spans));
        spans.push(Span::styled(
            unicode::truncate_to_width(&row.label, label_budget),
            label_style,
        ));

        if is_cursor {
            let content_width = spans_width(&spans);
            if content_width < width {
                spans.push(Span::styled(
                    " ".repeat(width - content_width),
                    Style::default().bg(bg),
                ));
            }
        }

        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn empty_list_shows_hint() {
        let (_tmp, mut app) = app_with_titles(&[]);
        let output = render_to_string(TERM_W, 5, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        assert_eq!(output, " Nothing here yet. Press a to add an item.");
    }

    #[test]
    fn rows_in_collection_order_with_checkboxes() {
        let (_tmp, mut app) = app_with_titles(&["Buy milk", "Walk dog"]);
        app.gateway.toggle_requested("id1", true).unwrap();

        let output = render_to_string(TERM_W, 5, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].trim_end(), "\u{25B8}[ ] Buy milk");
        assert_eq!(lines[1], " [x] Walk dog");
    }

    #[test]
    fn done_label_is_crossed_out() {
        let (_tmp, mut app) = app_with_titles(&["Buy milk", "Walk dog"]);
        app.gateway.toggle_requested("id1", true).unwrap();

        let buf = render_to_buffer(TERM_W, 5, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        // label starts at column 5: marker, "[x]", space
        let open_cell = &buf[(5, 0)];
        let done_cell = &buf[(5, 1)];
        assert_eq!(open_cell.symbol(), "B");
        assert_eq!(done_cell.symbol(), "W");
        assert!(!open_cell.modifier.contains(Modifier::CROSSED_OUT));
        assert!(done_cell.modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn rendering_twice_gives_same_output() {
        let (_tmp, mut app) = app_with_titles(&["A", "B", "C"]);
        let first = render_to_string(TERM_W, 5, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        let second = render_to_string(TERM_W, 5, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        assert_eq!(first, second);
    }

    #[test]
    fn removal_rerenders_without_stale_rows() {
        let (_tmp, mut app) = app_with_titles(&["A", "B"]);
        app.gateway.remove_requested("id0").unwrap();
        let output = render_to_string(TERM_W, 5, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        assert_eq!(output.trim_end(), "\u{25B8}[ ] B");
    }

    #[test]
    fn scrolls_to_keep_cursor_visible() {
        let titles: Vec<String> = (0..10).map(|i| format!("Item {}", i)).collect();
        let refs: Vec<&str> = titles.iter().map(|s| s.as_str()).collect();
        let (_tmp, mut app) = app_with_titles(&refs);
        app.cursor = 7;

        let output = render_to_string(TERM_W, 3, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        assert_eq!(app.scroll_offset, 5);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], " [ ] Item 5");
        assert_eq!(lines[2].trim_end(), "\u{25B8}[ ] Item 7");
    }

    #[test]
    fn long_labels_are_truncated() {
        let (_tmp, mut app) = app_with_titles(&["An extremely long checklist entry"]);
        let output = render_to_string(20, 2, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        assert_eq!(output, "\u{25B8}[ ] An extremely l\u{2026}");
    }
}
