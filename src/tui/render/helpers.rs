use ratatui::text::Span;

use crate::util::unicode;

/// Checkbox glyph for a row's toggle control
pub(super) fn checkbox_symbol(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}
