//! Rendering of a single input field.

use ratatui::text::Span;

use super::theme::Theme;
use crate::input::{LineInput, TextInput};

/// Block cursor glyph drawn at the cursor position of the focused field.
pub const CURSOR: char = '█';

/// Spans for a field: prompt, then text with the cursor when focused.
///
/// An empty unfocused field shows its placeholder instead.
pub fn spans(field: &LineInput, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = vec![Span::styled(field.prompt().to_string(), theme.prompt)];

    if !field.is_focused() {
        if field.value().is_empty() {
            spans.push(Span::styled(
                field.placeholder().to_string(),
                theme.placeholder,
            ));
        } else {
            spans.push(Span::styled(field.value().to_string(), theme.normal));
        }
        return spans;
    }

    let (before, after) = split_at_char(field.value(), field.cursor());
    if !before.is_empty() {
        spans.push(Span::styled(before.to_string(), theme.normal));
    }
    spans.push(Span::styled(CURSOR.to_string(), theme.cursor));
    if !after.is_empty() {
        spans.push(Span::styled(after.to_string(), theme.normal));
    }
    spans
}

fn split_at_char(s: &str, char_index: usize) -> (&str, &str) {
    let at = s
        .char_indices()
        .nth(char_index)
        .map_or(s.len(), |(i, _)| i);
    s.split_at(at)
}
