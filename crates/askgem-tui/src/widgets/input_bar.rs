//! Full-width prompt input bar.
//!
//! Always visible at the bottom of the screen. While an exchange is in
//! flight the title switches to a waiting label and Enter does nothing.
//! Supports multi-line input with Ctrl+J for newlines.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::Theme;
use crate::widgets::TextInputState;

/// Placeholder shown when the buffer is empty.
pub const PLACEHOLDER: &str = "Type your question here...";

/// Full-width input bar for prompt entry.
pub struct InputBar<'a> {
    input: &'a TextInputState,
    theme: &'a Theme,
    busy: bool,
}

impl<'a> InputBar<'a> {
    /// Create a new input bar widget.
    pub fn new(input: &'a TextInputState, theme: &'a Theme) -> Self {
        Self {
            input,
            theme,
            busy: false,
        }
    }

    /// Mark sending as disabled while an exchange is in flight.
    #[must_use]
    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    /// Build display lines and the index of the line holding the cursor.
    fn build_input_lines(&self) -> (Vec<Line<'static>>, usize) {
        let content = self.input.content();

        if content.is_empty() {
            let line = Line::from(vec![
                Span::styled("> ", Style::default().fg(self.theme.primary)),
                Span::styled("█", Style::default().fg(self.theme.text)),
                Span::styled(PLACEHOLDER, Style::default().fg(self.theme.muted)),
            ]);
            return (vec![line], 0);
        }

        let mut lines = Vec::new();
        let mut cursor_line = 0;
        let mut chars_before = 0;

        for (line_idx, text) in content.split('\n').enumerate() {
            let prefix = if line_idx == 0 { "> " } else { "  " };
            let len = text.chars().count();
            let mut spans = vec![Span::styled(
                prefix,
                Style::default().fg(self.theme.primary),
            )];

            let cursor = self.input.cursor;
            if cursor >= chars_before && cursor <= chars_before + len {
                cursor_line = line_idx;
                let col = cursor - chars_before;
                let before: String = text.chars().take(col).collect();
                let after: String = text.chars().skip(col).collect();
                spans.push(Span::raw(before));
                spans.push(Span::raw("█"));
                spans.push(Span::raw(after));
            } else {
                spans.push(Span::raw(text.to_string()));
            }

            lines.push(Line::from(spans));
            // +1 for the newline character
            chars_before += len + 1;
        }

        (lines, cursor_line)
    }
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // While busy the buffer stays editable but sending is disabled
        let (title, border_style) = if self.busy {
            (" Asking... ", Style::default().fg(self.theme.border))
        } else {
            (" Ask Gemini ", Style::default().fg(self.theme.border_focused))
        };

        let block = Block::default()
            .title(title)
            .title_style(Style::default().fg(self.theme.text))
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner_height = area.height.saturating_sub(2) as usize;
        let (lines, cursor_line) = self.build_input_lines();

        // Keep the cursor line visible
        let scroll_offset = if lines.len() <= inner_height {
            0
        } else {
            cursor_line.saturating_sub(inner_height.saturating_sub(1))
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .style(Style::default().fg(self.theme.text))
            .scroll((u16::try_from(scroll_offset).unwrap_or(u16::MAX), 0));

        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    fn render(input: &TextInputState, busy: bool) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        InputBar::new(input, &theme).busy(busy).render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_empty_input_shows_placeholder() {
        let out = render(&TextInputState::new(), false);
        assert!(out.contains("Type your question"));
    }

    #[test]
    fn test_busy_keeps_buffer_visible() {
        let mut input = TextInputState::new();
        input.insert_str("draft");
        let out = render(&input, true);
        assert!(out.contains("Asking..."));
        assert!(out.contains("draft"));
        assert!(!out.contains("Ask Gemini"));
    }

    #[test]
    fn test_multiline_cursor_on_last_line() {
        let mut input = TextInputState::new();
        input.insert_str("one\ntwo");
        let theme = Theme::default();
        let bar = InputBar::new(&input, &theme);
        let (lines, cursor_line) = bar.build_input_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(cursor_line, 1);
    }
}
