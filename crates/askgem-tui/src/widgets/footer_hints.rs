//! Footer status bar widget.
//!
//! Format: `Ready · 4 messages            [Enter] send │ [Esc] quit`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::text::display_width;
use crate::theme::Theme;

/// A single keybinding hint.
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// The key or key combination (e.g., "Enter", "Ctrl+J").
    pub key: String,
    /// The action description (e.g., "send", "newline").
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint.
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Hints shown while the prompt can be edited.
pub fn idle_hints() -> Vec<KeyHint> {
    vec![
        KeyHint::new("Enter", "send"),
        KeyHint::new("Ctrl+J", "newline"),
        KeyHint::new("↑↓", "scroll"),
        KeyHint::new("Esc", "quit"),
    ]
}

/// Hints shown while an exchange is in flight.
pub fn busy_hints() -> Vec<KeyHint> {
    vec![KeyHint::new("↑↓", "scroll"), KeyHint::new("Esc", "quit")]
}

/// Footer status bar widget.
pub struct FooterHints<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
    busy: bool,
    message_count: usize,
}

impl<'a> FooterHints<'a> {
    /// Create a new footer hints widget.
    pub fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self {
            hints,
            theme,
            busy: false,
            message_count: 0,
        }
    }

    /// Set whether an exchange is in flight.
    #[must_use]
    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    /// Set the conversation length to display.
    #[must_use]
    pub fn message_count(mut self, count: usize) -> Self {
        self.message_count = count;
        self
    }

    fn status_text(&self) -> String {
        let state = if self.busy { "Waiting" } else { "Ready" };
        let noun = if self.message_count == 1 {
            "message"
        } else {
            "messages"
        };
        format!(" {state} · {} {noun}", self.message_count)
    }

    fn hints_spans(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", Style::default().fg(self.theme.border)));
            }
            spans.push(Span::styled(
                format!("[{}]", hint.key),
                Style::default().fg(self.theme.primary),
            ));
            spans.push(Span::styled(
                format!(" {}", hint.action),
                Style::default().fg(self.theme.muted),
            ));
        }
        spans.push(Span::raw(" "));
        spans
    }
}

impl Widget for FooterHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let status = self.status_text();
        let hints = self.hints_spans();
        let hints_width: usize = hints.iter().map(|s| display_width(&s.content)).sum();
        let status_width = display_width(&status);

        let mut spans = vec![Span::styled(
            status,
            Style::default().fg(self.theme.subtext),
        )];

        // Right-align hints when they fit
        let width = area.width as usize;
        if status_width + hints_width < width {
            spans.push(Span::raw(" ".repeat(width - status_width - hints_width)));
            spans.extend(hints);
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    fn render(footer: FooterHints<'_>, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        footer.render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_footer_shows_status_and_hints() {
        let theme = Theme::default();
        let hints = idle_hints();
        let out = render(FooterHints::new(&hints, &theme).message_count(2), 80);
        assert!(out.contains("Ready · 2 messages"));
        assert!(out.contains("[Enter] send"));
    }

    #[test]
    fn test_footer_busy_singular() {
        let theme = Theme::default();
        let hints = busy_hints();
        let out = render(
            FooterHints::new(&hints, &theme).busy(true).message_count(1),
            80,
        );
        assert!(out.contains("Waiting · 1 message"));
        assert!(!out.contains("[Enter]"));
    }

    #[test]
    fn test_footer_drops_hints_when_narrow() {
        let theme = Theme::default();
        let hints = idle_hints();
        let out = render(FooterHints::new(&hints, &theme), 20);
        assert!(!out.contains("[Esc]"));
    }
}
