//! Conversation pane widget.
//!
//! ```text
//! ┌─ Conversation ──────────────────────────┐
//! │                          You · 14:02    │
//! │                                  Hello  │
//! │                                          │
//! │ Gemini · 14:02                           │
//! │ Hi there!                                │
//! │                                          │
//! │ Gemini is typing |                       │
//! └──────────────────────────────────────────┘
//! ```

use askgem_engine::{Message, Role};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};

use super::view::ConversationView;
use crate::text::wrap_text;
use crate::theme::{spinner_frame, Theme};

/// Label of the transient row shown while an exchange is in flight.
pub const TYPING_LABEL: &str = "Gemini is typing";

/// Shown in an empty conversation.
pub const EMPTY_HINT: &str = "Ask Gemini anything to get started.";

/// Conversation pane: messages plus the typing indicator.
pub struct ConversationPane<'a> {
    messages: &'a [Message],
    theme: &'a Theme,
    busy: bool,
    tick: usize,
}

impl<'a> ConversationPane<'a> {
    /// Create a new conversation pane.
    pub fn new(messages: &'a [Message], theme: &'a Theme) -> Self {
        Self {
            messages,
            theme,
            busy: false,
            tick: 0,
        }
    }

    /// Show the typing indicator.
    #[must_use]
    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    /// Animation tick for the spinner.
    #[must_use]
    pub fn tick(mut self, tick: usize) -> Self {
        self.tick = tick;
        self
    }
}

/// Lay out the conversation as display lines for a given inner width.
pub fn build_lines(
    messages: &[Message],
    busy: bool,
    tick: usize,
    width: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    // Bubbles take at most four fifths of the pane
    let body_width = (width * 4 / 5).max(1);
    let mut lines = Vec::new();

    for (i, message) in messages.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }

        let (label, color, alignment) = match message.role {
            Role::User => ("You", theme.user, Alignment::Right),
            Role::Assistant => ("Gemini", theme.assistant, Alignment::Left),
        };

        let mut header = vec![Span::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )];
        if let Some(time) = &message.time {
            header.push(Span::styled(
                format!(" · {time}"),
                Style::default().fg(theme.muted),
            ));
        }
        lines.push(Line::from(header).alignment(alignment));

        let body_style = if message.failed {
            Style::default().fg(theme.error)
        } else {
            Style::default().fg(theme.text)
        };
        for text in wrap_text(&message.text, body_width) {
            lines.push(Line::from(Span::styled(text, body_style)).alignment(alignment));
        }
    }

    if busy {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from(vec![
            Span::styled(
                format!("{TYPING_LABEL} "),
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::ITALIC),
            ),
            Span::styled(spinner_frame(tick), Style::default().fg(theme.assistant)),
        ]));
    }

    lines
}

impl StatefulWidget for ConversationPane<'_> {
    type State = ConversationView;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut ConversationView) {
        let block = Block::default()
            .title(" Conversation ")
            .title_style(Style::default().fg(self.theme.text))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.base));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width < 2 {
            return;
        }

        // Empty state
        if self.messages.is_empty() && !self.busy {
            let hint = Line::from(Span::styled(
                EMPTY_HINT,
                Style::default().fg(self.theme.muted),
            ))
            .alignment(Alignment::Center);
            Paragraph::new(hint).render(
                Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1),
                buf,
            );
            return;
        }

        // One column of padding on each side
        let content = Rect::new(inner.x + 1, inner.y, inner.width - 2, inner.height);
        let lines = build_lines(
            self.messages,
            self.busy,
            self.tick,
            content.width as usize,
            self.theme,
        );
        let offset = state.resolve(lines.len(), content.height as usize);

        Paragraph::new(lines)
            .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0))
            .render(content, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use askgem_engine::{FAILURE_RESPONSE, FALLBACK_RESPONSE};

    fn render(messages: &[Message], busy: bool, view: &mut ConversationView) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 50, 12);
        let mut buf = Buffer::empty(area);
        ConversationPane::new(messages, &theme)
            .busy(busy)
            .render(area, &mut buf, view);
        buffer_to_string(&buf)
    }

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_empty_conversation_shows_hint() {
        let out = render(&[], false, &mut ConversationView::new());
        assert!(out.contains("Conversation"));
        assert!(out.contains(EMPTY_HINT));
    }

    #[test]
    fn test_messages_are_labelled() {
        let messages = vec![Message::user("Hello"), Message::assistant("Hi there!")];
        let out = render(&messages, false, &mut ConversationView::new());
        assert!(out.contains("You"));
        assert!(out.contains("Hello"));
        assert!(out.contains("Gemini"));
        assert!(out.contains("Hi there!"));
        assert!(!out.contains(TYPING_LABEL));
    }

    #[test]
    fn test_busy_shows_typing_row() {
        let messages = vec![Message::user("Hello")];
        let out = render(&messages, true, &mut ConversationView::new());
        assert!(out.contains(TYPING_LABEL));
    }

    #[test]
    fn test_error_style_follows_failed_flag() {
        let theme = Theme::default();
        let messages = vec![
            Message::failure(),
            Message::assistant(FAILURE_RESPONSE),
        ];
        let lines = build_lines(&messages, false, 0, 40, &theme);

        // header, body, blank, header, body
        assert_eq!(lines[1].spans[0].style.fg, Some(theme.error));
        assert_eq!(lines[4].spans[0].style.fg, Some(theme.text));
    }

    #[test]
    fn test_timestamp_in_header() {
        let mut message = Message::assistant(FALLBACK_RESPONSE);
        message.time = Some("09:41".into());
        let lines = build_lines(&[message], false, 0, 40, &Theme::default());
        assert_eq!(text_of(&lines[0]), "Gemini · 09:41");
        assert_eq!(text_of(&lines[1]), FALLBACK_RESPONSE);
    }

    #[test]
    fn test_user_lines_right_aligned() {
        let lines = build_lines(&[Message::user("Hi")], false, 0, 40, &Theme::default());
        assert!(lines
            .iter()
            .all(|l| l.alignment == Some(Alignment::Right)));
    }

    #[test]
    fn test_long_body_wraps() {
        let long = "word ".repeat(30);
        let lines = build_lines(&[Message::assistant(long)], false, 0, 20, &Theme::default());
        assert!(lines.len() > 2);
        assert!(lines.iter().all(|l| text_of(l).chars().count() <= 20));
    }

    #[test]
    fn test_latest_message_visible_after_overflow() {
        let messages: Vec<Message> = (0..20)
            .map(|i| Message::assistant(format!("reply {i}")))
            .collect();
        let mut view = ConversationView::new();
        view.sync(messages.len());
        let out = render(&messages, false, &mut view);
        assert!(out.contains("reply 19"));
        assert!(!out.contains("reply 0 "));
    }
}
