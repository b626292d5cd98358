//! Scroll state for the conversation pane.
//!
//! The view follows the newest message by default. Scrolling up detaches
//! it; scrolling back to the bottom, or any change in the message count,
//! re-attaches it.

/// Conversation scroll state.
#[derive(Debug, Clone)]
pub struct ConversationView {
    /// First visible line.
    offset: usize,
    /// Whether to pin the view to the bottom.
    follow: bool,
    /// Message count seen at the last sync.
    seen: usize,
    /// Largest valid offset from the last render.
    max_offset: usize,
}

impl Default for ConversationView {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationView {
    /// Create a view pinned to the bottom.
    pub fn new() -> Self {
        Self {
            offset: 0,
            follow: true,
            seen: 0,
            max_offset: 0,
        }
    }

    /// First visible line.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the view is pinned to the newest message.
    pub fn is_following(&self) -> bool {
        self.follow
    }

    /// Record the current message count.
    ///
    /// Returns `true` when the count changed, in which case the view snaps
    /// back to the newest message.
    pub fn sync(&mut self, message_count: usize) -> bool {
        if message_count == self.seen {
            return false;
        }
        self.seen = message_count;
        self.follow = true;
        true
    }

    /// Scroll towards older messages. Detaches from the bottom.
    pub fn scroll_up(&mut self, lines: usize) {
        if self.max_offset == 0 {
            return;
        }
        self.follow = false;
        self.offset = self.offset.saturating_sub(lines);
    }

    /// Scroll towards newer messages. Re-attaches at the bottom.
    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = (self.offset + lines).min(self.max_offset);
        if self.offset == self.max_offset {
            self.follow = true;
        }
    }

    /// Compute the offset for a render of `total` lines in `height` rows.
    pub fn resolve(&mut self, total: usize, height: usize) -> usize {
        self.max_offset = total.saturating_sub(height);
        self.offset = if self.follow {
            self.max_offset
        } else {
            self.offset.min(self.max_offset)
        };
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follows_by_default() {
        let mut view = ConversationView::new();
        assert!(view.is_following());
        assert_eq!(view.resolve(50, 10), 40);
    }

    #[test]
    fn test_scroll_up_detaches() {
        let mut view = ConversationView::new();
        view.resolve(50, 10);

        view.scroll_up(5);
        assert!(!view.is_following());
        assert_eq!(view.resolve(60, 10), 35);
    }

    #[test]
    fn test_scroll_down_to_bottom_reattaches() {
        let mut view = ConversationView::new();
        view.resolve(50, 10);
        view.scroll_up(5);

        view.scroll_down(100);
        assert!(view.is_following());
        assert_eq!(view.resolve(60, 10), 50);
    }

    #[test]
    fn test_new_message_snaps_to_bottom() {
        let mut view = ConversationView::new();
        assert!(view.sync(2));
        view.resolve(50, 10);
        view.scroll_up(20);

        assert!(!view.sync(2));
        assert!(!view.is_following());

        assert!(view.sync(3));
        assert!(view.is_following());
        assert_eq!(view.resolve(55, 10), 45);
    }

    #[test]
    fn test_short_content_never_scrolls() {
        let mut view = ConversationView::new();
        view.resolve(3, 10);
        view.scroll_up(1);
        assert!(view.is_following());
        assert_eq!(view.resolve(3, 10), 0);
    }
}
