//! Application state and update logic for the askgem TUI.

use askgem_engine::{AskReply, Config, ExchangeError, Session, SessionSnapshot, SubmitError};
use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};
use tokio::sync::watch;
use tracing::debug;

use crate::conversation::{ConversationPane, ConversationView};
use crate::event::Action;
use crate::theme::Theme;
use crate::widgets::{busy_hints, idle_hints, FooterHints, InputBar, TextInputState};

/// Maximum number of input lines shown before the bar scrolls.
const MAX_INPUT_LINES: usize = 5;

/// Main application state.
pub struct App {
    /// Conversation and exchange state.
    pub session: Session,

    /// Editing state of the prompt.
    pub input: TextInputState,

    /// Scroll state of the conversation pane.
    pub view: ConversationView,

    /// Color theme.
    pub theme: Theme,

    /// Animation tick counter.
    pub tick: usize,

    /// Whether the app should quit.
    pub should_quit: bool,

    updates: watch::Receiver<SessionSnapshot>,

    /// Height of the conversation pane at the last draw, used for paging.
    page_size: usize,
}

impl App {
    /// Create a new app with an empty session.
    pub fn new(config: &Config, theme: Theme) -> Self {
        let session = Session::new(config);
        let updates = session.subscribe();
        Self {
            session,
            input: TextInputState::new(),
            view: ConversationView::new(),
            theme,
            tick: 0,
            should_quit: false,
            updates,
            page_size: 10,
        }
    }

    /// Whether an exchange is in flight.
    pub fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    /// Handle an action.
    ///
    /// Returns the prompt to send when a submission was accepted.
    pub fn handle_action(&mut self, action: Action) -> Option<String> {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Submit => return self.submit(),
            Action::Insert(c) => self.edit(|input| input.insert(c)),
            Action::Newline => self.edit(|input| input.insert('\n')),
            Action::Backspace => self.edit(TextInputState::backspace),
            Action::Delete => self.edit(TextInputState::delete),
            Action::ClearInput => self.edit(TextInputState::clear),
            Action::Left => self.input.move_left(),
            Action::Right => self.input.move_right(),
            Action::Home => self.input.move_home(),
            Action::End => self.input.move_end(),
            Action::ScrollUp => self.view.scroll_up(1),
            Action::ScrollDown => self.view.scroll_down(1),
            Action::PageUp => self.view.scroll_up(self.page_size.max(1)),
            Action::PageDown => self.view.scroll_down(self.page_size.max(1)),
            Action::None => {}
        }
        None
    }

    /// Apply the outcome of the in-flight exchange.
    pub fn settle(&mut self, result: Result<AskReply, ExchangeError>) {
        self.session.settle(result);
        self.refresh();
    }

    /// Advance animations.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Consume pending session updates.
    ///
    /// Snaps the conversation to the newest message whenever the message
    /// count changed since the last update.
    pub fn refresh(&mut self) {
        if !self.updates.has_changed().unwrap_or(false) {
            return;
        }
        let snapshot = *self.updates.borrow_and_update();
        if self.view.sync(snapshot.message_count) {
            debug!(messages = snapshot.message_count, "conversation changed");
        }
    }

    /// Render the whole screen.
    pub fn draw(&mut self, frame: &mut Frame<'_>) {
        self.refresh();

        let busy = self.is_busy();
        let input_lines = self
            .input
            .content()
            .split('\n')
            .count()
            .clamp(1, MAX_INPUT_LINES);
        let input_height = u16::try_from(input_lines).unwrap_or(1) + 2;

        let [conversation_area, input_area, footer_area] = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(input_height),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.page_size = conversation_area.height.saturating_sub(2) as usize;

        let pane = ConversationPane::new(self.session.conversation().messages(), &self.theme)
            .busy(busy)
            .tick(self.tick);
        frame.render_stateful_widget(pane, conversation_area, &mut self.view);

        frame.render_widget(InputBar::new(&self.input, &self.theme).busy(busy), input_area);

        let hints = if busy { busy_hints() } else { idle_hints() };
        frame.render_widget(
            FooterHints::new(&hints, &self.theme)
                .busy(busy)
                .message_count(self.session.conversation().len()),
            footer_area,
        );
    }

    fn edit(&mut self, f: impl FnOnce(&mut TextInputState)) {
        f(&mut self.input);
        self.session.set_input(self.input.content());
    }

    fn submit(&mut self) -> Option<String> {
        self.session.set_input(self.input.content());
        match self.session.submit() {
            Ok(prompt) => {
                self.input.clear();
                self.refresh();
                Some(prompt)
            }
            Err(SubmitError::Busy) => {
                debug!("submit ignored while busy");
                None
            }
            Err(SubmitError::EmptyPrompt) => None,
        }
    }
}
