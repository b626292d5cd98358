//! askgem-tui: Terminal UI for the askgem chat client
//!
//! This crate provides the TUI layer for askgem, including:
//! - The conversation pane with typing indicator and auto-scroll
//! - The prompt input bar and footer hints
//! - The event loop that drives exchanges in the background

mod app;
pub mod conversation;
mod event;
pub mod text;
pub mod theme;
#[cfg(test)]
pub mod test_utils;
pub mod widgets;

pub use app::App;
pub use askgem_engine;
pub use event::{key_to_action, Action, Event, EventHandler};
pub use theme::Theme;

use askgem_engine::{send_with_timeout, AskClient, AskReply, Config, ExchangeError};
use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Tick rate of the event loop (4 Hz).
const TICK_RATE_MS: u64 = 250;

type ExchangeHandle = JoinHandle<Result<AskReply, ExchangeError>>;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop until the user quits, and
/// restores the terminal on exit.
pub async fn run_tui(
    config: &Config,
    client: Arc<dyn AskClient>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, Theme::from_env());
    let mut events = EventHandler::new(TICK_RATE_MS);

    info!(endpoint = %config.endpoint_url(), "starting tui");
    let result = run_loop(&mut terminal, &mut app, &mut events, client).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    client: Arc<dyn AskClient>,
) -> Result<(), Box<dyn std::error::Error>> {
    // The session rejects submits while busy, so at most one exchange runs
    let mut exchange: Option<ExchangeHandle> = None;

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        let Some(event) = events.next().await else {
            break;
        };

        match event {
            Event::Key(key) => {
                let action = key_to_action(key);
                if let Some(prompt) = app.handle_action(action) {
                    exchange = Some(spawn_exchange(
                        Arc::clone(&client),
                        prompt,
                        app.session.timeout(),
                    ));
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => {
                    app.handle_action(Action::ScrollUp);
                }
                MouseEventKind::ScrollDown => {
                    app.handle_action(Action::ScrollDown);
                }
                _ => {}
            },
            Event::Tick => app.tick(),
            Event::Resize(_, _) => {
                // Terminal will handle resize automatically
            }
        }

        // Check for a completed exchange (non-blocking)
        if exchange.as_ref().is_some_and(JoinHandle::is_finished) {
            if let Some(handle) = exchange.take() {
                let result = handle
                    .await
                    .unwrap_or_else(|e| Err(ExchangeError::Aborted(e.to_string())));
                app.settle(result);
            }
        }

        if app.should_quit {
            break;
        }
    }

    if let Some(handle) = exchange {
        debug!("aborting in-flight exchange on quit");
        handle.abort();
    }

    Ok(())
}

fn spawn_exchange(
    client: Arc<dyn AskClient>,
    prompt: String,
    timeout: std::time::Duration,
) -> ExchangeHandle {
    tokio::spawn(async move { send_with_timeout(client.as_ref(), &prompt, timeout).await })
}
