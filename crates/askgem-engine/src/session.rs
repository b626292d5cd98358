//! Conversation session: the client's explicit state container.
//!
//! A [`Session`] owns the input buffer, the [`Conversation`] and the
//! [`ExchangeState`]. It is a synchronous state machine: [`Session::submit`]
//! moves it to `Pending` and hands back the prompt to send, and
//! [`Session::settle`] consumes the outcome. Driving the network call in
//! between is up to the caller, either through [`Session::exchange`] or by
//! spawning [`send_with_timeout`] and settling when it completes.
//!
//! Renderers subscribe with [`Session::subscribe`] and receive a
//! [`SessionSnapshot`] after every mutation.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::client::{AskClient, AskReply, ExchangeError};
use crate::config::Config;
use crate::message::{Conversation, Message, FALLBACK_RESPONSE};

/// How a finished exchange ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// The backend replied; holds the text that was appended.
    Answered(String),
    /// The exchange failed for any reason.
    Failed,
}

/// Lifecycle of the current exchange.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExchangeState {
    /// No exchange has happened yet.
    #[default]
    Idle,
    /// A request is in flight.
    Pending {
        /// The prompt that was sent.
        prompt: String,
    },
    /// The last exchange has settled.
    Settled(Settlement),
}

/// State published to subscribers after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    /// Increments on every change.
    pub revision: u64,
    /// Number of messages in the conversation.
    pub message_count: usize,
    /// Whether an exchange is in flight.
    pub busy: bool,
}

/// Why a submission was not accepted. The session is unchanged in both cases.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// Input was empty or whitespace only.
    #[error("Prompt is empty")]
    EmptyPrompt,

    /// Another exchange is still in flight.
    #[error("An exchange is already in flight")]
    Busy,
}

/// Per-session conversation client state.
#[derive(Debug)]
pub struct Session {
    input: String,
    conversation: Conversation,
    state: ExchangeState,
    timestamps: bool,
    timeout: Duration,
    revision: u64,
    notifier: watch::Sender<SessionSnapshot>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Session {
    /// Create an empty session.
    pub fn new(config: &Config) -> Self {
        let (notifier, _) = watch::channel(SessionSnapshot::default());
        Self {
            input: String::new(),
            conversation: Conversation::new(),
            state: ExchangeState::Idle,
            timestamps: config.timestamps,
            timeout: config.timeout(),
            revision: 0,
            notifier,
        }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.notifier.subscribe()
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            revision: self.revision,
            message_count: self.conversation.len(),
            busy: self.is_busy(),
        }
    }

    /// The in-progress prompt text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the input buffer.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.notify();
    }

    /// The conversation so far.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// The current exchange state.
    pub fn state(&self) -> &ExchangeState {
        &self.state
    }

    /// Whether an exchange is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self.state, ExchangeState::Pending { .. })
    }

    /// Timeout applied to each exchange.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Accept the input buffer as a new exchange.
    ///
    /// Appends the user message, clears the input and marks the session
    /// busy. Returns the untrimmed prompt to send.
    pub fn submit(&mut self) -> Result<String, SubmitError> {
        if self.is_busy() {
            debug!("submit rejected: exchange in flight");
            return Err(SubmitError::Busy);
        }
        if self.input.trim().is_empty() {
            return Err(SubmitError::EmptyPrompt);
        }

        let prompt = std::mem::take(&mut self.input);
        let message = self.message(Message::user(prompt.clone()));
        self.conversation.push(message);
        self.state = ExchangeState::Pending {
            prompt: prompt.clone(),
        };
        debug!(chars = prompt.chars().count(), "exchange started");
        self.notify();

        Ok(prompt)
    }

    /// Record the outcome of the in-flight exchange.
    ///
    /// Appends exactly one assistant message. Ignored when nothing is
    /// pending.
    pub fn settle(&mut self, result: Result<AskReply, ExchangeError>) {
        if !self.is_busy() {
            warn!("settle called with no exchange in flight; ignoring");
            return;
        }

        let (reply, settlement) = match result {
            Ok(reply) => {
                let text = reply.content().unwrap_or(FALLBACK_RESPONSE).to_string();
                (Message::assistant(text.clone()), Settlement::Answered(text))
            }
            Err(e) => {
                warn!(error = %e, "exchange failed");
                (Message::failure(), Settlement::Failed)
            }
        };

        // Leave Pending before appending so busy never outlives the call.
        self.state = ExchangeState::Settled(settlement);
        let message = self.message(reply);
        self.conversation.push(message);
        debug!("exchange settled");
        self.notify();
    }

    /// Run one complete exchange against `client`.
    pub async fn exchange(&mut self, client: &dyn AskClient) -> Result<(), SubmitError> {
        let prompt = self.submit()?;
        let result = send_with_timeout(client, &prompt, self.timeout).await;
        self.settle(result);
        Ok(())
    }

    fn message(&self, message: Message) -> Message {
        if self.timestamps {
            message.stamped()
        } else {
            message
        }
    }

    fn notify(&mut self) {
        self.revision += 1;
        self.notifier.send_replace(self.snapshot());
    }
}

/// Send `prompt`, failing with [`ExchangeError::Timeout`] after `timeout`.
pub async fn send_with_timeout(
    client: &dyn AskClient,
    prompt: &str,
    timeout: Duration,
) -> Result<AskReply, ExchangeError> {
    match tokio::time::timeout(timeout, client.send(prompt)).await {
        Ok(result) => result,
        Err(_) => Err(ExchangeError::Timeout(timeout)),
    }
}
