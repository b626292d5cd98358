//! Message and conversation types.
//!
//! A [`Conversation`] is append-only: messages are never edited or removed
//! once pushed, and insertion order is display order.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Text shown when a successful reply carries no usable content.
pub const FALLBACK_RESPONSE: &str = "No response from Gemini.";

/// Text shown when an exchange fails for any reason.
pub const FAILURE_RESPONSE: &str = "❌ Failed to get response.";

/// Role in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message.
    User,
    /// Assistant (backend) response.
    Assistant,
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message author.
    pub role: Role,
    /// Displayed content.
    pub text: String,
    /// Hour:minute stamp captured at creation. Cosmetic only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Set on the assistant message that records a failed exchange.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,
}

impl Message {
    /// Create a new user message without a timestamp.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            time: None,
            failed: false,
        }
    }

    /// Create a new assistant message without a timestamp.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            time: None,
            failed: false,
        }
    }

    /// Create the assistant message shown for a failed exchange.
    pub fn failure() -> Self {
        Self {
            failed: true,
            ..Self::assistant(FAILURE_RESPONSE)
        }
    }

    /// Stamp the message with the current local hour:minute.
    #[must_use]
    pub fn stamped(mut self) -> Self {
        self.time = Some(Local::now().format("%H:%M").to_string());
        self
    }

    /// Whether this message was authored by the user.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Ordered, append-only list of exchanged messages.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// All messages in chronological order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recently appended message.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether no message has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
