//! askgem-engine: Headless conversation client for askgem
//!
//! This crate provides the core of the chat client, including:
//! - Message and conversation types
//! - The session state container and exchange state machine
//! - The backend capability trait and its HTTP implementation
//! - Configuration

pub mod client;
pub mod config;
pub mod message;
pub mod session;

// Re-export commonly used types
pub use client::{AskClient, AskReply, AskRequest, ExchangeError, HttpAskClient};
pub use config::{Config, ConfigError, ASKGEM_DIR, CONFIG_FILE};
pub use message::{Conversation, Message, Role, FAILURE_RESPONSE, FALLBACK_RESPONSE};
pub use session::{
    send_with_timeout, ExchangeState, Session, SessionSnapshot, Settlement, SubmitError,
};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
