//! Backend capability and its HTTP implementation.
//!
//! The session never talks to the network directly; it issues requests
//! against an [`AskClient`], which makes exchanges testable without a live
//! backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;

/// Request body sent to the ask endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AskRequest<'a> {
    /// The user's submitted text, untrimmed.
    pub prompt: &'a str,
}

/// Reply body returned by the ask endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AskReply {
    /// Text to display as the assistant's reply.
    #[serde(default)]
    pub response: Option<String>,
}

impl AskReply {
    /// Reply carrying the given text.
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
        }
    }

    /// The reply text, if present and non-empty.
    pub fn content(&self) -> Option<&str> {
        self.response.as_deref().filter(|r| !r.is_empty())
    }
}

/// A backend that answers one prompt per call.
#[async_trait]
pub trait AskClient: Send + Sync {
    /// Send a prompt and wait for the reply.
    async fn send(&self, prompt: &str) -> Result<AskReply, ExchangeError>;
}

/// [`AskClient`] that POSTs JSON to the configured endpoint.
#[derive(Debug, Clone)]
pub struct HttpAskClient {
    client: reqwest::Client,
    url: String,
}

impl HttpAskClient {
    /// Create a client targeting an explicit endpoint URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Create a client from configuration.
    ///
    /// The transport timeout is a little longer than the exchange timeout so
    /// that the session's own timeout is the one that fires.
    pub fn from_config(config: &Config) -> Result<Self, ExchangeError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout().saturating_add(Duration::from_secs(1)))
            .build()
            .map_err(ExchangeError::Network)?;
        Ok(Self {
            client,
            url: config.endpoint_url(),
        })
    }

    /// The endpoint this client posts to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AskClient for HttpAskClient {
    async fn send(&self, prompt: &str) -> Result<AskReply, ExchangeError> {
        let response = self
            .client
            .post(&self.url)
            .json(&AskRequest { prompt })
            .send()
            .await
            .map_err(ExchangeError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExchangeError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(ExchangeError::Network)?;
        serde_json::from_slice(&body).map_err(ExchangeError::Decode)
    }
}

/// Reasons an exchange can fail.
///
/// These are kept for logging only; every variant is shown to the user as
/// the same failure text.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    /// Transport failure (connection refused, reset, TLS...).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("Backend returned status {0}")]
    Status(u16),

    /// Reply body was not the expected JSON.
    #[error("Malformed reply: {0}")]
    Decode(#[source] serde_json::Error),

    /// No reply within the configured timeout.
    #[error("No reply after {0:?}")]
    Timeout(Duration),

    /// The task driving the request ended without a result.
    #[error("Exchange aborted: {0}")]
    Aborted(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let json = serde_json::to_string(&AskRequest { prompt: "  Hi " }).unwrap();
        assert_eq!(json, r#"{"prompt":"  Hi "}"#);
    }

    #[test]
    fn test_reply_missing_field() {
        let reply: AskReply = serde_json::from_str("{}").unwrap();
        assert_eq!(reply.content(), None);
    }

    #[test]
    fn test_reply_empty_field() {
        let reply: AskReply = serde_json::from_str(r#"{"response": ""}"#).unwrap();
        assert_eq!(reply.content(), None);
    }

    #[test]
    fn test_reply_with_text() {
        let reply: AskReply = serde_json::from_str(r#"{"response": "Hi there!"}"#).unwrap();
        assert_eq!(reply.content(), Some("Hi there!"));
    }

    #[test]
    fn test_from_config_uses_endpoint_url() {
        let client = HttpAskClient::from_config(&Config::default()).unwrap();
        assert_eq!(client.url(), "http://localhost:3000/ask-gemini");
    }

    #[test]
    fn test_from_config_with_largest_timeout() {
        let config = Config {
            timeout_seconds: u64::MAX,
            ..Config::default()
        };
        assert!(HttpAskClient::from_config(&config).is_ok());
    }
}
