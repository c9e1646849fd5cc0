//! Error types for the agent adapters.

use thiserror::Error;

/// Result type alias for agent operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// Errors that can occur while talking to an external agent service.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Agent not configured: {0}. Set the endpoint in .autoline/settings.json or the environment")]
    NotConfigured(String),

    #[error("Request to {agent} failed: {message}")]
    Request { agent: String, message: String },

    #[error("{agent} returned HTTP {status}: {body}")]
    Http {
        agent: String,
        status: u16,
        body: String,
    },

    #[error("Stream from {agent} failed: {message}")]
    Stream { agent: String, message: String },

    #[error("Invalid endpoint URL for {agent}: {url}")]
    InvalidEndpoint { agent: String, url: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AgentError {
    /// Create a request error for a named agent.
    pub fn request(agent: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Request {
            agent: agent.into(),
            message: message.into(),
        }
    }

    /// Create a stream error for a named agent.
    pub fn stream(agent: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Stream {
            agent: agent.into(),
            message: message.into(),
        }
    }
}
