//! Error types for the chat core.

use thiserror::Error;

/// Result type alias for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;

/// Errors that can occur while handling a chat turn.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Agent error: {0}")]
    Agent(#[from] autoline_agents::AgentError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
