//! Core types for the chat transcript and display events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message role in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    Assistant,
    User,
}

/// A single chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID (UUID)
    pub id: String,
    /// Role of the message sender
    pub role: MessageRole,
    /// Message content
    pub content: String,
    /// When the message was created
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: MessageRole::User,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: MessageRole::Assistant,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Display updates emitted while a turn is being handled.
///
/// The dispatcher pushes these to a [`ChatSink`] so the UI can render
/// streamed replies incrementally without owning any dispatch logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Spinner-style status line ("Running robot...")
    Notice(String),
    /// Incremental assistant text from a streaming agent
    Chunk(String),
    /// Final rendering of the accumulated assistant reply
    Replace(String),
    /// Retract partial streamed output (the reply was superseded)
    Discard,
    /// Error surfaced to the user
    Error(String),
}

/// Receiver for display updates.
pub trait ChatSink {
    fn event(&mut self, event: ChatEvent);
}

/// Sink that collects events into a vec. Used by tests and by callers that
/// want to render a whole turn at once.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub events: Vec<ChatEvent>,
}

impl ChatSink for CollectingSink {
    fn event(&mut self, event: ChatEvent) {
        self.events.push(event);
    }
}
