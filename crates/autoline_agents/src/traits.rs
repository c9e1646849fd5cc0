//! Agent service traits.
//!
//! The chat core talks to the external services through these seams so the
//! dispatcher can be tested against mocks. All implementations must be
//! `Send + Sync`; streams carry accumulated display text chunk by chunk.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::AgentResult;

/// Text chunks streamed back from an agent service.
pub type TextStream = BoxStream<'static, AgentResult<String>>;

/// Supervisor decision agent: one request, one raw JSON reply.
#[async_trait]
pub trait DecisionAgent: Send + Sync {
    /// Ask the supervisor what to do with a user message.
    ///
    /// Returns the raw JSON document; the caller parses it into a
    /// [`crate::Decision`] and decides how to handle malformed replies.
    async fn decide(&self, message: &str, session_id: &str) -> AgentResult<String>;
}

/// Streaming agent: one prompt in, a stream of text chunks out.
///
/// Implemented by the robot and ticketing clients.
#[async_trait]
pub trait StreamingAgent: Send + Sync {
    /// Send a prompt and stream the reply.
    async fn stream(&self, prompt: &str, session_id: &str) -> AgentResult<TextStream>;
}

/// Knowledge-base query service.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// Query the knowledge base.
    ///
    /// `question` is the user's literal question; `contextual_query` is the
    /// question enriched with recent conversation context. `priority` ranks
    /// the query on the service side.
    async fn query(
        &self,
        question: &str,
        contextual_query: &str,
        priority: u8,
    ) -> AgentResult<TextStream>;
}
