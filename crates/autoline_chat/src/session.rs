//! In-memory conversation session.
//!
//! Holds the transcript and the mode flags that drive dispatch. A session
//! lives for one conversation; nothing is persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Message, MessageRole};

/// Robot context captured when the supervisor hands a conversation to the
/// robot agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RobotContext {
    /// User code identified by the supervisor
    pub user_code: String,
    /// Robot task type being executed
    pub task_type: String,
}

/// A single in-memory conversation.
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID (UUID v4), forwarded to every agent call
    pub id: String,
    /// Full transcript, oldest first
    pub messages: Vec<Message>,
    /// The conversation is being handled by the ticketing agent
    pub ticket_mode: bool,
    /// The ticketing agent already received the conversation summary
    pub ticket_started: bool,
    /// The conversation is being handled by the robot agent
    robot: Option<RobotContext>,
    /// Last status line reported by the supervisor
    pub last_status: String,
    /// The initial greeting was already sent
    pub greeted: bool,
}

impl Session {
    /// Create a fresh session with a new ID.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            messages: Vec::new(),
            ticket_mode: false,
            ticket_started: false,
            robot: None,
            last_status: String::new(),
            greeted: false,
        }
    }

    /// Append a user message to the transcript.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append an assistant message to the transcript.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Whether the robot agent currently owns the conversation.
    pub fn robot_mode(&self) -> bool {
        self.robot.is_some()
    }

    /// Robot context, present exactly while in robot mode.
    pub fn robot(&self) -> Option<&RobotContext> {
        self.robot.as_ref()
    }

    /// Hand the conversation to the robot agent.
    pub fn enter_robot_mode(&mut self, context: RobotContext) {
        self.robot = Some(context);
    }

    /// Take the conversation back from the robot agent.
    pub fn exit_robot_mode(&mut self) {
        self.robot = None;
    }

    /// Hand the conversation to the ticketing agent.
    pub fn enter_ticket_mode(&mut self) {
        self.ticket_mode = true;
    }

    /// Accumulated context from the last `max_last` messages, used to enrich
    /// knowledge-base queries.
    pub fn kb_context(&self, max_last: usize) -> String {
        let start = self.messages.len().saturating_sub(max_last);
        let mut context = String::new();
        for msg in &self.messages[start..] {
            let role = match msg.role {
                MessageRole::User => "User",
                MessageRole::Assistant => "Assistant",
            };
            context.push_str(role);
            context.push_str(": ");
            context.push_str(&msg.content);
            context.push('\n');
        }
        context
    }

    /// Whole-transcript summary handed to the ticketing agent when a ticket
    /// conversation begins.
    pub fn ticket_summary(&self) -> String {
        let mut summary = String::from(
            "Conversation summary to take into account when drafting the ticket:\n",
        );
        for msg in &self.messages {
            let role = match msg.role {
                MessageRole::User => "User",
                MessageRole::Assistant => "Assistant",
            };
            summary.push_str(role);
            summary.push_str(": ");
            summary.push_str(&msg.content);
            summary.push('\n');
        }
        summary
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
