//! Supervisor decision wire type.
//!
//! The supervisor replies with a JSON document describing what to do with the
//! user's message. Every field is optional so a partial reply still parses;
//! the dispatcher treats missing fields as empty strings.

use serde::{Deserialize, Serialize};

/// Actions the supervisor can request.
pub mod actions {
    pub const QUERY_KB: &str = "query_kb";
    pub const CREATE_TICKET: &str = "create_ticket";
    pub const QUERY_TICKETS: &str = "query_tickets";
    pub const INVOKE_ROBOT: &str = "invoke_robot";
}

/// Decision returned by the supervisor agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Decision {
    /// Requested action (`query_kb`, `create_ticket`, `query_tickets`,
    /// `invoke_robot`, or anything else for a plain reply)
    pub action: Option<String>,
    /// User code identified by the supervisor
    pub user_code: Option<String>,
    /// Robot task to execute, when action is `invoke_robot`
    pub robot_task: Option<RobotTask>,
    /// Direct reply to show the user
    pub user_response: Option<String>,
    /// Confirmation line appended after a knowledge-base answer
    pub confirmation_message: Option<String>,
    /// Conversation status reported by the supervisor
    pub status: Option<String>,
    /// Suggested next step
    pub next_step: Option<String>,
}

/// Robot task descriptor inside a decision.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RobotTask {
    /// Task type identifier understood by the robot agent
    #[serde(rename = "type")]
    pub task_type: Option<String>,
}

impl Decision {
    /// Parse a decision from the supervisor's raw JSON reply.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Requested action, empty string when the supervisor gave none.
    pub fn action(&self) -> &str {
        self.action.as_deref().unwrap_or("")
    }

    /// Reply text, empty string when the supervisor gave none.
    pub fn user_response(&self) -> &str {
        self.user_response.as_deref().unwrap_or("")
    }

    /// Task type from the embedded robot task, if any.
    pub fn robot_task_type(&self) -> Option<&str> {
        self.robot_task
            .as_ref()
            .and_then(|t| t.task_type.as_deref())
            .filter(|t| !t.is_empty())
    }

    /// User code, filtered to non-empty values.
    pub fn user_code(&self) -> Option<&str> {
        self.user_code.as_deref().filter(|c| !c.is_empty())
    }
}
