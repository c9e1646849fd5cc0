//! Turn dispatcher.
//!
//! Routes each user message to the right handling path: ticket mode and
//! robot mode short-circuit to their agents; otherwise the supervisor is
//! asked for a decision and the matching action handler runs. Streamed
//! agent replies are surfaced through a [`ChatSink`] while being
//! accumulated into the transcript.

use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, info, warn};

use autoline_agents::{
    actions, AgentEndpoints, AgentError, Decision, DecisionAgent, KnowledgeBase,
    KnowledgeBaseClient, RobotClient, StreamingAgent, SupervisorClient, TextStream,
    TicketingClient,
};

use crate::error::ChatResult;
use crate::session::{RobotContext, Session};
use crate::types::{ChatEvent, ChatSink};
use crate::validation::validate_message;

/// How many trailing messages feed the knowledge-base context.
const KB_CONTEXT_WINDOW: usize = 5;

/// Priority passed to the knowledge-base service.
const KB_PRIORITY: u8 = 7;

/// Message the supervisor opens the conversation with.
const GREETING_PROBE: &str = "hello";

/// Greeting shown when the supervisor's opening reply cannot be parsed.
const FALLBACK_GREETING: &str =
    "Hi! I'm here to help you with Autoline. Could you tell me your user code?";

/// Phrases in a robot reply that mean the robot is handing the conversation
/// back to support.
const ROBOT_HANDOFF_KEYWORDS: [&str; 3] = ["sorry", "contact support", "cannot help"];

/// Dispatcher owning the session and the agent connections.
pub struct ChatManager {
    session: Session,
    supervisor: Arc<dyn DecisionAgent>,
    robot: Arc<dyn StreamingAgent>,
    ticketing: Arc<dyn StreamingAgent>,
    kb: Arc<dyn KnowledgeBase>,
}

impl ChatManager {
    /// Create a manager over explicit agent connections.
    pub fn new(
        supervisor: Arc<dyn DecisionAgent>,
        robot: Arc<dyn StreamingAgent>,
        ticketing: Arc<dyn StreamingAgent>,
        kb: Arc<dyn KnowledgeBase>,
    ) -> Self {
        Self {
            session: Session::new(),
            supervisor,
            robot,
            ticketing,
            kb,
        }
    }

    /// Create a manager backed by the HTTP clients for the configured
    /// endpoints.
    pub fn from_endpoints(endpoints: &AgentEndpoints) -> ChatResult<Self> {
        Ok(Self::new(
            Arc::new(SupervisorClient::new(endpoints)?),
            Arc::new(RobotClient::new(endpoints)?),
            Arc::new(TicketingClient::new(endpoints)?),
            Arc::new(KnowledgeBaseClient::new(endpoints)?),
        ))
    }

    /// The current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Send the automatic greeting, once per session.
    ///
    /// The supervisor opens the conversation; if its reply is not the
    /// expected JSON a canned greeting is shown instead.
    pub async fn greet(&mut self, sink: &mut dyn ChatSink) -> ChatResult<()> {
        if self.session.greeted {
            return Ok(());
        }
        self.session.greeted = true;

        let raw = self
            .supervisor
            .decide(GREETING_PROBE, &self.session.id)
            .await?;

        let greeting = match Decision::parse(&raw) {
            Ok(decision) => decision.user_response().to_string(),
            Err(e) => {
                debug!(error = %e, "Greeting reply was not valid JSON, using fallback");
                FALLBACK_GREETING.to_string()
            }
        };

        self.show_answer(&greeting, sink);
        Ok(())
    }

    /// Handle one user turn.
    pub async fn send_message(&mut self, input: &str, sink: &mut dyn ChatSink) -> ChatResult<()> {
        self.session.push_user(input);

        let errors = validate_message(input);
        if !errors.is_empty() {
            let mut reply = String::from("The following errors were found:\n\n");
            for error in &errors {
                reply.push_str("- ");
                reply.push_str(error);
                reply.push('\n');
            }
            self.show_answer(reply.trim_end(), sink);
            return Ok(());
        }

        if self.session.ticket_mode {
            return self.handle_ticket(input, sink).await;
        }

        if self.session.robot_mode() {
            return self.handle_robot_followup(input, sink).await;
        }

        let raw = self.supervisor.decide(input, &self.session.id).await?;
        let decision = match Decision::parse(&raw) {
            Ok(decision) => decision,
            Err(e) => {
                warn!(error = %e, "Supervisor reply was not valid JSON");
                sink.event(ChatEvent::Error(
                    "There was a problem processing the assistant's reply.".to_string(),
                ));
                Decision::default()
            }
        };

        self.handle_action(decision, input, sink).await
    }

    /// Run the action the supervisor decided on.
    async fn handle_action(
        &mut self,
        decision: Decision,
        input: &str,
        sink: &mut dyn ChatSink,
    ) -> ChatResult<()> {
        let action = decision.action().to_string();
        debug!(action = %action, "Dispatching supervisor decision");

        match action.as_str() {
            // KB turns never touch the status line
            actions::QUERY_KB => return self.handle_kb(&decision, input, sink).await,
            actions::CREATE_TICKET | actions::QUERY_TICKETS => {
                self.session.enter_ticket_mode();
                self.handle_ticket(input, sink).await?;
            }
            actions::INVOKE_ROBOT => self.handle_robot_entry(&decision, sink).await?,
            _ => {
                self.show_answer(decision.user_response(), sink);
            }
        }

        self.session.last_status = format!(
            "Status: {}, Next step: {}",
            decision.status.as_deref().unwrap_or(""),
            decision.next_step.as_deref().unwrap_or("")
        );

        Ok(())
    }

    /// Stream a knowledge-base answer.
    ///
    /// If any chunk signals a ticket escalation the partial answer is
    /// discarded and the turn continues in ticket mode; otherwise the
    /// decision's confirmation line is appended in bold.
    async fn handle_kb(
        &mut self,
        decision: &Decision,
        input: &str,
        sink: &mut dyn ChatSink,
    ) -> ChatResult<()> {
        let context = self.session.kb_context(KB_CONTEXT_WINDOW);
        let contextual_query = format!("{}\nUser question: {}", context, input);

        sink.event(ChatEvent::Notice(
            "Consulting the knowledge base...".to_string(),
        ));

        let mut stream = match self.kb.query(input, &contextual_query, KB_PRIORITY).await {
            Ok(stream) => stream,
            Err(e) => {
                sink.event(ChatEvent::Error(format!(
                    "Error consulting the knowledge base: {}",
                    e
                )));
                return Ok(());
            }
        };

        let mut full = String::new();
        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    sink.event(ChatEvent::Error(format!(
                        "Error consulting the knowledge base: {}",
                        e
                    )));
                    return Ok(());
                }
            };
            if chunk.trim().contains("create") {
                // The KB punted to ticket creation; drop what we streamed.
                sink.event(ChatEvent::Discard);
                drop(stream);
                self.session.enter_ticket_mode();
                return self.handle_ticket(input, sink).await;
            }
            full.push_str(&chunk);
            sink.event(ChatEvent::Chunk(chunk));
        }

        if let Some(confirmation) = decision
            .confirmation_message
            .as_deref()
            .filter(|c| !c.is_empty())
        {
            full.push_str("\n\n**");
            full.push_str(confirmation);
            full.push_str("**");
        }

        self.session.push_assistant(&full);
        sink.event(ChatEvent::Replace(full));
        Ok(())
    }

    /// Stream a ticketing-agent reply.
    ///
    /// The first ticket turn sends the conversation summary; later turns
    /// forward the user's message directly.
    async fn handle_ticket(&mut self, input: &str, sink: &mut dyn ChatSink) -> ChatResult<()> {
        let stream_result = if !self.session.ticket_started {
            self.session.ticket_started = true;
            let summary = self.session.ticket_summary();
            sink.event(ChatEvent::Notice(
                "Processing the ticket automatically...".to_string(),
            ));
            self.ticketing.stream(&summary, &self.session.id).await
        } else {
            sink.event(ChatEvent::Notice("Updating the ticket...".to_string()));
            self.ticketing.stream(input, &self.session.id).await
        };

        let result = match stream_result {
            Ok(stream) => self.drain(stream, sink).await,
            Err(e) => Err(e),
        };

        let full = match result {
            Ok(full) => full,
            Err(e) => {
                sink.event(ChatEvent::Error(format!(
                    "Error processing the ticket: {}",
                    e
                )));
                return Ok(());
            }
        };

        self.session.push_assistant(&full);
        sink.event(ChatEvent::Replace(full));
        Ok(())
    }

    /// Enter robot mode from a supervisor decision and run the first task
    /// turn.
    ///
    /// The decision must carry the user code and the task type; without them
    /// the robot has nothing to execute and the conversation stays with the
    /// supervisor.
    async fn handle_robot_entry(
        &mut self,
        decision: &Decision,
        sink: &mut dyn ChatSink,
    ) -> ChatResult<()> {
        let (user_code, task_type) = match (decision.user_code(), decision.robot_task_type()) {
            (Some(code), Some(task)) => (code.to_string(), task.to_string()),
            _ => {
                self.show_answer(
                    "Could not identify the user code or the robot task type.",
                    sink,
                );
                return Ok(());
            }
        };

        info!(task = %task_type, "Entering robot mode");
        self.session.enter_robot_mode(RobotContext {
            user_code: user_code.clone(),
            task_type: task_type.clone(),
        });

        let prompt = format!(
            "I want to run the action '{}', my user code is {}",
            task_type, user_code
        );
        self.run_robot(&prompt, sink).await
    }

    /// Forward a follow-up message to the robot while in robot mode.
    async fn handle_robot_followup(
        &mut self,
        input: &str,
        sink: &mut dyn ChatSink,
    ) -> ChatResult<()> {
        self.run_robot(input, sink).await
    }

    /// Run one robot turn and check its reply for a support hand-off.
    async fn run_robot(&mut self, prompt: &str, sink: &mut dyn ChatSink) -> ChatResult<()> {
        sink.event(ChatEvent::Notice("Running robot...".to_string()));

        let result = match self.robot.stream(prompt, &self.session.id).await {
            Ok(stream) => self.drain(stream, sink).await,
            Err(e) => Err(e),
        };

        let full = match result {
            Ok(full) => full,
            Err(e) => {
                sink.event(ChatEvent::Error(format!("Error running the robot: {}", e)));
                return Ok(());
            }
        };

        self.session.push_assistant(&full);
        sink.event(ChatEvent::Replace(full.clone()));

        let lower = full.to_lowercase();
        if ROBOT_HANDOFF_KEYWORDS.iter().any(|k| lower.contains(k)) {
            info!("Robot handed the conversation back, leaving robot mode");
            self.session.exit_robot_mode();
        }

        Ok(())
    }

    /// Show a complete assistant reply and record it.
    fn show_answer(&mut self, text: &str, sink: &mut dyn ChatSink) {
        self.session.push_assistant(text);
        sink.event(ChatEvent::Replace(text.to_string()));
    }

    /// Accumulate a text stream, forwarding each chunk to the sink.
    async fn drain(
        &self,
        mut stream: TextStream,
        sink: &mut dyn ChatSink,
    ) -> Result<String, AgentError> {
        let mut full = String::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            full.push_str(&chunk);
            sink.event(ChatEvent::Chunk(chunk));
        }
        Ok(full)
    }
}
