//! # autoline_chat - Chat core for the Autoline support chat
//!
//! Session bookkeeping and dispatch for a single support conversation:
//!
//! - **Session store**: in-memory transcript plus the mode flags that decide
//!   which agent owns the conversation
//! - **Validation**: user messages are checked before any agent is contacted
//! - **Dispatcher**: routes a turn to the ticket handler, the robot handler,
//!   or a fresh supervisor decision, and streams replies through a
//!   [`ChatSink`]
//!
//! ## Control flow
//!
//! ```text
//! user message ──▶ validation ──▶ mode check ──┬─▶ ticket handler
//!                                              ├─▶ robot handler
//!                                              └─▶ supervisor decision
//!                                                      │
//!                        ┌─────────────┬───────────────┤
//!                        ▼             ▼               ▼
//!                  KB streaming   ticket mode     robot mode
//! ```
//!
//! The agents themselves live behind the traits in [`autoline_agents`].

pub mod dispatch;
pub mod error;
pub mod session;
pub mod types;
pub mod validation;

pub use dispatch::*;
pub use error::*;
pub use session::*;
pub use types::*;
pub use validation::*;
