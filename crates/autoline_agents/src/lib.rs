//! # autoline_agents - External agent adapters for the Autoline support chat
//!
//! The chat core never talks to the network directly; it goes through the
//! traits defined here. Four remote services are covered:
//!
//! - **Supervisor**: decides how each user message should be handled
//! - **Robot**: executes account tasks on the user's behalf
//! - **Ticketing**: creates and queries support tickets
//! - **Knowledge base**: answers questions with streamed text
//!
//! The services themselves are opaque; this crate only carries prompts and
//! text back and forth.

pub mod config;
pub mod decision;
pub mod error;
pub mod http;
pub mod traits;

pub use config::*;
pub use decision::*;
pub use error::*;
pub use http::*;
pub use traits::*;
