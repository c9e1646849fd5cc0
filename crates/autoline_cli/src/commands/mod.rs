//! CLI command definitions.

use clap::{Parser, Subcommand};

pub mod chat;
pub mod check_config;

/// Autoline support chat - terminal client for the Autoline helpdesk agents
#[derive(Parser)]
#[command(name = "autoline")]
#[command(version, about = "Autoline support chat - terminal client for the Autoline helpdesk agents")]
#[command(long_about = r#"
Terminal client for the Autoline helpdesk. User messages are routed by a
remote supervisor agent to the knowledge base, the ticketing agent, or the
robot task agent, and their replies stream back into the terminal.

COMMANDS:
  chat          → Start an interactive support conversation
  check-config  → Show the resolved agent endpoints

EXIT CODES:
  0 - Success
  1 - General error
  2 - Configuration error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive support conversation
    Chat(chat::ChatArgs),

    /// Show the resolved agent endpoints
    #[command(name = "check-config")]
    CheckConfig(check_config::CheckConfigArgs),
}
