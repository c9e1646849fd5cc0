//! Check-config command - show the resolved agent endpoints.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use autoline_agents::AgentEndpoints;

#[derive(Args)]
pub struct CheckConfigArgs {
    /// Workspace root holding .autoline/settings.json (defaults to the
    /// current directory)
    #[arg(short, long)]
    workspace: Option<PathBuf>,
}

pub async fn execute(args: CheckConfigArgs) -> Result<()> {
    let workspace = match args.workspace {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    let endpoints = AgentEndpoints::from_settings(&workspace)?;

    println!("✅ Agent endpoints resolved:");
    println!("   supervisor:     {}", endpoints.supervisor_url);
    println!("   robot:          {}", endpoints.robot_url);
    println!("   ticketing:      {}", endpoints.ticketing_url);
    println!("   knowledge base: {}", endpoints.kb_url);
    println!("   timeout:        {}s", endpoints.timeout_secs);

    Ok(())
}
