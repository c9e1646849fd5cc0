//! Chat command - interactive support conversation.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use autoline_agents::AgentEndpoints;
use autoline_chat::{ChatEvent, ChatManager, ChatSink, MessageRole};

#[derive(Args)]
pub struct ChatArgs {
    /// Workspace root holding .autoline/settings.json (defaults to the
    /// current directory; falls back to AUTOLINE_* environment variables)
    #[arg(short, long)]
    workspace: Option<PathBuf>,
}

pub async fn execute(args: ChatArgs) -> Result<()> {
    let workspace = match args.workspace {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    let endpoints = AgentEndpoints::from_settings(&workspace)?;
    let mut manager = ChatManager::from_endpoints(&endpoints)?;
    info!(session = %manager.session().id, "Chat session started");

    println!("🤖 Autoline support chat");
    println!("   Type /status, /history, or /quit at any time.");
    println!();

    let mut sink = StdoutSink::default();
    manager.greet(&mut sink).await?;

    let stdin = std::io::stdin();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();

        match input {
            "" => continue,
            "/quit" | "/exit" => break,
            "/status" => {
                let status = manager.session().last_status.as_str();
                if status.is_empty() {
                    println!("   (no status reported yet)");
                } else {
                    println!("   {}", status);
                }
            }
            "/history" => {
                for msg in &manager.session().messages {
                    let prefix = match msg.role {
                        MessageRole::User => "you",
                        MessageRole::Assistant => "bot",
                    };
                    println!("   [{}] {}", prefix, msg.content);
                }
            }
            _ => manager.send_message(input, &mut sink).await?,
        }
    }

    println!("👋 Goodbye");
    Ok(())
}

/// Sink that renders chat events to the terminal, printing streamed chunks
/// as they arrive.
#[derive(Default)]
struct StdoutSink {
    /// Bytes of the current reply already printed via `Chunk` events
    printed: usize,
}

impl ChatSink for StdoutSink {
    fn event(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::Notice(notice) => {
                println!("   · {}", notice);
            }
            ChatEvent::Chunk(chunk) => {
                if self.printed == 0 {
                    print!("bot> ");
                }
                print!("{}", chunk);
                let _ = std::io::stdout().flush();
                self.printed += chunk.len();
            }
            ChatEvent::Replace(full) => {
                if self.printed == 0 {
                    println!("bot> {}", full);
                } else {
                    // Chunks were a prefix of the final reply; print what
                    // was appended after the stream ended.
                    if full.len() > self.printed && full.is_char_boundary(self.printed) {
                        print!("{}", &full[self.printed..]);
                    }
                    println!();
                }
                self.printed = 0;
            }
            ChatEvent::Discard => {
                if self.printed > 0 {
                    println!();
                }
                println!("   · (answer withdrawn)");
                self.printed = 0;
            }
            ChatEvent::Error(message) => {
                if self.printed > 0 {
                    println!();
                    self.printed = 0;
                }
                eprintln!("⚠️  {}", message);
            }
        }
    }
}
