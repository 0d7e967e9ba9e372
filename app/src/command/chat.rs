//! Local transcript console.
//!
//! Each line typed is handled exactly as a webhook segment would be, so the
//! trigger → details flow can be exercised without a device.

use std::io::Write;

use medtrack_config::Config;
use medtrack_core::TrackerResponse;
use medtrack_session::MedicationTracker;
use tracing::info;
use uuid::Uuid;

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// Session to use (a fresh one if not provided)
    pub session_id: Option<String>,
    /// Single line to process (non-interactive mode)
    pub message: Option<String>,
    /// Keep events in memory instead of the CSV log
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let tracker = super::build_tracker(&config, input.dry_run)?;
        let session_id = input
            .session_id
            .unwrap_or_else(|| Uuid::now_v7().to_string());

        info!("Chat session: {session_id}");

        if let Some(message) = input.message {
            print_reply(&tracker.process(&session_id, &message));
            return Ok(());
        }

        run_interactive(&tracker, &session_id)
    }
}

fn run_interactive(tracker: &MedicationTracker, session_id: &str) -> anyhow::Result<()> {
    println!("medtrack chat started. Try 'pill time', then 'I took 10mg of aspirin'.");
    println!("Type 'quit' to exit.\n");

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if std::io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if matches!(line, "quit" | "exit" | "q") {
            break;
        }

        if line.is_empty() {
            continue;
        }

        print_reply(&tracker.process(session_id, line));
    }

    Ok(())
}

fn print_reply(reply: &TrackerResponse) {
    println!("[{}] {}", reply.status, reply.display_text());
    if let (Some(_), Some(response)) = (&reply.message, &reply.response) {
        println!("  {response}");
    }
    println!();
}
