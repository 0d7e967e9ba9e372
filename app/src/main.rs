#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;

use command::{
    ChatInput, ChatStrategy, CommandStrategy, HistoryInput, HistoryStrategy, InfoStrategy,
    InitStrategy, ServeInput, ServeStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "medtrack")]
#[command(about = "Voice-driven medication tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the webhook server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Feed transcript lines through the tracker
    Chat {
        /// Session to use (a new one is generated if omitted)
        #[arg(short, long)]
        session: Option<String>,

        /// Single line to process
        #[arg(short = 'm', long)]
        message: Option<String>,

        /// Keep events in memory instead of writing the CSV log
        #[arg(long)]
        dry_run: bool,
    },
    /// Show recently logged medications
    History {
        /// How many days back to look (defaults to config)
        #[arg(short, long)]
        days: Option<i64>,
    },
    /// Initialize configuration
    Init,
    /// Show configuration
    Info,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => ServeStrategy.execute(ServeInput { port }).await,
        Commands::Chat {
            session,
            message,
            dry_run,
        } => {
            ChatStrategy
                .execute(ChatInput {
                    session_id: session,
                    message,
                    dry_run,
                })
                .await
        }
        Commands::History { days } => HistoryStrategy.execute(HistoryInput { days }).await,
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
