//! Atlas CLI — the main entry point.
//!
//! Commands:
//! - `chat`    — Interactive domain menu + chat loop, or one-shot question mode
//! - `domains` — List the available assistance domains

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "atlas",
    about = "Atlas — assistant d'aide aux agents, ancré dans la documentation interne",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the assistant
    Chat {
        /// Ask a single question instead of entering interactive mode
        #[arg(short, long)]
        question: Option<String>,

        /// Domain for one-shot mode: 1/temps, 2/formation, 3/teletravail
        #[arg(short, long)]
        domain: Option<String>,
    },

    /// List the available assistance domains
    Domains,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Chat { question, domain } => commands::chat::run(question, domain).await?,
        Commands::Domains => commands::domains::run(),
    }

    Ok(())
}
