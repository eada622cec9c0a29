//! tabstash — file a selection of browser tabs as a task in a remote task
//! list.
//!
//! Main entry point for the tabstash CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{Context, add, list, login, logout};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// tabstash — stash open tabs into your task list
#[derive(Parser)]
#[command(name = "tabstash")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store credentials for the task service
    Login(login::LoginArgs),

    /// Delete stored credentials
    Logout,

    /// List the tasks in the configured list
    List,

    /// File a new task, with tab URLs in its notes
    Add(add::AddArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let ctx = Context::new(cli.verbose, cli.json)?;

    // Initialize tracing — console (human-readable) + rotating JSON file
    let filter = if cli.verbose {
        "tabstash=debug,tabstash_auth=debug,tabstash_client=debug,info"
    } else {
        "tabstash=info,tabstash_auth=info,tabstash_client=info,warn"
    };

    let file_appender = tracing_appender::rolling::daily(ctx.data_dir.join("logs"), "tabstash.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "tabstash=trace,tabstash_auth=trace,tabstash_client=trace,info",
                )),
        )
        .init();

    match cli.command {
        Commands::Login(args) => login::run(args, &ctx).await,
        Commands::Logout => logout::run(&ctx).await,
        Commands::List => list::run(&ctx).await,
        Commands::Add(args) => add::run(args, &ctx).await,
    }
}
