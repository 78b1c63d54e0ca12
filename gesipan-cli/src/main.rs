//! gesipan CLI - run and administer the bulletin board server
//!
//! - `serve` runs the HTTP server
//! - `migrate` creates the database tables
//! - `session` issues and revokes login sessions

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "gesipan",
    author,
    version,
    about = "Bulletin board server with replies and file attachments"
)]
struct Cli {
    /// Debug logging (ignored when RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Create database tables and exit
    Migrate(commands::StoreArgs),
    /// Issue or revoke login sessions
    #[command(subcommand)]
    Session(commands::session::SessionCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::Session(command) => commands::run_session(command).await?,
    }
    Ok(())
}
