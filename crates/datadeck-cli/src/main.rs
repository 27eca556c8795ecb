use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod context;
mod format;
mod tui;

#[derive(Parser)]
#[command(name = "datadeck")]
#[command(about = "DataDeck - terminal client for tabular data upload and visualization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Signup {
        /// Role for the new account (defaults to "Member")
        #[arg(long)]
        role: Option<String>,
    },
    /// Log in with email and password
    Login,
    /// Discard the stored session
    Logout,
    /// Show the logged-in identity
    Whoami,
    /// List uploaded datasets
    List,
    /// Upload a CSV or Excel file
    Upload {
        /// Path to the file to upload
        path: PathBuf,
    },
    /// Delete a dataset
    Delete {
        /// Dataset id (see `datadeck list`)
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Open the interactive dashboard
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let ctx = context::AppContext::bootstrap().await?;

    match cli.command {
        Commands::Signup { role } => commands::auth::signup(&ctx, role).await?,
        Commands::Login => commands::auth::login(&ctx).await?,
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::List => commands::datasets::list(&ctx).await?,
        Commands::Upload { path } => commands::upload::run(&ctx, &path).await?,
        Commands::Delete { id, yes } => commands::datasets::delete(&ctx, &id, yes).await?,
        Commands::Dashboard => tui::run(ctx).await?,
    }

    Ok(())
}

/// Logs go to stderr so they never corrupt the TUI or command output.
/// Filter with `DATADECK_LOG`, e.g. `DATADECK_LOG=datadeck_core=debug`.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("DATADECK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
