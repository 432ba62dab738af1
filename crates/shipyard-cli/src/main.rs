mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shipyard_core::{SETTINGS_FILE, Settings};

#[derive(Parser)]
#[command(name = "shipyard", about = "Build and deploy applications from source")]
#[command(version)]
struct Cli {
    /// Process-wide settings file
    #[arg(long, global = true, default_value = SETTINGS_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync, restore, compile and deploy an application
    Build {
        /// Application name
        app: String,
    },
    /// Show an application's build state
    Status {
        /// Application name
        app: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the log of the last build
    Log {
        /// Application name
        app: String,
    },
    /// Show the exclusions the next deploy would pass to the copy tool
    Excludes {
        /// Application name
        app: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(&cli.config)?;
    tracing::debug!(apps_root = %settings.apps_root.display(), "settings loaded");

    match cli.command {
        Commands::Build { app } => commands::build(&settings, &app).await?,
        Commands::Status { app, json } => commands::status(&settings, &app, json)?,
        Commands::Log { app } => commands::log(&settings, &app)?,
        Commands::Excludes { app } => commands::excludes(&settings, &app).await?,
    }

    Ok(())
}
