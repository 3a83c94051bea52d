mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "duty session tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario file through the tracker and print the session
    Replay {
        #[arg(value_name = "SCENARIO")]
        path: PathBuf,
    },
    /// List the built-in territory table
    Territories,
    /// Show or update the stored configuration
    Config {
        /// Prefix summary lines with the plugin label
        #[arg(long, value_name = "BOOL")]
        set_label: Option<bool>,
        /// Suppress zero-valued statistics
        #[arg(long, value_name = "BOOL")]
        set_suppress: Option<bool>,
    },
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Replay { path } => commands::replay(&path),
        Commands::Territories => {
            commands::territories();
            Ok(())
        }
        Commands::Config {
            set_label,
            set_suppress,
        } => commands::config(set_label, set_suppress),
    }
}
