//! tickdown - countdown schedule driver
//!
//! Drives schedule files through a real-time tick loop, validates definition
//! files, and runs a deterministic demo of the counter family.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(version, about = "tickdown schedule driver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive a schedule file through a real-time tick loop
    Run {
        /// Schedule definition file
        #[arg(short, long)]
        path: PathBuf,

        /// Schedule id to run; defaults to the first in the file
        #[arg(short, long)]
        schedule: Option<String>,

        /// Tick rate in Hz
        #[arg(short, long, default_value_t = 30.0)]
        rate: f64,
    },

    /// Load schedule definitions and report what they contain
    Validate {
        /// Definition file or directory
        #[arg(short, long)]
        path: PathBuf,
    },

    /// Deterministic walkthrough of the counter family on a manual clock
    Demo,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    logging::init(std::env::var("DEBUG_LOGGING").is_ok());

    let cli = Cli::parse();
    match &cli.command {
        Commands::Run {
            path,
            schedule,
            rate,
        } => commands::run(path, schedule.as_deref(), *rate).await,
        Commands::Validate { path } => commands::validate(path),
        Commands::Demo => commands::demo(),
    }
}
