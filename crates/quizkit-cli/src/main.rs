//! quizkit CLI: timed multiple-choice quizzes in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod input;
mod render;

#[derive(Parser)]
#[command(name = "quizkit", version, about = "Timed multiple-choice quiz sessions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz session
    Play {
        /// Path to a .toml question bank or a directory of banks
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Questions per session (default: 10)
        #[arg(long)]
        count: Option<usize>,

        /// Seconds per question (default: 30)
        #[arg(long)]
        seconds: Option<u32>,

        /// Disable the countdown
        #[arg(long)]
        no_timer: bool,

        /// Seed for a reproducible question draw
        #[arg(long)]
        seed: Option<u64>,

        /// Only draw questions with these tags (comma-separated)
        #[arg(long)]
        tags: Option<String>,

        /// Write a JSON report of the session to this file
        #[arg(long)]
        report: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Show a saved session report
    Show {
        /// Report JSON
        #[arg(long)]
        report: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and example question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizkit=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            bank,
            count,
            seconds,
            no_timer,
            seed,
            tags,
            report,
            config,
        } => {
            commands::play::execute(bank, count, seconds, no_timer, seed, tags, report, config)
                .await
        }
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Show { report, format } => commands::show::execute(report, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
