//! gradebook CLI, the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gradebook", version, about = "Norm-referenced grading and ranking")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade and rank a roster
    Process {
        /// Path to a .toml/.json roster or a directory of rosters
        #[arg(long)]
        roster: PathBuf,

        /// Settings file path
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Evaluation period to grade (overrides settings)
        #[arg(long)]
        period: Option<String>,

        /// Sort order: name-asc, name-desc, id-asc, score-desc, aggregate-asc
        #[arg(long)]
        sort: Option<String>,

        /// Output format: table, json, markdown
        #[arg(long, default_value = "table")]
        format: String,

        /// Write a JSON results report to this path
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show per-subject cohort statistics
    Stats {
        /// Path to a .toml/.json roster or a directory of rosters
        #[arg(long)]
        roster: PathBuf,

        /// Settings file path
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Evaluation period to grade (overrides settings)
        #[arg(long)]
        period: Option<String>,
    },

    /// Validate a settings file
    Validate {
        /// Settings file path
        #[arg(long)]
        settings: Option<PathBuf>,
    },

    /// Create starter settings and an example roster
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradebook=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Process {
            roster,
            settings,
            period,
            sort,
            format,
            output,
        } => commands::process::execute(roster, settings, period, sort, format, output),
        Commands::Stats {
            roster,
            settings,
            period,
        } => commands::stats::execute(roster, settings, period),
        Commands::Validate { settings } => commands::validate::execute(settings),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
