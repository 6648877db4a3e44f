//! CLI frontend for the Gumshoe detective engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "gumshoe",
    about = "Gumshoe: solve a murder before the clock runs out",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a scenario file and list every problem found
    Check {
        /// Scenario JSON file
        file: PathBuf,
    },

    /// Display a scenario's timeline in chronological order
    Timeline {
        /// Scenario JSON file
        file: PathBuf,
    },

    /// Play a scenario interactively (default: the bundled manor case)
    Play {
        /// Scenario JSON file
        file: Option<PathBuf>,

        /// Resolve every action locally without consulting a generator
        #[arg(long)]
        offline: bool,

        /// Seed for fallback replies
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Generator timeout in milliseconds
        #[arg(long, default_value = "30000")]
        timeout_ms: u64,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "gumshoe=debug,gs_core=debug,gs_engine=debug,gs_content=debug,gs_play=debug"
    } else {
        "warn,gumshoe=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check { file } => commands::check::run(&file),
        Commands::Timeline { file } => commands::timeline::run(&file),
        Commands::Play {
            file,
            offline,
            seed,
            timeout_ms,
        } => commands::play::run(file.as_deref(), offline, seed, timeout_ms),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
