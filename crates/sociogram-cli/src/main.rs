//! Sociogram CLI - drive the relationship engine from chat logs.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sociogram")]
#[command(author, version, about = "Sociogram - social graphs from chat traffic", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new sociogram project
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Replay a chat log through the engine
    Replay {
        /// Log file: lines of "channel<TAB>nick<TAB>message" or
        /// "nick<TAB>message" with --channel
        log: String,

        /// Channel for two-column logs
        #[arg(short, long)]
        channel: Option<String>,
    },

    /// Show persisted graph statistics per channel
    Stats,

    /// Export a channel's persisted graph state as JSON
    Export {
        /// Channel name (e.g. "#rust")
        channel: String,

        /// Output file path
        output: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Replay { log, channel } => {
            commands::replay::run(&log, channel.as_deref(), cli.verbose)
        }
        Commands::Stats => commands::stats::run(),
        Commands::Export { channel, output } => commands::export::run(&channel, &output),
    }
}
