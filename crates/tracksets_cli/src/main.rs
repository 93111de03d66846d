//! Tracksets CLI
//!
//! Command-line tools for segmenting ping datasets into tracksets.
//!
//! # Commands
//!
//! - `build` - Segment a CSV ping dataset into track shards
//! - `count` - Count tracked and untracked points across shards
//! - `export` - Write each track as a plain-text file
//! - `inspect` - Show per-shard statistics

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Tracksets command-line tools.
#[derive(Parser)]
#[command(name = "tracksets")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the shard directory
    #[arg(global = true, short = 'd', long, default_value = "data/tracksets")]
    shards: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment a CSV ping dataset into track shards
    Build {
        /// Sorted CSV dataset (id_object, latitude, longitude, online, date)
        #[arg(short, long, default_value = "data/sorted_dataset.csv")]
        input: PathBuf,

        /// Replace shards left by a previous run
        #[arg(short, long)]
        force: bool,

        /// Longest gap between pings of one track, in seconds
        #[arg(long)]
        max_gap_secs: Option<u64>,

        /// Longest jump between pings of one track, in coordinate units
        #[arg(long)]
        max_distance: Option<f64>,

        /// Buffered points at which a shard is written
        #[arg(long)]
        shard_points: Option<usize>,
    },

    /// Count tracked and untracked points across shards
    Count {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Write each track with two or more points as a text file
    Export {
        /// Output directory
        #[arg(short, long, default_value = "data/tracks")]
        output: PathBuf,
    },

    /// Show per-shard statistics
    Inspect {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Build {
            input,
            force,
            max_gap_secs,
            max_distance,
            shard_points,
        } => {
            let options = commands::build::BuildOptions {
                force,
                max_gap_secs,
                max_distance,
                shard_points,
            };
            commands::build::run(&input, &cli.shards, &options)?;
        }
        Commands::Count { format } => {
            commands::count::run(&cli.shards, &format)?;
        }
        Commands::Export { output } => {
            commands::export::run(&cli.shards, &output)?;
        }
        Commands::Inspect { format } => {
            commands::inspect::run(&cli.shards, &format)?;
        }
        Commands::Version => {
            println!("Tracksets CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Tracksets Core v{}", tracksets_core::VERSION);
        }
    }

    Ok(())
}
