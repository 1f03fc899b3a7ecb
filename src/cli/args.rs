//! CLI argument definitions using clap
//!
//! Commands:
//! - parkcore validate --config <path>
//! - parkcore run --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// parkcore - multi-floor parking allocation engine
#[derive(Parser, Debug)]
#[command(name = "parkcore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a facility configuration and print its capacity
    Validate {
        /// Path to configuration file
        #[arg(long, default_value = "./parkcore.json")]
        config: PathBuf,
    },

    /// Build the facility and serve JSON-lines requests from stdin
    Run {
        /// Path to configuration file
        #[arg(long, default_value = "./parkcore.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
