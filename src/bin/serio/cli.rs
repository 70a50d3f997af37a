use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "serio")]
#[command(author, version, about = "Inspect and edit SER image sequence files")]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show frame geometry and header summary
    Info {
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Print every header field
    Header {
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one header field, selected by name or index
    Get {
        #[arg(required = true)]
        file: PathBuf,

        /// Field name (e.g. `telescope`) or index 0-12
        field: String,
    },

    /// Overwrite one header field
    Set {
        #[arg(required = true)]
        file: PathBuf,

        /// Field name (e.g. `telescope`) or index 0-12
        field: String,

        /// New value; text longer than the field is truncated
        value: String,
    },

    /// Dump the raw bytes of one frame
    Frame {
        #[arg(required = true)]
        file: PathBuf,

        /// Zero-based frame index
        index: usize,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Per-frame min/max/mean
    Stats {
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
