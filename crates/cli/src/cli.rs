use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Build and check ffmpeg filter option strings
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Engine configuration file (TOML)
    #[arg(short, long, global = true, env = "FILTERKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the known filters
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the options of one filter
    Describe {
        /// Filter name, e.g. "scale"
        filter: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render a filter from key=value arguments
    Render {
        /// Filter name, e.g. "scale"
        filter: String,

        /// Options as key=value; a bare value binds to the next declared option
        args: Vec<String>,
    },
    /// Parse a filter string, validate it and print its canonical form
    Check {
        /// Filter invocation, e.g. "crop=640:480:x=10"
        filter: String,

        /// Print the parsed entries as JSON instead
        #[arg(long)]
        json: bool,
    },
}
