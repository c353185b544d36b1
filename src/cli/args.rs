//! Command-line argument definitions for the BLM parser
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::BlmConfig;
use crate::{BlmError, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the BLM feed parser
///
/// Reads BLM real-estate data-feed files and emits their property records.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "blm",
    version,
    about = "Parse BLM real-estate data-feed files into structured records",
    long_about = "Parses BLM data-feed files (HEADER, DEFINITION and DATA sections) into \
                  property records keyed by the feed's own field definitions. Files and \
                  directories can be mixed; directories are searched recursively for .blm files."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// JSON configuration file; command-line flags override its values
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config_path: Option<PathBuf>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse files and print their records
    Parse(ParseArgs),
    /// Check paths, and optionally parse them, without printing records
    Validate(ValidateArgs),
    /// Print the header properties of a file
    Header(HeaderArgs),
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// BLM files or directories containing them
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Maximum files parsed at once
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Skip header lines without ':' instead of failing
    #[arg(long)]
    pub lenient_header: bool,

    /// Replace invalid UTF-8 instead of failing the read
    #[arg(long)]
    pub lossy_utf8: bool,

    /// Show a progress bar while parsing
    #[arg(long)]
    pub progress: bool,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// BLM files or directories containing them
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Parse each file fully and report the failing stage
    #[arg(long)]
    pub deep: bool,
}

/// Arguments for the header command
#[derive(Debug, Clone, Parser)]
pub struct HeaderArgs {
    /// BLM file to inspect
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Print the header as a JSON object
    #[arg(long)]
    pub json: bool,
}

/// Record output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON array of records (an object keyed by file for several files)
    Json,
    /// One JSON record per line
    Ndjson,
    /// Human-readable per-file summary
    Summary,
}

impl Args {
    /// Log level implied by -v/-q
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

impl ParseArgs {
    /// Validate arguments
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == Some(0) {
            return Err(BlmError::configuration(
                "Concurrency must be greater than 0",
            ));
        }

        if let Some(output) = &self.output {
            if output.is_dir() {
                return Err(BlmError::configuration(format!(
                    "Output path is a directory: {}",
                    output.display()
                )));
            }
        }

        Ok(())
    }

    /// Overlay command-line flags on a loaded configuration
    pub fn apply_to(&self, mut config: BlmConfig) -> BlmConfig {
        if let Some(concurrency) = self.concurrency {
            config.batch.max_concurrent_files = concurrency;
        }
        if self.lenient_header {
            config.parser.strict_header_lines = false;
        }
        if self.lossy_utf8 {
            config.parser.lossy_utf8 = true;
        }
        if self.progress {
            config.batch.show_progress = true;
        }
        config
    }
}
