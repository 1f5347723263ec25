//! Run configuration for the `beach-kml` binary.

use crate::report::{DEFAULT_SAMPLE_SIZE, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

/// Extract dog-friendly beach records from a KML document
#[derive(Debug, Clone, Parser)]
#[command(name = "beach-kml", version, about)]
pub struct Config {
    /// KML document to read (UTF-8)
    pub input: PathBuf,

    /// Number of records to print after the total
    #[arg(short, long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub sample: usize,

    /// Format of the printed sample
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Log skipped placemarks and other details to stderr
    #[arg(short, long, action)]
    pub verbose: bool,
}

impl Config {
    /// Default log directive when RUST_LOG is unset.
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}
