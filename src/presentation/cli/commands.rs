//! CLI commands using clap

use crate::application::dto::{ConfigError, IdentifyOptions};
use crate::domain::services::TextThreshold;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

/// filemage - identify files by their magic bytes
///
/// Reads the first bytes of each file and matches them against a table of
/// known signatures. Files no signature matches are judged text or binary by
/// how much of the sample decodes as UTF-8.
#[derive(Parser, Debug)]
#[command(name = "filemage")]
#[command(version)]
#[command(about = "Identify files by their magic bytes", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Identify files by their leading bytes
    Identify {
        /// Files to identify, `-` reads stdin
        #[arg(required = true)]
        paths: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Number of leading bytes to sample
        #[arg(short = 'n', long)]
        sample_size: Option<usize>,

        /// Count as text when more than this many sampled bytes decode as UTF-8
        #[arg(long, conflicts_with = "text_ratio")]
        text_bytes: Option<usize>,

        /// Count as text when more than this fraction of the sample decodes as UTF-8
        #[arg(long)]
        text_ratio: Option<f64>,

        /// Reject files larger than this many bytes
        #[arg(long)]
        max_size: Option<u64>,
    },

    /// List supported file signatures
    ListSignatures {
        /// Print signatures as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Log level selected by the verbosity flags
    pub fn log_level(&self) -> Level {
        if self.debug {
            Level::DEBUG
        } else if self.verbose {
            Level::INFO
        } else {
            Level::WARN
        }
    }

    /// Loads the config file, if any, with defaults for everything it omits
    pub fn base_options(&self) -> Result<IdentifyOptions, ConfigError> {
        match &self.config {
            Some(path) => IdentifyOptions::from_json_file(path),
            None => Ok(IdentifyOptions::default()),
        }
    }
}

/// Applies command line overrides on top of file or default options
pub fn apply_overrides(
    mut options: IdentifyOptions,
    sample_size: Option<usize>,
    text_bytes: Option<usize>,
    text_ratio: Option<f64>,
    max_size: Option<u64>,
) -> Result<IdentifyOptions, ConfigError> {
    if let Some(size) = sample_size {
        options = options.with_sample_size(size);
    }
    if let Some(bytes) = text_bytes {
        options = options.with_threshold(TextThreshold::Absolute(bytes));
    }
    if let Some(ratio) = text_ratio {
        options = options.with_threshold(TextThreshold::Proportional(ratio));
    }
    if max_size.is_some() {
        options = options.with_max_resource_size(max_size);
    }
    options.validate()?;
    Ok(options)
}
