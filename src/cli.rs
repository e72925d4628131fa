//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// parksurvey - descriptive-statistics report for park satisfaction surveys
///
/// Loads the survey CSV, computes summary and group-by tables, and writes
/// an interactive HTML report with charts and narrative text.
///
/// Examples:
///   parksurvey
///   parksurvey --data responses.csv --output report.html --open
///   parksurvey --format markdown --output report.md
///   parksurvey --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Survey CSV file
    ///
    /// Defaults to data.csv in the current directory (or the path in .parksurvey.toml).
    #[arg(short, long, value_name = "FILE", env = "PARKSURVEY_DATA")]
    pub data: Option<PathBuf>,

    /// Output file path for the report
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (html, markdown)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Report title
    #[arg(short, long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Omit the raw survey responses table
    #[arg(long)]
    pub no_raw_data: bool,

    /// Open the report in the default browser once written
    #[arg(long)]
    pub open: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .parksurvey.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .parksurvey.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Standalone HTML page with interactive charts (default)
    #[default]
    Html,
    /// Markdown document, charts rendered as tables
    Markdown,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref title) = self.title {
            if title.trim().is_empty() {
                return Err("Title must not be empty".to_string());
            }
        }

        if let Some(ref output) = self.output {
            if output.is_dir() {
                return Err(format!(
                    "Output path is a directory: {}",
                    output.display()
                ));
            }
        }

        if let Some(ref config) = self.config {
            if !config.is_file() {
                return Err(format!("Config file does not exist: {}", config.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
