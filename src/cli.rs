//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Gradegen - interactive weighted grade calculator
///
/// Enter assignments one by one, balance their weights against the
/// grading policy (Formative = 60, Summative = 40 by default), and get
/// the final score, GPA and pass/fail status plus a CSV export.
///
/// Examples:
///   gradegen
///   gradegen --output term1.csv --summary-json term1.json
///   gradegen --auto-normalize --no-contribution
///   gradegen --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Output CSV file path
    ///
    /// Default: from config or grades.csv in the working directory.
    #[arg(short, long, value_name = "FILE", env = "GRADEGEN_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .gradegen.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also write the grade summary as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub summary_json: Option<PathBuf>,

    /// Leave the FinalWeight (contribution) column out of the CSV
    #[arg(long)]
    pub no_contribution: bool,

    /// Normalize mismatched weights without asking
    #[arg(long)]
    pub auto_normalize: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .gradegen.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref output) = self.output {
            if output.as_os_str().is_empty() {
                return Err("Output path cannot be empty".to_string());
            }
            if output.is_dir() {
                return Err(format!("Output path is a directory: {}", output.display()));
            }
        }

        if let (Some(csv), Some(json)) = (&self.output, &self.summary_json) {
            if csv == json {
                return Err("--summary-json must differ from --output".to_string());
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
            tracing::Level::WARN
        }
    }
}
