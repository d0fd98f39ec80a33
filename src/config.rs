//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.gradegen.toml` files, including the grading policy that the
//! normalizer and aggregator are driven by.

use crate::models::Category;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".gradegen.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Grading policy.
    #[serde(default)]
    pub policy: GradingPolicy,

    /// Export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default CSV output path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Normalize mismatched weights without asking.
    #[serde(default)]
    pub auto_normalize: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            auto_normalize: false,
        }
    }
}

fn default_output() -> String {
    "grades.csv".to_string()
}

/// Grading policy: category targets and pass/fail thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingPolicy {
    /// Points the Formative weights should sum to.
    #[serde(default = "default_formative_target")]
    pub formative_target: f64,

    /// Points the Summative weights should sum to.
    #[serde(default = "default_summative_target")]
    pub summative_target: f64,

    /// Minimum final score to pass.
    #[serde(default = "default_pass_mark")]
    pub pass_mark: f64,

    /// Share of a category's weight total its contributions must reach.
    #[serde(default = "default_category_pass_ratio")]
    pub category_pass_ratio: f64,

    /// Raw grades below this are flagged for resubmission.
    #[serde(default = "default_resubmit_below")]
    pub resubmit_below: f64,

    /// Top of the GPA range (final score 100 maps to this).
    #[serde(default = "default_gpa_scale")]
    pub gpa_scale: f64,

    /// Tolerance used when comparing weight totals to targets.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self {
            formative_target: default_formative_target(),
            summative_target: default_summative_target(),
            pass_mark: default_pass_mark(),
            category_pass_ratio: default_category_pass_ratio(),
            resubmit_below: default_resubmit_below(),
            gpa_scale: default_gpa_scale(),
            tolerance: default_tolerance(),
        }
    }
}

fn default_formative_target() -> f64 {
    60.0
}

fn default_summative_target() -> f64 {
    40.0
}

fn default_pass_mark() -> f64 {
    50.0
}

fn default_category_pass_ratio() -> f64 {
    0.5
}

fn default_resubmit_below() -> f64 {
    50.0
}

fn default_gpa_scale() -> f64 {
    5.0
}

fn default_tolerance() -> f64 {
    1e-6
}

/// A grading policy that cannot be applied.
#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("{category} target must be a positive number, got {value}")]
    InvalidTarget { category: &'static str, value: f64 },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("{field} must be greater than 0 and at most {max}, got {value}")]
    NotPositive {
        field: &'static str,
        max: f64,
        value: f64,
    },
}

impl GradingPolicy {
    /// Weight target for a category.
    pub fn target(&self, category: Category) -> f64 {
        match category {
            Category::Formative => self.formative_target,
            Category::Summative => self.summative_target,
        }
    }

    /// Sum of both category targets (100 under the default policy).
    pub fn total_target(&self) -> f64 {
        self.formative_target + self.summative_target
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), PolicyError> {
        for category in Category::ALL {
            let value = self.target(category);
            if !(value.is_finite() && value > 0.0) {
                return Err(PolicyError::InvalidTarget {
                    category: category.label(),
                    value,
                });
            }
        }

        check_range("pass_mark", self.pass_mark, 0.0, 100.0)?;
        check_range("category_pass_ratio", self.category_pass_ratio, 0.0, 1.0)?;
        check_range("resubmit_below", self.resubmit_below, 0.0, 100.0)?;
        check_range("gpa_scale", self.gpa_scale, 0.0, 100.0)?;

        // Weight totals must land strictly inside the tolerance to match
        if !(self.tolerance > 0.0 && self.tolerance <= 1.0) {
            return Err(PolicyError::NotPositive {
                field: "tolerance",
                max: 1.0,
                value: self.tolerance,
            });
        }

        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), PolicyError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(PolicyError::OutOfRange {
            field,
            min,
            max,
            value,
        })
    }
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Add the FinalWeight (contribution) column to the CSV.
    #[serde(default = "default_true")]
    pub include_contribution: bool,

    /// Also write the summary as JSON to this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_json: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            include_contribution: true,
            summary_json: None,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .policy
            .validate()
            .with_context(|| format!("Invalid grading policy in {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were explicitly provided.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }

        if let Some(ref summary) = args.summary_json {
            self.export.summary_json = Some(summary.display().to_string());
        }

        // Flags only ever switch behavior on
        if args.no_contribution {
            self.export.include_contribution = false;
        }
        if args.auto_normalize {
            self.general.auto_normalize = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
