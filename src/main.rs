//! Gradegen - interactive weighted grade calculator
//!
//! Collects assignment grades from the operator, balances their weights
//! against the grading policy, computes the final score, GPA and
//! pass/fail status, and exports the records to CSV.
//!
//! Exit codes:
//!   0 - Success (including when no assignments were entered, or the
//!       export failed after results were shown)
//!   1 - Invalid arguments or configuration

mod cli;
mod config;
mod grading;
mod intake;
mod models;
mod report;

use anyhow::{Context, Result};
use cli::Args;
use config::{Config, DEFAULT_CONFIG_FILE};
use intake::{Console, WeightResolution};
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args)?;

    info!("Gradegen v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    run(&mut console, &config)
}

/// Handle --init-config: generate a default .gradegen.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to change category targets, pass marks and export options.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so they never interleave with the prompts on stdout.
fn init_logging(args: &Args) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Load configuration from file or use defaults, then apply CLI overrides.
fn load_config(args: &Args) -> Result<Config> {
    let mut config = if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        Config::load(config_path)?
    } else {
        match Config::load_default()? {
            Some(config) => {
                info!("Loaded default config from {}", DEFAULT_CONFIG_FILE);
                config
            }
            None => {
                debug!("No config file found, using defaults");
                Config::default()
            }
        }
    };

    config.merge_with_args(args);
    Ok(config)
}

/// Run one grading session: collect, balance, aggregate, report, export.
fn run<R: BufRead, W: Write>(console: &mut Console<R, W>, config: &Config) -> Result<()> {
    let policy = &config.policy;

    console.say("=== GRADE GENERATOR ===\n")?;

    // Step 1: Collect assignments
    let mut records = intake::collect_records(console).context("Failed to read assignments")?;
    if records.is_empty() {
        console.say("No assignments entered. Exiting.")?;
        info!("No assignments entered; nothing to export");
        return Ok(());
    }

    // Step 2: Balance weights against the policy
    let resolution =
        intake::resolve_weights(console, &mut records, policy, config.general.auto_normalize)
            .context("Failed to read weight adjustments")?;
    if resolution == WeightResolution::Overridden {
        warn!("Continuing with weights that do not match the policy");
    }
    info!("Weights settled: {:?}", resolution);

    // Step 3: Aggregate
    let summary = grading::summarize(&records, policy);

    // Step 4: Report
    console.say(report::render_records_table(&records))?;
    console.say(report::render_summary(&summary))?;

    // Step 5: Export (failures are reported, results stay valid)
    let output = Path::new(&config.general.output);
    match report::write_csv(&records, output, config.export.include_contribution) {
        Ok(()) => {
            info!("Exported {} records to {}", records.len(), output.display());
            console.say(format!("{} created successfully!", output.display()))?;
        }
        Err(e) => {
            warn!("CSV export failed: {}", e);
            console.say(format!("Failed to write CSV: {}", e))?;
        }
    }

    if let Some(ref summary_path) = config.export.summary_json {
        let summary_path = Path::new(summary_path);
        match report::write_summary_json(&summary, records.len(), summary_path) {
            Ok(()) => {
                console.say(format!("{} created successfully!", summary_path.display()))?;
            }
            Err(e) => {
                warn!("Summary export failed: {}", e);
                console.say(format!("Failed to write summary: {}", e))?;
            }
        }
    }

    Ok(())
}
