//! parksurvey - Park Satisfaction Survey Report
//!
//! A CLI tool that loads a park satisfaction survey from CSV, computes
//! descriptive statistics and group-by aggregations, and writes an
//! interactive report with tables, charts and narrative text.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any error (invalid arguments, unreadable or malformed data, write failure)

mod analysis;
mod cli;
mod config;
mod dataset;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::Args;
use config::{Config, CONFIG_FILE};
use dataset::Dataset;
use models::{Report, ReportMetadata};
use std::path::Path;
use std::process::Command;
use std::time::Instant;
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

    // Initialize logging
    init_logging(&args);

    info!("parksurvey v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run_report(args) {
        error!("Report failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .parksurvey.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to customize the data path, output, title and more.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to set tracing subscriber: {}", e);
    }
}

/// Run the complete report pipeline.
fn run_report(args: Args) -> Result<()> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Step 1: Load the survey
    let data_path = config.data.path.clone();
    println!("📥 Loading survey data: {}", data_path.display());
    let dataset = Dataset::load(&data_path)
        .with_context(|| format!("Failed to load survey data from {}", data_path.display()))?;
    info!("Loaded {} responses", dataset.len());

    if !dataset.dropped_columns().is_empty() {
        info!(
            "Ignoring columns not shown in the report: {}",
            dataset.dropped_columns().join(", ")
        );
    }

    if dataset.is_empty() {
        warn!("The survey has no responses; every statistic will be undefined");
    }

    // Step 2: Aggregate
    println!("🧮 Computing statistics...");
    let analysis = analysis::analyze(&dataset);

    // Step 3: Build and render the report
    println!("📝 Rendering report...");

    let metadata = ReportMetadata {
        title: config.report.title.clone(),
        data_source: data_path.display().to_string(),
        generated_at: Utc::now(),
    };

    let report = Report {
        metadata,
        analysis,
        raw_data: config
            .report
            .show_raw_data
            .then(|| dataset.into_responses()),
    };

    let output = report::render(&report, config.general.format, config.report.decimals);

    let output_path = &config.general.output;
    std::fs::write(output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    // Print summary
    let analysis = &report.analysis;
    println!("\n📊 Survey Summary:");
    println!("   Respondents: {}", analysis.respondents);
    println!(
        "   Grouped by children and park: {} respondents in {} groups",
        analysis::total_count(&analysis.park_choices),
        analysis.park_choices.len()
    );
    println!("   Children groups: {}", analysis.children_means.len());
    println!("   Duration: {:.2}s", start_time.elapsed().as_secs_f64());
    println!("\n✅ Report saved to: {}", output_path.display());

    if args.open {
        if let Err(e) = open_in_browser(output_path) {
            warn!("Could not open the report: {:#}", e);
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}

/// Open a file with the platform's default handler.
fn open_in_browser(path: &Path) -> Result<()> {
    let target = path
        .canonicalize()
        .with_context(|| format!("Cannot resolve {}", path.display()))?;

    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else {
        Command::new("xdg-open")
    };

    command
        .arg(&target)
        .spawn()
        .with_context(|| format!("Failed to launch a viewer for {}", target.display()))?;

    info!("Opened {} in the default browser", target.display());
    Ok(())
}
