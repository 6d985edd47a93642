//! Kattis-Historian main entry point
//!
//! This is the command-line interface for reconstructing a Kattis score history.

use clap::Parser;
use dialoguer::{Input, Password};
use kattis_historian::config::{load_config_with_hash, validate, Config};
use kattis_historian::history::run_history;
use kattis_historian::output::{csv_path_for, print_summary, write_timeline_csv, RunSummary};
use kattis_historian::session::Credentials;
use kattis_historian::HistorianError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Kattis-Historian: rebuild your Kattis score over time
///
/// Logs into Kattis, finds every problem you have solved, backdates each one
/// to its first accepted submission across all mirrors, and writes your
/// cumulative score per day to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "kattis-historian")]
#[command(version)]
#[command(about = "Rebuild a Kattis score history", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Kattis username or email (prompted if omitted)
    #[arg(short, long, env = "KATTIS_USERNAME")]
    username: Option<String>,

    /// CSV destination (defaults to <handle>.csv)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Mirror to search for submissions; repeat to replace the configured list
    #[arg(long = "mirror", value_name = "URL")]
    mirrors: Vec<String>,

    /// Show the effective configuration without logging in
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match load_effective_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_history(config, cli.username).await?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("kattis_historian=info,warn"),
            1 => EnvFilter::new("kattis_historian=debug,info"),
            2 => EnvFilter::new("kattis_historian=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (or defaults) and applies command-line overrides
fn load_effective_config(cli: &Cli) -> Result<Config, HistorianError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if !cli.mirrors.is_empty() {
        config.site.mirrors = cli.mirrors.clone();
    }
    if let Some(output) = &cli.output {
        config.output.csv_path = Some(output.display().to_string());
    }

    validate(&config)?;
    Ok(config)
}

/// Handles the --dry-run mode: shows what a run would do
fn handle_dry_run(config: &Config) {
    println!("=== Kattis-Historian Dry Run ===\n");

    println!("Site:");
    println!("  Login: {}", config.site.login_url);
    println!("  Problem listing: {}", config.site.problems_url);
    println!("  User agent: {}", config.site.user_agent);

    println!("\nMirrors ({}):", config.site.mirrors.len());
    for mirror in &config.site.mirrors {
        println!("  - {}", mirror);
    }

    println!("\nFetching:");
    println!("  Retries: {}", config.fetch.max_retries);
    println!("  Retry delay: {}ms", config.fetch.retry_delay_ms);
    println!("  Timeout: {}s", config.fetch.timeout_secs);
    println!(
        "  Concurrent problems: {}",
        config.fetch.max_concurrent_problems
    );
    println!("  Max pages per listing: {}", config.fetch.max_pages);

    println!("\nScoring:");
    println!("  Baseline: {}", config.scoring.baseline);

    println!("\nOutput:");
    match &config.output.csv_path {
        Some(path) => println!("  CSV: {}", path),
        None => println!("  CSV: <handle>.csv"),
    }

    println!("\n✓ Configuration is valid");
}

/// Prompts for anything missing from the command line or environment
fn read_credentials(username: Option<String>) -> Result<Credentials, HistorianError> {
    let username = match username {
        Some(username) => username,
        None => Input::<String>::new()
            .with_prompt("Username")
            .interact_text()?,
    };

    let password = match std::env::var("KATTIS_PASSWORD") {
        Ok(password) if !password.is_empty() => password,
        _ => Password::new().with_prompt("Password").interact()?,
    };

    Ok(Credentials::new(username, password))
}

/// Handles the main run: login, reconstruction, export
async fn handle_history(
    config: Config,
    username: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let credentials = read_credentials(username)?;

    let report = match run_history(&config, &credentials).await {
        Ok(report) => report,
        Err(HistorianError::Authentication(reason)) => {
            tracing::error!("Login failed! ({})", reason);
            return Err(HistorianError::Authentication(reason).into());
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            return Err(e.into());
        }
    };

    let path = csv_path_for(config.output.csv_path.as_deref(), &report.handle);
    tracing::info!("Writing {}", path.display());
    write_timeline_csv(&path, &report.timeline)?;

    print_summary(&RunSummary::from_report(&report));
    println!("✓ Score history written to: {}", path.display());

    Ok(())
}
