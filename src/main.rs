//! flake-tracker - Main entry point.
//!
//! Collects TestGrid status for the configured tab groups and writes the
//! report to stdout. Logs go to stderr.
//!
//! Usage:
//!   flake-tracker [--group <tab-group>]...

use std::env;
use std::io;

use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use flake_tracker_lib::config::{Config, LogFormat};
use flake_tracker_lib::services::{TestGridClient, run_all, write_report};

fn print_usage() {
    eprintln!("Usage: flake-tracker [--group <tab-group>]...");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -g, --group <name>  Tab group to collect (repeatable, overrides FT_TAB_GROUPS)");
    eprintln!("  -h, --help          Show this help");
}

/// Initialize logging to stderr.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    let result = match format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish()),
    };
    result.expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();
    let mut groups = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--group" | "-g" => {
                i += 1;
                match args.get(i) {
                    Some(group) => groups.push(group.clone()),
                    None => {
                        eprintln!("--group requires a value");
                        print_usage();
                        std::process::exit(2);
                    }
                }
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(2);
            }
        }
        i += 1;
    }

    let mut config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(2);
        }
    };
    if !groups.is_empty() {
        config.tab_groups = groups;
    }

    init_tracing(config.log_format);

    info!(
        "Collecting {} tab group(s) from {}: {}",
        config.tab_groups.len(),
        config.base_url,
        config.tab_groups.join(", ")
    );

    let client = match TestGridClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    let summary = run_all(&client, &config).await;

    let rows: Vec<_> = summary.rows().cloned().collect();
    let mut stdout = io::stdout().lock();
    if let Err(e) = write_report(&rows, &mut stdout) {
        error!("Failed to write report: {}", e);
        std::process::exit(1);
    }

    for failure in summary.job_failures() {
        warn!(
            job = %failure.job,
            status = %failure.status,
            url = %failure.url(),
            "Missing test details: {}",
            failure.error
        );
    }

    info!(
        rows = rows.len(),
        groups = summary.reports.len(),
        failed_groups = summary.failed_groups.len(),
        failed_jobs = summary.job_failures().count(),
        "Collection finished"
    );

    std::process::exit(summary.exit_code());
}
