use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use share_data_service::config::AppConfig;
use share_data_service::ingest;
use share_data_service::server;
use share_data_service::storage::FsStore;

#[derive(Parser)]
#[command(name = "share-data-service", about = "Unit share price upload & query service", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve,

    /// Parse and validate a CSV file without starting the server
    Check {
        /// Path to the CSV file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "share_data_service=info,warn",
        1 => "share_data_service=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load()?;

    match cli.command {
        Command::Serve => {
            let store = Arc::new(FsStore::new(
                &config.storage.upload_dir,
                &config.storage.file_name,
            ));
            info!("Storing uploads at {:?}", store.path());

            let app = server::router(store);
            let listener = tokio::net::TcpListener::bind(config.server.bind_addr)
                .await
                .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;
            info!("Listening on http://{}", listener.local_addr()?);

            axum::serve(listener, app).await.context("Server error")?;
            Ok(ExitCode::SUCCESS)
        }

        Command::Check { file } => {
            let raw = std::fs::read(&file).with_context(|| format!("Could not read {:?}", file))?;
            let (passed, report) = run_check(&raw)?;
            println!("{report}");
            Ok(if passed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
    }
}

/// The `check` subcommand body: parse, run the minimum-data checks, and
/// produce the pass flag plus the text printed to the user. Failing checks
/// report the rule comments; parse failures propagate as errors.
fn run_check(raw: &[u8]) -> Result<(bool, String)> {
    let records = ingest::parse_share_data(raw)?;
    let check = ingest::check_minimum_requirements(&records);

    if check.passed {
        Ok((true, format!("OK: {} rows, all checks passed", records.len())))
    } else {
        Ok((false, check.comments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_for(units: &[&str], days: usize) -> String {
        let mut out = String::from("unitID,date,unitPrice\n");
        for unit in units {
            for d in 0..days {
                out.push_str(&format!("{},2024-01-{:02},1.5\n", unit, d + 1));
            }
        }
        out
    }

    #[test]
    fn test_check_passes_valid_file() {
        let csv = csv_for(&["A", "B", "C"], 7);
        let (passed, report) = run_check(csv.as_bytes()).unwrap();
        assert!(passed);
        assert_eq!(report, "OK: 21 rows, all checks passed");
    }

    #[test]
    fn test_check_fails_with_rule_comments() {
        let csv = csv_for(&["A", "B"], 3);
        let (passed, report) = run_check(csv.as_bytes()).unwrap();
        assert!(!passed);
        assert!(report.contains("3 or more units"));
        assert!(report.contains("Minimum 7 days"));
    }

    #[test]
    fn test_check_propagates_parse_errors() {
        let err = run_check(b"unitID,date,unitPrice\nA,junk,1.0\n").unwrap_err();
        assert!(err.to_string().contains("junk"));
    }
}
