//! Homework watcher CLI
//!
//! Command-line entry point for the homework review status poller.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use homework_watcher::{load_config, Config, Credentials};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-watcher")]
#[command(about = "Polls homework review status and reports changes to Telegram")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds to wait between polls (overrides config file)
    #[arg(long)]
    retry_period: Option<u64>,

    /// Initial from_date cursor, seconds since the epoch
    #[arg(long, default_value_t = 0)]
    from_date: i64,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,

    /// Also append log output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = homework_watcher::logging::init(args.log_level, args.log_file.as_deref()) {
        eprintln!("Failed to set up logging: {}", e);
        return ExitCode::FAILURE;
    }

    if let Err(e) = dotenv::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    tracing::debug!(
        "Parsed command line arguments: config={:?}, retry_period={:?}, from_date={}, log_level={:?}, log_file={:?}",
        args.config,
        args.retry_period,
        args.from_date,
        args.log_level,
        args.log_file
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(retry_period) = args.retry_period {
        config.retry_period_seconds = retry_period;
    }

    tracing::info!("Starting homework watcher");

    match homework_watcher::run(config, Credentials::from_env(), args.from_date).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Homework watcher stopped: {}", e);
            ExitCode::FAILURE
        }
    }
}
