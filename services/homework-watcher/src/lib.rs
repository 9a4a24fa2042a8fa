//! Homework watcher - review status poller
//!
//! Polls the homework status API, detects status changes, and relays them to
//! a Telegram chat.

pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
pub mod notifier;
pub mod practicum;
pub mod response;
pub mod state;
pub mod status;
pub mod telegram;

pub use config::{load_config, Config, Credentials, Tokens};
pub use error::{Result, ShapeError, WatcherError};

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::engine::Engine;
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::notifier::Notifier;
use crate::practicum::PracticumClient;
use crate::telegram::TelegramNotifier;

/// Wire the API client and notifier around one shared HTTP client
pub fn build_engine(
    config: &Config,
    tokens: &Tokens,
    http: Arc<dyn HttpClient>,
    cancel: CancellationToken,
) -> Engine {
    let api = PracticumClient::new(&config.endpoint, &tokens.practicum_token, Arc::clone(&http));
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(
        &config.telegram_api_url,
        &tokens.telegram_token,
        http,
    ));

    Engine::new(
        api,
        notifier,
        &tokens.telegram_chat_id,
        Duration::from_secs(config.retry_period_seconds),
        cancel,
    )
}

/// Poll with already checked tokens until `cancel` is triggered
pub async fn run_engine(
    config: &Config,
    tokens: &Tokens,
    from_date: i64,
    http: Arc<dyn HttpClient>,
    cancel: CancellationToken,
) {
    let mut engine = build_engine(config, tokens, http, cancel).with_cursor(from_date);
    tracing::info!(
        "Watching homework statuses every {}s from {}",
        config.retry_period_seconds,
        from_date
    );

    engine.run().await;
    tracing::info!("Homework watcher stopped");
}

/// Check credentials, then poll until `cancel` is triggered.
///
/// Missing credentials are returned before `http` is ever used.
pub async fn run_with_client(
    config: Config,
    credentials: Credentials,
    from_date: i64,
    http: Arc<dyn HttpClient>,
    cancel: CancellationToken,
) -> Result<()> {
    let tokens = credentials.check_tokens()?;
    run_engine(&config, &tokens, from_date, http, cancel).await;
    Ok(())
}

/// Run the homework watcher with the given configuration.
///
/// Credentials are checked before the HTTP client or the signal listener
/// exist.
pub async fn run(config: Config, credentials: Credentials, from_date: i64) -> Result<()> {
    let tokens = credentials.check_tokens()?;

    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::with_timeout(
        Duration::from_secs(config.request_timeout_seconds),
    )?);
    let cancel = CancellationToken::new();

    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                cancel_for_signal.cancel();
            }
            Err(e) => tracing::error!("Failed to listen for ctrl-c: {}", e),
        }
    });

    run_engine(&config, &tokens, from_date, http, cancel).await;
    Ok(())
}
