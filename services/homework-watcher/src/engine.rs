//! Engine: polls the status API, detects changes, and dispatches messages

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::WatcherError;
use crate::notifier::{Notification, Notifier};
use crate::practicum::PracticumClient;
use crate::response::check_response;
use crate::state::{Report, TrackerState, FAILURE_WARN_THRESHOLD};
use crate::status::parse_status;

/// What happened to the report produced by one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The report was new and was delivered
    Notified,
    /// The report matched the last delivered one
    Unchanged,
    /// The report was new but delivery failed
    DeliveryFailed,
}

/// The engine drives the poll/notify loop for a single homework
#[derive(Debug)]
pub struct Engine {
    api: PracticumClient,
    notifier: Arc<dyn Notifier>,
    chat_id: String,
    retry_period: Duration,
    cursor: i64,
    state: TrackerState,
    cancel: CancellationToken,
}

impl Engine {
    pub fn new(
        api: PracticumClient,
        notifier: Arc<dyn Notifier>,
        chat_id: &str,
        retry_period: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            api,
            notifier,
            chat_id: chat_id.to_string(),
            retry_period,
            cursor: 0,
            state: TrackerState::new(),
            cancel,
        }
    }

    /// Start from `cursor` instead of the full history
    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Run iterations until the cancellation token is triggered.
    ///
    /// The sleep follows every iteration regardless of its outcome.
    pub async fn run(&mut self) {
        loop {
            self.run_iteration().await;

            tokio::select! {
                _ = tokio::time::sleep(self.retry_period) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
    }

    /// Poll once and deliver the resulting report if it is new.
    ///
    /// Failures become error reports, so nothing escapes this call.
    pub async fn run_iteration(&mut self) -> Outcome {
        let report = match self.poll().await {
            Ok(report) => {
                self.state.record_success();
                report
            }
            Err(e) => {
                tracing::error!("Iteration failed: {}", e);
                let failures = self.state.record_failure();
                if failures == FAILURE_WARN_THRESHOLD {
                    tracing::warn!("{} consecutive iterations have failed", failures);
                }
                Report::from_error(&e)
            }
        };

        if !self.state.observe(report.clone()) {
            tracing::debug!("Report for '{}' unchanged, not notifying", report.name);
            return Outcome::Unchanged;
        }

        self.deliver(&report).await
    }

    /// Fetch and validate the latest status, advancing the cursor
    pub async fn poll(&mut self) -> crate::Result<Report> {
        let payload = self.api.fetch_status(self.cursor).await?;
        let response = check_response(&payload)?;

        if let Some(next) = response.next_cursor() {
            tracing::debug!("Advancing cursor {} -> {}", self.cursor, next);
            self.cursor = next;
        }

        let latest = response.latest().ok_or(WatcherError::NoData)?;
        parse_status(latest)
    }

    async fn deliver(&mut self, report: &Report) -> Outcome {
        let notification = Notification {
            chat_id: self.chat_id.clone(),
            text: report.message.clone(),
        };

        match self.notifier.notify(&notification).await {
            Ok(()) => {
                tracing::info!(
                    "Sent message via '{}': {}",
                    self.notifier.type_name(),
                    notification.text
                );
                self.state.mark_notified();
                Outcome::Notified
            }
            Err(e) => {
                tracing::warn!(
                    "Notification via '{}' failed: {}",
                    self.notifier.type_name(),
                    e
                );
                Outcome::DeliveryFailed
            }
        }
    }
}
