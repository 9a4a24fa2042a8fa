//! Reports and the duplicate-suppression state between iterations

use crate::error::WatcherError;

/// Message sent when an iteration fails
pub const FAILURE_MESSAGE: &str = "Сбой в работе программы";

/// Consecutive failed iterations after which a warning is logged
pub const FAILURE_WARN_THRESHOLD: u32 = 5;

/// Distilled outcome of one iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub name: String,
    pub message: String,
}

impl Report {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Report standing in for a failed iteration
    pub fn from_error(error: &WatcherError) -> Self {
        Self::new(error.to_string(), FAILURE_MESSAGE)
    }
}

/// Whether `current` differs from the last report that was delivered
pub fn should_notify(current: &Report, previous: Option<&Report>) -> bool {
    previous != Some(current)
}

/// Current and last-delivered reports
#[derive(Debug, Default)]
pub struct TrackerState {
    current: Option<Report>,
    previous: Option<Report>,
    consecutive_failures: u32,
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store this iteration's report, returning true if it should be delivered
    pub fn observe(&mut self, report: Report) -> bool {
        let changed = should_notify(&report, self.previous.as_ref());
        self.current = Some(report);
        changed
    }

    /// Promote the current report after it was delivered
    pub fn mark_notified(&mut self) {
        if let Some(current) = &self.current {
            self.previous = Some(current.clone());
        }
    }

    pub fn current(&self) -> Option<&Report> {
        self.current.as_ref()
    }

    pub fn previous(&self) -> Option<&Report> {
        self.previous.as_ref()
    }

    /// Count a failed iteration and return the new streak length
    pub fn record_failure(&mut self) -> u32 {
        self.consecutive_failures += 1;
        self.consecutive_failures
    }

    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }
}
