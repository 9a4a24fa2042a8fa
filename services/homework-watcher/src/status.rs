//! Homework review statuses and the messages built from them

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{ShapeError, WatcherError};
use crate::state::Report;

pub const HOMEWORK_NAME_FIELD: &str = "homework_name";
pub const STATUS_FIELD: &str = "status";

/// Review status reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Human-readable verdict for this status
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeworkStatus::Approved => write!(f, "approved"),
            HomeworkStatus::Reviewing => write!(f, "reviewing"),
            HomeworkStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = WatcherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(WatcherError::UnknownStatus(other.to_string())),
        }
    }
}

/// A validated homework entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub homework_name: String,
    pub status: HomeworkStatus,
}

impl TryFrom<&Value> for StatusEntry {
    type Error = WatcherError;

    fn try_from(entry: &Value) -> crate::Result<Self> {
        let map = entry.as_object().ok_or(ShapeError::NotAMapping)?;

        let name = map
            .get(HOMEWORK_NAME_FIELD)
            .ok_or(WatcherError::MissingField(HOMEWORK_NAME_FIELD))?;
        let status = map
            .get(STATUS_FIELD)
            .ok_or(WatcherError::MissingField(STATUS_FIELD))?;

        let homework_name = name
            .as_str()
            .ok_or(WatcherError::InvalidField(HOMEWORK_NAME_FIELD))?
            .to_string();
        let status = match status {
            Value::String(code) => code.parse()?,
            other => return Err(WatcherError::UnknownStatus(other.to_string())),
        };

        Ok(Self {
            homework_name,
            status,
        })
    }
}

impl StatusEntry {
    /// The notification text for this entry
    pub fn message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.homework_name,
            self.status.verdict()
        )
    }
}

/// Build the report for a raw homework entry
pub fn parse_status(entry: &Value) -> crate::Result<Report> {
    let entry = StatusEntry::try_from(entry)?;
    tracing::debug!("Homework '{}' has status {}", entry.homework_name, entry.status);
    let message = entry.message();
    Ok(Report::new(entry.homework_name, message))
}
