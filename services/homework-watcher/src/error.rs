//! Error types for the homework watcher

/// Ways an API payload can fail the shape check
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("payload is not a JSON object")]
    NotAMapping,

    #[error("key '{0}' is missing")]
    MissingKey(&'static str),

    #[error("value under '{0}' has the wrong type")]
    WrongType(&'static str),
}

/// Errors that can occur in the homework watcher
#[derive(Debug, thiserror::Error)]
pub enum WatcherError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingTokens(Vec<String>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("API returned unexpected status code {0}")]
    UnexpectedStatus(u16),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected API response: {0}")]
    Shape(#[from] ShapeError),

    #[error("Homework entry has no '{0}' field")]
    MissingField(&'static str),

    #[error("Homework entry field '{0}' has the wrong type")]
    InvalidField(&'static str),

    #[error("Undocumented homework status: {0}")]
    UnknownStatus(String),

    #[error("API response contains no homeworks")]
    NoData,

    #[error("Failed to deliver message: {0}")]
    Delivery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WatcherError {
    /// Whether the process must stop instead of retrying next iteration
    pub fn is_fatal(&self) -> bool {
        matches!(self, WatcherError::MissingTokens(_))
    }
}

/// Result type alias for watcher operations
pub type Result<T> = std::result::Result<T, WatcherError>;
