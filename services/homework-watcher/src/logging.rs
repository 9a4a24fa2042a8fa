//! Log output to stdout and an optional append-only file

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::{Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::WatcherError;

/// Open `path` for appending, creating it if needed
pub fn open_log_file(path: &Path) -> crate::Result<File> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

/// Subscriber writing to stdout and, when given, to `file` without colors
pub fn subscriber(level: Level, file: Option<File>) -> impl Subscriber + Send + Sync {
    let file_layer = file.map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(fmt::layer())
        .with(file_layer)
}

/// Install the global subscriber
pub fn init(level: Level, log_file: Option<&Path>) -> crate::Result<()> {
    let file = log_file.map(open_log_file).transpose()?;
    subscriber(level, file)
        .try_init()
        .map_err(|e| WatcherError::Config(format!("Installing log subscriber: {}", e)))
}
