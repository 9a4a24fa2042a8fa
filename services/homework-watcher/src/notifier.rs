//! Notifier trait for delivering messages

use async_trait::async_trait;

/// A message to be delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub chat_id: String,
    pub text: String,
}

/// Trait for sending notifications.
///
/// Implementations report every failure as `WatcherError::Delivery`.
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send a notification
    async fn notify(&self, notification: &Notification) -> crate::Result<()>;
}
