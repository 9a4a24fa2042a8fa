//! Telegram Bot API notification client

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::WatcherError;
use crate::io::HttpClient;
use crate::notifier::{Notification, Notifier};

/// Sends messages through a Telegram bot
pub struct TelegramNotifier {
    send_message_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier").finish_non_exhaustive()
    }
}

impl TelegramNotifier {
    pub fn new(api_url: &str, bot_token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created TelegramNotifier for {}", api_url);
        Self {
            send_message_url: format!(
                "{}/bot{}/sendMessage",
                api_url.trim_end_matches('/'),
                bot_token
            ),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, notification: &Notification) -> crate::Result<()> {
        tracing::debug!("Sending Telegram message to chat {}", notification.chat_id);

        let params = [
            ("chat_id", notification.chat_id.as_str()),
            ("text", notification.text.as_str()),
        ];

        let response = self
            .http
            .post_form(&self.send_message_url, &params)
            .await
            .map_err(|e| WatcherError::Delivery(e.to_string()))?;

        if response.status != 200 {
            return Err(WatcherError::Delivery(format!(
                "Telegram API returned status {}: {}",
                response.status, response.body
            )));
        }

        tracing::debug!("Telegram message sent successfully");
        Ok(())
    }
}
