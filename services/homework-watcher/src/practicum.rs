//! Client for the homework status API

use std::sync::Arc;

use serde_json::Value;

use crate::error::WatcherError;
use crate::io::HttpClient;

/// Fetches raw status payloads for the token's owner
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(endpoint: &str, token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", endpoint);
        Self {
            endpoint: endpoint.to_string(),
            authorization: format!("OAuth {}", token),
            http,
        }
    }

    /// Fetch statuses changed since `from_date` (seconds since the epoch).
    ///
    /// The body is decoded but its shape is not checked here.
    pub async fn fetch_status(&self, from_date: i64) -> crate::Result<Value> {
        let from_date = from_date.to_string();
        tracing::debug!(
            "Requesting {} with from_date={}",
            self.endpoint,
            from_date
        );

        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.authorization.as_str())],
                &[("from_date", from_date.as_str())],
            )
            .await?;

        if response.status != 200 {
            tracing::debug!("API body for status {}: {}", response.status, response.body);
            return Err(WatcherError::UnexpectedStatus(response.status));
        }

        tracing::debug!("Received API response");
        Ok(serde_json::from_str(&response.body)?)
    }
}
