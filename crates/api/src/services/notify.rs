//! Notification delivery to the tenant-configured endpoint.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use domain::services::NotificationPayload;

/// Notification delivery timeout in seconds.
const NOTIFY_TIMEOUT_SECS: u64 = 5;

/// Errors from notification delivery.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("notification endpoint returned status {0}")]
    Status(u16),
}

/// Sends a structured alert notification to a delivery endpoint.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, target_url: &str, payload: &NotificationPayload)
        -> Result<(), NotifyError>;
}

/// Webhook-POST notifier.
pub struct WebhookNotifier {
    client: Client,
}

impl WebhookNotifier {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(NOTIFY_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(
        &self,
        target_url: &str,
        payload: &NotificationPayload,
    ) -> Result<(), NotifyError> {
        let response = self.client.post(target_url).json(payload).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(NotifyError::Status(status.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_error_display() {
        assert_eq!(
            format!("{}", NotifyError::Status(503)),
            "notification endpoint returned status 503"
        );
    }
}
