use std::sync::Arc;

use reqwest::Client;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::config::provider::PayloadConfig;
use crate::errors::RelayError;
use crate::notify::payload::FcmMessage;
use crate::notify::request::Notification;
use crate::observability::metrics::get_metrics;

/// Successful answer of the send endpoint.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct NotificationForwarder {
    send_url: String,
    payload: Arc<PayloadConfig>,
    client: Client,
}

impl NotificationForwarder {
    pub fn new(
        send_base_url: &str,
        project_id: &str,
        payload: Arc<PayloadConfig>,
        client: Client,
    ) -> Self {
        Self {
            send_url: send_url(send_base_url, project_id),
            payload,
            client,
        }
    }

    /// Sends one message to the device in `notification`, authorized with `bearer_token`.
    pub async fn forward(
        &self,
        notification: &Notification,
        bearer_token: &str,
    ) -> Result<ProviderResponse, RelayError> {
        let metrics = get_metrics().await;
        let start = Instant::now();
        let message = FcmMessage::build(notification, &self.payload);

        let response = self
            .client
            .post(&self.send_url)
            .bearer_auth(bearer_token)
            .json(&message)
            .send()
            .await
            .inspect_err(|e| {
                warn!("send request to '{}' failed: {}", self.send_url, e);
                metrics.provider_send_failures.with_label_values(&["transport"]).inc();
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        metrics
            .provider_send_duration
            .with_label_values(&[status.as_str()])
            .observe(start.elapsed().as_secs_f64());

        if !status.is_success() {
            warn!("provider rejected notification: {} {}", status, body);
            metrics.provider_send_failures.with_label_values(&["status"]).inc();
            return Err(RelayError::SendProvider { status: status.as_u16(), body });
        }

        info!("notification delivered to provider, status {}", status);
        Ok(ProviderResponse { status: status.as_u16(), body })
    }
}

pub fn send_url(base_url: &str, project_id: &str) -> String {
    format!(
        "{}/v1/projects/{}/messages:send",
        base_url.trim_end_matches('/'),
        project_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_url_is_scoped_to_project() {
        assert_eq!(
            send_url("https://fcm.googleapis.com/", "my-app"),
            "https://fcm.googleapis.com/v1/projects/my-app/messages:send"
        );
    }
}
