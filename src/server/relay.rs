use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::cache::token_cache::TokenFileCache;
use crate::errors::RelayError;
use crate::notify::{NotificationForwarder, NotificationRequest, ProviderResponse};
use crate::observability::metrics::get_metrics;
use crate::server::response;
use crate::server::server::AppState;
use crate::sources::ServiceAccountIssuer;

/// Everything `POST /` needs: token cache, issuer and forwarder.
#[derive(Debug, Clone)]
pub struct RelayState {
    pub cache: TokenFileCache,
    pub issuer: ServiceAccountIssuer,
    pub forwarder: NotificationForwarder,
}

impl RelayState {
    pub fn new(
        cache: TokenFileCache,
        issuer: ServiceAccountIssuer,
        forwarder: NotificationForwarder,
    ) -> Self {
        Self { cache, issuer, forwarder }
    }

    /// Validates the request, resolves a bearer token and forwards the notification.
    /// Validation runs first so rejected requests never reach the provider.
    pub async fn relay(
        &self,
        headers: &HeaderMap,
        body: &[u8],
    ) -> Result<ProviderResponse, RelayError> {
        let device_token = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
        let notification = NotificationRequest::decode(body)?.validate(device_token)?;

        let bearer_token = self.bearer_token().await?;
        self.forwarder.forward(&notification, &bearer_token).await
    }

    /// Cached token if still valid, otherwise a freshly issued one that is
    /// persisted before use.
    pub async fn bearer_token(&self) -> Result<String, RelayError> {
        let metrics = get_metrics().await;
        if let Some(token) = self.cache.load().await {
            debug!("using cached token");
            metrics.token_cache_hits.inc();
            return Ok(token);
        }
        metrics.token_cache_misses.inc();

        let issued = self.issuer.issue().await?;
        self.cache
            .save(&issued.access_token, issued.expires_at)
            .await
            .inspect_err(|e| {
                error!("failed to persist token: {}", e);
                metrics.token_cache_write_failures.inc();
            })?;
        Ok(issued.access_token)
    }
}

/// Handler for `POST /`.
pub async fn relay_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let metrics = get_metrics().await;
    let start = Instant::now();

    let result = state.relay_state.relay(&headers, &body).await;
    let outcome = match &result {
        Ok(_) => "success",
        Err(e) => e.reason(),
    };
    metrics.relay_requests.with_label_values(&[outcome]).inc();
    metrics
        .relay_duration
        .with_label_values(&[outcome])
        .observe(start.elapsed().as_secs_f64());

    match result {
        Ok(provider_response) => {
            info!("relay succeeded, provider status {}", provider_response.status);
            response::sent()
        }
        Err(e) => {
            if e.status_code().is_client_error() {
                warn!("relay rejected: {}", e);
            } else {
                error!("relay failed: {}", e);
            }
            e.into_response()
        }
    }
}
