use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::routing::post;
use axum::Router;
use reqwest::Client;
use tokio::select;
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

use crate::cache::token_cache::TokenFileCache;
use crate::config::credential::Credential;
use crate::config::service::ServiceConfig;
use crate::config::settings::HttpClientConfig;
use crate::notify::NotificationForwarder;
use crate::observability::metrics::{get_metrics, Metrics};
use crate::observability::routes::MetricsState;
use crate::server::relay::{relay_notification, RelayState};
use crate::sources::ServiceAccountIssuer;

#[derive(Clone)]
pub struct AppState {
    pub metrics_state: MetricsState,
    pub relay_state: RelayState,
}

impl AppState {
    pub fn new(
        metrics: &Metrics,
        service_config: &ServiceConfig,
        credential: Arc<Credential>,
        client: Client,
    ) -> Self {
        let provider = &service_config.provider;
        let cache = TokenFileCache::new(PathBuf::from(&provider.token_file));
        let issuer = ServiceAccountIssuer::new(
            credential.clone(),
            provider.token_uri.clone(),
            client.clone(),
        );
        let forwarder = NotificationForwarder::new(
            &provider.send_base_url,
            &credential.project_id,
            Arc::new(service_config.payload.clone()),
            client,
        );

        Self {
            metrics_state: MetricsState::new(metrics.registry.clone()),
            relay_state: RelayState::new(cache, issuer, forwarder),
        }
    }
}

/// Shared client for both outbound calls, bounded by the configured timeout.
pub fn build_http_client(http: &HttpClientConfig) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_millis(http.timeout_ms))
        .build()
}

pub fn router(state: AppState, service_config: &ServiceConfig) -> Router {
    Router::new()
        .route("/", post(relay_notification))
        .merge(state.metrics_state.router(&service_config.settings.metrics))
        .with_state(state)
}

/// Bind the configured address and serve until SIGINT or SIGTERM.
pub async fn start(service_config: &ServiceConfig, credential: Arc<Credential>) -> Result<()> {
    let metrics = get_metrics().await;
    let client = build_http_client(&service_config.settings.http)
        .context("failed to build http client")?;
    let state = AppState::new(metrics, service_config, credential, client);
    let app = router(state, service_config);

    let bind_addr = &service_config.settings.server.host;
    let port = service_config.settings.server.port;
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", bind_addr, port))
        .await
        .with_context(|| format!("failed to bind {}:{}", bind_addr, port))?;
    info!("listening on http://{}:{}", bind_addr, port);

    metrics.up.set(1);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    metrics.up.set(0);

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let (mut sigint, mut sigterm) = match (
        signal(SignalKind::interrupt()),
        signal(SignalKind::terminate()),
    ) {
        (Ok(sigint), Ok(sigterm)) => (sigint, sigterm),
        _ => {
            // no signal handlers, serve until the process is killed
            std::future::pending::<()>().await;
            return;
        }
    };
    select! {
        _ = sigint.recv() => {
            info!("Received SIGINT (Ctrl+C). Initiating graceful shutdown...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM. Initiating graceful shutdown...");
        }
    }
}
