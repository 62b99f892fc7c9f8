use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE
        .get_or_init(|| async {
            info!("Initializing Metrics ...");
            Metrics::new().expect("metric definitions are static and unique")
        })
        .await
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Relay endpoint
    pub relay_requests: IntCounterVec,
    pub relay_duration: HistogramVec,

    // Token cache
    pub token_cache_hits: IntCounter,
    pub token_cache_misses: IntCounter,
    pub token_cache_write_failures: IntCounter,

    // Token issuance
    pub token_issuances: IntCounter,
    pub token_issuance_failures: IntCounterVec,
    pub token_expiry_unix_ms: IntGauge,

    // Provider send
    pub provider_send_failures: IntCounterVec,
    pub provider_send_duration: HistogramVec,

    // Config/runtime
    pub config_parse_failures: IntCounter,
    pub config_validation_errors: IntCounter,
    pub up: IntGauge,
}

impl Metrics {
    fn new() -> prometheus::Result<Arc<Self>> {
        let registry = Registry::new_custom(Some("fcmrelay".into()), None)?;

        let buckets = vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];

        let metrics: Arc<Metrics> = Arc::new(Self {
            relay_requests: IntCounterVec::new(
                Opts::new("relay_requests_total", "Relay requests by outcome"),
                &["outcome"],
            )?,
            relay_duration: HistogramVec::new(
                HistogramOpts::new("relay_duration_seconds", "Relay request duration seconds")
                    .buckets(buckets.clone()),
                &["outcome"],
            )?,

            token_cache_hits: IntCounter::new(
                "token_cache_hits_total",
                "Requests served with a cached token",
            )?,
            token_cache_misses: IntCounter::new(
                "token_cache_misses_total",
                "Requests that found no usable cached token",
            )?,
            token_cache_write_failures: IntCounter::new(
                "token_cache_write_failures_total",
                "Failed token file writes",
            )?,

            token_issuances: IntCounter::new(
                "token_issuances_total",
                "Successful service account token exchanges",
            )?,
            token_issuance_failures: IntCounterVec::new(
                Opts::new("token_issuance_failures_total", "Token exchange failures by reason"),
                &["reason"],
            )?,
            token_expiry_unix_ms: IntGauge::new(
                "token_expiry_unix_milliseconds",
                "Expiry of the last issued token",
            )?,

            provider_send_failures: IntCounterVec::new(
                Opts::new("provider_send_failures_total", "Notification send failures by reason"),
                &["reason"],
            )?,
            provider_send_duration: HistogramVec::new(
                HistogramOpts::new(
                    "provider_send_duration_seconds",
                    "Notification send duration seconds",
                )
                .buckets(buckets),
                &["status"],
            )?,

            config_parse_failures: IntCounter::new(
                "config_parse_failures_total",
                "Config file parse failures",
            )?,
            config_validation_errors: IntCounter::new(
                "config_validation_errors_total",
                "Validation errors during startup",
            )?,
            up: IntGauge::new("up", "1 if service is healthy")?,

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.relay_requests.clone()))?;
        reg.register(Box::new(metrics.relay_duration.clone()))?;
        reg.register(Box::new(metrics.token_cache_hits.clone()))?;
        reg.register(Box::new(metrics.token_cache_misses.clone()))?;
        reg.register(Box::new(metrics.token_cache_write_failures.clone()))?;
        reg.register(Box::new(metrics.token_issuances.clone()))?;
        reg.register(Box::new(metrics.token_issuance_failures.clone()))?;
        reg.register(Box::new(metrics.token_expiry_unix_ms.clone()))?;
        reg.register(Box::new(metrics.provider_send_failures.clone()))?;
        reg.register(Box::new(metrics.provider_send_duration.clone()))?;
        reg.register(Box::new(metrics.config_parse_failures.clone()))?;
        reg.register(Box::new(metrics.config_validation_errors.clone()))?;
        reg.register(Box::new(metrics.up.clone()))?;

        Ok(metrics)
    }
}
