//! Configuration validation with aggregated errors.
//! Every issue is collected so one startup attempt reports all of them.

use reqwest::Url;
use tracing::error;

use crate::config::provider::{PayloadConfig, ProviderConfig};
use crate::config::service::ServiceConfig;
use crate::config::settings::SettingsConfig;
use crate::observability::metrics::get_metrics;

/// Returns Ok(()) or Err(Vec<String>) containing all issues.
pub async fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_settings(&cfg.settings, &mut errors);
    validate_provider(&cfg.provider, &mut errors);
    validate_payload(&cfg.payload, &mut errors);

    if errors.is_empty() {
        return Ok(());
    }
    for e in &errors {
        error!(" - {}", e);
    }
    get_metrics().await.config_validation_errors.inc();
    Err(errors)
}

fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if settings.server.host.is_empty() {
        errors.push("settings.server.host must not be empty".to_string());
    }

    if settings.http.timeout_ms == 0 {
        errors.push("settings.http.timeout_ms must be greater than 0".to_string());
    }

    let metrics = &settings.metrics;
    if !metrics.path.starts_with('/') {
        errors.push(format!(
            "settings.metrics.path '{}' must start with '/'",
            metrics.path
        ));
    }
    if metrics.is_enabled && metrics.path == "/" {
        errors.push("settings.metrics.path must not shadow the relay route '/'".to_string());
    }

    if let Some(logging) = &settings.logging {
        let valid = ["trace", "debug", "info", "warn", "error"];
        if !valid.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' invalid; allowed: {:?}",
                logging.level, valid
            ));
        }
    }
}

fn validate_provider(provider: &ProviderConfig, errors: &mut Vec<String>) {
    validate_http_url("provider.token_uri", &provider.token_uri, errors);
    validate_http_url("provider.send_base_url", &provider.send_base_url, errors);

    if provider.scope.trim().is_empty() {
        errors.push("provider.scope must not be empty".to_string());
    }
    if provider.token_file.trim().is_empty() {
        errors.push("provider.token_file must not be empty".to_string());
    }
}

fn validate_payload(payload: &PayloadConfig, errors: &mut Vec<String>) {
    if payload.android_icon.trim().is_empty() {
        errors.push("payload.android_icon must not be empty".to_string());
    }
    for key in payload.data.keys() {
        if key.trim().is_empty() {
            errors.push("payload.data keys must not be empty".to_string());
        }
    }
}

fn validate_http_url(field: &str, value: &str, errors: &mut Vec<String>) {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(format!(
            "{} '{}' has unsupported scheme '{}'",
            field,
            value,
            url.scheme()
        )),
        Err(e) => errors.push(format!("{} '{}' is not a valid URL: {}", field, value, e)),
    }
}
