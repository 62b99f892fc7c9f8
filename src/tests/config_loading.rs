#[cfg(test)]
mod tests {
    use std::fs;

    use serial_test::serial;
    use tempfile::tempdir;

    use crate::config::proc_loader::{expand_env_vars, file_to_config, parse_config};
    use crate::config::settings::LogFormat;
    use crate::utils::constants::{
        CLOUD_PLATFORM_SCOPE, DEFAULT_PORT, DEFAULT_TOKEN_FILE, FCM_BASE_URL, GOOGLE_TOKEN_URI,
    };

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let service_config = file_to_config(&dir.path().join("absent.yaml")).await.unwrap();

        assert_eq!(service_config.settings.server.port, DEFAULT_PORT);
        assert_eq!(service_config.provider.token_uri, GOOGLE_TOKEN_URI);
        assert_eq!(service_config.provider.scope, CLOUD_PLATFORM_SCOPE);
        assert_eq!(service_config.provider.send_base_url, FCM_BASE_URL);
        assert_eq!(service_config.provider.token_file, DEFAULT_TOKEN_FILE);
        assert_eq!(service_config.payload.android_icon, "ic_shortcut_icone");
        assert_eq!(service_config.payload.data.len(), 2);
        assert!(!service_config.settings.metrics.is_enabled);

        let logging = service_config.settings.logging.unwrap();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, LogFormat::Compact);
    }

    #[tokio::test]
    async fn empty_document_yields_defaults() {
        let service_config = parse_config(String::new()).await.unwrap();
        assert_eq!(service_config.settings.http.timeout_ms, 5000);
    }

    #[tokio::test]
    #[serial]
    async fn file_values_and_env_expansion_are_applied() {
        std::env::set_var("FCM_RELAY_TEST_PORT", "8081");
        std::env::remove_var("FCM_RELAY_TEST_UNSET");

        let dir = tempdir().unwrap();
        let path = dir.path().join("fcm-relay.yaml");
        fs::write(
            &path,
            r#"
settings:
  server:
    host: 127.0.0.1
    port: ${FCM_RELAY_TEST_PORT}
  http:
    timeout_ms: 2500
  metrics:
    is_enabled: true
  logging:
    level: debug
    format: json
provider:
  token_file: ${FCM_RELAY_TEST_UNSET:/var/lib/fcm-relay/token.json}
payload:
  android_icon: ic_custom
  data:
    origin: relay
"#,
        )
        .unwrap();

        let service_config = file_to_config(&path).await.unwrap();
        std::env::remove_var("FCM_RELAY_TEST_PORT");

        assert_eq!(service_config.settings.server.host, "127.0.0.1");
        assert_eq!(service_config.settings.server.port, 8081);
        assert_eq!(service_config.settings.http.timeout_ms, 2500);
        assert!(service_config.settings.metrics.is_enabled);
        assert_eq!(service_config.settings.metrics.path, "/metrics");
        assert_eq!(service_config.settings.logging.unwrap().format, LogFormat::Json);
        assert_eq!(service_config.provider.token_file, "/var/lib/fcm-relay/token.json");
        assert_eq!(service_config.provider.token_uri, GOOGLE_TOKEN_URI);
        assert_eq!(service_config.payload.android_icon, "ic_custom");
        assert_eq!(service_config.payload.data.get("origin").map(String::as_str), Some("relay"));
    }

    #[tokio::test]
    async fn invalid_config_reports_all_errors() {
        let invalid_yaml = r#"
settings:
  http:
    timeout_ms: 0
  metrics:
    path: metrics
  logging:
    level: loud
provider:
  token_uri: not a url
  send_base_url: ftp://fcm.example
"#;
        let err = parse_config(invalid_yaml.to_owned()).await.unwrap_err().to_string();

        assert!(err.contains("config is not valid, total errors:5"), "{}", err);
        assert!(err.contains("settings.http.timeout_ms"));
        assert!(err.contains("settings.metrics.path"));
        assert!(err.contains("settings.logging.level"));
        assert!(err.contains("provider.token_uri"));
        assert!(err.contains("provider.send_base_url"));
    }

    #[tokio::test]
    async fn unparseable_yaml_is_rejected() {
        let result = parse_config("settings: [".to_owned()).await;
        assert!(result.is_err());
    }

    #[test]
    fn expansion_keeps_text_without_placeholders() {
        assert_eq!(expand_env_vars("port: 3000"), "port: 3000");
        assert_eq!(
            expand_env_vars("token_file: ${FCM_RELAY_NEVER_SET:token.json}"),
            "token_file: token.json"
        );
    }
}
