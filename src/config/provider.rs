use std::collections::BTreeMap;

use serde::Deserialize;

use crate::utils::constants::{
    CLOUD_PLATFORM_SCOPE, DEFAULT_ANDROID_ICON, DEFAULT_TOKEN_FILE, FCM_BASE_URL, GOOGLE_TOKEN_URI,
};

/// Where tokens come from and where notifications go.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// OAuth2 token endpoint, also the `aud` claim of the assertion.
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default = "default_scope")]
    pub scope: String,
    /// Scheme and host of the FCM API; the per-project path is appended.
    #[serde(default = "default_send_base_url")]
    pub send_base_url: String,
    /// Token cache record, relative to the working directory unless absolute.
    #[serde(default = "default_token_file")]
    pub token_file: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            token_uri: default_token_uri(),
            scope: default_scope(),
            send_base_url: default_send_base_url(),
            token_file: default_token_file(),
        }
    }
}

/// Static parts of every outgoing message.
#[derive(Debug, Deserialize, Clone)]
pub struct PayloadConfig {
    #[serde(default = "default_android_icon")]
    pub android_icon: String,
    /// Attached as `message.data` to every notification.
    #[serde(default = "default_data")]
    pub data: BTreeMap<String, String>,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self { android_icon: default_android_icon(), data: default_data() }
    }
}

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URI.to_owned()
}

fn default_scope() -> String {
    CLOUD_PLATFORM_SCOPE.to_owned()
}

fn default_send_base_url() -> String {
    FCM_BASE_URL.to_owned()
}

fn default_token_file() -> String {
    DEFAULT_TOKEN_FILE.to_owned()
}

fn default_android_icon() -> String {
    DEFAULT_ANDROID_ICON.to_owned()
}

fn default_data() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("key1".to_owned(), "valor1".to_owned()),
        ("key2".to_owned(), "valor2".to_owned()),
    ])
}
