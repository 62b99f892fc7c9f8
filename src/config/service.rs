use serde::Deserialize;

use crate::config::provider::{PayloadConfig, ProviderConfig};
use crate::config::settings::SettingsConfig;

/// Top level of the optional YAML configuration file.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServiceConfig {
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub payload: PayloadConfig,
}
