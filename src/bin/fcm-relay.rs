use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use fcm_relay::config::credential::Credential;
use fcm_relay::server;
use fcm_relay::utils::config_loader;
use fcm_relay::utils::constants::DEFAULT_CONFIG_PATH;
use fcm_relay::utils::logging;
use fcm_relay::utils::logging::LogLevel;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// overrides settings.server.port
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
    /// overrides provider.token_file
    #[arg(long, env = "TOKEN_FILE")]
    token_file: Option<String>,

    // service account
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,
    #[arg(long, env = "CLIENT_EMAIL")]
    client_email: Option<String>,
    #[arg(long, env = "PROJECT_ID")]
    project_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read env (.env first, so clap sees it)
    // -------------------------------

    let _ = dotenvy::dotenv();
    let args = Args::parse();

    // -------------------------------
    // 2. Load YAML config, apply CLI overrides
    // -------------------------------

    let mut service_config = config_loader::run(&args.config).await?;
    if let Some(port) = args.port {
        service_config.settings.server.port = port;
    }
    if let Some(token_file) = args.token_file {
        service_config.provider.token_file = token_file;
    }
    logging::run(&service_config, args.log_level);

    // -------------------------------
    // 3. Load service account credential
    // -------------------------------

    let credential = Credential::from_parts(
        args.private_key,
        args.client_email,
        args.project_id,
        &service_config.provider.scope,
    )
    .context("service account credential")?;
    info!(
        "credential loaded for '{}', project '{}'",
        credential.client_email, credential.project_id
    );

    // -------------------------------
    // 4. Serve POST /
    // -------------------------------

    info!("Service starting...");
    server::server::start(&service_config, Arc::new(credential)).await
}
