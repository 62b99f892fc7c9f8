// tests/common/mod.rs
pub use axum::Router;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use std::sync::Arc;
use reqwest::Client;

use crate::config::credential::Credential;
use crate::utils::constants::CLOUD_PLATFORM_SCOPE;

pub const TEST_PRIVATE_KEY: &str = include_str!("../fixtures/service_account_key.pem");
pub const TEST_PUBLIC_KEY: &str = include_str!("../fixtures/service_account_key.pub.pem");
pub const TEST_CLIENT_EMAIL: &str = "relay@test-project.iam.gserviceaccount.com";
pub const TEST_PROJECT_ID: &str = "test-project";

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

pub fn test_credential() -> Arc<Credential> {
    Arc::new(
        Credential::from_parts(
            Some(TEST_PRIVATE_KEY.to_owned()),
            Some(TEST_CLIENT_EMAIL.to_owned()),
            Some(TEST_PROJECT_ID.to_owned()),
            CLOUD_PLATFORM_SCOPE,
        )
        .expect("test credential"),
    )
}
