use std::sync::Arc;

use jsonwebtoken::{encode, Algorithm, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{error, info};

use crate::cache::token::CachedToken;
use crate::config::credential::Credential;
use crate::errors::RelayError;
use crate::helpers::time::{now_millis, now_secs};
use crate::observability::metrics::get_metrics;
use crate::utils::constants::{
    ASSERTION_LIFETIME_SECS, DEFAULT_TOKEN_LIFETIME_SECS, JWT_BEARER_GRANT_TYPE,
    MAX_TOKEN_LIFETIME_SECS,
};

/// Claims of the signed assertion sent to the token endpoint.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Exchanges a service account assertion for a bearer token.
#[derive(Debug, Clone)]
pub struct ServiceAccountIssuer {
    credential: Arc<Credential>,
    token_uri: String,
    client: Client,
}

impl ServiceAccountIssuer {
    pub fn new(credential: Arc<Credential>, token_uri: String, client: Client) -> Self {
        Self { credential, token_uri, client }
    }

    /// Builds and signs the RS256 assertion valid from `issued_at` for one hour.
    pub fn assertion(&self, issued_at: i64) -> Result<String, RelayError> {
        let claims = AssertionClaims {
            iss: self.credential.client_email.clone(),
            scope: self.credential.scope.clone(),
            aud: self.token_uri.clone(),
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        };
        Ok(encode(&Header::new(Algorithm::RS256), &claims, self.credential.signing_key())?)
    }

    /// One round trip to the token endpoint. The returned expiry is in
    /// milliseconds, the unit the token cache compares against.
    pub async fn issue(&self) -> Result<CachedToken, RelayError> {
        let metrics = get_metrics().await;
        let start = Instant::now();

        let result = self.exchange().await;
        match &result {
            Ok(token) => {
                metrics.token_issuances.inc();
                metrics.token_expiry_unix_ms.set(token.expires_at);
                info!(
                    "token issued for '{}' in {:?}, expires_at {}",
                    self.credential.client_email,
                    start.elapsed(),
                    token.expires_at
                );
            }
            Err(e) => {
                metrics.token_issuance_failures.with_label_values(&[e.reason()]).inc();
                error!("token exchange with '{}' failed: {}", self.token_uri, e);
            }
        }
        result
    }

    async fn exchange(&self) -> Result<CachedToken, RelayError> {
        let assertion = self.assertion(now_secs())?;
        let form = [
            ("grant_type", JWT_BEARER_GRANT_TYPE),
            ("assertion", assertion.as_str()),
        ];

        let response = self.client.post(&self.token_uri).form(&form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::TokenProvider { status: status.as_u16(), body });
        }

        let token_response: TokenResponse = response.json().await?;
        let lifetime_secs = token_response
            .expires_in
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS)
            .min(MAX_TOKEN_LIFETIME_SECS);

        Ok(CachedToken::new(
            token_response.access_token,
            now_millis().saturating_add(lifetime_secs.saturating_mul(1000)),
        ))
    }
}
