use thiserror::Error;

use crate::utils::constants::{
    MISSING_AUTHORIZATION_MESSAGE, REQUIRED_FIELDS_MESSAGE, SEND_FAILURE_MESSAGE,
    TOKEN_FAILURE_PREFIX,
};

/// Every failure a relay request can end with.
///
/// `Config` only happens at startup. The remaining variants are mapped to an
/// HTTP status by the endpoint (see `server::response`).
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("configuration error: {0}")]
    Config(String),

    /// Client payload is incomplete or not a JSON object.
    #[error("{}", REQUIRED_FIELDS_MESSAGE)]
    Validation,

    /// No device token in the `authorization` header.
    #[error("{}", MISSING_AUTHORIZATION_MESSAGE)]
    MissingDeviceToken,

    /// OAuth token endpoint answered with a non-success status.
    #[error("{}: {body}", TOKEN_FAILURE_PREFIX)]
    TokenProvider { status: u16, body: String },

    /// FCM send endpoint answered with a non-success status.
    #[error("{}", SEND_FAILURE_MESSAGE)]
    SendProvider { status: u16, body: String },

    #[error("token file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to sign assertion: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl RelayError {
    /// Short label used for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            RelayError::Config(_) => "config",
            RelayError::Validation => "validation",
            RelayError::MissingDeviceToken => "missing_device_token",
            RelayError::TokenProvider { .. } => "token_provider",
            RelayError::SendProvider { .. } => "send_provider",
            RelayError::Io(_) => "io",
            RelayError::Http(_) => "http",
            RelayError::Jwt(_) => "jwt",
            RelayError::Json(_) => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_provider_message_carries_upstream_body() {
        let err = RelayError::TokenProvider {
            status: 400,
            body: "invalid_grant".to_owned(),
        };
        assert_eq!(err.to_string(), "Erro ao obter token: invalid_grant");
        assert_eq!(err.reason(), "token_provider");
    }

    #[test]
    fn client_errors_render_their_wire_messages() {
        assert_eq!(RelayError::Validation.to_string(), REQUIRED_FIELDS_MESSAGE);
        assert_eq!(
            RelayError::MissingDeviceToken.to_string(),
            MISSING_AUTHORIZATION_MESSAGE
        );
    }
}
