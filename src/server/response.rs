use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::errors::RelayError;
use crate::utils::constants::{EMPTY_PROVIDER_RESPONSE_MESSAGE, SEND_SUCCESS_MESSAGE};

#[derive(Debug, Serialize)]
pub struct SuccessBody {
    pub success: &'static str,
    pub response: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl ErrorBody {
    fn message(error: String) -> Self {
        Self { error, http_code: None, response: None }
    }
}

pub fn sent() -> Response {
    (
        StatusCode::OK,
        Json(SuccessBody { success: "200", response: SEND_SUCCESS_MESSAGE }),
    )
        .into_response()
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Validation => StatusCode::BAD_REQUEST,
            RelayError::MissingDeviceToken => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            RelayError::SendProvider { status, body } => ErrorBody {
                error: self.to_string(),
                http_code: Some(*status),
                response: Some(if body.is_empty() {
                    EMPTY_PROVIDER_RESPONSE_MESSAGE.to_owned()
                } else {
                    body.clone()
                }),
            },
            RelayError::TokenProvider { status, body } => ErrorBody {
                error: self.to_string(),
                http_code: Some(*status),
                response: Some(body.clone()),
            },
            _ => ErrorBody::message(self.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(RelayError::Validation.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(RelayError::MissingDeviceToken.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn provider_errors_map_to_500() {
        let err = RelayError::SendProvider { status: 404, body: String::new() };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let err = RelayError::Io(std::io::Error::other("disk full"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
