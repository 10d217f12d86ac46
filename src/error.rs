//! Unified error handling for PaintCritic.
//!
//! Every failure on a request path ends up as a `CriticError`, which renders
//! as a fixed JSON envelope: `{status: "error", message, timestamp}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use crate::time::now_iso8601;

/// Unified error type for PaintCritic operations.
#[derive(Debug, Clone, PartialEq)]
pub enum CriticError {
    /// Request body is not a valid analyze request.
    MalformedInput(String),
    /// Request body exceeds the configured size cap.
    PayloadTooLarge(String),
    /// No upstream API key was configured.
    ApiKeyMissing,
    /// Upstream API failed or returned a non-success status.
    UpstreamError(String),
    /// Failed to parse upstream response.
    ParseError(String),
    /// Upstream replied without any usable choice content.
    UpstreamEmptyResponse,
    /// No route matches the request path.
    NotFound(String),
    /// Route exists but not for this method.
    MethodNotAllowed { method: String, path: String },
    /// Internal error.
    Internal(String),
}

impl fmt::Display for CriticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedInput(msg) => write!(f, "Malformed input: {}", msg),
            Self::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            Self::ApiKeyMissing => write!(f, "No API key configured for the vision model service"),
            Self::UpstreamError(msg) => write!(f, "Upstream error: {}", msg),
            Self::ParseError(msg) => write!(f, "Parse error: {}", msg),
            Self::UpstreamEmptyResponse => {
                write!(f, "Upstream returned no critique content")
            }
            Self::NotFound(path) => write!(f, "No route for {}", path),
            Self::MethodNotAllowed { method, path } => {
                write!(f, "Method {} not allowed on {}", method, path)
            }
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for CriticError {}

/// Error response structure for JSON serialization.
#[derive(Serialize)]
struct ErrorResponseBody {
    status: &'static str,
    message: String,
    timestamp: String,
}

impl CriticError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedInput(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            // A missing key only shows up once the upstream call is attempted,
            // so it is reported like any other upstream failure.
            Self::ApiKeyMissing => StatusCode::BAD_GATEWAY,
            Self::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            Self::ParseError(_) => StatusCode::BAD_GATEWAY,
            Self::UpstreamEmptyResponse => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CriticError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        }

        let body = ErrorResponseBody {
            status: "error",
            message: self.to_string(),
            timestamp: now_iso8601(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_input_is_bad_request() {
        let err = CriticError::MalformedInput("missing field `image`".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("missing field `image`"));
    }

    #[test]
    fn upstream_failures_are_bad_gateway() {
        for err in [
            CriticError::ApiKeyMissing,
            CriticError::UpstreamError("Connection refused".to_string()),
            CriticError::ParseError("expected value".to_string()),
            CriticError::UpstreamEmptyResponse,
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY, "{}", err);
        }
    }

    #[test]
    fn not_found_names_the_path() {
        let err = CriticError::NotFound("/api/nope".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "No route for /api/nope");
    }

    #[test]
    fn client_errors_keep_their_status() {
        let too_large = CriticError::PayloadTooLarge("length limit exceeded".to_string());
        assert_eq!(too_large.status_code(), StatusCode::PAYLOAD_TOO_LARGE);

        let wrong_method = CriticError::MethodNotAllowed {
            method: "GET".to_string(),
            path: "/api/analyze".to_string(),
        };
        assert_eq!(wrong_method.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(wrong_method.to_string(), "Method GET not allowed on /api/analyze");
    }

    #[test]
    fn internal_is_server_error() {
        let err = CriticError::Internal("boom".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn renders_error_envelope() {
        let response = CriticError::UpstreamEmptyResponse.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Upstream returned no critique content");
        assert!(chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn error_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<CriticError>();
    }
}
