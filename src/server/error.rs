//! Mapping generation failures onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::{ErrorCode, GenerationError};

/// Error body: `{"error": .., "code": .., "details": ..}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: ErrorCode,
    pub details: Option<String>,
}

/// Wrapper so handlers can return `Result<_, ApiError>`.
#[derive(Debug)]
pub struct ApiError(pub GenerationError);

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        Self(err)
    }
}

/// HTTP status for each failure.
pub fn status_for(err: &GenerationError) -> StatusCode {
    match err {
        GenerationError::InvalidInput(_) | GenerationError::UnknownShape(_) => {
            StatusCode::BAD_REQUEST
        }
        GenerationError::Unauthorized => StatusCode::UNAUTHORIZED,
        GenerationError::MalformedResponse { .. }
        | GenerationError::SchemaViolation { .. }
        | GenerationError::ProviderError { .. }
        | GenerationError::ProviderTimeout { .. }
        | GenerationError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        GenerationError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let body = ErrorBody {
            error: self.0.to_string(),
            code: self.0.code(),
            details: self.0.detail(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;

    #[test]
    fn caller_errors_are_client_errors() {
        assert_eq!(
            status_for(&GenerationError::InvalidInput("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&GenerationError::UnknownShape("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_for(&GenerationError::Unauthorized), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn provider_and_contract_errors_are_server_errors() {
        let cases = [
            GenerationError::malformed("x"),
            GenerationError::violation("servings", "missing"),
            GenerationError::provider(ProviderErrorCode::RateLimited, "slow down"),
            GenerationError::ProviderTimeout { after_ms: 10 },
        ];
        for err in &cases {
            assert_eq!(status_for(err), StatusCode::INTERNAL_SERVER_ERROR, "{err}");
        }
    }
}
