//! Error types for recipe-relay.

pub mod unified;

pub use unified::{ErrorCategory, ErrorCode, ProviderErrorCode, RecoverySuggestion};

use thiserror::Error;

/// Every way a generation request can fail.
///
/// The HTTP layer maps each variant to a status code with an exhaustive
/// match, so adding a variant is a compile error there until it is handled.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown shape: {0}")]
    UnknownShape(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Malformed response: {detail}")]
    MalformedResponse { detail: String },

    #[error("Schema violation at '{path}': {reason}")]
    SchemaViolation { path: String, reason: String },

    #[error("Provider error ({code}): {detail}")]
    ProviderError {
        code: ProviderErrorCode,
        status: Option<u16>,
        detail: String,
    },

    #[error("Provider timed out after {after_ms}ms")]
    ProviderTimeout { after_ms: u64 },

    #[error("Generation cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl GenerationError {
    /// Create a provider error without an HTTP status.
    pub fn provider(code: ProviderErrorCode, detail: impl Into<String>) -> Self {
        Self::ProviderError {
            code,
            status: None,
            detail: detail.into(),
        }
    }

    /// Create a provider error from an HTTP status and response body.
    pub fn provider_status(code: ProviderErrorCode, status: u16, detail: impl Into<String>) -> Self {
        Self::ProviderError {
            code,
            status: Some(status),
            detail: detail.into(),
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            detail: detail.into(),
        }
    }

    pub fn violation(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaViolation {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput(_) => ErrorCode::InvalidInput,
            Self::UnknownShape(_) => ErrorCode::UnknownShape,
            Self::Unauthorized => ErrorCode::Unauthorized,
            Self::MalformedResponse { .. } => ErrorCode::MalformedResponse,
            Self::SchemaViolation { .. } => ErrorCode::SchemaViolation,
            Self::ProviderError { .. } => ErrorCode::ProviderError,
            Self::ProviderTimeout { .. } => ErrorCode::ProviderTimeout,
            Self::Cancelled => ErrorCode::Cancelled,
            Self::Configuration(_) => ErrorCode::Configuration,
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput(_) | Self::UnknownShape(_) => ErrorCategory::Caller,
            Self::Unauthorized => ErrorCategory::Authentication,
            Self::MalformedResponse { .. } | Self::SchemaViolation { .. } => {
                ErrorCategory::Contract
            }
            Self::ProviderError { code, .. } => match code {
                ProviderErrorCode::Authentication => ErrorCategory::Authentication,
                ProviderErrorCode::RateLimited => ErrorCategory::RateLimit,
                ProviderErrorCode::Network => ErrorCategory::Network,
                ProviderErrorCode::ServerError => ErrorCategory::Server,
                ProviderErrorCode::InvalidRequest => ErrorCategory::Configuration,
                ProviderErrorCode::EmptyResponse => ErrorCategory::Contract,
                ProviderErrorCode::Unknown => ErrorCategory::Unknown,
            },
            Self::ProviderTimeout { .. } => ErrorCategory::Timeout,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Cancelled => ErrorCategory::Unknown,
        }
    }

    /// Whether a caller may reasonably retry.
    ///
    /// Nothing in this crate acts on it; retry policy is the caller's.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit
                | ErrorCategory::Network
                | ErrorCategory::Timeout
                | ErrorCategory::Server
        )
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::Caller => RecoverySuggestion::FixRequest,
            ErrorCategory::Authentication => RecoverySuggestion::CheckCredentials,
            ErrorCategory::Contract => RecoverySuggestion::ReviewPrompt,
            ErrorCategory::RateLimit | ErrorCategory::Network | ErrorCategory::Server => {
                RecoverySuggestion::RetryWithBackoff
            }
            ErrorCategory::Timeout => RecoverySuggestion::IncreaseTimeout,
            ErrorCategory::Configuration => RecoverySuggestion::CheckConfiguration,
            ErrorCategory::Unknown => RecoverySuggestion::ContactSupport,
        }
    }

    /// Detail suitable for a diagnostic response body.
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::MalformedResponse { detail } => Some(detail.clone()),
            Self::SchemaViolation { path, reason } => Some(format!("{path}: {reason}")),
            Self::ProviderError { detail, .. } => Some(detail.clone()),
            Self::InvalidInput(msg) | Self::UnknownShape(msg) | Self::Configuration(msg) => {
                Some(msg.clone())
            }
            Self::Unauthorized | Self::ProviderTimeout { .. } | Self::Cancelled => None,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::ProviderTimeout { after_ms: 0 };
        }
        Self::ProviderError {
            code: ProviderErrorCode::Network,
            status: err.status().map(|s| s.as_u16()),
            detail: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse {
            detail: err.to_string(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, GenerationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_category_maps_to_a_recovery_suggestion() {
        let cases = [
            (GenerationError::InvalidInput("q".into()), RecoverySuggestion::FixRequest),
            (GenerationError::Unauthorized, RecoverySuggestion::CheckCredentials),
            (
                GenerationError::violation("servings", "missing"),
                RecoverySuggestion::ReviewPrompt,
            ),
            (
                GenerationError::provider(ProviderErrorCode::RateLimited, "slow down"),
                RecoverySuggestion::RetryWithBackoff,
            ),
            (
                GenerationError::provider(ProviderErrorCode::Network, "reset"),
                RecoverySuggestion::RetryWithBackoff,
            ),
            (
                GenerationError::provider_status(ProviderErrorCode::ServerError, 502, "bad gateway"),
                RecoverySuggestion::RetryWithBackoff,
            ),
            (
                GenerationError::ProviderTimeout { after_ms: 100 },
                RecoverySuggestion::IncreaseTimeout,
            ),
            (
                GenerationError::Configuration("no key".into()),
                RecoverySuggestion::CheckConfiguration,
            ),
            (GenerationError::Cancelled, RecoverySuggestion::ContactSupport),
        ];

        for (err, expected) in cases {
            assert_eq!(err.recovery_suggestion(), expected, "{err}");
        }
    }

    #[test]
    fn only_transient_failures_are_retryable() {
        assert!(GenerationError::ProviderTimeout { after_ms: 1 }.is_retryable());
        assert!(GenerationError::provider(ProviderErrorCode::RateLimited, "x").is_retryable());
        assert!(!GenerationError::malformed("x").is_retryable());
        assert!(!GenerationError::provider(ProviderErrorCode::Authentication, "x").is_retryable());
    }

    #[test]
    fn codes_serialize_snake_case() {
        let code = GenerationError::violation("a", "b").code();

        assert_eq!(serde_json::to_value(code).unwrap(), "schema_violation");
    }
}
