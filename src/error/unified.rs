//! Unified error classification and recovery.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Machine-readable error code, one per failure variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCode {
    InvalidInput,
    UnknownShape,
    Unauthorized,
    MalformedResponse,
    SchemaViolation,
    ProviderError,
    ProviderTimeout,
    Cancelled,
    Configuration,
}

/// Provider-side failure classes carried by `GenerationError::ProviderError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProviderErrorCode {
    Network,
    RateLimited,
    Authentication,
    InvalidRequest,
    ServerError,
    EmptyResponse,
    Unknown,
}

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller sent something unusable.
    Caller,
    Authentication,
    /// The provider answered, but not with what was asked for.
    Contract,
    RateLimit,
    Network,
    Timeout,
    Server,
    Configuration,
    Unknown,
}

/// Suggested recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    FixRequest,
    RetryWithBackoff,
    CheckCredentials,
    CheckConfiguration,
    IncreaseTimeout,
    ReviewPrompt,
    ContactSupport,
}
