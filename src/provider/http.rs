//! Shared HTTP client construction and status mapping.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::{GenerationError, ProviderErrorCode};

/// Build a client with the given overall request timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, GenerationError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| GenerationError::Configuration(format!("failed to build HTTP client: {e}")))
}

/// Build default headers for a Bearer-token API.
pub fn bearer_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(&format!("Bearer {api_key}")) {
        headers.insert(AUTHORIZATION, val);
    }
    headers
}

/// Map a non-success HTTP status and body to a provider error.
pub fn status_to_error(status: u16, body: &str) -> GenerationError {
    let code = match status {
        401 | 403 => ProviderErrorCode::Authentication,
        429 => ProviderErrorCode::RateLimited,
        400 | 404 | 422 => ProviderErrorCode::InvalidRequest,
        500..=599 => ProviderErrorCode::ServerError,
        _ => ProviderErrorCode::Unknown,
    };

    let mut detail = extract_error_message(body).unwrap_or_else(|| body.to_string());
    if code == ProviderErrorCode::RateLimited {
        if let Some(ms) = extract_retry_after(body) {
            detail = format!("{detail} (retry after {ms}ms)");
        }
    }

    GenerationError::provider_status(code, status, detail)
}

fn extract_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

fn extract_retry_after(body: &str) -> Option<u64> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("retry_after"))
                .and_then(|r| r.as_f64())
                .map(|s| (s * 1000.0) as u64)
        })
}
