//! Shared-secret gate for the generation routes.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;
use tracing::debug;

use super::error::ApiError;
use crate::config::ServiceConfig;
use crate::error::GenerationError;

/// Header name and expected value. No secret means the gate is open.
#[derive(Clone)]
pub struct AuthConfig {
    header: HeaderName,
    secret: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("header", &self.header)
            .field("secret", &self.secret.as_ref().map(|_| ".."))
            .finish()
    }
}

impl AuthConfig {
    pub fn new(header: &str, secret: Option<String>) -> Result<Self, GenerationError> {
        let header = HeaderName::try_from(header.trim().to_ascii_lowercase()).map_err(|e| {
            GenerationError::Configuration(format!("invalid auth header name '{header}': {e}"))
        })?;
        Ok(Self {
            header,
            secret: secret.filter(|s| !s.is_empty()),
        })
    }

    /// Gate that lets everything through.
    pub fn disabled() -> Self {
        Self {
            header: HeaderName::from_static(crate::config::DEFAULT_AUTH_HEADER),
            secret: None,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, GenerationError> {
        Self::new(&config.auth_header, config.shared_secret.clone())
    }

    pub fn is_enabled(&self) -> bool {
        self.secret.is_some()
    }

    /// Compare the presented header against the secret in constant time.
    pub fn check(&self, headers: &HeaderMap) -> Result<(), GenerationError> {
        let Some(ref secret) = self.secret else {
            return Ok(());
        };
        let presented = headers
            .get(&self.header)
            .map(|value| value.as_bytes())
            .unwrap_or_default();

        if bool::from(presented.ct_eq(secret.as_bytes())) {
            Ok(())
        } else {
            Err(GenerationError::Unauthorized)
        }
    }
}

/// Middleware rejecting requests without the shared secret before any
/// handler (and so any provider call) runs.
pub async fn require_shared_secret(
    State(auth): State<Arc<AuthConfig>>,
    request: Request,
    next: Next,
) -> Response {
    match auth.check(request.headers()) {
        Ok(()) => next.run(request).await,
        Err(err) => {
            debug!(path = %request.uri().path(), "rejected request without valid shared secret");
            ApiError::from(err).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(name: &'static str, value: &'static str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(name, HeaderValue::from_static(value));
        map
    }

    #[test]
    fn open_when_no_secret_configured() {
        let auth = AuthConfig::new("devkey", None).unwrap();

        assert!(!auth.is_enabled());
        assert!(auth.check(&HeaderMap::new()).is_ok());
    }

    #[test]
    fn accepts_matching_secret() {
        let auth = AuthConfig::new("devkey", Some("s3cret".into())).unwrap();

        assert!(auth.check(&headers("devkey", "s3cret")).is_ok());
    }

    #[test]
    fn header_name_is_case_insensitive() {
        let auth = AuthConfig::new("DevKey", Some("s3cret".into())).unwrap();

        assert!(auth.check(&headers("devkey", "s3cret")).is_ok());
    }

    #[test]
    fn rejects_missing_wrong_and_prefix_secrets() {
        let auth = AuthConfig::new("devkey", Some("s3cret".into())).unwrap();

        assert!(matches!(auth.check(&HeaderMap::new()), Err(GenerationError::Unauthorized)));
        assert!(auth.check(&headers("devkey", "nope")).is_err());
        assert!(auth.check(&headers("devkey", "s3cre")).is_err());
        assert!(auth.check(&headers("other", "s3cret")).is_err());
    }

    #[test]
    fn empty_secret_disables_gate() {
        let auth = AuthConfig::new("devkey", Some(String::new())).unwrap();

        assert!(!auth.is_enabled());
    }
}
