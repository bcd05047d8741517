//! Service configuration (layered: defaults < TOML file < env < CLI flags).
//!
//! Built once at startup and handed to the components that need it; nothing
//! reads configuration from global state.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{GenerationError, Result};
use crate::generation::OrchestratorSettings;
use crate::models::LanguageModel;

pub const DEFAULT_MODEL: &str = "openai:gpt-4o";
pub const DEFAULT_AUTH_HEADER: &str = "devkey";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_COUNT: u32 = 5;
pub const DEFAULT_MAX_COUNT: u32 = 20;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Everything the service needs to start.
#[derive(Clone, PartialEq)]
pub struct ServiceConfig {
    pub provider_api_key: Option<String>,
    pub provider_base_url: Option<String>,
    pub model: String,
    /// When set, generation routes require this value in `auth_header`.
    pub shared_secret: Option<String>,
    pub auth_header: String,
    pub port: u16,
    pub default_count: u32,
    pub max_count: u32,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("provider_api_key", &self.provider_api_key.as_ref().map(|_| ".."))
            .field("provider_base_url", &self.provider_base_url)
            .field("model", &self.model)
            .field("shared_secret", &self.shared_secret.as_ref().map(|_| ".."))
            .field("auth_header", &self.auth_header)
            .field("port", &self.port)
            .field("default_count", &self.default_count)
            .field("max_count", &self.max_count)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            provider_api_key: None,
            provider_base_url: None,
            model: DEFAULT_MODEL.to_string(),
            shared_secret: None,
            auth_header: DEFAULT_AUTH_HEADER.to_string(),
            port: DEFAULT_PORT,
            default_count: DEFAULT_COUNT,
            max_count: DEFAULT_MAX_COUNT,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
        }
    }
}

/// Optional TOML overlay. Every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    provider_api_key: Option<String>,
    provider_base_url: Option<String>,
    model: Option<String>,
    shared_secret: Option<String>,
    auth_header: Option<String>,
    port: Option<u16>,
    default_count: Option<u32>,
    max_count: Option<u32>,
    request_timeout_secs: Option<u64>,
    log_level: Option<String>,
    log_format: Option<LogFormat>,
}

impl ServiceConfig {
    /// Load defaults, then `file` if given, then the process environment
    /// (including a `.env` file when present).
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let _ = dotenvy::dotenv();
        let mut config = Self::default();
        if let Some(path) = file {
            config.apply_file(path)?;
        }
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values from a TOML file.
    pub fn apply_file(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            GenerationError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        self.apply_toml(&text)
            .map_err(|e| GenerationError::Configuration(format!("{}: {e}", path.display())))
    }

    /// Overlay values from TOML text.
    pub fn apply_toml(&mut self, text: &str) -> Result<()> {
        let file: ConfigFile = toml::from_str(text)
            .map_err(|e| GenerationError::Configuration(format!("invalid config file: {e}")))?;

        overlay(&mut self.provider_api_key, file.provider_api_key.map(Some));
        overlay(&mut self.provider_base_url, file.provider_base_url.map(Some));
        overlay(&mut self.model, file.model);
        overlay(&mut self.shared_secret, file.shared_secret.map(Some));
        overlay(&mut self.auth_header, file.auth_header);
        overlay(&mut self.port, file.port);
        overlay(&mut self.default_count, file.default_count);
        overlay(&mut self.max_count, file.max_count);
        overlay(&mut self.request_timeout_secs, file.request_timeout_secs);
        overlay(&mut self.log_level, file.log_level);
        overlay(&mut self.log_format, file.log_format);
        Ok(())
    }

    /// Overlay values from environment variables, read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        overlay(&mut self.provider_api_key, get("OPENAI_API_KEY").map(Some));
        overlay(&mut self.provider_base_url, get("OPENAI_BASE_URL").map(Some));
        overlay(&mut self.model, get("RECIPE_RELAY_MODEL"));
        overlay(&mut self.shared_secret, get("SECRET_KEY").map(Some));
        overlay(&mut self.auth_header, get("RECIPE_RELAY_AUTH_HEADER"));
        overlay(&mut self.port, parse_env("PORT", get("PORT"))?);
        overlay(
            &mut self.default_count,
            parse_env("RECIPE_RELAY_DEFAULT_COUNT", get("RECIPE_RELAY_DEFAULT_COUNT"))?,
        );
        overlay(
            &mut self.max_count,
            parse_env("RECIPE_RELAY_MAX_COUNT", get("RECIPE_RELAY_MAX_COUNT"))?,
        );
        overlay(
            &mut self.request_timeout_secs,
            parse_env("RECIPE_RELAY_TIMEOUT_SECS", get("RECIPE_RELAY_TIMEOUT_SECS"))?,
        );
        overlay(&mut self.log_level, get("RECIPE_RELAY_LOG_LEVEL"));
        overlay(
            &mut self.log_format,
            parse_env("RECIPE_RELAY_LOG_FORMAT", get("RECIPE_RELAY_LOG_FORMAT"))?,
        );
        Ok(())
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> Result<()> {
        if self.default_count == 0 {
            return Err(GenerationError::Configuration(
                "default_count must be at least 1".into(),
            ));
        }
        if self.max_count < self.default_count {
            return Err(GenerationError::Configuration(format!(
                "max_count ({}) must not be below default_count ({})",
                self.max_count, self.default_count
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(GenerationError::Configuration(
                "request_timeout_secs must be positive".into(),
            ));
        }
        if self.auth_header.trim().is_empty() {
            return Err(GenerationError::Configuration(
                "auth_header must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// The provider credential, required before any generation can succeed.
    pub fn require_api_key(&self) -> Result<&str> {
        self.provider_api_key
            .as_deref()
            .ok_or_else(|| GenerationError::Configuration("Missing OPENAI_API_KEY".into()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn language_model(&self) -> Result<LanguageModel> {
        self.model.parse()
    }

    /// Generation knobs for the orchestrator.
    pub fn orchestrator_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            default_count: self.default_count,
            max_count: self.max_count,
            default_deadline: Some(self.request_timeout()),
            ..OrchestratorSettings::default()
        }
    }
}

fn overlay<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn parse_env<T: FromStr>(key: &str, raw: Option<String>) -> Result<Option<T>> {
    raw.map(|value| {
        value.trim().parse::<T>().map_err(|_| {
            GenerationError::Configuration(format!("{key} has invalid value '{value}'"))
        })
    })
    .transpose()
}
