//! Completion provider trait and implementations.

pub mod http;

#[cfg(feature = "openai")]
pub mod openai;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::ServiceConfig;
use crate::error::GenerationError;
use crate::models::LanguageModel;
use crate::types::{FinishReason, GenerationSettings, ModelMessage, ResponseFormat, Usage};

/// A request sent to a completion provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    /// Output-shape constraint, normally a `ResponseFormat::JsonSchema`.
    pub response_format: ResponseFormat,
    pub settings: GenerationSettings,
    /// Caller deadline for the round-trip, if any.
    pub deadline: Option<Duration>,
}

impl CompletionRequest {
    /// System then user message, the order providers expect.
    pub fn messages(&self) -> [ModelMessage; 2] {
        [
            ModelMessage::system(self.system_prompt.clone()),
            ModelMessage::user(self.user_prompt.clone()),
        ]
    }
}

/// Raw output from a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub text: String,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

/// The external generative capability.
///
/// One call is one blocking round-trip. Implementations surface failures
/// as `ProviderError` or `ProviderTimeout` and never retry on their own.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &str;
    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, GenerationError>;
}

/// Create the provider for `model`, using credentials from `config`.
pub fn create_provider(
    model: &LanguageModel,
    config: &ServiceConfig,
) -> Result<Arc<dyn CompletionProvider>, GenerationError> {
    if !model.supports_json_schema() {
        return Err(GenerationError::Configuration(format!(
            "model '{model}' does not support JSON Schema response formats"
        )));
    }

    #[cfg(feature = "openai")]
    {
        let api_key = config.require_api_key()?;
        let provider = match model {
            LanguageModel::OpenAi(m) => openai::OpenAiProvider::new(
                m.as_str(),
                api_key,
                config.provider_base_url.clone(),
                config.request_timeout(),
            )?,
            LanguageModel::OpenAiCompatible(model_id) => {
                let base_url = config.provider_base_url.clone().ok_or_else(|| {
                    GenerationError::Configuration("Missing OPENAI_BASE_URL".into())
                })?;
                openai::OpenAiProvider::new(
                    model_id.as_str(),
                    api_key,
                    Some(base_url),
                    config.request_timeout(),
                )?
                .with_provider_name("openai-compatible")
            }
        };
        Ok(Arc::new(provider))
    }

    #[cfg(not(feature = "openai"))]
    {
        let _ = config;
        Err(GenerationError::Configuration(format!(
            "Provider for model '{model}' not enabled via feature flags"
        )))
    }
}
