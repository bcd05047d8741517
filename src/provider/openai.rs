//! OpenAI Chat Completions API provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::{GenerationError, ProviderErrorCode};
use crate::types::*;

use super::http::{bearer_headers, build_client, status_to_error};
use super::{CompletionProvider, CompletionRequest, CompletionResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Talks to `/chat/completions` on OpenAI or any compatible server.
pub struct OpenAiProvider {
    provider_name: String,
    model_id: String,
    api_key: String,
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl OpenAiProvider {
    pub fn new(
        model_id: impl Into<String>,
        api_key: impl Into<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        Ok(Self {
            provider_name: "openai".to_string(),
            model_id: model_id.into(),
            api_key: api_key.into(),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            client: build_client(timeout)?,
            timeout,
        })
    }

    /// Report a different provider name (e.g. "openai-compatible").
    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = name.into();
        self
    }

    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let messages = request
            .messages()
            .iter()
            .map(|m| serde_json::json!({ "role": m.role.to_string(), "content": m.content }))
            .collect::<Vec<_>>();

        let mut body = serde_json::Map::new();
        body.insert("model".into(), self.model_id.clone().into());
        body.insert("messages".into(), messages.into());

        let settings = &request.settings;
        if let Some(max) = settings.max_tokens {
            body.insert("max_tokens".into(), max.into());
        }
        if let Some(temp) = settings.temperature {
            body.insert("temperature".into(), temp.into());
        }
        if let Some(top_p) = settings.top_p {
            body.insert("top_p".into(), top_p.into());
        }
        if let Some(seed) = settings.seed {
            body.insert("seed".into(), seed.into());
        }
        if let Some(ref user) = settings.user {
            body.insert("user".into(), user.clone().into());
        }

        let ResponseFormat::JsonSchema {
            schema,
            name,
            strict,
        } = &request.response_format;
        body.insert(
            "response_format".into(),
            serde_json::json!({
                "type": "json_schema",
                "json_schema": {
                    "name": name,
                    "schema": schema,
                    "strict": strict,
                }
            }),
        );

        serde_json::Value::Object(body)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn provider_name(&self) -> &str {
        &self.provider_name
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, GenerationError> {
        let body = self.build_request_body(request);
        let url = format!("{}/chat/completions", self.base_url);
        let timeout = request.deadline.unwrap_or(self.timeout);

        debug!(model = %self.model_id, "OpenAI complete");

        let resp = self
            .client
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: OpenAiChatResponse = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                transport_error(e, timeout)
            } else {
                GenerationError::provider(
                    ProviderErrorCode::Unknown,
                    format!("unreadable completion envelope: {e}"),
                )
            }
        })?;

        let choice = data.choices.into_iter().next().ok_or_else(|| {
            GenerationError::provider(ProviderErrorCode::EmptyResponse, "No choices in OpenAI response")
        })?;

        if let Some(refusal) = choice.message.refusal {
            return Err(GenerationError::provider(
                ProviderErrorCode::EmptyResponse,
                format!("model refused: {refusal}"),
            ));
        }

        let text = choice.message.content.ok_or_else(|| {
            GenerationError::provider(ProviderErrorCode::EmptyResponse, "completion had no content")
        })?;

        Ok(CompletionResponse {
            text,
            usage: data
                .usage
                .map(|u| Usage {
                    input_tokens: u.prompt_tokens,
                    output_tokens: u.completion_tokens,
                    total_tokens: u.total_tokens,
                })
                .unwrap_or_default(),
            finish_reason: choice.finish_reason.as_deref().and_then(parse_finish_reason),
        })
    }
}

fn transport_error(err: reqwest::Error, timeout: Duration) -> GenerationError {
    if err.is_timeout() {
        GenerationError::ProviderTimeout {
            after_ms: timeout.as_millis() as u64,
        }
    } else {
        GenerationError::from(err)
    }
}

fn parse_finish_reason(s: &str) -> Option<FinishReason> {
    match s {
        "stop" => Some(FinishReason::Stop),
        "length" => Some(FinishReason::Length),
        "content_filter" => Some(FinishReason::ContentFilter),
        _ => None,
    }
}

// OpenAI API response types (internal)

#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
