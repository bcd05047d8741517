//! The Generation Orchestrator.

use std::sync::Arc;
use std::time::Duration;

use bon::Builder;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::output::{parse_json, GenerationOutput};
use super::prompt;
use crate::config::ServiceConfig;
use crate::error::{GenerationError, Result};
use crate::provider::{create_provider, CompletionProvider, CompletionRequest};
use crate::schema::{describe, validate, SchemaRegistry, Shape};
use crate::types::{GenerationSettings, ResponseFormat};
use crate::util::timeout::with_deadline;

/// Tunables fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorSettings {
    /// Used when the caller gives no count, or a non-positive one.
    pub default_count: u32,
    /// Larger requested counts are clamped to this.
    pub max_count: u32,
    /// Applied when the caller supplies no deadline.
    pub default_deadline: Option<Duration>,
    pub generation: GenerationSettings,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            default_count: 5,
            max_count: 20,
            default_deadline: None,
            generation: GenerationSettings::default(),
        }
    }
}

/// Per-call options.
#[derive(Debug, Clone, Default, Builder)]
pub struct GenerateOptions {
    /// Number of items for collection shapes.
    pub count: Option<i64>,
    /// Replaces the domain persona as the system prompt.
    pub system_persona: Option<String>,
    /// Deadline for the provider round-trip.
    pub deadline: Option<Duration>,
    pub cancellation: Option<CancellationToken>,
}

/// What a single call will ask for.
struct Plan {
    shape: Arc<Shape>,
    count: Option<u32>,
}

/// Turns a query plus a shape name into a validated value.
///
/// Stateless between calls: every request resolves its shape, talks to the
/// provider once and either returns a value that satisfies the shape or an
/// error. Nothing is cached and nothing is retried.
pub struct Orchestrator {
    registry: Arc<SchemaRegistry>,
    provider: Arc<dyn CompletionProvider>,
    settings: OrchestratorSettings,
}

impl Orchestrator {
    pub fn new(
        registry: Arc<SchemaRegistry>,
        provider: Arc<dyn CompletionProvider>,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            registry,
            provider,
            settings,
        }
    }

    /// Standard registry plus the provider named by `config`.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let model = config.language_model()?;
        let provider = create_provider(&model, config)?;
        let registry = Arc::new(SchemaRegistry::standard()?);
        Ok(Self::new(registry, provider, config.orchestrator_settings()))
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    /// Generate a value of shape `shape_name` for `user_query`.
    ///
    /// Fails with `UnknownShape`, `InvalidInput`, `ProviderError`,
    /// `ProviderTimeout`, `Cancelled`, `MalformedResponse` or
    /// `SchemaViolation`; never returns a partial value.
    pub async fn generate(
        &self,
        shape_name: &str,
        user_query: &str,
        options: GenerateOptions,
    ) -> Result<GenerationOutput> {
        let (request, plan_shape) = self.build_request(shape_name, user_query, &options)?;

        debug!(
            shape = plan_shape.name(),
            provider = self.provider.provider_name(),
            model = self.provider.model_id(),
            "requesting completion"
        );

        let response = with_deadline(
            request.deadline,
            options.cancellation.as_ref(),
            self.provider.complete(&request),
        )
        .await
        .inspect_err(|e| warn!(shape = plan_shape.name(), error = %e, "provider call failed"))?;

        let value = parse_json(&response.text, response.finish_reason)
            .and_then(|value| validate(&value, &plan_shape).map(|()| value))
            .inspect_err(|e| {
                warn!(shape = plan_shape.name(), error = %e, "provider output rejected")
            })?;

        info!(
            shape = plan_shape.name(),
            output_tokens = response.usage.output_tokens,
            "generation complete"
        );

        Ok(GenerationOutput {
            shape: plan_shape.name().to_string(),
            value,
            usage: response.usage,
            finish_reason: response.finish_reason,
        })
    }

    /// Resolve inputs into the provider request and the shape the answer
    /// will be validated against.
    pub fn build_request(
        &self,
        shape_name: &str,
        user_query: &str,
        options: &GenerateOptions,
    ) -> Result<(CompletionRequest, Arc<Shape>)> {
        let plan = self.plan(shape_name, options)?;

        let query = user_query.trim();
        if query.is_empty() {
            return Err(GenerationError::InvalidInput(
                "query must not be empty".into(),
            ));
        }

        let system_prompt = options
            .system_persona
            .as_deref()
            .map(str::trim)
            .filter(|persona| !persona.is_empty())
            .unwrap_or_else(|| prompt::persona_for(plan.shape.domain()))
            .to_string();

        let user_prompt = match (plan.count, plan.shape.collection()) {
            (Some(count), Some(collection)) => {
                prompt::collection_prompt(count, &collection.item_label, query)
            }
            _ => prompt::single_prompt(query),
        };

        let request = CompletionRequest {
            system_prompt,
            user_prompt,
            response_format: ResponseFormat::from(describe(&plan.shape)),
            settings: self.settings.generation.clone(),
            deadline: options.deadline.or(self.settings.default_deadline),
        };
        Ok((request, plan.shape))
    }

    fn plan(&self, shape_name: &str, options: &GenerateOptions) -> Result<Plan> {
        let shape = self.registry.get(shape_name)?;

        if shape.is_collection() {
            return Ok(Plan {
                shape,
                count: Some(self.resolve_count(options.count)),
            });
        }

        match options.count {
            Some(requested) if requested > 1 => Ok(Plan {
                shape: Arc::new(Shape::collection_of(shape)?),
                count: Some(self.resolve_count(Some(requested))),
            }),
            _ => Ok(Plan { shape, count: None }),
        }
    }

    /// Non-positive or missing counts fall back to the default; large ones
    /// are clamped. Never an error.
    fn resolve_count(&self, requested: Option<i64>) -> u32 {
        match requested {
            Some(n) if n > 0 => n.min(i64::from(self.settings.max_count)) as u32,
            _ => self.settings.default_count,
        }
    }
}
