//! Shared test helpers and scripted provider.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use recipe_relay::error::GenerationError;
use recipe_relay::generation::{Orchestrator, OrchestratorSettings};
use recipe_relay::provider::{CompletionProvider, CompletionRequest, CompletionResponse};
use recipe_relay::schema::SchemaRegistry;
use recipe_relay::types::*;

enum Step {
    Text(String, Option<FinishReason>),
    Fail(GenerationError),
    Stall(Duration),
}

/// A provider that replays queued steps and records every request.
#[derive(Default)]
pub struct ScriptedProvider {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<CompletionRequest>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue raw completion text.
    pub fn queue_text(&self, text: &str) {
        self.push(Step::Text(text.to_string(), Some(FinishReason::Stop)));
    }

    /// Queue a JSON value as completion text.
    pub fn queue_json(&self, value: Value) {
        self.queue_text(&value.to_string());
    }

    pub fn queue_truncated(&self, text: &str) {
        self.push(Step::Text(text.to_string(), Some(FinishReason::Length)));
    }

    pub fn queue_error(&self, err: GenerationError) {
        self.push(Step::Fail(err));
    }

    /// Queue a call that sleeps before answering with an empty object.
    pub fn queue_stall(&self, duration: Duration) {
        self.push(Step::Stall(duration));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    fn push(&self, step: Step) {
        self.steps.lock().unwrap().push_back(step);
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        "scripted-model"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let step = self.steps.lock().unwrap().pop_front();
        let (text, finish_reason) = match step {
            Some(Step::Text(text, reason)) => (text, reason),
            Some(Step::Fail(err)) => return Err(err),
            Some(Step::Stall(duration)) => {
                tokio::time::sleep(duration).await;
                ("{}".to_string(), Some(FinishReason::Stop))
            }
            None => panic!("scripted provider called with nothing queued"),
        };

        Ok(CompletionResponse {
            text,
            usage: Usage {
                input_tokens: 12,
                output_tokens: 34,
                total_tokens: 46,
            },
            finish_reason,
        })
    }
}

/// Orchestrator over the standard registry and `provider`.
pub fn orchestrator(provider: Arc<ScriptedProvider>) -> Orchestrator {
    Orchestrator::new(
        Arc::new(SchemaRegistry::standard().unwrap()),
        provider,
        OrchestratorSettings::default(),
    )
}

pub fn recipe(title: &str) -> Value {
    json!({
        "title": title,
        "ingredients": [
            {"item": "lentils", "amount": 200, "unit": "grams"},
            {"item": "olive oil", "amount": 1.5, "unit": "tablespoons"},
            {"item": "onion", "amount": 1, "unit": "pieces"}
        ],
        "instructions": ["Rinse the lentils.", "Simmer for 25 minutes."],
        "estimatedCookingTime": 30,
        "servings": 4
    })
}

pub fn recipes(titles: &[&str]) -> Value {
    json!({ "recipes": titles.iter().map(|t| recipe(t)).collect::<Vec<_>>() })
}
