#![cfg(feature = "openai")]

use std::time::Duration;

use recipe_relay::error::{GenerationError, ProviderErrorCode};
use recipe_relay::provider::openai::OpenAiProvider;
use recipe_relay::provider::{CompletionProvider, CompletionRequest};
use recipe_relay::schema::recipes::QUOTE;
use recipe_relay::schema::SchemaRegistry;
use recipe_relay::types::{FinishReason, GenerationSettings, ResponseFormat};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> OpenAiProvider {
    OpenAiProvider::new("gpt-4o", "test-key", Some(server.uri()), Duration::from_secs(5)).unwrap()
}

fn quote_request() -> CompletionRequest {
    let registry = SchemaRegistry::standard().unwrap();
    let shape = registry.get(QUOTE).unwrap();
    CompletionRequest {
        system_prompt: "You share quotes.".into(),
        user_prompt: "One quote please.".into(),
        response_format: ResponseFormat::from(registry.describe(&shape)),
        settings: GenerationSettings::default(),
        deadline: None,
    }
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 20, "completion_tokens": 9, "total_tokens": 29}
    })
}

#[tokio::test]
async fn sends_schema_and_bearer_then_returns_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": "You share quotes."},
                {"role": "user", "content": "One quote please."}
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {"name": "quote", "strict": true}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(r#"{"quote":"Eat well."}"#)))
        .expect(1)
        .mount(&server)
        .await;

    let response = provider(&server)
        .complete(&quote_request())
        .await
        .expect("completion should succeed");

    assert_eq!(response.text, r#"{"quote":"Eat well."}"#);
    assert_eq!(response.usage.total_tokens, 29);
    assert_eq!(response.finish_reason, Some(FinishReason::Stop));
}

#[tokio::test]
async fn rate_limit_maps_to_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"message": "Rate limit reached", "type": "requests"}
        })))
        .mount(&server)
        .await;

    let err = provider(&server)
        .complete(&quote_request())
        .await
        .expect_err("429 should fail");

    assert!(matches!(
        err,
        GenerationError::ProviderError {
            code: ProviderErrorCode::RateLimited,
            status: Some(429),
            ref detail,
        } if detail == "Rate limit reached"
    ));
}

#[tokio::test]
async fn bad_key_maps_to_authentication() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("nope"))
        .mount(&server)
        .await;

    let err = provider(&server).complete(&quote_request()).await.unwrap_err();

    assert!(matches!(
        err,
        GenerationError::ProviderError { code: ProviderErrorCode::Authentication, .. }
    ));
}

#[tokio::test]
async fn empty_choices_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = provider(&server).complete(&quote_request()).await.unwrap_err();

    assert!(matches!(
        err,
        GenerationError::ProviderError { code: ProviderErrorCode::EmptyResponse, .. }
    ));
}

#[tokio::test]
async fn refusal_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {"role": "assistant", "content": null, "refusal": "I can't do that"},
                "finish_reason": "stop"
            }]
        })))
        .mount(&server)
        .await;

    let err = provider(&server).complete(&quote_request()).await.unwrap_err();

    assert!(err.to_string().contains("refused"));
}

#[tokio::test]
async fn slow_server_hits_request_deadline() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("{}"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let mut request = quote_request();
    request.deadline = Some(Duration::from_millis(100));

    let err = provider(&server).complete(&request).await.unwrap_err();

    assert!(matches!(err, GenerationError::ProviderTimeout { after_ms: 100 }));
}
