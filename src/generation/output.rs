//! Parsing raw provider text into structured values.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{GenerationError, Result};
use crate::types::{FinishReason, Usage};

/// A validated generation result. The value is exactly what the provider
/// returned; nothing is normalized locally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationOutput {
    /// Name of the shape the value was validated against.
    pub shape: String,
    pub value: serde_json::Value,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

impl GenerationOutput {
    /// Deserialize the value into a typed struct such as `RecipeCollection`.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.value)?)
    }
}

/// Parse provider text as JSON, tolerating a surrounding Markdown fence.
pub fn parse_json(raw_text: &str, finish_reason: Option<FinishReason>) -> Result<serde_json::Value> {
    let json_text = strip_code_fences(raw_text);
    if json_text.is_empty() {
        return Err(GenerationError::malformed("provider returned empty output"));
    }

    serde_json::from_str(json_text).map_err(|e| {
        if finish_reason == Some(FinishReason::Length) {
            GenerationError::malformed(format!("output truncated at token limit: {e}"))
        } else {
            GenerationError::malformed(format!("output is not valid JSON: {e}"))
        }
    })
}

/// Strip markdown code fences from JSON response.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    let without_opening = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_opening
        .strip_suffix("```")
        .unwrap_or(without_opening)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_code_fences_plain_json() {
        assert_eq!(strip_code_fences(r#"{"key": "value"}"#), r#"{"key": "value"}"#);
    }

    #[test]
    fn strip_code_fences_with_json_fence() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), r#"{"key": "value"}"#);
    }

    #[test]
    fn strip_code_fences_with_bare_fence() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), r#"{"key": "value"}"#);
    }

    #[test]
    fn rejects_prose() {
        let err = parse_json("Sure! Here are your recipes.", None).unwrap_err();

        assert!(matches!(err, GenerationError::MalformedResponse { .. }));
    }

    #[test]
    fn rejects_empty_output() {
        assert!(matches!(
            parse_json("   ", None),
            Err(GenerationError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn mentions_truncation_when_length_limited() {
        let err = parse_json(r#"{"recipes": [{"title": "Pa"#, Some(FinishReason::Length))
            .unwrap_err();

        assert!(err.to_string().contains("truncated"));
    }
}
