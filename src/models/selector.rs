//! Model selection and parsing.

use std::str::FromStr;

use super::LanguageModel;
use crate::error::GenerationError;

/// Parse a "provider:model" string into a LanguageModel.
pub struct ModelSelector;

impl ModelSelector {
    /// Parse "provider:model_id" into a LanguageModel.
    ///
    /// Examples: "openai:gpt-4o", "openai-compatible:llama3.3"
    pub fn parse(s: &str) -> Result<LanguageModel, GenerationError> {
        let (provider, model_id) = s.split_once(':').ok_or_else(|| {
            GenerationError::Configuration(format!(
                "Invalid model selector '{s}': expected 'provider:model_id'"
            ))
        })?;

        if model_id.trim().is_empty() {
            return Err(GenerationError::Configuration(format!(
                "Invalid model selector '{s}': empty model id"
            )));
        }

        match provider {
            "openai" => {
                use super::openai::OpenAiModel;
                let m = OpenAiModel::from_str(model_id)
                    .unwrap_or(OpenAiModel::Custom(model_id.to_string()));
                Ok(LanguageModel::OpenAi(m))
            }
            "openai-compatible" | "openai_compatible" => {
                Ok(LanguageModel::OpenAiCompatible(model_id.to_string()))
            }
            other => Err(GenerationError::Configuration(format!(
                "Unknown or disabled provider '{other}'"
            ))),
        }
    }
}

impl FromStr for LanguageModel {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelSelector::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::openai::OpenAiModel;

    #[test]
    fn parses_known_openai_model() {
        let model: LanguageModel = "openai:gpt-4o".parse().unwrap();

        assert_eq!(model, LanguageModel::OpenAi(OpenAiModel::Gpt4o));
        assert_eq!(model.to_string(), "openai:gpt-4o");
    }

    #[test]
    fn unknown_openai_model_becomes_custom() {
        let model: LanguageModel = "openai:gpt-9-preview".parse().unwrap();

        assert_eq!(model.model_id(), "gpt-9-preview");
    }

    #[test]
    fn parses_openai_compatible() {
        let model: LanguageModel = "openai-compatible:llama3.3".parse().unwrap();

        assert_eq!(model.provider_name(), "openai-compatible");
        assert_eq!(model.model_id(), "llama3.3");
    }

    #[test]
    fn rejects_missing_separator_and_unknown_provider() {
        assert!(matches!(
            "gpt-4o".parse::<LanguageModel>(),
            Err(GenerationError::Configuration(_))
        ));
        assert!(matches!(
            "acme:model".parse::<LanguageModel>(),
            Err(GenerationError::Configuration(_))
        ));
    }
}
