//! Model definitions and selection.

pub mod openai;
pub mod selector;

pub use selector::ModelSelector;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which model the service asks for completions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "provider", content = "model")]
pub enum LanguageModel {
    OpenAi(openai::OpenAiModel),
    /// Any server speaking the OpenAI chat-completions dialect.
    OpenAiCompatible(String),
}

impl LanguageModel {
    /// Get the model's API identifier string.
    pub fn model_id(&self) -> &str {
        match self {
            Self::OpenAi(m) => m.as_str(),
            Self::OpenAiCompatible(id) => id,
        }
    }

    /// Get the provider name.
    pub fn provider_name(&self) -> &str {
        match self {
            Self::OpenAi(_) => "openai",
            Self::OpenAiCompatible(_) => "openai-compatible",
        }
    }

    /// Whether the model can be constrained by a JSON Schema response format.
    pub fn supports_json_schema(&self) -> bool {
        match self {
            Self::OpenAi(m) => m.supports_json_schema(),
            Self::OpenAiCompatible(_) => true,
        }
    }
}

impl fmt::Display for LanguageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider_name(), self.model_id())
    }
}
