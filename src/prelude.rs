//! Convenience re-exports for common use.

pub use crate::config::ServiceConfig;
pub use crate::error::{GenerationError, Result};
pub use crate::generation::{GenerateOptions, GenerationOutput, Orchestrator};
pub use crate::models::LanguageModel;
pub use crate::provider::{CompletionProvider, CompletionRequest, CompletionResponse};
pub use crate::schema::recipes::{Ingredient, Quote, Recipe, RecipeCollection, Unit};
pub use crate::schema::{FieldSpec, SchemaRegistry, Shape};
pub use crate::types::{FinishReason, GenerationSettings, Usage};
