//! Generation orchestration: query + shape in, validated value out.

pub mod orchestrator;
pub mod output;
pub mod prompt;

pub use orchestrator::{GenerateOptions, Orchestrator, OrchestratorSettings};
pub use output::GenerationOutput;
