//! recipe-relay: structured recipe generation over an LLM provider.
//!
//! A caller names a registered [`schema::Shape`] and supplies a free-text
//! query. The [`generation::Orchestrator`] turns the shape into a JSON
//! Schema, asks the provider for a completion constrained to it, then parses
//! and validates the answer before handing it back. Invalid output is an
//! error, never a partial value.
//!
//! # Quick Start
//!
//! ```no_run
//! use recipe_relay::prelude::*;
//!
//! # async fn example() -> recipe_relay::error::Result<()> {
//! let config = ServiceConfig::load(None)?;
//! let orchestrator = Orchestrator::from_config(&config)?;
//! let options = GenerateOptions::builder().count(3).build();
//! let output = orchestrator
//!     .generate("recipeCollection", "vegetarian lasagna", options)
//!     .await?;
//! let recipes: RecipeCollection = output.into_typed()?;
//! println!("{}", recipes.recipes.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod generation;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod schema;
pub mod types;
pub mod util;

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub mod logging;
