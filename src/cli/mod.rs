//! Command-line interface for recipe-relay.

pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Recipe and quote generation service
#[derive(Parser, Debug)]
#[command(name = "recipe-relay", version, about = "Schema-constrained recipe generation")]
pub struct Cli {
    /// TOML config file, applied before environment variables
    #[arg(short, long, global = true, env = "RECIPE_RELAY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service
    Serve(ServeArgs),
    /// Generate one value and print it as JSON
    Generate(GenerateArgs),
    /// List registered shapes, or print one as a JSON schema
    Shapes(ShapesArgs),
}

/// Arguments for `recipe-relay serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for `recipe-relay generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Shape to generate
    #[arg(short, long, default_value = "recipeCollection")]
    pub shape: String,

    /// Number of items for collection shapes
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    pub count: Option<i64>,

    /// Replace the default system persona
    #[arg(long)]
    pub persona: Option<String>,

    /// Model to use (format: provider:model, e.g., openai:gpt-4o)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Print compact JSON
    #[arg(long)]
    pub compact: bool,

    /// The user query (positional)
    pub query: String,
}

/// Arguments for `recipe-relay shapes`.
#[derive(Args, Debug)]
pub struct ShapesArgs {
    /// Print the JSON schema of this shape
    pub name: Option<String>,
}
