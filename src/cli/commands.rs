//! Handlers for each subcommand.

use crate::config::ServiceConfig;
use crate::error::{GenerationError, Result};
use crate::generation::{GenerateOptions, Orchestrator};
use crate::schema::SchemaRegistry;

use super::{GenerateArgs, ServeArgs, ShapesArgs};

pub async fn handle_serve(mut config: ServiceConfig, args: ServeArgs) -> Result<()> {
    if let Some(port) = args.port {
        config.port = port;
    }
    crate::server::serve(&config).await
}

pub async fn handle_generate(mut config: ServiceConfig, args: GenerateArgs) -> Result<()> {
    if let Some(model) = args.model {
        config.model = model;
    }
    let orchestrator = Orchestrator::from_config(&config)?;
    let options = GenerateOptions {
        count: args.count,
        system_persona: args.persona,
        ..GenerateOptions::default()
    };

    let output = orchestrator.generate(&args.shape, &args.query, options).await?;

    let text = if args.compact {
        serde_json::to_string(&output.value)
    } else {
        serde_json::to_string_pretty(&output.value)
    }
    .map_err(|e| GenerationError::malformed(e.to_string()))?;
    println!("{text}");
    Ok(())
}

pub fn handle_shapes(args: ShapesArgs) -> Result<()> {
    let registry = SchemaRegistry::standard()?;

    match args.name {
        Some(name) => {
            let shape = registry.get(&name)?;
            let document = registry.describe(&shape);
            let text = serde_json::to_string_pretty(&document.schema)
                .map_err(|e| GenerationError::malformed(e.to_string()))?;
            println!("{text}");
        }
        None => {
            for name in registry.names() {
                let shape = registry.get(name)?;
                println!("{name:<20} {}", shape.description().unwrap_or_default());
            }
        }
    }
    Ok(())
}
