//! recipe-relay binary entry point.

use clap::Parser;
use recipe_relay::cli::{commands, Cli, Commands};
use recipe_relay::config::ServiceConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> recipe_relay::error::Result<()> {
    // Listing shapes needs neither credentials nor logging.
    if let Commands::Shapes(args) = cli.command {
        return commands::handle_shapes(args);
    }

    let config = ServiceConfig::load(cli.config.as_deref())?;
    recipe_relay::logging::init(&config)?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Serve(args) => commands::handle_serve(config, args).await,
        Commands::Generate(args) => commands::handle_generate(config, args).await,
        Commands::Shapes(args) => commands::handle_shapes(args),
    }
}
