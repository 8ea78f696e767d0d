// src/main.rs — Lucence entry point

use clap::Parser;

use lucence::cli::{Cli, Commands};
use lucence::infra::config::Config;
use lucence::infra::logger;

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG)
    logger::init_logging("info");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    match cli.command {
        Commands::Serve { host, port, root } => {
            lucence::cli::serve::run_serve(config, host, port, root).await
        }
        Commands::Head { context } => lucence::cli::scripts::run_head(&config, &context),
        Commands::List { root } => lucence::cli::scripts::run_list(&config, root),
        Commands::Delete { name, root } => lucence::cli::scripts::run_delete(&config, &name, root),
    }
}
