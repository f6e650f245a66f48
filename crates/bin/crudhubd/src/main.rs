use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crudhubd::cli::{self, Cli};
use crudhubd::config::{Config, LoggingConfig};
use crudhubd::hub::Hub;
use crudhubd::seed::Seed;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    init_tracing(&config.logging);

    let hub = Hub::new(&config).context("registering services")?;
    hub.resolve_all().context("resolving services")?;

    if let Some(path) = cli.seed.as_deref().or(config.seed.path.as_deref()) {
        let seed = Seed::from_file(path)
            .with_context(|| format!("loading seed file {}", path.display()))?;
        hub.seed(seed).context("seeding services")?;
    }

    let output = cli::execute(&hub, &cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter {:?}: {err}", config.filter);
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
