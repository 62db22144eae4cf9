use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use reservation_mapper::{server, AppSettings, Config, Dispatcher, StrategyCatalog};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    // Any configuration problem aborts startup
    let settings = AppSettings::load(&config.settings)
        .with_context(|| format!("Failed to load settings from {}", config.settings.display()))?;
    let registry = settings
        .build_registry(&StrategyCatalog::builtin())
        .context("Failed to build the strategy registry")?;
    info!(
        "Registered {} mapping(s) from {}",
        registry.len(),
        config.settings.display()
    );
    for key in registry.keys() {
        info!("  {}", key);
    }

    server::serve(Dispatcher::new(Arc::new(registry)), config.bind).await
}
