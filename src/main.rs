use anyhow::{Context, Result};
use clap::Parser;
use mimalloc::MiMalloc;
use tokio::net::TcpListener;

use agenda::{telemetry, Config};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();
    telemetry::init_tracing(config.log_json)?;

    let store = agenda::connect(&config.database.url, config.database.max_connections())
        .await
        .context("failed to connect to database")?;

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!(addr = %config.bind, "server running");

    agenda::serve(listener, store).await.context("server error")?;
    Ok(())
}
