//! One-shot bootstrap: create the `contacts` table and exit.

use anyhow::{Context, Result};
use clap::Parser;

use agenda::config::DatabaseArgs;
use agenda::telemetry;

#[derive(Debug, Parser)]
#[command(name = "create-tables", about = "Create the contacts table")]
struct Cli {
    #[command(flatten)]
    database: DatabaseArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    telemetry::init_tracing(false)?;

    let store = agenda::connect(&cli.database.url, 1)
        .await
        .context("failed to connect to database")?;
    store
        .create_schema()
        .await
        .context("failed to create contacts table")?;
    store.close().await;

    tracing::info!("contacts table ready");
    Ok(())
}
