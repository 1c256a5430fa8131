//! Binary entry point for `MapleBuddy`.

use dotenvy::dotenv;
use maple_buddy::config::bot::BotIdentity;
use maple_buddy::errors::{Error, Result};
use maple_buddy::{bot, config, core};
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Resolve the bot identity stamped onto transaction ledger records
    let identity = BotIdentity::from_env();
    info!("Running as {} v{}.", identity.name, identity.version);

    // 4. Initialize database
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Ingest the potential option catalog seed
    let catalog = config::catalog::load_default_config()?;
    let ingested = core::catalog::seed_from_config(&db, &identity, &catalog)
        .await
        .inspect_err(|e| error!("Failed to seed option catalog: {}", e))?;
    info!("Option catalog ready ({ingested} rows ingested).");

    // 6. Run the bot
    // DISCORD_BOT_TOKEN is loaded here, directly before use, not stored in config
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, db, identity).await.map_err(Error::from)?;

    Ok(())
}
