//! Binary entry point - wires configuration, database, and the bot together.

use std::{env, sync::Arc};

use casino_buddy::{bot, config};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> casino_buddy::errors::Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load casino configuration (table limits, reap delay)
    let casino_config = config::casino::load_default_config()?;
    info!(
        min_bet = casino_config.min_bet,
        max_bet = casino_config.max_bet,
        reap_delay_secs = casino_config.reap_delay_secs,
        "Casino configuration loaded."
    );

    // 4. Initialize database
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database tables ready."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Run the bot. DISCORD_BOT_TOKEN is loaded directly before use.
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))?;

    bot::run_bot(token, db, Arc::new(casino_config)).await
}
