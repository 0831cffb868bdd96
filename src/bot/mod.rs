//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the `CasinoBuddy`
//! application: slash commands, button interaction handlers, embed
//! rendering, and bot context management.

/// Discord command implementations (blackjack, wallet, general)
pub mod commands;
/// Discord interaction handlers (game buttons)
pub mod handlers;
/// Embed and button rendering for game views
pub mod view;

use std::sync::Arc;

use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::config::casino::CasinoConfig;
use crate::core::table::GameTable;
use crate::errors::{Error, Result};

/// Shared data available to all bot commands and handlers.
pub struct BotData {
    /// Database connection for all wallet operations
    pub database: DatabaseConnection,
    /// In-memory registry of active blackjack sessions
    pub table: GameTable,
    /// Table limits and reap delay
    pub config: Arc<CasinoConfig>,
}

impl BotData {
    /// Creates the shared bot context; the game table inherits its reap
    /// delay from the casino configuration.
    #[must_use]
    pub fn new(database: DatabaseConnection, config: Arc<CasinoConfig>) -> Self {
        let table = GameTable::new(config.reap_delay());
        Self {
            database,
            table,
            config,
        }
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            tracing::error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("Error in command `{}`: {:?}", ctx.command().name, error);
            let message = if error.is_user_error() {
                format!("❌ {error}")
            } else {
                "❌ An unexpected error occurred. Please try again.".to_string()
            };
            if let Err(e) = ctx.say(message).await {
                tracing::error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {e}");
            }
        }
    }
}

/// Builds the poise framework and runs the Discord client until shutdown.
pub async fn run_bot(
    token: String,
    database: DatabaseConnection,
    config: Arc<CasinoConfig>,
) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::blackjack(),
                commands::wallet(),
                commands::wallet_create(),
                commands::deposit(),
                commands::withdraw(),
                commands::ping(),
                commands::help(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handlers::buttons::handle_event(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(database, config))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await?;
    client.start().await.map_err(Into::into)
}
