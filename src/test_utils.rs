//! Shared test utilities for `CasinoBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::casino::CasinoConfig,
    core::wallet,
    entities,
    errors::Result,
};
use sea_orm::{ConnectOptions, DatabaseConnection};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
///
/// The pool is pinned to a single connection, because each `sqlite::memory:`
/// connection is its own database.
///
/// Tests that pause tokio's clock (`start_paused = true`) need extra care:
/// `SQLite` work happens on a real worker thread, and while the runtime waits
/// for it tokio auto-advances the fake clock to the next timer — which is the
/// pool's acquire timeout whenever an acquire overlaps the connect or the
/// on-release ping, spuriously failing with `PoolTimedOut`. The spawned
/// ticker keeps a 1ms timer pending at all times so the fake clock can only
/// crawl, giving the real I/O time to complete; the long acquire timeout adds
/// margin on top.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    tokio::spawn(async {
        let mut tick = tokio::time::interval(std::time::Duration::from_millis(1));
        loop {
            tick.tick().await;
        }
    });

    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .test_before_acquire(false)
        .connect_timeout(std::time::Duration::from_secs(3600));
    let db = sea_orm::Database::connect(options).await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test wallet with the given balance.
///
/// # Defaults
/// * `username`: derived from the Discord ID
pub async fn create_test_wallet(
    db: &DatabaseConnection,
    discord_id: &str,
    balance: i64,
) -> Result<entities::wallet::Model> {
    wallet::create_wallet(db, discord_id, &format!("user-{discord_id}"), balance).await
}

/// Default table limits used across tests: bets between 5 000 and 500 000,
/// 120 second reap delay.
#[must_use]
pub fn test_config() -> CasinoConfig {
    CasinoConfig::default()
}
