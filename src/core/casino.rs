//! Casino operations - the command surface gluing wallet, table, and game.
//!
//! These functions are what the Discord layer calls: place a bet, hit,
//! stand, clear a finished game. Each one validates, routes through the
//! session registry, and settles payouts against the wallet when a game
//! reaches a terminal phase.
//!
//! Ordering matters in `place_bet`: the table slot is claimed *before* the
//! wallet debit awaits, so two interleaved bets from the same player cannot
//! both get past the single-game check. If the debit then fails, the slot is
//! released again.
//!
//! Settlement is retryable: a terminal session stays registered and
//! unsettled until its credit lands, and every entry point re-attempts the
//! credit before doing anything else with the slot.

use rand::SeedableRng;
use rand::rngs::StdRng;
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::config::casino::CasinoConfig;
use crate::core::game::{GameSession, GameView, Phase};
use crate::core::table::GameTable;
use crate::core::wallet;
use crate::errors::{Error, Result};

/// Game type tag written to the wallet ledger.
const GAME_TYPE: &str = "blackjack";

/// Places a bet and deals a new game for the player.
///
/// Rejects bets outside the configured table limits, players without a
/// wallet, players with a game already open, and bets the balance cannot
/// cover. A natural on the opening deal settles immediately.
pub async fn place_bet(
    db: &DatabaseConnection,
    table: &GameTable,
    config: &CasinoConfig,
    player_id: &str,
    bet: i64,
) -> Result<GameView> {
    if bet < config.min_bet || bet > config.max_bet {
        return Err(Error::BetOutOfRange {
            amount: bet,
            min: config.min_bet,
            max: config.max_bet,
        });
    }

    // A previous game whose credit failed gets its payout through before
    // the slot can be reused
    settle_if_pending(db, table, player_id).await?;

    let wallet = wallet::require_wallet(db, player_id).await?;

    let session = GameSession::new(
        player_id.to_string(),
        wallet.username.clone(),
        bet,
        StdRng::from_entropy(),
    );
    // Claim the per-player slot before the debit suspends
    table.insert(session)?;

    if let Err(err) = wallet::debit_bet(db, player_id, bet, GAME_TYPE).await {
        table.remove(player_id);
        return Err(err);
    }

    info!(player_id, username = %wallet.username, bet, "blackjack bet placed");

    let view = table.view(player_id)?;
    if view.result.is_some() {
        // Dealt a natural - nothing left to play
        settle(db, table, player_id).await?;
    }
    Ok(view)
}

/// Applies a hit for the player and settles if the hand resolved.
///
/// On a terminal session whose payout credit previously failed, the press
/// retries the settlement instead of rejecting the action.
pub async fn hit(
    db: &DatabaseConnection,
    table: &GameTable,
    player_id: &str,
) -> Result<GameView> {
    if settle_if_pending(db, table, player_id).await? {
        return table.view(player_id);
    }
    table.with_game(player_id, GameSession::hit)?;
    finish_transition(db, table, player_id).await
}

/// Applies a stand for the player, plays out the dealer, and settles.
///
/// Retries a pending settlement the same way [`hit`] does.
pub async fn stand(
    db: &DatabaseConnection,
    table: &GameTable,
    player_id: &str,
) -> Result<GameView> {
    if settle_if_pending(db, table, player_id).await? {
        return table.view(player_id);
    }
    table.with_game(player_id, GameSession::stand)?;
    finish_transition(db, table, player_id).await
}

/// Clears a finished session so the player can place a new bet. Does not
/// deal - the player bets again with the slash command. A payout the
/// session is still owed is credited before the slot is freed.
pub async fn new_game(
    db: &DatabaseConnection,
    table: &GameTable,
    player_id: &str,
) -> Result<()> {
    settle_if_pending(db, table, player_id).await?;
    table.clear_finished(player_id)
}

async fn finish_transition(
    db: &DatabaseConnection,
    table: &GameTable,
    player_id: &str,
) -> Result<GameView> {
    let view = table.view(player_id)?;
    if view.result.is_some() {
        settle(db, table, player_id).await?;
    }
    Ok(view)
}

/// Retries the payout of a terminal session whose credit has not landed
/// yet. Returns whether such a session was found (and is now settled).
async fn settle_if_pending(
    db: &DatabaseConnection,
    table: &GameTable,
    player_id: &str,
) -> Result<bool> {
    if table.pending_settlement(player_id) {
        warn!(player_id, "retrying pending blackjack settlement");
        settle(db, table, player_id).await?;
        return Ok(true);
    }
    Ok(false)
}

/// Credits the payout for a finished game, marks it settled, and schedules
/// its reaping.
///
/// The credit failing leaves the session in place and unsettled; the error
/// surfaces to the command boundary and the next action on the session
/// retries the credit, since the stake was already debited. A session that
/// is already settled is left alone.
pub(crate) async fn settle(
    db: &DatabaseConnection,
    table: &GameTable,
    player_id: &str,
) -> Result<()> {
    let (outcome, payout, bet, settled) =
        table.with_game(player_id, |session| match session.phase() {
            Phase::Over { outcome, payout } => {
                Ok((outcome, payout, session.bet(), session.is_settled()))
            }
            Phase::InProgress => Err(Error::InvalidAction),
        })?;

    if settled {
        return Ok(());
    }

    if payout > 0 {
        wallet::credit_payout(db, player_id, payout, GAME_TYPE).await?;
    }
    table.with_game(player_id, |session| {
        session.mark_settled();
        Ok(())
    })?;

    if outcome.is_player_win() {
        info!(player_id, ?outcome, bet, payout, "blackjack won");
    } else {
        warn!(player_id, ?outcome, bet, payout, "blackjack settled without a win");
    }

    table.reap_later(player_id);
    Ok(())
}
