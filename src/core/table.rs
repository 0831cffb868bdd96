//! Session registry - at most one blackjack game per player.
//!
//! The table is an explicit store handed to the bot context, not a module
//! global. It is the single source of truth for "does this player have a
//! game open": bet placement consults it to block double-betting and button
//! callbacks route through it to find their session. Finished games linger
//! for a configurable delay so the final message stays renderable, then get
//! reaped to free the slot.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::core::game::{GameSession, GameView};
use crate::errors::{Error, Result};

/// Shared registry mapping Discord user IDs to their active game.
///
/// Cloning is cheap; clones share the same underlying map. All operations
/// take the single internal lock, which serialises hit/stand mutations per
/// player in arrival order.
#[derive(Debug, Clone)]
pub struct GameTable {
    games: Arc<Mutex<HashMap<String, GameSession>>>,
    reap_delay: Duration,
}

impl GameTable {
    /// Creates an empty table. `reap_delay` is how long a finished game
    /// stays addressable before it is removed.
    #[must_use]
    pub fn new(reap_delay: Duration) -> Self {
        Self {
            games: Arc::new(Mutex::new(HashMap::new())),
            reap_delay,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, GameSession>> {
        // Sessions stay consistent even if a holder panicked mid-render
        self.games.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a freshly dealt session for its player.
    ///
    /// Fails with [`Error::GameInProgress`] if the player already has an
    /// unfinished game, or a finished one whose payout has not been credited
    /// yet - replacing that would abandon the credit. A lingering settled
    /// game is discarded and replaced.
    pub fn insert(&self, session: GameSession) -> Result<()> {
        let mut games = self.lock();
        let player_id = session.player_id().to_string();

        if let Some(existing) = games.get(&player_id) {
            if !existing.is_over() || !existing.is_settled() {
                return Err(Error::GameInProgress { user_id: player_id });
            }
        }

        games.insert(player_id, session);
        Ok(())
    }

    /// Runs `f` against the player's session under the table lock.
    ///
    /// Fails with [`Error::NoActiveGame`] if the player has no session.
    pub fn with_game<T>(
        &self,
        player_id: &str,
        f: impl FnOnce(&mut GameSession) -> Result<T>,
    ) -> Result<T> {
        let mut games = self.lock();
        let session = games.get_mut(player_id).ok_or_else(|| Error::NoActiveGame {
            user_id: player_id.to_string(),
        })?;
        f(session)
    }

    /// Renders the player's current session.
    pub fn view(&self, player_id: &str) -> Result<GameView> {
        self.with_game(player_id, |session| Ok(session.view()))
    }

    /// Removes the player's session unconditionally, returning it if present.
    pub fn remove(&self, player_id: &str) -> Option<GameSession> {
        self.lock().remove(player_id)
    }

    /// Clears a finished, settled session so the player can bet again.
    ///
    /// An unfinished game is never cleared this way - that would leak the
    /// stake - and neither is a finished game whose payout is still
    /// uncredited; both fail with [`Error::GameInProgress`]. Clearing a
    /// player with no session is a no-op.
    pub fn clear_finished(&self, player_id: &str) -> Result<()> {
        let mut games = self.lock();
        match games.get(player_id) {
            Some(session) if !session.is_over() || !session.is_settled() => {
                Err(Error::GameInProgress {
                    user_id: player_id.to_string(),
                })
            }
            Some(_) => {
                games.remove(player_id);
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Whether the player has a finished session whose payout has not been
    /// credited yet.
    #[must_use]
    pub fn pending_settlement(&self, player_id: &str) -> bool {
        self.lock()
            .get(player_id)
            .is_some_and(|session| session.is_over() && !session.is_settled())
    }

    /// Schedules removal of the player's session after the reap delay.
    ///
    /// The reaper only removes a session that is finished and has been
    /// finished for at least the full delay, so a new game dealt in the
    /// meantime - even one that is itself already finished - survives.
    pub fn reap_later(&self, player_id: &str) {
        let table = self.clone();
        let player_id = player_id.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(table.reap_delay).await;
            table.reap_if_expired(&player_id);
        });
    }

    fn reap_if_expired(&self, player_id: &str) {
        let mut games = self.lock();
        // Unsettled sessions are never reaped; their payout is still owed
        let expired = games.get(player_id).is_some_and(|session| {
            session.is_settled()
                && session
                    .finished_at()
                    .is_some_and(|at| at.elapsed() >= self.reap_delay)
        });
        if expired {
            games.remove(player_id);
            tracing::debug!(player_id, "reaped finished blackjack session");
        }
    }

    /// Number of registered sessions, finished ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the table has no registered sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
