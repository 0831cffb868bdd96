//! Blackjack game state machine.
//!
//! A [`GameSession`] owns the player's hand, the dealer's hand, and its own
//! random source. It starts in [`Phase::InProgress`] right after the opening
//! deal and moves to a terminal phase through `hit` and `stand`; terminal
//! phases carry the outcome and the payout computed once at that moment.
//! Transitions on a finished session are rejected, never silently ignored,
//! so the rendered message can never drift from the real game state.

use rand::rngs::StdRng;

use crate::core::card::Card;
use crate::core::hand::{self, BLACKJACK, DEALER_STAND};
use crate::core::payout;
use crate::errors::{Error, Result};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Player reached exactly 21
    PlayerBlackjack,
    /// Player finished higher than the dealer
    PlayerWin,
    /// Dealer drew past 21
    DealerBust,
    /// Dealer finished higher than the player
    DealerWin,
    /// Player drew past 21
    PlayerBust,
    /// Equal totals; the stake is returned
    Push,
}

impl Outcome {
    /// Whether this outcome pays the player.
    #[must_use]
    pub const fn is_player_win(self) -> bool {
        matches!(self, Self::PlayerBlackjack | Self::PlayerWin | Self::DealerBust)
    }

    /// Human-readable result line shown in the game embed.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PlayerBlackjack => "🃏 Blackjack!",
            Self::PlayerWin => "🎉 You win!",
            Self::DealerBust => "🎉 Dealer busts - you win!",
            Self::DealerWin => "😞 Dealer wins",
            Self::PlayerBust => "💥 Busted - over 21",
            Self::Push => "🤝 Push",
        }
    }
}

/// Current phase of a game. The terminal phase carries the data that only
/// exists once the game is over, so an unfinished game cannot expose a
/// payout and a finished one cannot lack an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the player to hit or stand
    InProgress,
    /// Game over; no further transitions are accepted
    Over {
        /// How the game ended
        outcome: Outcome,
        /// Amount to credit back to the wallet
        payout: i64,
    },
}

/// A player decision arriving from the interaction layer. Button custom IDs
/// are resolved into this closed set once at the boundary; the core never
/// sees free-form identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Draw one more card
    Hit,
    /// Stop drawing and let the dealer play
    Stand,
    /// Clear a finished session to free the table slot
    NewGame,
}

/// Result half of a [`GameView`], present only for finished games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    /// How the game ended
    pub outcome: Outcome,
    /// Amount credited back to the wallet
    pub payout: i64,
}

/// Player-facing snapshot of a session, ready for rendering. While the game
/// is in progress the dealer's hole card is hidden and the dealer score only
/// counts the visible upcard.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Display name of the player
    pub username: String,
    /// Stake fixed at creation
    pub bet: i64,
    /// Player's cards, rendered
    pub player_cards: String,
    /// Player's current total
    pub player_score: u32,
    /// Dealer's cards, hole card hidden while in progress
    pub dealer_cards: String,
    /// Dealer's visible total
    pub dealer_score: u32,
    /// Outcome and payout, once the game is over
    pub result: Option<GameResult>,
    /// Buttons that make sense in the current phase
    pub actions: Vec<GameAction>,
}

/// One player's blackjack game: both hands, the phase, and the session RNG.
#[derive(Debug)]
pub struct GameSession {
    player_id: String,
    username: String,
    bet: i64,
    player_hand: Vec<Card>,
    dealer_hand: Vec<Card>,
    phase: Phase,
    finished_at: Option<tokio::time::Instant>,
    settled: bool,
    rng: StdRng,
}

impl GameSession {
    /// Deals a fresh game: two cards to the player, two to the dealer.
    ///
    /// If the opening deal gives the player 21 the session is immediately
    /// terminal with a natural blackjack - no `stand` required.
    #[must_use]
    pub fn new(player_id: String, username: String, bet: i64, mut rng: StdRng) -> Self {
        let player_hand = vec![Card::draw(&mut rng), Card::draw(&mut rng)];
        let dealer_hand = vec![Card::draw(&mut rng), Card::draw(&mut rng)];

        let mut session = Self {
            player_id,
            username,
            bet,
            player_hand,
            dealer_hand,
            phase: Phase::InProgress,
            finished_at: None,
            settled: false,
            rng,
        };

        if hand::hand_value(&session.player_hand) == BLACKJACK {
            session.finish(Outcome::PlayerBlackjack);
        }

        session
    }

    /// Player draws one card.
    ///
    /// Over 21 busts, exactly 21 resolves to blackjack, anything else stays
    /// in progress. Rejected with [`Error::InvalidAction`] on a finished
    /// game, leaving both hands untouched.
    pub fn hit(&mut self) -> Result<()> {
        if self.phase != Phase::InProgress {
            return Err(Error::InvalidAction);
        }

        self.player_hand.push(Card::draw(&mut self.rng));
        let value = hand::hand_value(&self.player_hand);

        if value > BLACKJACK {
            self.finish(Outcome::PlayerBust);
        } else if value == BLACKJACK {
            self.finish(Outcome::PlayerBlackjack);
        }

        Ok(())
    }

    /// Player stands; the dealer plays out its fixed policy and the game
    /// resolves.
    ///
    /// The dealer draws while below 17 and stands on 17 or more. The loop
    /// terminates because every draw adds at least one point to the hand's
    /// minimum value. Rejected with [`Error::InvalidAction`] on a finished
    /// game.
    pub fn stand(&mut self) -> Result<()> {
        if self.phase != Phase::InProgress {
            return Err(Error::InvalidAction);
        }

        while hand::hand_value(&self.dealer_hand) < DEALER_STAND {
            self.dealer_hand.push(Card::draw(&mut self.rng));
        }

        let dealer = hand::hand_value(&self.dealer_hand);
        let player = hand::hand_value(&self.player_hand);

        let outcome = if dealer > BLACKJACK {
            Outcome::DealerBust
        } else if dealer > player {
            Outcome::DealerWin
        } else if dealer < player {
            Outcome::PlayerWin
        } else {
            Outcome::Push
        };
        self.finish(outcome);

        Ok(())
    }

    fn finish(&mut self, outcome: Outcome) {
        let payout = payout::payout(outcome, hand::is_natural(&self.player_hand), self.bet);
        self.phase = Phase::Over { outcome, payout };
        self.finished_at = Some(tokio::time::Instant::now());
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the game has reached a terminal phase.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Over { .. })
    }

    /// Whether the terminal payout has been credited to the wallet.
    ///
    /// Always false while the game is in progress. A terminal session stays
    /// unsettled until the credit succeeds, so a failed credit can be
    /// retried instead of abandoning money the stake already paid for.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.settled
    }

    /// Records that the terminal payout has been credited. Called exactly
    /// once, after the wallet write succeeds.
    pub(crate) const fn mark_settled(&mut self) {
        self.settled = true;
    }

    /// When the game finished, if it has.
    #[must_use]
    pub const fn finished_at(&self) -> Option<tokio::time::Instant> {
        self.finished_at
    }

    /// The stake fixed at creation.
    #[must_use]
    pub const fn bet(&self) -> i64 {
        self.bet
    }

    /// Discord user ID owning this session.
    #[must_use]
    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    /// Display name of the player.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Builds the player-facing snapshot for rendering.
    #[must_use]
    pub fn view(&self) -> GameView {
        let in_progress = self.phase == Phase::InProgress;

        // Hole card stays face down until the game resolves; the visible
        // score counts only the upcard.
        let (dealer_cards, dealer_score) = if in_progress {
            let upcard = self.dealer_hand[1];
            (
                format!("🂠 {upcard}"),
                hand::hand_value(std::slice::from_ref(&self.dealer_hand[1])),
            )
        } else {
            (
                render_hand(&self.dealer_hand),
                hand::hand_value(&self.dealer_hand),
            )
        };

        let result = match self.phase {
            Phase::InProgress => None,
            Phase::Over { outcome, payout } => Some(GameResult { outcome, payout }),
        };

        let actions = if in_progress {
            vec![GameAction::Hit, GameAction::Stand]
        } else {
            vec![GameAction::NewGame]
        };

        GameView {
            username: self.username.clone(),
            bet: self.bet,
            player_cards: render_hand(&self.player_hand),
            player_score: hand::hand_value(&self.player_hand),
            dealer_cards,
            dealer_score,
            result,
            actions,
        }
    }

    /// Builds a session with fixed opening hands, applying the same natural
    /// resolution as [`GameSession::new`]. Test-only: lets tests pin the
    /// deal instead of fishing for seeds.
    #[cfg(test)]
    pub(crate) fn with_hands(
        player_id: &str,
        bet: i64,
        player_hand: Vec<Card>,
        dealer_hand: Vec<Card>,
        rng: StdRng,
    ) -> Self {
        let mut session = Self {
            player_id: player_id.to_string(),
            username: player_id.to_string(),
            bet,
            player_hand,
            dealer_hand,
            phase: Phase::InProgress,
            finished_at: None,
            settled: false,
            rng,
        };

        if hand::hand_value(&session.player_hand) == BLACKJACK {
            session.finish(Outcome::PlayerBlackjack);
        }

        session
    }
}

fn render_hand(cards: &[Card]) -> String {
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::card::{Rank, Suit};
    use rand::SeedableRng;

    fn cards(ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|&r| Card::new(r, Suit::Clubs)).collect()
    }

    fn session(player: &[Rank], dealer: &[Rank]) -> GameSession {
        GameSession::with_hands(
            "player-1",
            10_000,
            cards(player),
            cards(dealer),
            StdRng::seed_from_u64(99),
        )
    }

    #[tokio::test]
    async fn test_opening_deal_has_two_cards_each() {
        let game = GameSession::new(
            "player-1".to_string(),
            "Player".to_string(),
            5_000,
            StdRng::seed_from_u64(1),
        );
        let view = game.view();
        assert_eq!(view.bet, 5_000);
        // Two rendered player cards separated by a space
        assert_eq!(view.player_cards.split(' ').count(), 2);
    }

    #[tokio::test]
    async fn test_natural_deal_is_immediately_terminal() {
        let game = session(&[Rank::Ace, Rank::King], &[Rank::Nine, Rank::Six]);

        assert!(game.is_over());
        assert!(game.finished_at().is_some());
        assert_eq!(
            game.phase(),
            Phase::Over {
                outcome: Outcome::PlayerBlackjack,
                payout: 25_000,
            }
        );
    }

    #[tokio::test]
    async fn test_hit_to_21_resolves_blackjack_without_natural_odds() {
        // Player at 17 keeps hitting until the game ends; whatever the draws
        // are, a 21 reached here has three or more cards and pays 2x at most.
        let mut game = session(&[Rank::Ten, Rank::Seven], &[Rank::Nine, Rank::Six]);
        while !game.is_over() {
            game.hit().unwrap();
        }

        match game.phase() {
            Phase::Over {
                outcome: Outcome::PlayerBlackjack,
                payout,
            } => assert_eq!(payout, 20_000),
            Phase::Over {
                outcome: Outcome::PlayerBust,
                payout,
            } => assert_eq!(payout, 0),
            phase => panic!("unexpected phase after hitting to the end: {phase:?}"),
        }
    }

    #[tokio::test]
    async fn test_hit_on_finished_game_is_rejected_and_mutates_nothing() {
        let mut game = session(&[Rank::Ace, Rank::King], &[Rank::Nine, Rank::Six]);
        assert!(game.is_over());

        let before = game.view();
        assert!(matches!(game.hit(), Err(Error::InvalidAction)));
        assert!(matches!(game.stand(), Err(Error::InvalidAction)));

        let after = game.view();
        assert_eq!(before.player_cards, after.player_cards);
        assert_eq!(before.dealer_cards, after.dealer_cards);
    }

    #[tokio::test]
    async fn test_stand_leaves_dealer_at_seventeen_or_bust() {
        for seed in 0..50 {
            let mut game = GameSession::with_hands(
                "player-1",
                10_000,
                cards(&[Rank::Ten, Rank::Seven]),
                cards(&[Rank::Two, Rank::Three]),
                StdRng::seed_from_u64(seed),
            );
            game.stand().unwrap();

            let dealer = hand::hand_value(&game.dealer_hand);
            assert!(dealer >= DEALER_STAND, "dealer stopped below 17: {dealer}");

            // Payout must be consistent with the comparison
            let player = hand::hand_value(&game.player_hand);
            let Phase::Over { outcome, payout } = game.phase() else {
                panic!("stand left the game in progress");
            };
            match outcome {
                Outcome::DealerBust => {
                    assert!(dealer > BLACKJACK);
                    assert_eq!(payout, 20_000);
                }
                Outcome::DealerWin => {
                    assert!(dealer > player);
                    assert_eq!(payout, 0);
                }
                Outcome::PlayerWin => {
                    assert!(dealer < player);
                    assert_eq!(payout, 20_000);
                }
                Outcome::Push => {
                    assert_eq!(dealer, player);
                    assert_eq!(payout, 10_000);
                }
                other => panic!("stand produced a hit outcome: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_stand_with_pat_dealer_is_deterministic() {
        // Dealer holds 19 and never draws: player's 17 loses outright.
        let mut game = session(&[Rank::Ten, Rank::Seven], &[Rank::Nine, Rank::Ten]);
        game.stand().unwrap();

        assert_eq!(
            game.phase(),
            Phase::Over {
                outcome: Outcome::DealerWin,
                payout: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_push_returns_the_stake() {
        let mut game = session(&[Rank::Ten, Rank::Nine], &[Rank::Nine, Rank::Ten]);
        game.stand().unwrap();

        assert_eq!(
            game.phase(),
            Phase::Over {
                outcome: Outcome::Push,
                payout: 10_000,
            }
        );
    }

    #[tokio::test]
    async fn test_view_hides_the_hole_card_while_in_progress() {
        let game = session(&[Rank::Ten, Rank::Seven], &[Rank::Nine, Rank::Six]);

        let view = game.view();
        assert!(view.dealer_cards.starts_with("🂠"));
        assert!(!view.dealer_cards.contains('9'));
        // Visible score counts only the upcard
        assert_eq!(view.dealer_score, 6);
        assert_eq!(view.player_score, 17);
        assert_eq!(view.actions, vec![GameAction::Hit, GameAction::Stand]);
        assert!(view.result.is_none());
    }

    #[tokio::test]
    async fn test_view_reveals_everything_once_over() {
        let mut game = session(&[Rank::Ten, Rank::Seven], &[Rank::Nine, Rank::Ten]);
        game.stand().unwrap();

        let view = game.view();
        assert!(!view.dealer_cards.contains('🂠'));
        assert_eq!(view.dealer_score, 19);
        assert_eq!(view.actions, vec![GameAction::NewGame]);
        assert_eq!(
            view.result,
            Some(GameResult {
                outcome: Outcome::DealerWin,
                payout: 0,
            })
        );
    }
}
