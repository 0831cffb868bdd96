//! Payout calculation - maps a terminal outcome to the amount credited back.
//!
//! The bet is debited in full when the game is created, so the payout here is
//! a replacement credit, not net profit: a push credits exactly the stake
//! (net zero), a regular win credits twice the stake (net +bet), and a
//! natural blackjack credits `floor(bet * 2.5)` (3:2 on top of the stake).
//! Losses credit nothing.

use crate::core::game::Outcome;

/// Computes the amount to credit back to the wallet for a finished game.
///
/// `natural` is whether the player's terminal hand was a two-card 21;
/// it only matters for winning outcomes.
#[must_use]
pub const fn payout(outcome: Outcome, natural: bool, bet: i64) -> i64 {
    match outcome {
        Outcome::PlayerWin | Outcome::PlayerBlackjack | Outcome::DealerBust => {
            if natural {
                // floor(bet * 2.5) without going through floats
                bet * 5 / 2
            } else {
                bet * 2
            }
        }
        Outcome::Push => bet,
        Outcome::PlayerBust | Outcome::DealerWin => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_win_pays_three_to_two() {
        assert_eq!(payout(Outcome::PlayerBlackjack, true, 10_000), 25_000);
        assert_eq!(payout(Outcome::DealerBust, true, 10_000), 25_000);
    }

    #[test]
    fn test_natural_payout_is_floored() {
        // floor(5 * 2.5) = 12
        assert_eq!(payout(Outcome::PlayerBlackjack, true, 5), 12);
        assert_eq!(payout(Outcome::PlayerWin, true, 5_001), 12_502);
    }

    #[test]
    fn test_regular_win_pays_even_money() {
        assert_eq!(payout(Outcome::PlayerWin, false, 10_000), 20_000);
        assert_eq!(payout(Outcome::DealerBust, false, 7_500), 15_000);
        // A 21 reached with three or more cards is not a natural
        assert_eq!(payout(Outcome::PlayerBlackjack, false, 10_000), 20_000);
    }

    #[test]
    fn test_push_returns_exactly_the_stake() {
        assert_eq!(payout(Outcome::Push, false, 10_000), 10_000);
        // Even a natural pushes flat
        assert_eq!(payout(Outcome::Push, true, 10_000), 10_000);
    }

    #[test]
    fn test_losses_pay_nothing() {
        assert_eq!(payout(Outcome::PlayerBust, false, 10_000), 0);
        assert_eq!(payout(Outcome::DealerWin, false, 10_000), 0);
    }
}
