//! Hand evaluation - blackjack hand values with soft-ace adjustment.
//!
//! Aces are counted as 11 provisionally and demoted to 1 one at a time,
//! only while the hand would otherwise bust. The result is the best total
//! not exceeding 21 when one exists, and the minimal bust total otherwise.

use crate::core::card::{Card, Rank};

/// The target total. Hands above this value are bust.
pub const BLACKJACK: u32 = 21;

/// The total at which the dealer stops drawing.
pub const DEALER_STAND: u32 = 17;

/// Computes the blackjack value of a hand.
#[must_use]
pub fn hand_value(cards: &[Card]) -> u32 {
    let mut total = 0;
    let mut soft_aces = 0;

    for card in cards {
        if card.rank == Rank::Ace {
            soft_aces += 1;
        }
        total += card.rank.base_value();
    }

    // Demote aces from 11 to 1, only as many as needed
    while total > BLACKJACK && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }

    total
}

/// Whether a hand is a natural blackjack: exactly two cards totaling 21.
/// A 21 reached with three or more cards is a win but not a natural.
#[must_use]
pub fn is_natural(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards) == BLACKJACK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::Suit;

    fn hand(ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|&r| Card::new(r, Suit::Spades)).collect()
    }

    #[test]
    fn test_number_cards_count_at_face_value() {
        assert_eq!(hand_value(&hand(&[Rank::Two, Rank::Three])), 5);
        assert_eq!(hand_value(&hand(&[Rank::Ten, Rank::Seven])), 17);
        assert_eq!(hand_value(&hand(&[Rank::Five, Rank::Six, Rank::Ten])), 21);
    }

    #[test]
    fn test_face_cards_count_as_ten() {
        assert_eq!(hand_value(&hand(&[Rank::Jack, Rank::Queen, Rank::King])), 30);
    }

    #[test]
    fn test_two_aces_make_twelve() {
        assert_eq!(hand_value(&hand(&[Rank::Ace, Rank::Ace])), 12);
    }

    #[test]
    fn test_soft_ace_stays_high_when_possible() {
        assert_eq!(hand_value(&hand(&[Rank::Ace, Rank::Nine])), 20);
        assert_eq!(hand_value(&hand(&[Rank::Ace, Rank::Six])), 17);
    }

    #[test]
    fn test_aces_are_demoted_only_as_needed() {
        assert_eq!(hand_value(&hand(&[Rank::Ace, Rank::Ace, Rank::Nine])), 21);
        // Three aces plus an eight: 41 -> 31 -> 21, two demotions suffice
        assert_eq!(
            hand_value(&hand(&[Rank::Ace, Rank::Ace, Rank::Ace, Rank::Eight])),
            21
        );
    }

    #[test]
    fn test_bust_with_hard_cards() {
        assert_eq!(hand_value(&hand(&[Rank::Ten, Rank::Nine, Rank::Five])), 24);
    }

    #[test]
    fn test_never_busts_when_a_non_bust_arrangement_exists() {
        // A,A,A,A,A,A = 6 aces: best non-bust total is 16
        let cards = hand(&[Rank::Ace; 6]);
        assert_eq!(hand_value(&cards), 16);
        assert!(hand_value(&cards) <= BLACKJACK);
    }

    #[test]
    fn test_natural_requires_exactly_two_cards() {
        assert!(is_natural(&hand(&[Rank::Ace, Rank::King])));
        assert!(is_natural(&hand(&[Rank::Ace, Rank::Ten])));
        assert!(!is_natural(&hand(&[Rank::Seven, Rank::Seven, Rank::Seven])));
        assert!(!is_natural(&hand(&[Rank::Ace, Rank::Nine])));
    }
}
