//! Card model - Ranks, suits, and random draws from an infinite shoe.
//!
//! The table deals from an infinite shoe: every draw picks a rank and a suit
//! uniformly and independently, so cards never run out and card counting is
//! pointless. Randomness is injected through [`rand::Rng`] so that test code
//! can replay exact card sequences with a seeded generator.

use rand::Rng;

/// Card suit. Cosmetic only - suits carry no weight in blackjack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suit {
    /// ♠️
    Spades,
    /// ♥️
    Hearts,
    /// ♦️
    Diamonds,
    /// ♣️
    Clubs,
}

impl Suit {
    /// All four suits, used for uniform draws.
    pub const ALL: [Self; 4] = [Self::Spades, Self::Hearts, Self::Diamonds, Self::Clubs];

    /// Emoji used when rendering a card of this suit.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Spades => "♠️",
            Self::Hearts => "♥️",
            Self::Diamonds => "♦️",
            Self::Clubs => "♣️",
        }
    }
}

/// Card rank, Ace through King.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    /// A - counts as 11 until the hand would bust, then 1
    Ace,
    /// 2
    Two,
    /// 3
    Three,
    /// 4
    Four,
    /// 5
    Five,
    /// 6
    Six,
    /// 7
    Seven,
    /// 8
    Eight,
    /// 9
    Nine,
    /// 10
    Ten,
    /// J - counts as 10
    Jack,
    /// Q - counts as 10
    Queen,
    /// K - counts as 10
    King,
}

impl Rank {
    /// All thirteen ranks, used for uniform draws.
    pub const ALL: [Self; 13] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];

    /// Provisional point value: number cards at face value, face cards 10,
    /// Ace 11. The hand evaluator demotes aces to 1 as needed.
    #[must_use]
    pub const fn base_value(self) -> u32 {
        match self {
            Self::Ace => 11,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Nine => 9,
            Self::Ten | Self::Jack | Self::Queen | Self::King => 10,
        }
    }

    /// Short label used when rendering a card of this rank.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ace => "A",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
        }
    }
}

/// A single playing card. Immutable value, freshly constructed on each draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    /// Rank of the card - determines its point value
    pub rank: Rank,
    /// Suit of the card - rendering only
    pub suit: Suit,
}

impl Card {
    /// Draws one card from the infinite shoe.
    pub fn draw(rng: &mut impl Rng) -> Self {
        Self {
            rank: Rank::ALL[rng.gen_range(0..Rank::ALL.len())],
            suit: Suit::ALL[rng.gen_range(0..Suit::ALL.len())],
        }
    }

    /// Convenience constructor, mostly useful in tests.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_draw_is_reproducible_under_a_fixed_seed() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);

        let first: Vec<Card> = (0..20).map(|_| Card::draw(&mut a)).collect();
        let second: Vec<Card> = (0..20).map(|_| Card::draw(&mut b)).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_base_values() {
        assert_eq!(Rank::Ace.base_value(), 11);
        assert_eq!(Rank::Two.base_value(), 2);
        assert_eq!(Rank::Ten.base_value(), 10);
        assert_eq!(Rank::Jack.base_value(), 10);
        assert_eq!(Rank::Queen.base_value(), 10);
        assert_eq!(Rank::King.base_value(), 10);
    }

    #[test]
    fn test_draws_stay_within_the_deck() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let card = Card::draw(&mut rng);
            assert!(Rank::ALL.contains(&card.rank));
            assert!(Suit::ALL.contains(&card.suit));
            assert!((2..=11).contains(&card.rank.base_value()));
        }
    }

    #[test]
    fn test_display_format() {
        let card = Card::new(Rank::Queen, Suit::Hearts);
        assert_eq!(card.to_string(), "Q♥️");
    }
}
