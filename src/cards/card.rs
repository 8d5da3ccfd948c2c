//! Card identity: ranked values and suits.
//!
//! A standard French deck: 13 values times 4 suits, 52 distinct cards.
//! Values carry the fixed escalation order 2 < 3 < ... < 10 < J < Q < K < A
//! used by declaration progression; `Ord` on `CardValue` follows that order.

use serde::{Deserialize, Serialize};

/// Card value, ordered by escalation rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardValue {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl CardValue {
    /// All values in ascending rank order.
    pub const ALL: [CardValue; 13] = [
        CardValue::Two,
        CardValue::Three,
        CardValue::Four,
        CardValue::Five,
        CardValue::Six,
        CardValue::Seven,
        CardValue::Eight,
        CardValue::Nine,
        CardValue::Ten,
        CardValue::Jack,
        CardValue::Queen,
        CardValue::King,
        CardValue::Ace,
    ];

    /// Numeric rank: 2 for Two up to 14 for Ace.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            CardValue::Two => 2,
            CardValue::Three => 3,
            CardValue::Four => 4,
            CardValue::Five => 5,
            CardValue::Six => 6,
            CardValue::Seven => 7,
            CardValue::Eight => 8,
            CardValue::Nine => 9,
            CardValue::Ten => 10,
            CardValue::Jack => 11,
            CardValue::Queen => 12,
            CardValue::King => 13,
            CardValue::Ace => 14,
        }
    }

    /// Short display symbol ("2".."10", "J", "Q", "K", "A").
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            CardValue::Two => "2",
            CardValue::Three => "3",
            CardValue::Four => "4",
            CardValue::Five => "5",
            CardValue::Six => "6",
            CardValue::Seven => "7",
            CardValue::Eight => "8",
            CardValue::Nine => "9",
            CardValue::Ten => "10",
            CardValue::Jack => "J",
            CardValue::Queen => "Q",
            CardValue::King => "K",
            CardValue::Ace => "A",
        }
    }
}

impl std::fmt::Display for CardValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Card suit. Suits never affect declarations or challenges; they exist so
/// the 52 cards are distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    /// All four suits.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An immutable card value object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub value: CardValue,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(value: CardValue, suit: Suit) -> Self {
        Self { value, suit }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order_matches_enum_order() {
        for pair in CardValue::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn test_rank_bounds() {
        assert_eq!(CardValue::Two.rank(), 2);
        assert_eq!(CardValue::Ten.rank(), 10);
        assert_eq!(CardValue::Jack.rank(), 11);
        assert_eq!(CardValue::Ace.rank(), 14);
    }

    #[test]
    fn test_display() {
        let card = Card::new(CardValue::Queen, Suit::Hearts);
        assert_eq!(card.to_string(), "Q♥");
        assert_eq!(Card::new(CardValue::Ten, Suit::Clubs).to_string(), "10♣");
    }

    #[test]
    fn test_card_equality() {
        let a = Card::new(CardValue::Ace, Suit::Spades);
        let b = Card::new(CardValue::Ace, Suit::Spades);
        let c = Card::new(CardValue::Ace, Suit::Hearts);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_serde_round_trip() {
        let card = Card::new(CardValue::King, Suit::Diamonds);
        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
