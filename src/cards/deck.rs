//! Deck construction, shuffling, dealing and drawing.
//!
//! All operations are pure transformations: they take slices and return new
//! collections, never mutating their input. The round owns the deck only
//! during setup; once hands are dealt the deck plays no further part.

use crate::core::rng::GameRng;
use crate::error::EngineError;

use super::card::{Card, CardValue, Suit};
use super::hand::Hand;

/// Cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// Default cards dealt to each player at round start.
pub const DEFAULT_HAND_SIZE: usize = 5;

/// Build the full 52-card deck in a deterministic pre-shuffle order
/// (suit-major, values ascending within each suit).
#[must_use]
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for value in CardValue::ALL {
            deck.push(Card::new(value, suit));
        }
    }
    deck
}

/// Return a uniformly shuffled copy of `deck`. The input is untouched.
///
/// Delegates to [`GameRng::shuffle`], an unbiased Fisher-Yates permutation,
/// so the same seed and draw position always produce the same order.
#[must_use]
pub fn shuffle_deck(deck: &[Card], rng: &mut GameRng) -> Vec<Card> {
    let mut shuffled = deck.to_vec();
    rng.shuffle(&mut shuffled);
    shuffled
}

/// Deal the first `n` cards as a hand, returning the hand and the rest of
/// the deck.
///
/// Fails with [`EngineError::InsufficientCards`] when fewer than `n` cards
/// remain.
pub fn deal_initial_hand(deck: &[Card], n: usize) -> Result<(Hand, Vec<Card>), EngineError> {
    if deck.len() < n {
        return Err(EngineError::InsufficientCards {
            needed: n,
            available: deck.len(),
        });
    }
    let hand = deck[..n].iter().copied().collect();
    let remaining = deck[n..].to_vec();
    Ok((hand, remaining))
}

/// Remove and return the first card of the deck.
///
/// Fails with [`EngineError::EmptyDeck`] when the deck is empty.
pub fn draw_card(deck: &[Card]) -> Result<(Card, Vec<Card>), EngineError> {
    match deck.split_first() {
        Some((&card, rest)) => Ok((card, rest.to_vec())),
        None => Err(EngineError::EmptyDeck),
    }
}
