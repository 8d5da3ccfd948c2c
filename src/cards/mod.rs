//! Card and deck model: card identity, deck construction and shuffling,
//! hand dealing and the hand-size limit.

pub mod card;
pub mod deck;
pub mod hand;

pub use card::{Card, CardValue, Suit};
pub use deck::{
    deal_initial_hand, draw_card, shuffle_deck, standard_deck, DECK_SIZE, DEFAULT_HAND_SIZE,
};
pub use hand::{Hand, HAND_LIMIT};
