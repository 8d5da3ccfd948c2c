//! Player intents submitted to the engine.
//!
//! Every action carries the `basis`: the public `action_sequence` the client
//! built the action against. The engine rejects a mismatched basis with
//! `StaleState` before considering anything else, which is how two players
//! racing for the same transition are serialized to at most one winner.
//!
//! Round lifecycle steps (starting and advancing rounds) are collaborator
//! calls on the engine, not player intents, so they are not represented
//! here.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardValue};
use crate::core::player::PlayerId;

/// What the player wants to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// Declare a claim: "(at least) `quantity` cards of `value`".
    Declare { quantity: u8, value: CardValue },
    /// Dispute the table's current claim.
    Challenge,
    /// Activate an owned wildcard inside the pending challenge.
    ActivateWildcard,
    /// Forfeit the turn, or decline a pending wildcard window.
    Pass,
    /// Discard a card from an over-limit hand.
    Discard { card: Card },
}

/// A complete intent: actor, assumed state, action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAction {
    /// The acting player.
    pub player: PlayerId,
    /// The `action_sequence` this intent was built against.
    pub basis: u32,
    /// The intent itself.
    pub kind: ActionKind,
}

impl PlayerAction {
    #[must_use]
    pub const fn new(player: PlayerId, basis: u32, kind: ActionKind) -> Self {
        Self {
            player,
            basis,
            kind,
        }
    }

    /// Convenience constructor for a declaration.
    #[must_use]
    pub const fn declare(player: PlayerId, basis: u32, quantity: u8, value: CardValue) -> Self {
        Self::new(player, basis, ActionKind::Declare { quantity, value })
    }

    /// Convenience constructor for a challenge.
    #[must_use]
    pub const fn challenge(player: PlayerId, basis: u32) -> Self {
        Self::new(player, basis, ActionKind::Challenge)
    }

    /// Convenience constructor for a wildcard activation.
    #[must_use]
    pub const fn activate_wildcard(player: PlayerId, basis: u32) -> Self {
        Self::new(player, basis, ActionKind::ActivateWildcard)
    }

    /// Convenience constructor for a pass.
    #[must_use]
    pub const fn pass(player: PlayerId, basis: u32) -> Self {
        Self::new(player, basis, ActionKind::Pass)
    }

    /// Convenience constructor for a discard.
    #[must_use]
    pub const fn discard(player: PlayerId, basis: u32, card: Card) -> Self {
        Self::new(player, basis, ActionKind::Discard { card })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    #[test]
    fn test_constructors() {
        let action = PlayerAction::declare(PlayerId::new(0), 3, 4, CardValue::King);
        assert_eq!(action.player, PlayerId::new(0));
        assert_eq!(action.basis, 3);
        assert_eq!(
            action.kind,
            ActionKind::Declare {
                quantity: 4,
                value: CardValue::King
            }
        );

        let pass = PlayerAction::pass(PlayerId::new(1), 7);
        assert_eq!(pass.kind, ActionKind::Pass);
    }

    #[test]
    fn test_serde_round_trip() {
        let action = PlayerAction::discard(
            PlayerId::new(2),
            0,
            Card::new(CardValue::Nine, Suit::Clubs),
        );
        let json = serde_json::to_string(&action).unwrap();
        let back: PlayerAction = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }
}
