//! Events emitted by accepted actions.
//!
//! The collaborator persists the new state snapshot and broadcasts these
//! tags so clients can render what just happened without diffing snapshots.

use serde::{Deserialize, Serialize};

use crate::challenge::ChallengeResult;
use crate::core::player::PlayerId;
use crate::declaration::Claim;

/// A discrete, serializable record of something the engine accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A declaration was accepted and appended to the claim history.
    ClaimMade { player: PlayerId, claim: Claim },
    /// A challenge was opened against the current claim.
    ChallengeRaised {
        challenger: PlayerId,
        claimer: PlayerId,
    },
    /// A participant activated their wildcard inside the pending challenge.
    WildcardActivated { player: PlayerId },
    /// The challenge resolved; the loser was debited.
    ChallengeResolved { result: ChallengeResult },
    /// A player forfeited their turn without declaring.
    TurnPassed { player: PlayerId },
    /// A card was discarded from an over-limit hand.
    CardDiscarded { player: PlayerId },
    /// A new round was dealt.
    RoundAdvanced { round_index: u32 },
    /// All rounds are played; final ranking by credits, descending.
    GameOver { ranking: Vec<(PlayerId, i64)> },
}
