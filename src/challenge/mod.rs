//! Challenge resolution.
//!
//! A challenge disputes the current claim. Resolution counts the matching
//! cards across every concealed hand at resolution time, applies the truth
//! rule (`actual >= claimed` vindicates the claimer), debits the losing
//! side and, when a wildcard was activated by a participant, folds its
//! penalty multiplier into the result. The computation is a pure function
//! of hands and claim, so any client and the server agree on the outcome.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{CardValue, Hand};
use crate::core::player::{PlayerId, PlayerMap};
use crate::declaration::Claim;
use crate::wildcard::{calculate_effect, determine_scenario, WildcardEffect};

/// Challenge lifecycle: `Pending -> PendingWildcardDecision (optional) ->
/// Resolved`. The wildcard window only opens when a participant holds an
/// unused wildcard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeState {
    Pending,
    PendingWildcardDecision,
    Resolved,
}

/// A dispute of the table's current claim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub challenger: PlayerId,
    pub claimer: PlayerId,
    pub claim: Claim,
    pub state: ChallengeState,
    /// Set when a participant activated their wildcard for this challenge.
    pub wildcard_activated_by: Option<PlayerId>,
    /// Present once `state` is `Resolved`.
    pub result: Option<ChallengeResult>,
}

impl Challenge {
    /// Open a challenge against `claim`.
    #[must_use]
    pub fn new(challenger: PlayerId, claim: Claim) -> Self {
        Self {
            challenger,
            claimer: claim.player,
            claim,
            state: ChallengeState::Pending,
            wildcard_activated_by: None,
            result: None,
        }
    }

    /// True if `player` is the claimer or the challenger.
    #[must_use]
    pub fn involves(&self, player: PlayerId) -> bool {
        player == self.claimer || player == self.challenger
    }
}

/// The scored, auditable outcome of a challenge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChallengeResult {
    pub claimed_quantity: u8,
    pub actual_count: u8,
    /// `actual_count - claimed_quantity`.
    pub difference: i16,
    pub claim_was_true: bool,
    pub loser: PlayerId,
    pub winner: PlayerId,
    pub base_penalty: i64,
    pub wildcard_effect: Option<WildcardEffect>,
    /// Equal to `base_penalty` unless a wildcard applied.
    pub modified_penalty: i64,
    /// Human-readable account for display.
    pub explanation: String,
}

/// Count every card value across all concealed hands in one pass.
fn value_histogram(hands: &PlayerMap<Hand>) -> FxHashMap<CardValue, usize> {
    let mut histogram = FxHashMap::default();
    for (_, hand) in hands.iter() {
        for card in hand.iter() {
            *histogram.entry(card.value).or_insert(0) += 1;
        }
    }
    histogram
}

/// Resolve a challenge against the concealed hands.
///
/// `wildcard_owner` is the participant whose wildcard was activated for
/// this challenge, if any; a non-participant owner yields no scenario and
/// no effect. The caller applies `modified_penalty` to the loser's credits.
#[must_use]
pub fn resolve_challenge(
    challenge: &Challenge,
    hands: &PlayerMap<Hand>,
    base_penalty: i64,
    wildcard_owner: Option<PlayerId>,
) -> ChallengeResult {
    let claim = &challenge.claim;
    let actual_count = *value_histogram(hands).get(&claim.value).unwrap_or(&0) as u8;
    let claim_was_true = actual_count >= claim.quantity;

    let (loser, winner) = if claim_was_true {
        (challenge.challenger, challenge.claimer)
    } else {
        (challenge.claimer, challenge.challenger)
    };

    let wildcard_effect = wildcard_owner
        .and_then(|owner| {
            determine_scenario(owner, challenge.claimer, challenge.challenger, claim_was_true)
        })
        .map(|scenario| calculate_effect(scenario, base_penalty));

    let modified_penalty = wildcard_effect
        .map(|e| e.modified_penalty)
        .unwrap_or(base_penalty);

    let mut explanation = format!(
        "Claimed {}, counted {} across all hands. The claim was {}: {} loses {} credits.",
        claim,
        actual_count,
        if claim_was_true { "true" } else { "false" },
        loser,
        modified_penalty,
    );
    if let Some(effect) = &wildcard_effect {
        explanation.push_str(&format!(
            " A wildcard {} the penalty from {} to {}.",
            if effect.was_saved { "halved" } else { "inflated" },
            effect.original_penalty,
            effect.modified_penalty,
        ));
    }

    debug!(
        claimed = claim.quantity,
        actual = actual_count,
        claim_was_true,
        %loser,
        modified_penalty,
        "challenge resolved"
    );

    ChallengeResult {
        claimed_quantity: claim.quantity,
        actual_count,
        difference: actual_count as i16 - claim.quantity as i16,
        claim_was_true,
        loser,
        winner,
        base_penalty,
        wildcard_effect,
        modified_penalty,
        explanation,
    }
}
