//! Wildcard engine: hidden single-use power-ups that skew challenge
//! penalties.
//!
//! One wildcard (or two, in double mode) is assigned to a random owner at
//! game start. Ownership stays hidden until activation. When a challenge
//! involving the owner is pending, the owner may activate; the outcome is
//! classified by (owner's role) x (claim truth) and the penalty is scaled:
//!
//! | owner is   | claim true | scenario        | multiplier |
//! |------------|------------|-----------------|------------|
//! | claimer    | yes        | ClaimerTrue     | 0.5        |
//! | claimer    | no         | ClaimerFalse    | 1.5        |
//! | challenger | yes        | ChallengerTrue  | 1.5        |
//! | challenger | no         | ChallengerFalse | 0.5        |
//!
//! The owner landing on the side that is proven right halves the penalty;
//! landing on the side proven wrong inflates it by half. This is the tested
//! product contract.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::WildcardMode;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::error::{EngineError, WildcardRefusal};

/// Lifecycle of a wildcard: `Unused -> Activated -> Exhausted`.
///
/// Activation happens at most once per wildcard, ever. `Activated` is the
/// window between a validated activation request and the resolution of the
/// challenge it was used in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WildcardState {
    #[default]
    Unused,
    Activated,
    Exhausted,
}

/// A wildcard and its owner. Ownership is private state; it is revealed to
/// the table only through activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wildcard {
    pub owner: PlayerId,
    pub state: WildcardState,
}

impl Wildcard {
    #[must_use]
    pub const fn new(owner: PlayerId) -> Self {
        Self {
            owner,
            state: WildcardState::Unused,
        }
    }

    #[must_use]
    pub fn is_unused(&self) -> bool {
        self.state == WildcardState::Unused
    }
}

/// Classification of an activation by owner role and claim truth.
/// Derived at resolution time, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WildcardScenario {
    ClaimerTrue,
    ClaimerFalse,
    ChallengerTrue,
    ChallengerFalse,
}

impl WildcardScenario {
    /// Penalty multiplier for this scenario.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            WildcardScenario::ClaimerTrue | WildcardScenario::ChallengerFalse => 0.5,
            WildcardScenario::ClaimerFalse | WildcardScenario::ChallengerTrue => 1.5,
        }
    }

    /// True when this scenario reduces the penalty (the owner's side was
    /// proven right).
    #[must_use]
    pub const fn reduces(self) -> bool {
        matches!(
            self,
            WildcardScenario::ClaimerTrue | WildcardScenario::ChallengerFalse
        )
    }
}

/// The full accounting of an applied wildcard, kept for display.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WildcardEffect {
    pub was_used: bool,
    pub scenario: WildcardScenario,
    pub multiplier: f64,
    /// Half the base penalty: the symmetric delta, subtracted or added.
    pub effect_amount: i64,
    pub original_penalty: i64,
    pub modified_penalty: i64,
    /// The owner's side won and the penalty shrank.
    pub was_saved: bool,
    /// The owner's side lost and the penalty grew.
    pub was_amplified: bool,
}

/// Assign wildcards to 1 (single) or 2 (double) distinct random players.
/// All returned wildcards start unused.
#[must_use]
pub fn assign_wildcards(players: &[PlayerId], mode: WildcardMode, rng: &mut GameRng) -> Vec<Wildcard> {
    let count = mode.wildcard_count();
    assert!(
        players.len() >= count,
        "Need at least {} players for this wildcard mode",
        count
    );

    let owners = match mode {
        WildcardMode::Single => {
            vec![*rng.choose(players).expect("player list is non-empty")]
        }
        WildcardMode::Double => {
            let mut pool = players.to_vec();
            rng.shuffle(&mut pool);
            pool.truncate(count);
            pool
        }
    };

    owners.into_iter().map(Wildcard::new).collect()
}

/// True iff `player` owns a wildcard still in the unused state.
#[must_use]
pub fn has_available_wildcard(player: PlayerId, wildcards: &[Wildcard]) -> bool {
    wildcards.iter().any(|w| w.owner == player && w.is_unused())
}

/// Validate an activation request inside a challenge.
///
/// Refused with "non hai una wildcard disponibile" when the player owns no
/// wildcard at all, or "già usato" when their wildcard is spent.
pub fn validate_activation(player: PlayerId, wildcards: &[Wildcard]) -> Result<(), EngineError> {
    let mut owns_any = false;
    for wildcard in wildcards.iter().filter(|w| w.owner == player) {
        owns_any = true;
        if wildcard.is_unused() {
            return Ok(());
        }
    }

    Err(EngineError::WildcardUnavailable(if owns_any {
        WildcardRefusal::AlreadyUsed
    } else {
        WildcardRefusal::NoneOwned
    }))
}

/// Classify an activation. `None` when the owner is neither the claimer nor
/// the challenger of this challenge: no scenario applies and no effect is
/// computed.
#[must_use]
pub fn determine_scenario(
    owner: PlayerId,
    claimer: PlayerId,
    challenger: PlayerId,
    claim_was_true: bool,
) -> Option<WildcardScenario> {
    if owner == claimer {
        Some(if claim_was_true {
            WildcardScenario::ClaimerTrue
        } else {
            WildcardScenario::ClaimerFalse
        })
    } else if owner == challenger {
        Some(if claim_was_true {
            WildcardScenario::ChallengerTrue
        } else {
            WildcardScenario::ChallengerFalse
        })
    } else {
        None
    }
}

/// Apply the scenario multiplier to a base penalty, rounding the product.
#[must_use]
pub fn apply_multiplier(base_penalty: i64, scenario: WildcardScenario) -> i64 {
    (base_penalty as f64 * scenario.multiplier()).round() as i64
}

/// Compute the full effect of an activation for a given base penalty.
#[must_use]
pub fn calculate_effect(scenario: WildcardScenario, base_penalty: i64) -> WildcardEffect {
    let modified_penalty = apply_multiplier(base_penalty, scenario);
    let effect_amount = (base_penalty as f64 * 0.5).round() as i64;

    debug!(
        ?scenario,
        base_penalty, modified_penalty, "wildcard effect computed"
    );

    WildcardEffect {
        was_used: true,
        scenario,
        multiplier: scenario.multiplier(),
        effect_amount,
        original_penalty: base_penalty,
        modified_penalty,
        was_saved: scenario.reduces(),
        was_amplified: !scenario.reduces(),
    }
}
