//! Claims and the escalation rule.
//!
//! A claim asserts "at least N cards of value V exist among all hands in
//! play". Claims must strictly escalate: higher quantity, or the same
//! quantity with a strictly higher value rank. The first claim of a round is
//! always legal.

use serde::{Deserialize, Serialize};

use crate::cards::CardValue;
use crate::core::player::PlayerId;
use crate::error::EngineError;

/// A public declaration: "(at least) `quantity` cards of `value` are out
/// there". Position in the round's history is implicit; the history is
/// append-only and never mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Who made the claim.
    pub player: PlayerId,
    /// Asserted count, at least 1.
    pub quantity: u8,
    /// Asserted card value.
    pub value: CardValue,
}

impl Claim {
    #[must_use]
    pub const fn new(player: PlayerId, quantity: u8, value: CardValue) -> Self {
        Self {
            player,
            quantity,
            value,
        }
    }

    /// True if this claim strictly escalates over `last`.
    #[must_use]
    pub fn escalates_over(&self, last: &Claim) -> bool {
        self.quantity > last.quantity
            || (self.quantity == last.quantity && self.value.rank() > last.value.rank())
    }
}

impl std::fmt::Display for Claim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {}", self.quantity, self.value)
    }
}

/// Validate that `new_claim` may follow `last_claim`.
///
/// The very first claim of a round (no `last_claim`) is always legal, as
/// long as it asserts at least one card.
pub fn validate_progression(
    new_claim: &Claim,
    last_claim: Option<&Claim>,
) -> Result<(), EngineError> {
    if new_claim.quantity == 0 {
        return Err(EngineError::illegal_declaration(
            "a claim must assert at least one card",
        ));
    }

    let Some(last) = last_claim else {
        return Ok(());
    };

    if new_claim.escalates_over(last) {
        Ok(())
    } else {
        Err(EngineError::illegal_declaration(format!(
            "{} does not escalate over {}",
            new_claim, last
        )))
    }
}

/// Enumerate every legal next `(quantity, value)` pair up to `max_quantity`,
/// ascending by quantity then by rank. Assisted mode offers exactly this
/// list as choices.
#[must_use]
pub fn generate_valid_declarations(
    last_claim: Option<&Claim>,
    max_quantity: u8,
) -> Vec<(u8, CardValue)> {
    let mut out = Vec::new();

    for quantity in 1..=max_quantity {
        for value in CardValue::ALL {
            let legal = match last_claim {
                None => true,
                Some(last) => {
                    quantity > last.quantity
                        || (quantity == last.quantity && value.rank() > last.value.rank())
                }
            };
            if legal {
                out.push((quantity, value));
            }
        }
    }

    out
}
