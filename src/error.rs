//! Engine error taxonomy.
//!
//! Every error here is recoverable and local: it is reported back to the
//! acting player and committed state is left untouched. The engine validates
//! an action completely before mutating, so failures are all-or-nothing.
//! Anything fatal (storage, transport) belongs to the collaborator, not to
//! this crate.

use thiserror::Error;

/// Reasons a wildcard activation can be refused.
///
/// Display strings are the product's literal Italian messages; clients show
/// them verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum WildcardRefusal {
    /// The player owns no wildcard at all.
    #[error("non hai una wildcard disponibile")]
    NoneOwned,
    /// The player's wildcard has already been activated or exhausted.
    #[error("già usato")]
    AlreadyUsed,
}

/// All errors the engine can return to the acting player.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EngineError {
    /// A declaration broke the escalation rule, was out of turn, or exceeded
    /// the cards-in-play ceiling.
    #[error("illegal declaration: {reason}")]
    IllegalDeclaration { reason: String },

    /// Challenging with no claim on the table, or challenging your own claim.
    #[error("invalid challenge: {reason}")]
    InvalidChallenge { reason: String },

    /// Wildcard activation refused.
    #[error("wildcard unavailable: {0}")]
    WildcardUnavailable(WildcardRefusal),

    /// The deck cannot cover a requested deal.
    #[error("insufficient cards: needed {needed}, deck has {available}")]
    InsufficientCards { needed: usize, available: usize },

    /// Drawing from an empty deck.
    #[error("cannot draw from an empty deck")]
    EmptyDeck,

    /// The action was built against an outdated state. The collaborator
    /// should refresh its snapshot and resubmit if still meaningful.
    #[error("stale action: built against sequence {basis}, state is at {current}")]
    StaleState { basis: u32, current: u32 },
}

impl EngineError {
    pub(crate) fn illegal_declaration(reason: impl Into<String>) -> Self {
        Self::IllegalDeclaration {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_challenge(reason: impl Into<String>) -> Self {
        Self::InvalidChallenge {
            reason: reason.into(),
        }
    }
}
