//! # dubito
//!
//! Deterministic rules engine for the Dubito social bluffing card game:
//! players hold concealed hands, make escalating public claims about the
//! cards in play, and may challenge the current claim. A hidden single-use
//! wildcard can retroactively skew the penalty of a challenge outcome.
//!
//! ## Design Principles
//!
//! 1. **Deterministic and auditable**: every challenge outcome is a pure
//!    function of hands and claim, so any client and the server compute the
//!    identical result. Deals and wildcard assignment run on a seeded RNG.
//!
//! 2. **Engine, not platform**: transport, persistence, lobbies, timers and
//!    rendering belong to an external collaborator. It feeds player intents
//!    in, and persists/broadcasts the state snapshot and events that come
//!    out.
//!
//! 3. **All-or-nothing actions**: an action is validated completely before
//!    any state mutates; every accepted action bumps a sequence number and
//!    stale submissions are rejected, so racing clients serialize to at
//!    most one accepted transition per step.
//!
//! 4. **Concealment by construction**: public state is a separate
//!    projection; hands and wildcard ownership are reachable only through
//!    per-player query paths.
//!
//! ## Modules
//!
//! - `core`: players, configuration, state, actions, events, RNG
//! - `cards`: card identity, deck construction, hands and the hand limit
//! - `declaration`: claims, the escalation rule, free-text parsing
//! - `wildcard`: assignment, activation, scenario and penalty multipliers
//! - `challenge`: challenge resolution and scoring
//! - `rules`: the round/turn state machine and game results
//! - `error`: the recoverable error taxonomy

pub mod cards;
pub mod challenge;
pub mod core;
pub mod declaration;
pub mod error;
pub mod rules;
pub mod wildcard;

// Re-export commonly used types
pub use crate::core::{
    ActionKind, DeclarationMode, GameConfig, GameEvent, GameRng, GameRngState, GameSnapshot,
    GameState, PlayerAction, PlayerId, PlayerMap, PublicState, RoundPhase, WildcardMode,
    WildcardScope,
};

pub use crate::cards::{Card, CardValue, Hand, Suit, DECK_SIZE, HAND_LIMIT};

pub use crate::declaration::{parse_declaration, Claim};

pub use crate::wildcard::{Wildcard, WildcardEffect, WildcardScenario, WildcardState};

pub use crate::challenge::{Challenge, ChallengeResult, ChallengeState};

pub use crate::rules::{DubitoGame, DubitoGameBuilder, GameResult};

pub use crate::error::{EngineError, WildcardRefusal};
