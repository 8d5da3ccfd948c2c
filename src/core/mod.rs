//! Core engine types: players, state, actions, events, RNG, configuration.

pub mod action;
pub mod config;
pub mod event;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{ActionKind, PlayerAction};
pub use config::{DeclarationMode, GameConfig, WildcardMode, WildcardScope};
pub use event::GameEvent;
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{GameSnapshot, GameState, PublicState, RoundPhase};
