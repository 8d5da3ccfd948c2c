//! Game configuration.
//!
//! Everything a room fixes for the whole game lives here, passed explicitly
//! into construction: no module-level mode globals. The collaborator decides
//! the values; the engine only reads them.

use serde::{Deserialize, Serialize};

/// How declarations are entered, fixed per room for the whole game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclarationMode {
    /// The UI offers only legal next claims, enumerated by the engine.
    #[default]
    Assisted,
    /// Players type claims; the collaborator parses them before submitting.
    Free,
}

/// How many wildcards exist in the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WildcardMode {
    /// Exactly one wildcard in the game.
    #[default]
    Single,
    /// Exactly two, assigned to two distinct players.
    Double,
}

impl WildcardMode {
    /// Number of wildcards this mode assigns.
    #[must_use]
    pub const fn wildcard_count(self) -> usize {
        match self {
            WildcardMode::Single => 1,
            WildcardMode::Double => 2,
        }
    }
}

/// Whether wildcards reset between rounds or persist for the whole game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WildcardScope {
    /// Owners and states persist across rounds.
    #[default]
    PerGame,
    /// States reset to unused on each new round; owners keep their card.
    PerRound,
}

/// Complete game configuration, provided at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (2-255).
    pub player_count: usize,

    /// Rounds played before the game ends and the ranking is computed.
    pub max_rounds: u32,

    /// Cards dealt to each player at round start.
    pub hand_size: usize,

    /// Base penalty applied to the losing side of a challenge. The engine
    /// never recomputes this; stake and round multipliers are the
    /// collaborator's configuration.
    pub stake: i64,

    /// Credits each player starts with.
    pub starting_credits: i64,

    /// Declaration entry mode for the room.
    pub declaration_mode: DeclarationMode,

    /// Wildcard count mode.
    pub wildcard_mode: WildcardMode,

    /// Wildcard reset scope.
    pub wildcard_scope: WildcardScope,
}

impl GameConfig {
    /// Create a configuration with the default room settings.
    pub fn new(player_count: usize) -> Self {
        assert!(player_count >= 2, "Must have at least 2 players");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            max_rounds: 5,
            hand_size: crate::cards::DEFAULT_HAND_SIZE,
            stake: 100,
            starting_credits: 1000,
            declaration_mode: DeclarationMode::default(),
            wildcard_mode: WildcardMode::default(),
            wildcard_scope: WildcardScope::default(),
        }
    }

    /// Set the number of rounds.
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Set the per-player hand size.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Set the challenge stake.
    #[must_use]
    pub fn with_stake(mut self, stake: i64) -> Self {
        self.stake = stake;
        self
    }

    /// Set the starting credits.
    #[must_use]
    pub fn with_starting_credits(mut self, credits: i64) -> Self {
        self.starting_credits = credits;
        self
    }

    /// Set the declaration mode.
    #[must_use]
    pub fn with_declaration_mode(mut self, mode: DeclarationMode) -> Self {
        self.declaration_mode = mode;
        self
    }

    /// Set the wildcard mode.
    #[must_use]
    pub fn with_wildcard_mode(mut self, mode: WildcardMode) -> Self {
        self.wildcard_mode = mode;
        self
    }

    /// Set the wildcard scope.
    #[must_use]
    pub fn with_wildcard_scope(mut self, scope: WildcardScope) -> Self {
        self.wildcard_scope = scope;
        self
    }

    /// Total cards in play: the quantity ceiling for declarations.
    #[must_use]
    pub fn max_quantity(&self) -> u8 {
        (self.player_count * self.hand_size).min(u8::MAX as usize) as u8
    }
}
