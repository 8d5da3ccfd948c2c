//! Game state: public and private information.
//!
//! ## PublicState
//!
//! The public round projection, observable by every player: phase,
//! rotation, claim history, the open challenge and its result, scoreboard,
//! hand sizes and the count of unused wildcards. Never who owns a wildcard.
//!
//! ## GameState
//!
//! The complete state: the public projection plus concealed hands, wildcard
//! ownership and the RNG. Hand reads are capability-scoped: `hand(player)`
//! is the only path to concealed cards, and the collaborator must route it
//! only to that player's own connection, never to a broadcast channel.
//!
//! ## GameSnapshot
//!
//! A serde round-trippable capture of the whole `GameState`, including the
//! RNG word position, for the collaborator to persist between actions.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Hand};
use crate::challenge::Challenge;
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::{GameRng, GameRngState};
use crate::declaration::Claim;
use crate::wildcard::Wildcard;

/// Phase of the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// The current player declares or passes; others may challenge.
    Declare,
    /// A challenge is open and a wildcard decision is outstanding.
    Challenge,
    /// The challenge resolved; waiting for the round to advance.
    Resolved,
    /// The game has reached its terminal state; no further actions apply.
    GameOver,
}

/// Public game state - observable by all players.
///
/// Uses `im` persistent structures for the claim history so snapshot clones
/// after every accepted action stay cheap.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PublicState {
    player_count: usize,

    /// Current round, starting at 1.
    pub round_index: u32,

    /// Phase of the current round.
    pub phase: RoundPhase,

    /// Monotonically increasing sequence, bumped on every accepted
    /// transition. Actions carry the sequence they were built against;
    /// a mismatch is rejected as stale.
    pub action_sequence: u32,

    /// Whose turn it is to declare.
    pub current_player: PlayerId,

    /// Append-only claim history of the round; the last entry is the
    /// claim a challenge would dispute.
    pub claim_history: Vector<Claim>,

    /// The round's challenge, if one was raised.
    pub challenge: Option<Challenge>,

    /// Credits per seat.
    pub scoreboard: PlayerMap<i64>,

    /// Hand sizes (public knowledge).
    pub hand_sizes: PlayerMap<u32>,

    /// How many wildcards are still unused. Ownership stays concealed.
    pub wildcards_unused: u8,
}

impl PublicState {
    /// Create the public state for a fresh game.
    #[must_use]
    pub fn new(player_count: usize, starting_credits: i64) -> Self {
        assert!(player_count >= 2, "Must have at least 2 players");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            round_index: 1,
            phase: RoundPhase::Declare,
            action_sequence: 0,
            current_player: PlayerId::new(0),
            claim_history: Vector::new(),
            challenge: None,
            scoreboard: PlayerMap::with_value(player_count, starting_credits),
            hand_sizes: PlayerMap::with_value(player_count, 0),
            wildcards_unused: 0,
        }
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Iterate over all seats.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count)
    }

    /// The claim a challenge would dispute, if any.
    #[must_use]
    pub fn last_claim(&self) -> Option<&Claim> {
        self.claim_history.last()
    }

    /// True once at least one claim exists and no challenge has been
    /// raised yet this round.
    #[must_use]
    pub fn can_challenge(&self) -> bool {
        !self.claim_history.is_empty() && self.challenge.is_none()
    }

    /// Bump the sequence after an accepted transition.
    pub(crate) fn bump_sequence(&mut self) {
        self.action_sequence += 1;
    }

    /// Rotate the declaration turn one seat forward.
    pub(crate) fn rotate_turn(&mut self) {
        self.current_player = self.current_player.next_seat(self.player_count);
    }
}

/// Full game state including private information.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Public projection (observable by all).
    pub public: PublicState,

    /// Concealed hands per seat.
    hands: PlayerMap<Hand>,

    /// Wildcards with their hidden owners.
    wildcards: Vec<Wildcard>,

    /// Deterministic RNG for deals and assignment.
    pub rng: GameRng,
}

impl GameState {
    /// Create an empty game state; the builder deals the first round.
    #[must_use]
    pub fn new(player_count: usize, starting_credits: i64, seed: u64) -> Self {
        Self {
            public: PublicState::new(player_count, starting_credits),
            hands: PlayerMap::with_default(player_count),
            wildcards: Vec::new(),
            rng: GameRng::new(seed),
        }
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.public.player_count()
    }

    // === Hands (capability-scoped) ===

    /// A player's own concealed hand. The collaborator must only route this
    /// to the owning player's connection.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.hands[player]
    }

    /// All hands, for resolution-time counting.
    pub(crate) fn hands(&self) -> &PlayerMap<Hand> {
        &self.hands
    }

    /// Replace a player's hand (dealing), syncing the public hand size.
    pub(crate) fn set_hand(&mut self, player: PlayerId, hand: Hand) {
        self.public.hand_sizes[player] = hand.len() as u32;
        self.hands[player] = hand;
    }

    /// Remove one card from a player's hand, syncing the public hand size.
    /// Returns false if the card was not held.
    pub(crate) fn discard_card(&mut self, player: PlayerId, card: Card) -> bool {
        if self.hands[player].remove(card) {
            self.public.hand_sizes[player] -= 1;
            true
        } else {
            false
        }
    }

    // === Wildcards ===

    /// True if `player` holds an unused wildcard. Capability-scoped like
    /// `hand`: only the owner's own connection should see this.
    #[must_use]
    pub fn owns_unused_wildcard(&self, player: PlayerId) -> bool {
        crate::wildcard::has_available_wildcard(player, &self.wildcards)
    }

    pub(crate) fn wildcards(&self) -> &[Wildcard] {
        &self.wildcards
    }

    pub(crate) fn wildcards_mut(&mut self) -> &mut Vec<Wildcard> {
        &mut self.wildcards
    }

    /// Install the wildcards and sync the public unused count.
    pub(crate) fn set_wildcards(&mut self, wildcards: Vec<Wildcard>) {
        self.wildcards = wildcards;
        self.sync_wildcard_count();
    }

    /// Recount unused wildcards into the public projection.
    pub(crate) fn sync_wildcard_count(&mut self) {
        self.public.wildcards_unused =
            self.wildcards.iter().filter(|w| w.is_unused()).count() as u8;
    }

    // === Snapshots ===

    /// Capture the complete state for persistence.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            public: self.public.clone(),
            hands: self.hands.clone(),
            wildcards: self.wildcards.clone(),
            rng: self.rng.state(),
        }
    }

    /// Rebuild a state from a snapshot.
    #[must_use]
    pub fn restore(snapshot: &GameSnapshot) -> Self {
        Self {
            public: snapshot.public.clone(),
            hands: snapshot.hands.clone(),
            wildcards: snapshot.wildcards.clone(),
            rng: GameRng::from_state(&snapshot.rng),
        }
    }
}

/// Serde round-trippable capture of a [`GameState`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub public: PublicState,
    pub hands: PlayerMap<Hand>,
    pub wildcards: Vec<Wildcard>,
    pub rng: GameRngState,
}

impl GameSnapshot {
    /// Encode to compact bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode from bytes produced by [`GameSnapshot::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardValue, Suit};

    #[test]
    fn test_public_state_new() {
        let state = PublicState::new(4, 1000);

        assert_eq!(state.player_count(), 4);
        assert_eq!(state.round_index, 1);
        assert_eq!(state.phase, RoundPhase::Declare);
        assert_eq!(state.current_player, PlayerId::new(0));
        assert_eq!(state.scoreboard[PlayerId::new(3)], 1000);
        assert!(!state.can_challenge());
    }

    #[test]
    fn test_can_challenge_after_claim() {
        let mut state = PublicState::new(3, 1000);
        assert!(!state.can_challenge());

        state
            .claim_history
            .push_back(Claim::new(PlayerId::new(0), 2, CardValue::Nine));
        assert!(state.can_challenge());
        assert_eq!(state.last_claim().unwrap().quantity, 2);
    }

    #[test]
    fn test_rotate_turn_wraps() {
        let mut state = PublicState::new(3, 1000);
        state.rotate_turn();
        assert_eq!(state.current_player, PlayerId::new(1));
        state.rotate_turn();
        state.rotate_turn();
        assert_eq!(state.current_player, PlayerId::new(0));
    }

    #[test]
    fn test_set_hand_syncs_size() {
        let mut state = GameState::new(2, 1000, 42);
        let hand: Hand = [
            Card::new(CardValue::Two, Suit::Spades),
            Card::new(CardValue::Three, Suit::Spades),
        ]
        .into_iter()
        .collect();

        state.set_hand(PlayerId::new(0), hand);

        assert_eq!(state.public.hand_sizes[PlayerId::new(0)], 2);
        assert_eq!(state.hand(PlayerId::new(0)).len(), 2);
    }

    #[test]
    fn test_discard_card_syncs_size() {
        let mut state = GameState::new(2, 1000, 42);
        let card = Card::new(CardValue::Two, Suit::Spades);
        state.set_hand(PlayerId::new(0), [card].into_iter().collect());

        assert!(state.discard_card(PlayerId::new(0), card));
        assert_eq!(state.public.hand_sizes[PlayerId::new(0)], 0);
        assert!(!state.discard_card(PlayerId::new(0), card));
    }

    #[test]
    fn test_wildcard_count_sync() {
        let mut state = GameState::new(3, 1000, 42);
        state.set_wildcards(vec![
            Wildcard::new(PlayerId::new(0)),
            Wildcard::new(PlayerId::new(2)),
        ]);

        assert_eq!(state.public.wildcards_unused, 2);
        assert!(state.owns_unused_wildcard(PlayerId::new(0)));
        assert!(!state.owns_unused_wildcard(PlayerId::new(1)));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut state = GameState::new(2, 1000, 42);
        state.set_hand(
            PlayerId::new(0),
            [Card::new(CardValue::Ace, Suit::Hearts)].into_iter().collect(),
        );
        state.set_wildcards(vec![Wildcard::new(PlayerId::new(1))]);
        state.public.bump_sequence();

        let snapshot = state.snapshot();
        let restored = GameState::restore(&snapshot);

        assert_eq!(restored.public, state.public);
        assert_eq!(restored.hand(PlayerId::new(0)), state.hand(PlayerId::new(0)));
        assert_eq!(restored.snapshot(), snapshot);
    }

    #[test]
    fn test_snapshot_bytes_round_trip() {
        let state = GameState::new(3, 500, 7);
        let snapshot = state.snapshot();

        let bytes = snapshot.to_bytes().unwrap();
        let back = GameSnapshot::from_bytes(&bytes).unwrap();

        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_restored_rng_continues_identically() {
        let mut state = GameState::new(2, 1000, 42);
        let _ = state.rng.gen_range_usize(0..100);

        let snapshot = state.snapshot();
        let mut restored = GameState::restore(&snapshot);

        assert_eq!(
            state.rng.gen_range_usize(0..1000),
            restored.rng.gen_range_usize(0..1000)
        );
    }
}
