//! The round/turn state machine.
//!
//! Drives phases, turn rotation, penalty application and round/game
//! termination. Each player action is validated completely before anything
//! mutates, so a rejected action leaves committed state untouched, and each
//! accepted action bumps the public `action_sequence` so concurrent
//! submissions serialize to at most one winner per step.
//!
//! Phase flow per round:
//!
//! ```text
//! Declare -> Challenge (only when a wildcard decision is pending)
//! Declare -> Resolved  (challenge with no eligible wildcard)
//! Challenge -> Resolved (activation or a participant's pass)
//! Resolved -> Declare (next round) | GameOver
//! ```

use tracing::{debug, info};

use crate::cards::{deal_initial_hand, shuffle_deck, standard_deck, CardValue, DECK_SIZE, HAND_LIMIT};
use crate::challenge::{resolve_challenge, Challenge, ChallengeState};
use crate::core::action::{ActionKind, PlayerAction};
use crate::core::config::{DeclarationMode, GameConfig, WildcardMode, WildcardScope};
use crate::core::event::GameEvent;
use crate::core::player::PlayerId;
use crate::core::state::{GameState, RoundPhase};
use crate::declaration::{generate_valid_declarations, validate_progression, Claim};
use crate::error::EngineError;
use crate::rules::GameResult;
use crate::wildcard::{assign_wildcards, has_available_wildcard, validate_activation, WildcardState};

/// The Dubito rules engine. Holds only configuration; all game data lives
/// in the [`GameState`] the collaborator persists between actions.
#[derive(Clone, Debug)]
pub struct DubitoGame {
    config: GameConfig,
}

/// Builder for a game and its initial state.
pub struct DubitoGameBuilder {
    player_count: usize,
    max_rounds: u32,
    hand_size: usize,
    stake: i64,
    starting_credits: i64,
    declaration_mode: DeclarationMode,
    wildcard_mode: WildcardMode,
    wildcard_scope: WildcardScope,
}

impl Default for DubitoGameBuilder {
    fn default() -> Self {
        let defaults = GameConfig::new(3);
        Self {
            player_count: defaults.player_count,
            max_rounds: defaults.max_rounds,
            hand_size: defaults.hand_size,
            stake: defaults.stake,
            starting_credits: defaults.starting_credits,
            declaration_mode: defaults.declaration_mode,
            wildcard_mode: defaults.wildcard_mode,
            wildcard_scope: defaults.wildcard_scope,
        }
    }
}

impl DubitoGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_count(mut self, count: usize) -> Self {
        assert!((2..=10).contains(&count), "Player count must be 2-10");
        self.player_count = count;
        self
    }

    pub fn max_rounds(mut self, rounds: u32) -> Self {
        assert!(rounds >= 1, "Must play at least 1 round");
        self.max_rounds = rounds;
        self
    }

    pub fn hand_size(mut self, size: usize) -> Self {
        assert!((1..=10).contains(&size), "Hand size must be 1-10");
        self.hand_size = size;
        self
    }

    pub fn stake(mut self, stake: i64) -> Self {
        assert!(stake > 0, "Stake must be positive");
        self.stake = stake;
        self
    }

    pub fn starting_credits(mut self, credits: i64) -> Self {
        self.starting_credits = credits;
        self
    }

    pub fn declaration_mode(mut self, mode: DeclarationMode) -> Self {
        self.declaration_mode = mode;
        self
    }

    pub fn wildcard_mode(mut self, mode: WildcardMode) -> Self {
        self.wildcard_mode = mode;
        self
    }

    pub fn wildcard_scope(mut self, scope: WildcardScope) -> Self {
        self.wildcard_scope = scope;
        self
    }

    /// Build the game and the initial state: round 1 dealt, wildcards
    /// assigned to hidden owners.
    pub fn build(self, seed: u64) -> (DubitoGame, GameState) {
        let config = GameConfig::new(self.player_count)
            .with_max_rounds(self.max_rounds)
            .with_hand_size(self.hand_size)
            .with_stake(self.stake)
            .with_starting_credits(self.starting_credits)
            .with_declaration_mode(self.declaration_mode)
            .with_wildcard_mode(self.wildcard_mode)
            .with_wildcard_scope(self.wildcard_scope);
        assert!(
            config.player_count * config.hand_size <= DECK_SIZE,
            "Configured deal does not fit a 52-card deck"
        );

        let mut state = GameState::new(config.player_count, config.starting_credits, seed);

        let players: Vec<PlayerId> = PlayerId::all(config.player_count).collect();
        let mut wildcard_rng = state.rng.for_context("wildcards");
        let wildcards = assign_wildcards(&players, config.wildcard_mode, &mut wildcard_rng);
        state.set_wildcards(wildcards);

        let game = DubitoGame { config };
        game.deal_hands(&mut state);

        info!(
            players = game.config.player_count,
            rounds = game.config.max_rounds,
            "game created"
        );

        (game, state)
    }
}

impl DubitoGame {
    /// Get the game configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Apply a player action.
    ///
    /// Validates completely before mutating; on success the state reflects
    /// the accepted transition and the returned events describe it for
    /// broadcast.
    pub fn apply_action(
        &self,
        state: &mut GameState,
        action: &PlayerAction,
    ) -> Result<Vec<GameEvent>, EngineError> {
        // Stale actions are rejected before anything else.
        if action.basis != state.public.action_sequence {
            return Err(EngineError::StaleState {
                basis: action.basis,
                current: state.public.action_sequence,
            });
        }

        let events = match action.kind {
            ActionKind::Declare { quantity, value } => {
                self.handle_declare(state, action.player, quantity, value)?
            }
            ActionKind::Challenge => self.handle_challenge(state, action.player)?,
            ActionKind::ActivateWildcard => self.handle_activate(state, action.player)?,
            ActionKind::Pass => self.handle_pass(state, action.player)?,
            ActionKind::Discard { card } => self.handle_discard(state, action.player, card)?,
        };

        state.public.bump_sequence();
        Ok(events)
    }

    /// Advance from a resolved round to the next deal, or end the game.
    ///
    /// The collaborator calls this once per resolved round; it is not a
    /// player intent.
    pub fn advance_round(&self, state: &mut GameState) -> Result<Vec<GameEvent>, EngineError> {
        match state.public.phase {
            RoundPhase::Resolved => {}
            RoundPhase::GameOver => {
                return Err(EngineError::illegal_declaration("the game is over"))
            }
            _ => {
                return Err(EngineError::illegal_declaration(
                    "the round has not resolved yet",
                ))
            }
        }

        if state.public.round_index >= self.config.max_rounds {
            state.public.phase = RoundPhase::GameOver;
            state.public.bump_sequence();
            let ranking = self.final_ranking(state);
            info!(rounds = state.public.round_index, "game over");
            return Ok(vec![GameEvent::GameOver { ranking }]);
        }

        state.public.round_index += 1;
        state.public.claim_history.clear();
        state.public.challenge = None;
        state.public.phase = RoundPhase::Declare;
        state.public.current_player =
            PlayerId::new(((state.public.round_index as usize - 1) % self.config.player_count) as u8);

        if self.config.wildcard_scope == WildcardScope::PerRound {
            for wildcard in state.wildcards_mut() {
                wildcard.state = WildcardState::Unused;
            }
            state.sync_wildcard_count();
        }

        self.deal_hands(state);
        state.public.bump_sequence();

        info!(round = state.public.round_index, "round advanced");
        Ok(vec![GameEvent::RoundAdvanced {
            round_index: state.public.round_index,
        }])
    }

    /// Legal next claims for the assisted-mode choice list.
    #[must_use]
    pub fn legal_declarations(&self, state: &GameState) -> Vec<(u8, CardValue)> {
        generate_valid_declarations(state.public.last_claim(), self.config.max_quantity())
    }

    /// True if `player` may challenge right now.
    #[must_use]
    pub fn can_challenge(&self, state: &GameState, player: PlayerId) -> bool {
        state.public.phase == RoundPhase::Declare
            && state.public.can_challenge()
            && state
                .public
                .last_claim()
                .is_some_and(|claim| claim.player != player)
    }

    /// `Some(result)` once all rounds are played.
    #[must_use]
    pub fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        if state.public.phase != RoundPhase::GameOver {
            return None;
        }

        let top = state
            .public
            .scoreboard
            .iter()
            .map(|(_, &credits)| credits)
            .max()?;
        let mut winners: Vec<PlayerId> = state
            .public
            .scoreboard
            .iter()
            .filter(|(_, &credits)| credits == top)
            .map(|(player, _)| player)
            .collect();

        if winners.len() == 1 {
            Some(GameResult::Winner(winners.remove(0)))
        } else {
            Some(GameResult::Winners(winners))
        }
    }

    /// Final ranking by credits, descending; equal credits keep seat order.
    #[must_use]
    pub fn final_ranking(&self, state: &GameState) -> Vec<(PlayerId, i64)> {
        let mut ranking: Vec<(PlayerId, i64)> = state
            .public
            .scoreboard
            .iter()
            .map(|(player, &credits)| (player, credits))
            .collect();
        ranking.sort_by(|a, b| b.1.cmp(&a.1).then(a.0 .0.cmp(&b.0 .0)));
        ranking
    }

    // === Action handlers ===

    fn handle_declare(
        &self,
        state: &mut GameState,
        player: PlayerId,
        quantity: u8,
        value: CardValue,
    ) -> Result<Vec<GameEvent>, EngineError> {
        self.ensure_declare_phase(state)?;
        self.ensure_no_pending_discard(state)?;

        if player != state.public.current_player {
            return Err(EngineError::illegal_declaration("it is not your turn"));
        }
        if quantity > self.config.max_quantity() {
            return Err(EngineError::illegal_declaration(format!(
                "claims {} cards but only {} are in play",
                quantity,
                self.config.max_quantity()
            )));
        }

        let claim = Claim::new(player, quantity, value);
        validate_progression(&claim, state.public.last_claim())?;

        state.public.claim_history.push_back(claim);
        state.public.rotate_turn();

        debug!(%player, %claim, "claim accepted");
        Ok(vec![GameEvent::ClaimMade { player, claim }])
    }

    fn handle_challenge(
        &self,
        state: &mut GameState,
        challenger: PlayerId,
    ) -> Result<Vec<GameEvent>, EngineError> {
        match state.public.phase {
            RoundPhase::Declare => {}
            RoundPhase::Challenge => {
                return Err(EngineError::invalid_challenge(
                    "a challenge is already pending",
                ))
            }
            RoundPhase::Resolved | RoundPhase::GameOver => {
                return Err(EngineError::invalid_challenge("the round is over"))
            }
        }
        if self.pending_discard(state).is_some() {
            return Err(EngineError::invalid_challenge(
                "waiting for an over-limit hand to discard",
            ));
        }

        let Some(&claim) = state.public.last_claim() else {
            return Err(EngineError::invalid_challenge(
                "there is no claim to challenge",
            ));
        };
        if claim.player == challenger {
            return Err(EngineError::invalid_challenge(
                "cannot challenge your own claim",
            ));
        }

        let challenge = Challenge::new(challenger, claim);
        debug!(%challenger, claimer = %claim.player, "challenge raised");

        let window_open = has_available_wildcard(challenge.claimer, state.wildcards())
            || has_available_wildcard(challenge.challenger, state.wildcards());

        let raised = GameEvent::ChallengeRaised {
            challenger,
            claimer: claim.player,
        };

        if window_open {
            // Resolution waits until the owner decides or a participant
            // closes the window with a pass.
            let mut challenge = challenge;
            challenge.state = ChallengeState::PendingWildcardDecision;
            state.public.challenge = Some(challenge);
            state.public.phase = RoundPhase::Challenge;
            Ok(vec![raised])
        } else {
            let resolved = self.resolve_and_apply(state, challenge, None);
            Ok(vec![raised, resolved])
        }
    }

    fn handle_activate(
        &self,
        state: &mut GameState,
        player: PlayerId,
    ) -> Result<Vec<GameEvent>, EngineError> {
        let challenge = self.pending_challenge(state)?.clone();
        if !challenge.involves(player) {
            return Err(EngineError::invalid_challenge(
                "only the claimer or the challenger may activate a wildcard here",
            ));
        }
        validate_activation(player, state.wildcards())?;

        for wildcard in state.wildcards_mut() {
            if wildcard.owner == player && wildcard.is_unused() {
                wildcard.state = WildcardState::Activated;
                break;
            }
        }
        state.sync_wildcard_count();
        debug!(%player, "wildcard activated");

        let mut challenge = challenge;
        challenge.wildcard_activated_by = Some(player);
        let resolved = self.resolve_and_apply(state, challenge, Some(player));

        // The activation is consumed by the resolution it modified.
        for wildcard in state.wildcards_mut() {
            if wildcard.owner == player && wildcard.state == WildcardState::Activated {
                wildcard.state = WildcardState::Exhausted;
                break;
            }
        }
        state.sync_wildcard_count();

        Ok(vec![GameEvent::WildcardActivated { player }, resolved])
    }

    fn handle_pass(
        &self,
        state: &mut GameState,
        player: PlayerId,
    ) -> Result<Vec<GameEvent>, EngineError> {
        match state.public.phase {
            RoundPhase::Declare => {
                self.ensure_no_pending_discard(state)?;
                if player != state.public.current_player {
                    return Err(EngineError::illegal_declaration("it is not your turn"));
                }
                state.public.rotate_turn();
                debug!(%player, "turn passed");
                Ok(vec![GameEvent::TurnPassed { player }])
            }
            RoundPhase::Challenge => {
                // A participant declines the wildcard window; resolution no
                // longer waits.
                let challenge = self.pending_challenge(state)?.clone();
                if !challenge.involves(player) {
                    return Err(EngineError::invalid_challenge(
                        "only the claimer or the challenger may close the wildcard window",
                    ));
                }
                debug!(%player, "wildcard window declined");
                let resolved = self.resolve_and_apply(state, challenge, None);
                Ok(vec![resolved])
            }
            RoundPhase::Resolved => Err(EngineError::illegal_declaration("the round is resolved")),
            RoundPhase::GameOver => Err(EngineError::illegal_declaration("the game is over")),
        }
    }

    fn handle_discard(
        &self,
        state: &mut GameState,
        player: PlayerId,
        card: crate::cards::Card,
    ) -> Result<Vec<GameEvent>, EngineError> {
        if state.public.phase != RoundPhase::Declare {
            return Err(EngineError::illegal_declaration(
                "discards only happen during the declaration phase",
            ));
        }
        if !state.hand(player).exceeds_limit(HAND_LIMIT) {
            return Err(EngineError::illegal_declaration("no discard is required"));
        }
        if !state.hand(player).contains(card) {
            return Err(EngineError::illegal_declaration("card not in hand"));
        }

        state.discard_card(player, card);
        debug!(%player, "card discarded");
        Ok(vec![GameEvent::CardDiscarded { player }])
    }

    // === Internals ===

    /// Deal a fresh shuffled deck into every seat.
    ///
    /// The builder asserts the configured deal fits the deck, so dealing
    /// cannot run dry here.
    fn deal_hands(&self, state: &mut GameState) {
        let deck = standard_deck();
        let mut deck = shuffle_deck(&deck, &mut state.rng);

        for player in PlayerId::all(self.config.player_count) {
            let (hand, rest) = deal_initial_hand(&deck, self.config.hand_size)
                .expect("configured deal fits the deck");
            state.set_hand(player, hand);
            deck = rest;
        }
    }

    /// The challenge currently waiting on a wildcard decision.
    fn pending_challenge<'a>(&self, state: &'a GameState) -> Result<&'a Challenge, EngineError> {
        if state.public.phase != RoundPhase::Challenge {
            return Err(EngineError::invalid_challenge("no challenge is pending"));
        }
        state
            .public
            .challenge
            .as_ref()
            .filter(|c| c.state == ChallengeState::PendingWildcardDecision)
            .ok_or_else(|| EngineError::invalid_challenge("no challenge is pending"))
    }

    fn ensure_declare_phase(&self, state: &GameState) -> Result<(), EngineError> {
        match state.public.phase {
            RoundPhase::Declare => Ok(()),
            RoundPhase::Challenge => Err(EngineError::illegal_declaration(
                "cannot declare while a challenge is pending",
            )),
            RoundPhase::Resolved => Err(EngineError::illegal_declaration("the round is resolved")),
            RoundPhase::GameOver => Err(EngineError::illegal_declaration("the game is over")),
        }
    }

    /// Seat that still has to discard, if any.
    fn pending_discard(&self, state: &GameState) -> Option<PlayerId> {
        PlayerId::all(self.config.player_count)
            .find(|&p| state.hand(p).exceeds_limit(HAND_LIMIT))
    }

    fn ensure_no_pending_discard(&self, state: &GameState) -> Result<(), EngineError> {
        match self.pending_discard(state) {
            Some(player) => Err(EngineError::illegal_declaration(format!(
                "{} must discard down to {} cards first",
                player, HAND_LIMIT
            ))),
            None => Ok(()),
        }
    }

    /// Resolve the challenge, debit the loser and move to `Resolved`.
    fn resolve_and_apply(
        &self,
        state: &mut GameState,
        mut challenge: Challenge,
        wildcard_owner: Option<PlayerId>,
    ) -> GameEvent {
        let result = resolve_challenge(&challenge, state.hands(), self.config.stake, wildcard_owner);

        state.public.scoreboard[result.loser] -= result.modified_penalty;
        challenge.state = ChallengeState::Resolved;
        challenge.result = Some(result.clone());
        state.public.challenge = Some(challenge);
        state.public.phase = RoundPhase::Resolved;

        GameEvent::ChallengeResolved { result }
    }
}
