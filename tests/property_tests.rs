//! Property tests for the engine's core invariants.

use proptest::prelude::*;
use std::collections::HashSet;

use dubito::cards::{shuffle_deck, standard_deck, Hand, DECK_SIZE};
use dubito::challenge::{resolve_challenge, Challenge};
use dubito::core::{GameRng, PlayerMap};
use dubito::declaration::{validate_progression, Claim};
use dubito::wildcard::{apply_multiplier, WildcardScenario};
use dubito::{Card, CardValue, PlayerId, Suit};

fn card_strategy() -> impl Strategy<Value = Card> {
    (0usize..13, 0usize..4).prop_map(|(v, s)| Card::new(CardValue::ALL[v], Suit::ALL[s]))
}

fn claim_strategy() -> impl Strategy<Value = Claim> {
    (0u8..3, 1u8..16, 0usize..13)
        .prop_map(|(p, q, v)| Claim::new(PlayerId::new(p), q, CardValue::ALL[v]))
}

proptest! {
    /// Every shuffle is a permutation of exactly the 52 canonical cards.
    #[test]
    fn shuffle_is_always_a_permutation(seed in any::<u64>()) {
        let deck = standard_deck();
        let shuffled = shuffle_deck(&deck, &mut GameRng::new(seed));

        prop_assert_eq!(shuffled.len(), DECK_SIZE);
        let distinct: HashSet<Card> = shuffled.iter().copied().collect();
        prop_assert_eq!(distinct.len(), DECK_SIZE);
        let canonical: HashSet<Card> = deck.iter().copied().collect();
        prop_assert_eq!(distinct, canonical);
    }

    /// Any claim pair the engine accepts strictly escalates: greater
    /// quantity, or equal quantity with strictly higher rank.
    #[test]
    fn accepted_progressions_are_monotone(last in claim_strategy(), next in claim_strategy()) {
        if validate_progression(&next, Some(&last)).is_ok() {
            let monotone = next.quantity > last.quantity
                || (next.quantity == last.quantity
                    && next.value.rank() > last.value.rank());
            prop_assert!(monotone);
        }
    }

    /// Rejections and acceptances partition exactly on the escalation rule.
    #[test]
    fn progression_rejects_everything_else(last in claim_strategy(), next in claim_strategy()) {
        let escalates = next.escalates_over(&last);
        prop_assert_eq!(validate_progression(&next, Some(&last)).is_ok(), escalates);
    }

    /// Truth is always `actual >= claimed`, whatever the hands hold.
    #[test]
    fn truth_rule_is_deterministic(
        cards in prop::collection::vec(card_strategy(), 0..15),
        quantity in 1u8..16,
        value_idx in 0usize..13,
    ) {
        let value = CardValue::ALL[value_idx];

        let mut hands: PlayerMap<Hand> = PlayerMap::with_default(3);
        for (i, card) in cards.iter().enumerate() {
            hands[PlayerId::new((i % 3) as u8)].push(*card);
        }

        let claim = Claim::new(PlayerId::new(0), quantity, value);
        let challenge = Challenge::new(PlayerId::new(1), claim);

        let expected = cards.iter().filter(|c| c.value == value).count();
        let result = resolve_challenge(&challenge, &hands, 100, None);

        prop_assert_eq!(result.actual_count as usize, expected);
        prop_assert_eq!(result.claim_was_true, expected >= quantity as usize);
        prop_assert_eq!(result.difference as i64, expected as i64 - quantity as i64);

        // Same inputs, same outcome, regardless of who evaluates.
        let again = resolve_challenge(&challenge, &hands, 100, None);
        prop_assert_eq!(result, again);
    }

    /// Reducing scenarios never exceed the base penalty and amplifying
    /// scenarios never fall below it; the deltas are symmetric halves.
    #[test]
    fn multiplier_respects_the_table(base in 1i64..100_000) {
        for scenario in [
            WildcardScenario::ClaimerTrue,
            WildcardScenario::ClaimerFalse,
            WildcardScenario::ChallengerTrue,
            WildcardScenario::ChallengerFalse,
        ] {
            let modified = apply_multiplier(base, scenario);
            let expected = (base as f64 * scenario.multiplier()).round() as i64;
            prop_assert_eq!(modified, expected);
            if scenario.reduces() {
                prop_assert!(modified <= base);
            } else {
                prop_assert!(modified >= base);
            }
        }
    }
}
