//! Property-based invariant tests for the rules engine.
//!
//! Uses proptest to generate random seeds, drives full matches with a
//! deterministic pseudo-random policy, and verifies the conservation
//! invariants at every step.

use proptest::prelude::*;

use laizi_core::rule::MatchRule;
use laizi_core::score::{resolve, Modifier, RuleKind};
use laizi_core::state::{MatchState, Phase};
use laizi_core::tile::{full_deck, Tile};
use laizi_core::{form_sets_pairs, is_set};

const MAX_STEPS: u32 = 10_000;

fn score_sum(state: &MatchState) -> i64 {
    state.players.iter().map(|p| p.score).sum()
}

/// Every tile the state accounts for must still be the full deck.
fn assert_census_intact(state: &MatchState, seed: u64, step: u32) {
    let mut census = state.tile_census();
    census.sort();
    let mut deck = full_deck();
    deck.sort();
    assert_eq!(census, deck, "seed {seed}: tile census broken at step {step}");
}

/// Advances one step. The policy discards pseudo-randomly and declares an
/// occasional self-draw win; most of those are false wins, which is exactly
/// what rotates the dealer toward the end of the match.
fn step_match(state: &mut MatchState, seed: u64, step: u32) {
    match state.phase.clone() {
        Phase::Deal => state.deal().unwrap(),
        Phase::Pull => state.draw(state.current_player).unwrap(),
        Phase::Push => {
            let p = state.current_player;
            if step % 37 == 0 {
                state.self_draw_win(p).unwrap();
            } else {
                let i = (seed as usize).wrapping_add(step as usize) % state.players[p].hand.len();
                state.discard(p, i).unwrap();
            }
        }
        Phase::Reaction { .. } => state.next().unwrap(),
        Phase::Score { scored: false, .. } => state.score_hand().unwrap(),
        Phase::Score { scored: true, .. } => state.next_hand().unwrap(),
        Phase::End => unreachable!("caller stops at End"),
    }
}

fn arb_tile() -> impl Strategy<Value = Tile> {
    (0usize..34).prop_map(|i| Tile::all_kinds().nth(i).unwrap())
}

fn arb_modifier() -> impl Strategy<Value = Modifier> {
    (0usize..4, 0usize..4, -3i64..4, -25i64..26)
        .prop_filter("source must differ from target", |(t, s, _, _)| t != s)
        .prop_map(|(target, source, multiplier, constant)| Modifier {
            kind: RuleKind::Win,
            target,
            source,
            multiplier,
            constant,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Scores stay zero-sum and the tile multiset stays the full deck
    /// through entire randomly-driven matches.
    #[test]
    fn match_invariants_hold(seed in 0u64..1_000_000) {
        let mut rule = MatchRule::seeded(seed);
        rule.max_round = 1;
        let mut state = MatchState::new(rule);
        let mut dealt = false;
        let mut steps = 0u32;

        while state.phase != Phase::End && steps < MAX_STEPS {
            steps += 1;
            if state.phase == Phase::Deal {
                dealt = false;
            }
            step_match(&mut state, seed, steps);
            prop_assert_eq!(
                score_sum(&state), 0,
                "seed {}: score sum nonzero at step {}", seed, steps
            );
            if matches!(state.phase, Phase::Pull) && !dealt {
                dealt = true;
            }
            if dealt {
                assert_census_intact(&state, seed, steps);
            }
        }
        prop_assert!(state.phase == Phase::End, "seed {}: match did not finish", seed);
        let summary = state.summary().unwrap();
        prop_assert_eq!(summary.scores.iter().sum::<i64>(), 0);
    }
}

proptest! {
    /// Resolution is zero-sum for arbitrary modifier lists, not just the
    /// ones the rule chains can produce.
    #[test]
    fn modifier_resolution_is_zero_sum(mods in prop::collection::vec(arb_modifier(), 0..24)) {
        let deltas = resolve(&mods);
        prop_assert_eq!(deltas.iter().sum::<i64>(), 0);
    }

    /// Set classification ignores argument order.
    #[test]
    fn set_predicate_is_permutation_invariant(a in arb_tile(), b in arb_tile(), c in arb_tile()) {
        let expected = is_set(a, b, c);
        for (x, y, z) in [(a, c, b), (b, a, c), (b, c, a), (c, a, b), (c, b, a)] {
            prop_assert_eq!(is_set(x, y, z), expected);
        }
    }

    /// Every decomposition accounts for every input tile and every joker.
    #[test]
    fn decomposition_accounts_for_all_tiles(
        tiles in prop::collection::vec(arb_tile(), 0..10),
        jokers in 0u8..3,
    ) {
        for p in form_sets_pairs(&tiles, jokers) {
            let naturals: usize = p.sets.iter().map(|s| s.tiles.len()).sum::<usize>()
                + p.pairs.iter().map(|g| g.tiles.len()).sum::<usize>()
                + p.leftover.map_or(0, |_| 1);
            prop_assert_eq!(naturals, tiles.len());
            prop_assert_eq!(p.jokers_spent(), jokers);
            for s in &p.sets {
                prop_assert_eq!(s.tiles.len() + s.jokers as usize, 3);
            }
            for g in &p.pairs {
                prop_assert_eq!(g.tiles.len() + g.jokers as usize, 2);
            }
        }
    }
}
