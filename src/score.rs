//! Scoring engine: directional score-transfer instructions ("modifiers")
//! and the rule chains that produce them. Every chain resolves to a
//! per-player delta array that sums to zero by construction.

use crate::algebra::WinningShape;
use crate::state::{HandOutcome, MatchState, WinKind};
use crate::tile::MeldKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Draw,
    Heavenly,
    Earthly,
    FalseWin,
    Win,
    Dealer,
    SelfDraw,
    Detonator,
    JokerFisher,
    KongBloom,
    StolenKong,
    AllPong,
    SevenPairs,
    Chaotic,
    SevenStars,
    JokerFree,
    PureJokerFree,
    JokerBonus,
    KongPayment,
}

/// A directional transfer instruction. Resolution runs in declaration
/// order; later modifiers act on the target's already-accumulated delta,
/// which is how multipliers compose multiplicatively.
#[derive(Debug, Clone, Copy)]
pub struct Modifier {
    pub kind: RuleKind,
    pub target: usize,
    pub source: usize,
    pub multiplier: i64,
    pub constant: i64,
}

impl Modifier {
    fn new(kind: RuleKind, target: usize, source: usize, multiplier: i64, constant: i64) -> Self {
        Self {
            kind,
            target,
            source,
            multiplier,
            constant,
        }
    }
}

/// Resolves a modifier list into per-player deltas. Every delta credited to
/// a target is simultaneously debited from its source, so the result sums
/// to zero for any input.
pub fn resolve(modifiers: &[Modifier]) -> [i64; 4] {
    let mut result = [0i64; 4];
    for m in modifiers {
        let delta = result[m.target] * m.multiplier + m.constant - result[m.target];
        result[m.target] += delta;
        result[m.source] -= delta;
    }
    result
}

/// The immediate kong transfer: each other player pays 2 to the declarer.
pub fn kong_modifiers(declarer: usize) -> Vec<Modifier> {
    (0..4)
        .filter(|&i| i != declarer)
        .map(|i| Modifier::new(RuleKind::KongPayment, i, declarer, 1, -2))
        .collect()
}

/// Weighted joker score for one player: primary jokers count 2 each,
/// secondary 1 each, over concealed and melded tiles.
pub fn joker_score(state: &MatchState, player: usize) -> i64 {
    state.players[player]
        .held_tiles()
        .map(|t| {
            if t == state.jokers.primary {
                2
            } else if t == state.jokers.secondary {
                1
            } else {
                0
            }
        })
        .sum()
}

/// Plain count of joker tiles a player holds.
pub fn joker_tile_count(state: &MatchState, player: usize) -> u32 {
    state.players[player]
        .held_tiles()
        .filter(|&t| state.jokers.is_joker(t))
        .count() as u32
}

/// The hand-end win-modifier chain for the given outcome.
pub fn win_modifiers(state: &MatchState, outcome: &HandOutcome) -> Vec<Modifier> {
    let mut mods = Vec::new();
    match outcome {
        HandOutcome::Drawn => {
            for i in 0..4 {
                if i != state.dealer {
                    mods.push(Modifier::new(RuleKind::Draw, i, state.dealer, 1, -5));
                }
            }
        }
        HandOutcome::FalseWin { claimant } => {
            for i in 0..4 {
                if i != *claimant {
                    mods.push(Modifier::new(RuleKind::FalseWin, i, *claimant, 1, 10));
                }
            }
        }
        HandOutcome::Win {
            winner,
            kind,
            detonator,
            shape,
            joker_fisher,
            kong_bloom,
        } => {
            let winner = *winner;
            // Turn-1/turn-2 wins pay a flat 20 per opponent and suppress
            // every other rule.
            if state.turn <= 2 {
                let rule = if state.turn == 1 {
                    RuleKind::Heavenly
                } else {
                    RuleKind::Earthly
                };
                for i in 0..4 {
                    if i != winner {
                        mods.push(Modifier::new(rule, i, winner, 1, -20));
                    }
                }
                return mods;
            }

            let decomposition_joker_free = shape.jokers_used() == 0;
            let others_hold_jokers = (0..4)
                .filter(|&i| i != winner)
                .any(|i| joker_tile_count(state, i) > 0);
            let all_pong = match shape {
                WinningShape::Standard { partition, .. } => {
                    partition.sets.iter().all(|s| !s.is_run())
                        && state.players[winner]
                            .melds
                            .iter()
                            .all(|m| m.kind != MeldKind::Sequence)
                }
                _ => false,
            };
            let (seven_pairs, chaotic, seven_stars) = match shape {
                WinningShape::SevenPairs { .. } => (true, false, false),
                WinningShape::Chaotic { seven_stars } => (false, true, *seven_stars),
                WinningShape::Standard { .. } => (false, false, false),
            };

            for i in 0..4 {
                if i == winner {
                    continue;
                }
                mods.push(Modifier::new(RuleKind::Win, i, winner, 1, -1));
                if i == state.dealer || winner == state.dealer {
                    mods.push(Modifier::new(RuleKind::Dealer, i, winner, 2, 0));
                }
                if *kind == WinKind::SelfDraw {
                    mods.push(Modifier::new(RuleKind::SelfDraw, i, winner, 2, 0));
                }
                if Some(i) == *detonator {
                    mods.push(Modifier::new(RuleKind::Detonator, i, winner, 2, 0));
                }
                if *joker_fisher {
                    mods.push(Modifier::new(RuleKind::JokerFisher, i, winner, 2, 0));
                }
                if *kong_bloom {
                    mods.push(Modifier::new(RuleKind::KongBloom, i, winner, 2, 0));
                }
                if *kind == WinKind::StolenKong {
                    mods.push(Modifier::new(RuleKind::StolenKong, i, winner, 2, 0));
                }
                if all_pong {
                    mods.push(Modifier::new(RuleKind::AllPong, i, winner, 2, 0));
                }
                if seven_pairs {
                    mods.push(Modifier::new(RuleKind::SevenPairs, i, winner, 2, 0));
                }
                if chaotic {
                    mods.push(Modifier::new(RuleKind::Chaotic, i, winner, 2, 0));
                }
                if seven_stars {
                    mods.push(Modifier::new(RuleKind::SevenStars, i, winner, 2, 0));
                }
                if decomposition_joker_free {
                    if others_hold_jokers {
                        mods.push(Modifier::new(RuleKind::JokerFree, i, winner, 2, -5));
                    } else {
                        mods.push(Modifier::new(RuleKind::PureJokerFree, i, winner, 4, -5));
                    }
                }
            }
        }
    }
    mods
}

/// The joker-bonus chain, independent of who (if anyone) won. Every payer
/// transfers `score * (score >= 5 ? score - 3 : 1)` to every joker holder,
/// doubled when a single player holds all the jokers (the "overlord").
pub fn joker_bonus_modifiers(state: &MatchState) -> Vec<Modifier> {
    let scores: Vec<i64> = (0..4).map(|i| joker_score(state, i)).collect();
    let overlord = scores.iter().filter(|&&s| s > 0).count() == 1;
    let mut mods = Vec::new();
    for holder in 0..4 {
        let s = scores[holder];
        if s == 0 {
            continue;
        }
        let amount = s * if s >= 5 { s - 3 } else { 1 } * if overlord { 2 } else { 1 };
        for payer in 0..4 {
            if payer != holder {
                mods.push(Modifier::new(RuleKind::JokerBonus, holder, payer, 1, amount));
            }
        }
    }
    mods
}

/// The sole joker holder, when there is exactly one.
pub fn overlord(state: &MatchState) -> Option<usize> {
    let holders: Vec<usize> = (0..4).filter(|&i| joker_score(state, i) > 0).collect();
    match holders.as_slice() {
        [single] => Some(*single),
        _ => None,
    }
}
