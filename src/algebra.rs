//! Tile algebra: set/pair classification, completion enumeration, the
//! recursive decomposition search with wildcard jokers, and the winning-hand
//! predicate built on top of it.

use ahash::AHashSet;

use crate::tile::{JokerPair, Tile};

/// Three tiles form a set when they are all equal, or (numeric suits) three
/// consecutive ranks of one suit, or (honor suits) three pairwise-distinct
/// ranks of one suit. Argument order is irrelevant.
pub fn is_set(a: Tile, b: Tile, c: Tile) -> bool {
    if a == b && b == c {
        return true;
    }
    if a.suit != b.suit || b.suit != c.suit {
        return false;
    }
    if a.suit.is_honor() {
        a.rank != b.rank && b.rank != c.rank && a.rank != c.rank
    } else {
        let mut ranks = [a.rank, b.rank, c.rank];
        ranks.sort_unstable();
        ranks[1] == ranks[0] + 1 && ranks[2] == ranks[1] + 1
    }
}

/// Two tiles are "almost a set" when some third tile completes them: equal
/// tiles, any two honors of one suit, or numeric tiles of one suit within
/// rank distance 2.
pub fn is_almost_set(a: Tile, b: Tile) -> bool {
    if a == b {
        return true;
    }
    if a.suit != b.suit {
        return false;
    }
    a.suit.is_honor() || a.rank.abs_diff(b.rank) <= 2
}

/// Every tile that completes `a` + `b` into a valid set. Numeric runs
/// truncate at ranks 1 and 9; honor suits enumerate the remaining distinct
/// ranks of the suit.
pub fn complete_to_set(a: Tile, b: Tile) -> Vec<Tile> {
    Tile::all_kinds().filter(|&t| is_set(a, b, t)).collect()
}

/// Every unordered pair of tiles that completes `a` into a valid set.
pub fn complete_to_set_single(a: Tile) -> Vec<(Tile, Tile)> {
    let kinds: Vec<Tile> = Tile::all_kinds().collect();
    let mut out = Vec::new();
    for (i, &x) in kinds.iter().enumerate() {
        for &y in &kinds[i..] {
            if is_set(a, x, y) {
                out.push((x, y));
            }
        }
    }
    out
}

/// A 3-tile set in a decomposition; `tiles.len() + jokers == 3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetGroup {
    pub tiles: Vec<Tile>,
    pub jokers: u8,
}

impl SetGroup {
    /// True when the natural tiles force a run reading (two distinct ranks).
    pub fn is_run(&self) -> bool {
        self.tiles.windows(2).any(|w| w[0] != w[1])
    }
}

/// A pair in a decomposition; `tiles.len() + jokers == 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairGroup {
    pub tiles: Vec<Tile>,
    pub jokers: u8,
}

/// One way of arranging a hand into sets and pairs. At most one tile may be
/// left unattached (the search's terminal single).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub sets: Vec<SetGroup>,
    pub pairs: Vec<PairGroup>,
    pub leftover: Option<Tile>,
}

impl Partition {
    pub fn jokers_spent(&self) -> u8 {
        self.sets.iter().map(|s| s.jokers).sum::<u8>()
            + self.pairs.iter().map(|p| p.jokers).sum::<u8>()
    }

    fn canonical_key(&self) -> String {
        let mut set_keys: Vec<String> = self
            .sets
            .iter()
            .map(|s| {
                let mut ks: Vec<String> = s.tiles.iter().map(|t| t.key()).collect();
                ks.sort();
                format!("S{}{}", ks.join(""), "*".repeat(s.jokers as usize))
            })
            .collect();
        set_keys.sort();
        let mut pair_keys: Vec<String> = self
            .pairs
            .iter()
            .map(|p| {
                let mut ks: Vec<String> = p.tiles.iter().map(|t| t.key()).collect();
                ks.sort();
                format!("P{}{}", ks.join(""), "*".repeat(p.jokers as usize))
            })
            .collect();
        pair_keys.sort();
        let tail = match self.leftover {
            Some(t) => format!("L{}", t.key()),
            None => String::new(),
        };
        format!("{}|{}|{}", set_keys.join(","), pair_keys.join(","), tail)
    }
}

/// Enumerates every partition of `tiles` plus `jokers` wildcards into 3-tile
/// sets and pairs. A joker may stand in for any tile of a set or pair;
/// leftover jokers group among themselves. Results are deduplicated by
/// canonical string key, so semantically identical partitions reached in a
/// different internal order appear once.
///
/// Exponential in hand size, but hands are bounded at 14 tiles.
pub fn form_sets_pairs(tiles: &[Tile], jokers: u8) -> Vec<Partition> {
    let mut sorted = tiles.to_vec();
    sorted.sort();
    let mut out = Vec::new();
    let mut seen = AHashSet::new();
    let mut acc = Partition::default();
    search(&sorted, jokers, &mut acc, &mut out, &mut seen);
    out
}

fn emit(acc: &Partition, out: &mut Vec<Partition>, seen: &mut AHashSet<String>) {
    let key = acc.canonical_key();
    if seen.insert(key) {
        out.push(acc.clone());
    }
}

/// Spends the remaining jokers on joker-only sets and pairs, emitting one
/// partition per viable split. An odd single joker has nothing to stand in
/// for and kills the branch.
fn joker_tail(
    jokers: u8,
    acc: &mut Partition,
    out: &mut Vec<Partition>,
    seen: &mut AHashSet<String>,
) {
    if jokers == 0 {
        emit(acc, out, seen);
        return;
    }
    let mut sets = 0u8;
    while sets * 3 <= jokers {
        let rem = jokers - sets * 3;
        if rem % 2 == 0 {
            for _ in 0..sets {
                acc.sets.push(SetGroup {
                    tiles: Vec::new(),
                    jokers: 3,
                });
            }
            for _ in 0..rem / 2 {
                acc.pairs.push(PairGroup {
                    tiles: Vec::new(),
                    jokers: 2,
                });
            }
            emit(acc, out, seen);
            for _ in 0..rem / 2 {
                acc.pairs.pop();
            }
            for _ in 0..sets {
                acc.sets.pop();
            }
        }
        sets += 1;
    }
}

fn without(rest: &[Tile], indices: &[usize]) -> Vec<Tile> {
    // indices must be strictly descending
    let mut next = rest.to_vec();
    for &i in indices {
        next.remove(i);
    }
    next
}

fn search(
    rest: &[Tile],
    jokers: u8,
    acc: &mut Partition,
    out: &mut Vec<Partition>,
    seen: &mut AHashSet<String>,
) {
    if rest.is_empty() {
        joker_tail(jokers, acc, out, seen);
        return;
    }
    if rest.len() == 1 {
        let t = rest[0];
        if jokers >= 1 {
            acc.pairs.push(PairGroup {
                tiles: vec![t],
                jokers: 1,
            });
            joker_tail(jokers - 1, acc, out, seen);
            acc.pairs.pop();
        }
        if jokers >= 2 {
            acc.sets.push(SetGroup {
                tiles: vec![t],
                jokers: 2,
            });
            joker_tail(jokers - 2, acc, out, seen);
            acc.sets.pop();
        }
        acc.leftover = Some(t);
        joker_tail(jokers, acc, out, seen);
        acc.leftover = None;
        return;
    }

    // The first tile is the pivot; every branch consumes it.
    let pivot = rest[0];

    // Pair of equals.
    if rest[1] == pivot {
        let next = without(rest, &[1, 0]);
        acc.pairs.push(PairGroup {
            tiles: vec![pivot, pivot],
            jokers: 0,
        });
        search(&next, jokers, acc, out, seen);
        acc.pairs.pop();
    }

    // Natural sets containing the pivot (triplets, runs, honor trios).
    for j in 1..rest.len() {
        for k in j + 1..rest.len() {
            if is_set(pivot, rest[j], rest[k]) {
                let next = without(rest, &[k, j, 0]);
                acc.sets.push(SetGroup {
                    tiles: vec![pivot, rest[j], rest[k]],
                    jokers: 0,
                });
                search(&next, jokers, acc, out, seen);
                acc.sets.pop();
            }
        }
    }

    if jokers >= 1 {
        // Almost-set completed by one joker.
        for j in 1..rest.len() {
            if is_almost_set(pivot, rest[j]) {
                let next = without(rest, &[j, 0]);
                acc.sets.push(SetGroup {
                    tiles: vec![pivot, rest[j]],
                    jokers: 1,
                });
                search(&next, jokers - 1, acc, out, seen);
                acc.sets.pop();
            }
        }
        // Pivot paired with a joker.
        let next = without(rest, &[0]);
        acc.pairs.push(PairGroup {
            tiles: vec![pivot],
            jokers: 1,
        });
        search(&next, jokers - 1, acc, out, seen);
        acc.pairs.pop();
    }
    if jokers >= 2 {
        // Pivot plus two jokers as a set.
        let next = without(rest, &[0]);
        acc.sets.push(SetGroup {
            tiles: vec![pivot],
            jokers: 2,
        });
        search(&next, jokers - 2, acc, out, seen);
        acc.sets.pop();
    }
}

/// The shape a winning hand was accepted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WinningShape {
    /// `4 - meld_count` sets plus one pair.
    Standard { partition: Partition, jokers_used: u8 },
    /// Seven pairs.
    SevenPairs { partition: Partition, jokers_used: u8 },
    /// Chaotic thirteen: 14 all-distinct, pairwise-uncompletable tiles.
    Chaotic { seven_stars: bool },
}

impl WinningShape {
    pub fn jokers_used(&self) -> u8 {
        match self {
            WinningShape::Standard { jokers_used, .. }
            | WinningShape::SevenPairs { jokers_used, .. } => *jokers_used,
            WinningShape::Chaotic { .. } => 0,
        }
    }
}

fn chaotic_shape(tiles: &[Tile]) -> Option<WinningShape> {
    if tiles.len() != 14 {
        return None;
    }
    let mut sorted = tiles.to_vec();
    sorted.sort();
    if sorted.windows(2).any(|w| w[0] == w[1]) {
        return None;
    }
    // No two numeric tiles may be within completion distance of each other.
    for (i, &a) in sorted.iter().enumerate() {
        for &b in &sorted[i + 1..] {
            if !a.is_honor() && a.suit == b.suit && a.rank.abs_diff(b.rank) <= 2 {
                return None;
            }
        }
    }
    let honors = sorted.iter().filter(|t| t.is_honor()).count();
    Some(WinningShape::Chaotic {
        seven_stars: honors == 7,
    })
}

/// Decides whether `tiles` (a full concealed hand including any tile being
/// claimed) wins given `meld_count` already-declared melds. Returns the
/// accepted shape, or `None`.
pub fn is_winning_hand(
    tiles: &[Tile],
    jokers: &JokerPair,
    meld_count: usize,
) -> Option<WinningShape> {
    if meld_count == 0 {
        if let Some(shape) = chaotic_shape(tiles) {
            return Some(shape);
        }
    }

    let naturals: Vec<Tile> = tiles
        .iter()
        .copied()
        .filter(|&t| !jokers.is_joker(t))
        .collect();
    let joker_count = (tiles.len() - naturals.len()) as u8;

    for partition in form_sets_pairs(&naturals, joker_count) {
        if partition.leftover.is_some() {
            continue;
        }
        if partition.pairs.len() == 7 && partition.sets.is_empty() {
            return Some(WinningShape::SevenPairs {
                partition,
                jokers_used: joker_count,
            });
        }
        if partition.sets.len() + meld_count == 4 && partition.pairs.len() == 1 {
            return Some(WinningShape::Standard {
                partition,
                jokers_used: joker_count,
            });
        }
    }
    None
}
