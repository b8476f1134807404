use crate::tile::{Meld, MeldKind, Tile};

/// Chronological record of a player's visible actions within a hand, used
/// to recover the interleaving of discards and melds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Discard(Tile),
    /// A declared meld, keyed by the tile that triggered it.
    Meld(MeldKind, Tile),
}

/// Cumulative statistics kept across hands for scoring attribution and
/// end-of-match awards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub pongs: u32,
    pub kongs: u32,
    pub eats: u32,
    pub wins: u32,
    pub self_draws: u32,
    pub false_wins: u32,
    pub special_wins: u32,
    /// Hands where this player fed the winning tile.
    pub detonations: u32,
    /// Joker tiles held at scoring time, summed over hands.
    pub jokers_held: u32,
    /// Hands where this player was the sole joker holder.
    pub overlord_hands: u32,
}

#[derive(Debug, Clone)]
pub struct PlayerState {
    pub hand: Vec<Tile>,
    pub melds: Vec<Meld>,
    pub discards: Vec<Tile>,
    pub log: Vec<LogEntry>,
    pub score: i64,
    pub stats: PlayerStats,
}

impl PlayerState {
    pub fn new(starting_score: i64) -> Self {
        Self {
            hand: Vec::new(),
            melds: Vec::new(),
            discards: Vec::new(),
            log: Vec::new(),
            score: starting_score,
            stats: PlayerStats::default(),
        }
    }

    /// Clears per-hand state. Score and stats persist across hands.
    pub fn reset_hand(&mut self) {
        self.hand.clear();
        self.melds.clear();
        self.discards.clear();
        self.log.clear();
    }

    /// All tiles this player is holding or has declared, concealed + melds.
    pub fn held_tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.hand
            .iter()
            .copied()
            .chain(self.melds.iter().flat_map(|m| m.tiles.iter().copied()))
    }
}
