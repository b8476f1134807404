//! The shared mutable match record and the phase state machine over it.
//!
//! Every action method validates phase, caller, and tile references before
//! touching any state; a returned error therefore never leaves a partial
//! mutation behind. The engine is single-threaded by contract — the hosting
//! session layer serializes all calls against one `MatchState`.

use std::cmp::Reverse;

use crate::algebra::{is_set, is_winning_hand, WinningShape};
use crate::errors::{EngineError, EngineResult};
use crate::rule::MatchRule;
use crate::score;
use crate::tile::{sort_hand, JokerPair, Meld, MeldKind, Suit, Tile};

pub mod player;
pub mod wall;

pub use player::{LogEntry, PlayerState, PlayerStats};
pub use wall::WallState;

pub const PLAYERS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinKind {
    SelfDraw,
    Discard,
    StolenKong,
}

/// How a hand ended; attached to the Score phase.
#[derive(Debug, Clone, PartialEq)]
pub enum HandOutcome {
    /// Wall exhausted, nobody won.
    Drawn,
    Win {
        winner: usize,
        kind: WinKind,
        /// The player who fed the winning tile (discarder, or the meld-kong
        /// declarer for a stolen kong). `None` on self-draw.
        detonator: Option<usize>,
        shape: WinningShape,
        joker_fisher: bool,
        kong_bloom: bool,
    },
    /// A declared win that failed the winning-hand predicate.
    FalseWin { claimant: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimKind {
    Win,
    Kong(Vec<usize>),
    Pong(Vec<usize>),
}

impl ClaimKind {
    fn priority(&self) -> u8 {
        match self {
            ClaimKind::Win => 2,
            ClaimKind::Kong(_) => 1,
            ClaimKind::Pong(_) => 0,
        }
    }
}

/// A recorded reaction candidate, keyed by the reacting player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub player: usize,
    pub kind: ClaimKind,
}

/// A kong-into-meld staged during the Reaction window; the transfer is
/// deferred until the window closes uncontested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMeldKong {
    pub player: usize,
    pub meld_index: usize,
    pub tile: Tile,
}

/// The six phases. Each carries only its phase-specific payload; everything
/// shared lives on `MatchState`.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Deal,
    Pull,
    Push,
    Reaction { claims: Vec<Claim> },
    Score { outcome: HandOutcome, scored: bool },
    End,
}

/// End-of-match snapshot handed to the external awards collaborator.
#[derive(Debug, Clone)]
pub struct MatchSummary {
    pub scores: [i64; PLAYERS],
    pub stats: [PlayerStats; PLAYERS],
}

#[derive(Debug, Clone)]
pub struct MatchState {
    pub players: [PlayerState; PLAYERS],
    pub wall: WallState,
    pub phase: Phase,
    pub rule: MatchRule,
    /// Increments on every discard; resets to 1 at Deal.
    pub turn: u32,
    pub round: u32,
    /// Valid from the first Deal onward (the revealed indicator).
    pub jokers: JokerPair,
    pub current_player: usize,
    pub dealer: usize,
    /// The most recent unclaimed discard: (player, index into that
    /// player's discard pile). Owned arena reference, never a tile alias.
    pub last_discard: Option<(usize, usize)>,
    pub pending_meld_kong: Option<PendingMeldKong>,
    pub drawn_tile: Option<Tile>,
    /// Set between a kong declaration and the declarer's next discard;
    /// a self-draw win inside this window is a kong-bloom.
    pub after_kong: bool,
}

impl MatchState {
    pub fn new(rule: MatchRule) -> Self {
        Self {
            players: std::array::from_fn(|_| PlayerState::new(rule.starting_score)),
            wall: WallState::new(rule.seed),
            phase: Phase::Deal,
            rule,
            turn: 0,
            round: 1,
            jokers: JokerPair::from_indicator(Tile::new(Suit::Characters, 1)),
            current_player: 0,
            dealer: 0,
            last_discard: None,
            pending_meld_kong: None,
            drawn_tile: None,
            after_kong: false,
        }
    }

    fn check_current(&self, player: usize) -> EngineResult<()> {
        if player >= PLAYERS {
            return Err(EngineError::InvalidPlayerIndex);
        }
        if player != self.current_player {
            return Err(EngineError::NotYourTurn);
        }
        Ok(())
    }

    fn check_reactor(&self, player: usize) -> EngineResult<()> {
        if player >= PLAYERS {
            return Err(EngineError::InvalidPlayerIndex);
        }
        if player == self.current_player {
            return Err(EngineError::NotAuthorized);
        }
        Ok(())
    }

    /// The tile referenced by `last_discard`.
    pub fn pending_discard(&self) -> Option<Tile> {
        self.last_discard.map(|(p, i)| self.players[p].discards[i])
    }

    fn take_pending_discard(&mut self) -> Tile {
        let (p, i) = self
            .last_discard
            .take()
            .expect("pending discard already validated");
        debug_assert_eq!(i, self.players[p].discards.len() - 1);
        self.players[p].discards.remove(i)
    }

    fn apply_kong_transfer(&mut self, declarer: usize) {
        let deltas = score::resolve(&score::kong_modifiers(declarer));
        for (p, d) in self.players.iter_mut().zip(deltas) {
            p.score += d;
        }
    }

    // --- Deal ---

    /// Shuffles a fresh deck, reveals the joker indicator, deals 13 tiles
    /// to each player and opens the dealer's Pull.
    pub fn deal(&mut self) -> EngineResult<()> {
        if self.phase != Phase::Deal {
            return Err(EngineError::WrongPhase);
        }
        self.wall.shuffle();
        let indicator = self.wall.pop().expect("fresh deck is never empty");
        self.jokers = JokerPair::from_indicator(indicator);
        for p in &mut self.players {
            p.reset_hand();
        }
        for _ in 0..13 {
            for p in &mut self.players {
                let t = self.wall.pop().expect("deck holds a full deal");
                p.hand.push(t);
            }
        }
        let jokers = self.jokers;
        for p in &mut self.players {
            sort_hand(&mut p.hand, &jokers);
        }
        self.turn = 1;
        self.current_player = self.dealer;
        self.last_discard = None;
        self.pending_meld_kong = None;
        self.drawn_tile = None;
        self.after_kong = false;
        self.phase = Phase::Pull;
        Ok(())
    }

    // --- Pull ---

    /// Draws the next wall tile, or ends the hand as drawn when the wall
    /// is exhausted.
    pub fn draw(&mut self, player: usize) -> EngineResult<()> {
        if self.phase != Phase::Pull {
            return Err(EngineError::WrongPhase);
        }
        self.check_current(player)?;
        match self.wall.pop() {
            None => {
                self.phase = Phase::Score {
                    outcome: HandOutcome::Drawn,
                    scored: false,
                };
            }
            Some(t) => {
                self.players[player].hand.push(t);
                self.drawn_tile = Some(t);
                self.last_discard = None;
                self.phase = Phase::Push;
            }
        }
        Ok(())
    }

    /// Melds the pending discard with two concealed tiles.
    pub fn eat(&mut self, player: usize, i: usize, j: usize) -> EngineResult<()> {
        if self.phase != Phase::Pull {
            return Err(EngineError::WrongPhase);
        }
        self.check_current(player)?;
        let discard = self.pending_discard().ok_or(EngineError::NoPendingDiscard)?;
        let hand_len = self.players[player].hand.len();
        if i == j || i >= hand_len || j >= hand_len {
            return Err(EngineError::InvalidTileReference);
        }
        let (a, b) = (self.players[player].hand[i], self.players[player].hand[j]);
        if !is_set(discard, a, b) {
            return Err(EngineError::InvalidSetShape);
        }

        let discard = self.take_pending_discard();
        let hand = &mut self.players[player].hand;
        let (hi, lo) = if i > j { (i, j) } else { (j, i) };
        hand.remove(hi);
        hand.remove(lo);
        let kind = if a == b && b == discard {
            MeldKind::Pong
        } else {
            MeldKind::Sequence
        };
        self.players[player]
            .melds
            .push(Meld::new(kind, vec![discard, a, b]));
        self.players[player].log.push(LogEntry::Meld(kind, discard));
        self.players[player].stats.eats += 1;
        self.drawn_tile = None;
        self.phase = Phase::Push;
        Ok(())
    }

    /// Kongs the pending discard with three matching concealed tiles.
    /// Grants an extra turn segment: the claimer returns to Pull.
    pub fn kong_from_discard(
        &mut self,
        player: usize,
        i: usize,
        j: usize,
        k: usize,
    ) -> EngineResult<()> {
        if self.phase != Phase::Pull {
            return Err(EngineError::WrongPhase);
        }
        self.check_current(player)?;
        let discard = self.pending_discard().ok_or(EngineError::NoPendingDiscard)?;
        let hand = &self.players[player].hand;
        let mut idx = [i, j, k];
        idx.sort_unstable();
        if idx[0] == idx[1] || idx[1] == idx[2] || idx[2] >= hand.len() {
            return Err(EngineError::InvalidTileReference);
        }
        if idx.iter().any(|&x| hand[x] != discard) {
            return Err(EngineError::InvalidSetShape);
        }

        let discard = self.take_pending_discard();
        let hand = &mut self.players[player].hand;
        for &x in idx.iter().rev() {
            hand.remove(x);
        }
        self.players[player]
            .melds
            .push(Meld::new(MeldKind::Kong, vec![discard; 4]));
        self.players[player]
            .log
            .push(LogEntry::Meld(MeldKind::Kong, discard));
        self.players[player].stats.kongs += 1;
        self.apply_kong_transfer(player);
        self.after_kong = true;
        self.phase = Phase::Pull;
        Ok(())
    }

    /// Declares victory on the pending discard. An invalid hand ends the
    /// hand as a false win instead.
    pub fn win_from_discard(&mut self, player: usize) -> EngineResult<()> {
        if self.phase != Phase::Pull {
            return Err(EngineError::WrongPhase);
        }
        self.check_current(player)?;
        let discard = self.pending_discard().ok_or(EngineError::NoPendingDiscard)?;
        let discarder = self.last_discard.map(|(p, _)| p);

        let mut tiles = self.players[player].hand.clone();
        tiles.push(discard);
        match is_winning_hand(&tiles, &self.jokers, self.players[player].melds.len()) {
            None => {
                self.phase = Phase::Score {
                    outcome: HandOutcome::FalseWin { claimant: player },
                    scored: false,
                };
            }
            Some(shape) => {
                let discard = self.take_pending_discard();
                self.players[player].hand.push(discard);
                let jokers = self.jokers;
                sort_hand(&mut self.players[player].hand, &jokers);
                self.phase = Phase::Score {
                    outcome: HandOutcome::Win {
                        winner: player,
                        kind: WinKind::Discard,
                        detonator: discarder,
                        shape,
                        joker_fisher: false,
                        kong_bloom: false,
                    },
                    scored: false,
                };
            }
        }
        Ok(())
    }

    // --- Push ---

    /// Discards a concealed tile and opens the reaction window.
    pub fn discard(&mut self, player: usize, i: usize) -> EngineResult<()> {
        if self.phase != Phase::Push {
            return Err(EngineError::WrongPhase);
        }
        self.check_current(player)?;
        if i >= self.players[player].hand.len() {
            return Err(EngineError::InvalidTileReference);
        }

        let t = self.players[player].hand.remove(i);
        let jokers = self.jokers;
        sort_hand(&mut self.players[player].hand, &jokers);
        self.players[player].discards.push(t);
        self.players[player].log.push(LogEntry::Discard(t));
        self.turn += 1;
        self.last_discard = Some((player, self.players[player].discards.len() - 1));
        self.drawn_tile = None;
        self.after_kong = false;
        self.phase = Phase::Reaction { claims: Vec::new() };
        Ok(())
    }

    /// Declares a concealed kong from four matching hand tiles.
    pub fn concealed_kong(
        &mut self,
        player: usize,
        i: usize,
        j: usize,
        k: usize,
        l: usize,
    ) -> EngineResult<()> {
        if self.phase != Phase::Push {
            return Err(EngineError::WrongPhase);
        }
        self.check_current(player)?;
        let hand = &self.players[player].hand;
        let mut idx = [i, j, k, l];
        idx.sort_unstable();
        if idx.windows(2).any(|w| w[0] == w[1]) || idx[3] >= hand.len() {
            return Err(EngineError::InvalidTileReference);
        }
        let t = hand[idx[0]];
        if idx.iter().any(|&x| hand[x] != t) {
            return Err(EngineError::InvalidSetShape);
        }

        let hand = &mut self.players[player].hand;
        for &x in idx.iter().rev() {
            hand.remove(x);
        }
        self.players[player]
            .melds
            .push(Meld::new(MeldKind::Kong, vec![t; 4]));
        self.players[player]
            .log
            .push(LogEntry::Meld(MeldKind::Kong, t));
        self.players[player].stats.kongs += 1;
        self.apply_kong_transfer(player);
        self.after_kong = true;
        self.drawn_tile = None;
        self.phase = Phase::Pull;
        Ok(())
    }

    /// Extends an own pong meld with a matching concealed tile. The kong is
    /// staged, not committed: other players get a win-steal window first,
    /// and the kong transfer is deferred until that window closes.
    pub fn meld_kong(&mut self, player: usize, i: usize, meld_index: usize) -> EngineResult<()> {
        if self.phase != Phase::Push {
            return Err(EngineError::WrongPhase);
        }
        self.check_current(player)?;
        let p = &self.players[player];
        if i >= p.hand.len() || meld_index >= p.melds.len() {
            return Err(EngineError::InvalidTileReference);
        }
        let meld = &p.melds[meld_index];
        if meld.kind != MeldKind::Pong || p.hand[i] != meld.tiles[0] {
            return Err(EngineError::InvalidSetShape);
        }

        let tile = self.players[player].hand.remove(i);
        self.pending_meld_kong = Some(PendingMeldKong {
            player,
            meld_index,
            tile,
        });
        self.drawn_tile = None;
        self.phase = Phase::Reaction { claims: Vec::new() };
        Ok(())
    }

    /// Declares a self-draw victory. An invalid hand ends the hand as a
    /// false win instead.
    pub fn self_draw_win(&mut self, player: usize) -> EngineResult<()> {
        if self.phase != Phase::Push {
            return Err(EngineError::WrongPhase);
        }
        self.check_current(player)?;
        let hand = &self.players[player].hand;
        match is_winning_hand(hand, &self.jokers, self.players[player].melds.len()) {
            None => {
                self.phase = Phase::Score {
                    outcome: HandOutcome::FalseWin { claimant: player },
                    scored: false,
                };
            }
            Some(shape) => {
                // Joker-fisher: the winning tile was fished from the wall
                // and is itself a wildcard.
                let joker_fisher = self
                    .drawn_tile
                    .map_or(false, |t| self.jokers.is_joker(t));
                self.phase = Phase::Score {
                    outcome: HandOutcome::Win {
                        winner: player,
                        kind: WinKind::SelfDraw,
                        detonator: None,
                        shape,
                        joker_fisher,
                        kong_bloom: self.after_kong,
                    },
                    scored: false,
                };
            }
        }
        Ok(())
    }

    // --- Reaction ---

    /// Records a pong (2 tile indices) or kong (3) candidate against the
    /// pending discard. One claim per player per window.
    pub fn pong_kong(&mut self, player: usize, indices: &[usize]) -> EngineResult<()> {
        let Phase::Reaction { claims } = &self.phase else {
            return Err(EngineError::WrongPhase);
        };
        self.check_reactor(player)?;
        if self.pending_meld_kong.is_some() {
            // The tile is already spoken for by a kong-into-meld; only a
            // win may steal it.
            return Err(EngineError::NoPendingDiscard);
        }
        let discard = self.pending_discard().ok_or(EngineError::NoPendingDiscard)?;
        if claims.iter().any(|c| c.player == player) {
            return Err(EngineError::NotAuthorized);
        }
        if indices.len() < 2 {
            return Err(EngineError::InvalidSetShape);
        }
        let hand = &self.players[player].hand;
        let mut sorted_idx = indices.to_vec();
        sorted_idx.sort_unstable();
        if sorted_idx.windows(2).any(|w| w[0] == w[1])
            || sorted_idx.last().copied().unwrap_or(0) >= hand.len()
        {
            return Err(EngineError::InvalidTileReference);
        }
        if indices.iter().any(|&x| hand[x] != discard) {
            return Err(EngineError::InvalidSetShape);
        }

        let kind = if indices.len() >= 3 {
            ClaimKind::Kong(indices[..3].to_vec())
        } else {
            ClaimKind::Pong(indices.to_vec())
        };
        self.record_claim(Claim { player, kind });
        Ok(())
    }

    /// Records a win candidate against the pending discard or a staged
    /// meld-kong tile. Validity is judged at arbitration.
    pub fn reaction_win(&mut self, player: usize) -> EngineResult<()> {
        let Phase::Reaction { claims } = &self.phase else {
            return Err(EngineError::WrongPhase);
        };
        self.check_reactor(player)?;
        if self.last_discard.is_none() && self.pending_meld_kong.is_none() {
            return Err(EngineError::NoPendingDiscard);
        }
        if claims.iter().any(|c| c.player == player) {
            return Err(EngineError::NotAuthorized);
        }
        self.record_claim(Claim {
            player,
            kind: ClaimKind::Win,
        });
        Ok(())
    }

    /// Claims stay sorted so the arbitration winner is always last:
    /// ascending priority, then descending cyclic distance from the
    /// current player (the closest downstream claimant orders last).
    fn record_claim(&mut self, claim: Claim) {
        let current = self.current_player;
        let Phase::Reaction { claims } = &mut self.phase else {
            unreachable!("caller checked the phase");
        };
        claims.push(claim);
        claims.sort_by_key(|c| {
            (
                c.kind.priority(),
                Reverse((c.player + PLAYERS - current) % PLAYERS),
            )
        });
    }

    /// Closes the reaction window: resolves exactly the highest-priority
    /// claim, or commits a pending meld-kong, or advances the turn.
    pub fn next(&mut self) -> EngineResult<()> {
        let Phase::Reaction { claims } = &self.phase else {
            return Err(EngineError::WrongPhase);
        };
        match claims.last().cloned() {
            Some(claim) => match claim.kind {
                ClaimKind::Win => self.resolve_win_claim(claim.player),
                ClaimKind::Kong(indices) => self.resolve_call_claim(claim.player, indices, true),
                ClaimKind::Pong(indices) => self.resolve_call_claim(claim.player, indices, false),
            },
            None => {
                if let Some(pk) = self.pending_meld_kong.take() {
                    self.commit_meld_kong(pk);
                } else {
                    self.current_player = (self.current_player + 1) % PLAYERS;
                    self.after_kong = false;
                    self.phase = Phase::Pull;
                }
            }
        }
        Ok(())
    }

    fn resolve_win_claim(&mut self, reactor: usize) {
        let (tile, kind, detonator) = match &self.pending_meld_kong {
            Some(pk) => (pk.tile, WinKind::StolenKong, Some(pk.player)),
            None => {
                let tile = self
                    .pending_discard()
                    .expect("win claim recorded without a claimable tile");
                let (dp, _) = self.last_discard.expect("checked above");
                (tile, WinKind::Discard, Some(dp))
            }
        };
        let mut tiles = self.players[reactor].hand.clone();
        tiles.push(tile);
        match is_winning_hand(&tiles, &self.jokers, self.players[reactor].melds.len()) {
            None => {
                self.current_player = reactor;
                self.phase = Phase::Score {
                    outcome: HandOutcome::FalseWin { claimant: reactor },
                    scored: false,
                };
            }
            Some(shape) => {
                if self.pending_meld_kong.take().is_none() {
                    let taken = self.take_pending_discard();
                    debug_assert_eq!(taken, tile);
                }
                self.players[reactor].hand.push(tile);
                let jokers = self.jokers;
                sort_hand(&mut self.players[reactor].hand, &jokers);
                self.current_player = reactor;
                self.phase = Phase::Score {
                    outcome: HandOutcome::Win {
                        winner: reactor,
                        kind,
                        detonator,
                        shape,
                        joker_fisher: false,
                        kong_bloom: false,
                    },
                    scored: false,
                };
            }
        }
    }

    fn resolve_call_claim(&mut self, reactor: usize, mut indices: Vec<usize>, is_kong: bool) {
        let discard = self.take_pending_discard();
        let hand = &mut self.players[reactor].hand;
        indices.sort_unstable_by_key(|&x| Reverse(x));
        let mut tiles = vec![discard];
        for &x in &indices {
            tiles.push(hand.remove(x));
        }
        let kind = if is_kong { MeldKind::Kong } else { MeldKind::Pong };
        self.players[reactor].melds.push(Meld::new(kind, tiles));
        self.players[reactor].log.push(LogEntry::Meld(kind, discard));
        self.current_player = reactor;
        self.drawn_tile = None;
        if is_kong {
            self.players[reactor].stats.kongs += 1;
            self.apply_kong_transfer(reactor);
            self.after_kong = true;
            self.phase = Phase::Pull;
        } else {
            self.players[reactor].stats.pongs += 1;
            self.after_kong = false;
            self.phase = Phase::Push;
        }
    }

    fn commit_meld_kong(&mut self, pk: PendingMeldKong) {
        let meld = &mut self.players[pk.player].melds[pk.meld_index];
        meld.kind = MeldKind::Kong;
        meld.tiles.push(pk.tile);
        meld.tiles.sort();
        self.players[pk.player]
            .log
            .push(LogEntry::Meld(MeldKind::Kong, pk.tile));
        self.players[pk.player].stats.kongs += 1;
        self.apply_kong_transfer(pk.player);
        self.current_player = pk.player;
        self.after_kong = true;
        self.phase = Phase::Pull;
    }

    // --- Score ---

    /// Computes and applies the hand result: the win-modifier chain plus
    /// the joker-bonus chain, then the cumulative statistics.
    pub fn score_hand(&mut self) -> EngineResult<()> {
        let (outcome, scored) = match &self.phase {
            Phase::Score { outcome, scored } => (outcome.clone(), *scored),
            _ => return Err(EngineError::WrongPhase),
        };
        if scored {
            return Err(EngineError::AlreadyScored);
        }

        let win_deltas = score::resolve(&score::win_modifiers(self, &outcome));
        let bonus_deltas = score::resolve(&score::joker_bonus_modifiers(self));
        let joker_counts: [u32; PLAYERS] = std::array::from_fn(|i| score::joker_tile_count(self, i));
        let overlord = score::overlord(self);

        for i in 0..PLAYERS {
            self.players[i].score += win_deltas[i] + bonus_deltas[i];
            self.players[i].stats.jokers_held += joker_counts[i];
        }
        if let Some(o) = overlord {
            self.players[o].stats.overlord_hands += 1;
        }
        match &outcome {
            HandOutcome::Drawn => {}
            HandOutcome::FalseWin { claimant } => {
                self.players[*claimant].stats.false_wins += 1;
            }
            HandOutcome::Win {
                winner,
                kind,
                detonator,
                shape,
                ..
            } => {
                let stats = &mut self.players[*winner].stats;
                stats.wins += 1;
                if *kind == WinKind::SelfDraw {
                    stats.self_draws += 1;
                }
                if matches!(
                    shape,
                    WinningShape::SevenPairs { .. } | WinningShape::Chaotic { .. }
                ) {
                    stats.special_wins += 1;
                }
                if let Some(d) = *detonator {
                    self.players[d].stats.detonations += 1;
                }
            }
        }
        self.phase = Phase::Score {
            outcome,
            scored: true,
        };
        Ok(())
    }

    /// Rotates the dealer and starts the next hand, or ends the match once
    /// the round counter passes the configured maximum. The dealer keeps
    /// the seat after a drawn hand or a dealer win.
    pub fn next_hand(&mut self) -> EngineResult<()> {
        let outcome = match &self.phase {
            Phase::Score {
                outcome,
                scored: true,
            } => outcome.clone(),
            _ => return Err(EngineError::WrongPhase),
        };
        let dealer_keeps = match &outcome {
            HandOutcome::Drawn => true,
            HandOutcome::Win { winner, .. } => *winner == self.dealer,
            HandOutcome::FalseWin { .. } => false,
        };
        if !dealer_keeps {
            self.dealer = (self.dealer + 1) % PLAYERS;
            if self.dealer == 0 {
                self.round += 1;
            }
        }
        if self.round > self.rule.max_round {
            self.phase = Phase::End;
        } else {
            self.current_player = self.dealer;
            self.phase = Phase::Deal;
        }
        Ok(())
    }

    // --- End ---

    /// Final scores and statistics for the external awards computation.
    pub fn summary(&self) -> EngineResult<MatchSummary> {
        if self.phase != Phase::End {
            return Err(EngineError::WrongPhase);
        }
        Ok(MatchSummary {
            scores: std::array::from_fn(|i| self.players[i].score),
            stats: std::array::from_fn(|i| self.players[i].stats),
        })
    }

    /// Every tile the state currently accounts for: wall, hands, melds,
    /// discards, any staged meld-kong tile, and the revealed indicator.
    /// Only meaningful once a hand has been dealt.
    pub fn tile_census(&self) -> Vec<Tile> {
        let mut tiles = self.wall.tiles.clone();
        for p in &self.players {
            tiles.extend(p.held_tiles());
            tiles.extend(p.discards.iter().copied());
        }
        if let Some(pk) = &self.pending_meld_kong {
            tiles.push(pk.tile);
        }
        tiles.push(self.jokers.primary);
        tiles
    }
}
