//! Authoritative rules engine for a four-player joker-wildcard mahjong
//! variant: tile algebra, the hand-phase state machine, and zero-sum
//! modifier scoring. The engine validates and applies actions; the
//! hosting session layer owns timers, identity, and transport.

pub mod action;
pub mod algebra;
pub mod errors;
pub mod rule;
pub mod score;
pub mod state;
pub mod tile;


pub use action::{Access, ActionKind};
pub use algebra::{form_sets_pairs, is_set, is_winning_hand, Partition, WinningShape};
pub use errors::{EngineError, EngineResult};
pub use rule::MatchRule;
pub use score::{resolve, Modifier, RuleKind};
pub use state::{
    Claim, ClaimKind, HandOutcome, MatchState, MatchSummary, Phase, PlayerState, WinKind,
};
pub use tile::{full_deck, JokerPair, Meld, MeldKind, Suit, Tile};
