use serde::{Deserialize, Serialize};

/// Every action the engine accepts, across all phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Deal: shuffle and deal a fresh hand.
    Deal,
    /// Pull: draw from the wall.
    Draw,
    /// Pull: meld the pending discard with two own tiles.
    Eat,
    /// Pull: kong the pending discard with three matching own tiles.
    DiscardKong,
    /// Pull: win on the pending discard.
    DiscardWin,
    /// Push: discard a concealed tile.
    Discard,
    /// Push: concealed kong from four matching hand tiles.
    ConcealedKong,
    /// Push: extend an own pong meld into a kong.
    MeldKong,
    /// Push: self-draw win.
    SelfDrawWin,
    /// Reaction: claim the discard as pong or kong.
    ReactionClaim,
    /// Reaction: claim the discard (or a pending meld-kong tile) as a win.
    ReactionWin,
    /// Reaction: close the window and arbitrate.
    ReactionNext,
    /// Score: compute and apply the hand result.
    ScoreHand,
    /// Score: rotate the dealer and start the next hand (or end the match).
    NextHand,
}

/// Authorization descriptor consulted by the hosting dispatcher before the
/// engine is invoked. The engine re-validates inside each action method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Access {
    /// Only the connection resolved to the current player may call this.
    /// Engine-driving steps (deal, arbitration, scoring) carry this tag too
    /// and are issued by the dispatcher on the current player's behalf.
    CurrentPlayerOnly,
    /// Any player may call, but must assert their own index as an explicit
    /// argument; the dispatcher rejects mismatched connections.
    ExplicitIndex,
}

impl ActionKind {
    /// Static permission table.
    pub const fn access(self) -> Access {
        match self {
            ActionKind::ReactionClaim | ActionKind::ReactionWin => Access::ExplicitIndex,
            _ => Access::CurrentPlayerOnly,
        }
    }
}
