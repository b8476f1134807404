use std::fmt;

/// Recoverable rule violations surfaced to the offending caller. Every
/// action method validates before mutating, so a returned error always
/// leaves the match state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Action not legal in the current phase.
    WrongPhase,
    /// Action restricted to the current player.
    NotYourTurn,
    /// Caller's player index disallowed for this action.
    NotAuthorized,
    /// Index does not name an existing concealed tile or meld.
    InvalidTileReference,
    /// Named tiles do not satisfy the required set/pair predicate.
    InvalidSetShape,
    /// Action requires a pending discard that does not exist.
    NoPendingDiscard,
    /// Second invocation of the scoring step for the same hand.
    AlreadyScored,
    /// Out-of-range player reference.
    InvalidPlayerIndex,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::WrongPhase => write!(f, "action not legal in the current phase"),
            EngineError::NotYourTurn => write!(f, "only the current player may take this action"),
            EngineError::NotAuthorized => write!(f, "caller may not act as this player"),
            EngineError::InvalidTileReference => write!(f, "tile or meld index out of range"),
            EngineError::InvalidSetShape => write!(f, "named tiles do not form the required shape"),
            EngineError::NoPendingDiscard => write!(f, "no pending discard to act on"),
            EngineError::AlreadyScored => write!(f, "hand has already been scored"),
            EngineError::InvalidPlayerIndex => write!(f, "player index out of range"),
        }
    }
}

impl std::error::Error for EngineError {}

pub type EngineResult<T> = Result<T, EngineError>;
