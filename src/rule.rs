use serde::{Deserialize, Serialize};

/// Match-level configuration. A "round" is one full dealer rotation; the
/// match ends once the round counter exceeds `max_round` at scoring time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRule {
    pub max_round: u32,
    pub starting_score: i64,
    /// Fixed seed for reproducible wall shuffles; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for MatchRule {
    fn default() -> Self {
        Self {
            max_round: 4,
            starting_score: 0,
            seed: None,
        }
    }
}

impl MatchRule {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn single_round() -> Self {
        Self {
            max_round: 1,
            ..Self::default()
        }
    }
}
