use rand::prelude::*;
use rand::rngs::StdRng;

use crate::tile::{full_deck, Tile};

/// The draw pile. Tiles are popped from the end.
#[derive(Debug, Clone)]
pub struct WallState {
    pub tiles: Vec<Tile>,
    pub seed: Option<u64>,
    pub hand_index: u64,
}

impl WallState {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            tiles: Vec::new(),
            seed,
            hand_index: 0,
        }
    }

    /// Loads and shuffles a fresh 136-tile deck. With a fixed seed every
    /// hand gets its own derived sub-seed, so a match replays exactly but
    /// consecutive hands differ.
    pub fn shuffle(&mut self) {
        let mut deck = full_deck();
        let mut rng = if let Some(episode_seed) = self.seed {
            let hand_seed = splitmix64(episode_seed.wrapping_add(self.hand_index));
            StdRng::seed_from_u64(hand_seed)
        } else {
            StdRng::from_entropy()
        };
        self.hand_index = self.hand_index.wrapping_add(1);
        deck.shuffle(&mut rng);
        self.tiles = deck;
    }

    pub fn pop(&mut self) -> Option<Tile> {
        self.tiles.pop()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
