use serde::{Deserialize, Serialize};

/// Distinct tile kinds: 27 numeric + 4 winds + 3 dragons.
pub const TILE_KINDS: usize = 34;

/// Four copies of every kind.
pub const DECK_SIZE: usize = 136;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Characters,
    Circles,
    Bamboos,
    Winds,
    Dragons,
}

impl Suit {
    pub const ALL: [Suit; 5] = [
        Suit::Characters,
        Suit::Circles,
        Suit::Bamboos,
        Suit::Winds,
        Suit::Dragons,
    ];

    pub fn is_honor(self) -> bool {
        matches!(self, Suit::Winds | Suit::Dragons)
    }

    pub fn max_rank(self) -> u8 {
        match self {
            Suit::Winds => 4,
            Suit::Dragons => 3,
            _ => 9,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Suit::Characters => 'C',
            Suit::Circles => 'O',
            Suit::Bamboos => 'B',
            Suit::Winds => 'W',
            Suit::Dragons => 'D',
        }
    }
}

/// An immutable tile value. Equality is suit + rank identity, ordering is
/// the canonical tile order (suit declaration order, then rank).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub suit: Suit,
    pub rank: u8,
}

impl Tile {
    pub fn new(suit: Suit, rank: u8) -> Self {
        Self { suit, rank }
    }

    pub fn is_valid(self) -> bool {
        self.rank >= 1 && self.rank <= self.suit.max_rank()
    }

    pub fn is_honor(self) -> bool {
        self.suit.is_honor()
    }

    /// Canonical string form, e.g. "C5", used for hashing and dedup.
    pub fn key(self) -> String {
        format!("{}{}", self.suit.letter(), self.rank)
    }

    /// The tile following this one in its suit's cyclic order (9 wraps to 1,
    /// the last wind wraps to the first, and so on).
    pub fn cyclic_next(self) -> Tile {
        Tile {
            suit: self.suit,
            rank: self.rank % self.suit.max_rank() + 1,
        }
    }

    /// Every valid tile kind once, in canonical order.
    pub fn all_kinds() -> impl Iterator<Item = Tile> {
        Suit::ALL
            .into_iter()
            .flat_map(|s| (1..=s.max_rank()).map(move |r| Tile::new(s, r)))
    }
}

/// A fresh 136-tile deck: four copies of every valid kind.
pub fn full_deck() -> Vec<Tile> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for kind in Tile::all_kinds() {
        for _ in 0..4 {
            deck.push(kind);
        }
    }
    deck
}

/// The two wildcard tiles of the current hand. The primary joker is the
/// tile revealed at deal time; the secondary is its cyclic successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokerPair {
    pub primary: Tile,
    pub secondary: Tile,
}

impl JokerPair {
    pub fn from_indicator(primary: Tile) -> Self {
        Self {
            primary,
            secondary: primary.cyclic_next(),
        }
    }

    pub fn is_joker(&self, tile: Tile) -> bool {
        tile == self.primary || tile == self.secondary
    }
}

/// Sorts a hand jokers-first, then canonical tile order.
pub fn sort_hand(hand: &mut [Tile], jokers: &JokerPair) {
    hand.sort_by_key(|&t| (!jokers.is_joker(t), t));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeldKind {
    Pong,
    Kong,
    Sequence,
}

/// A declared group of 3-4 tiles, kept sorted in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    pub kind: MeldKind,
    pub tiles: Vec<Tile>,
}

impl Meld {
    pub fn new(kind: MeldKind, mut tiles: Vec<Tile>) -> Self {
        tiles.sort();
        Self { kind, tiles }
    }
}
