use std::fmt;
use std::hash::{Hash, Hasher};

use crate::game_state::chess_types::{Coordinate, PieceId};

/// "This piece to this tile". Identity is `(piece, destination)`; `score` is
/// scratch space filled in by engines and is ignored by equality.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub piece: PieceId,
    pub destination: Coordinate,
    pub score: i32,
}

impl Move {
    #[inline]
    pub const fn new(piece: PieceId, destination: Coordinate) -> Self {
        Self {
            piece,
            destination,
            score: 0,
        }
    }

    #[inline]
    pub const fn with_score(mut self, score: i32) -> Self {
        self.score = score;
        self
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.piece == other.piece && self.destination == other.destination
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.piece.hash(state);
        self.destination.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.piece, self.destination)
    }
}
