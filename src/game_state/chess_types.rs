//! Core value types shared by the board model, move generation, and search.
//!
//! Coordinates double as tile identities; pieces are addressed through
//! stable arena handles owned by the board.

use std::fmt;

/// Integer `(file, rank)` pair. Unique key into the board's tile mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub file: i32,
    pub rank: i32,
}

impl Coordinate {
    #[inline]
    pub const fn new(file: i32, rank: i32) -> Self {
        Self { file, rank }
    }

    #[inline]
    pub const fn offset(self, file_step: i32, rank_step: i32) -> Self {
        Self {
            file: self.file + file_step,
            rank: self.rank + rank_step,
        }
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((file, rank): (i32, i32)) -> Self {
        Self::new(file, rank)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.file, self.rank)
    }
}

/// Side a piece belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    /// Human-controlled side; maximizing side in search.
    White,
    /// Automated opponent.
    Zombie,
    /// Non-participating obstacles. Never moves, can be captured by anyone.
    Neutral,
}

impl Faction {
    pub const PLAYERS: [Faction; 2] = [Faction::White, Faction::Zombie];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Faction::White => 0,
            Faction::Zombie => 1,
            Faction::Neutral => 2,
        }
    }

    /// The side that moves after this one. Neutral takes no turns.
    #[inline]
    pub const fn opponent(self) -> Option<Self> {
        match self {
            Faction::White => Some(Faction::Zombie),
            Faction::Zombie => Some(Faction::White),
            Faction::Neutral => None,
        }
    }

    /// Whether a piece of `other` may be captured by a mover of this faction.
    #[inline]
    pub fn is_opposing(self, other: Faction) -> bool {
        self != other
    }

    /// Rank step of a pawn's forward move.
    #[inline]
    pub const fn pawn_forward(self) -> Option<i32> {
        match self {
            Faction::White => Some(1),
            Faction::Zombie => Some(-1),
            Faction::Neutral => None,
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Faction::White => "White",
            Faction::Zombie => "Zombie",
            Faction::Neutral => "Neutral",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Case-insensitive piece letter (`p n b r q k`).
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Lowercase piece letter.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        f.write_str(name)
    }
}

/// Stable handle into the board's piece arena. Survives capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub usize);

impl PieceId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
