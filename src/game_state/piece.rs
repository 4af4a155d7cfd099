use crate::game_state::chess_types::{Coordinate, Faction, PieceKind};

/// A piece in the arena. Identity (`kind`, `faction`, `capture_value`) is
/// fixed at setup; position and activity are mutated only by the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub(crate) kind: PieceKind,
    pub(crate) faction: Faction,
    pub(crate) capture_value: i32,
    pub(crate) coordinate: Coordinate,
    pub(crate) tile: Option<Coordinate>,
    pub(crate) active: bool,
}

impl Piece {
    pub(crate) fn new(
        kind: PieceKind,
        faction: Faction,
        capture_value: i32,
        coordinate: Coordinate,
    ) -> Self {
        Self {
            kind,
            faction,
            capture_value,
            coordinate,
            tile: Some(coordinate),
            active: true,
        }
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn faction(&self) -> Faction {
        self.faction
    }

    #[inline]
    pub fn capture_value(&self) -> i32 {
        self.capture_value
    }

    /// Current coordinate while active, last known coordinate once captured.
    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Occupied tile; `None` once captured.
    #[inline]
    pub fn tile(&self) -> Option<Coordinate> {
        self.tile
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }
}
