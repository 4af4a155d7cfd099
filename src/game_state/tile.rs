use crate::game_state::chess_types::{Coordinate, PieceId};

pub const DEFAULT_OVERWATCH_WEIGHT: i32 = 1;

/// A board square. Created once at board construction and never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub(crate) coordinate: Coordinate,
    pub(crate) overwatch_weight: i32,
    pub(crate) occupant: Option<PieceId>,
}

impl Tile {
    pub(crate) fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            overwatch_weight: DEFAULT_OVERWATCH_WEIGHT,
            occupant: None,
        }
    }

    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Mobility weight credited to a piece that can reach this tile.
    #[inline]
    pub fn overwatch_weight(&self) -> i32 {
        self.overwatch_weight
    }

    /// Back-reference to the active piece standing here.
    #[inline]
    pub fn occupant(&self) -> Option<PieceId> {
        self.occupant
    }
}
