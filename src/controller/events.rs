//! Notifications flowing into and out of the turn controller.

use crate::game_state::chess_rules::GameStatus;
use crate::game_state::chess_types::{Coordinate, Faction, PieceId};
use crate::moves::chess_move::Move;

/// A tile was clicked (or typed) by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileActivated {
    pub coordinate: Coordinate,
}

impl From<Coordinate> for TileActivated {
    fn from(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// A piece was selected; `highlights` are its legal destinations.
    PieceSelected {
        piece: PieceId,
        highlights: Vec<Coordinate>,
    },
    /// Highlights of the previous selection should be removed.
    SelectionCleared,
    MovePlayed {
        faction: Faction,
        mv: Move,
        from: Coordinate,
        captured: Option<PieceId>,
    },
    /// `faction` had nothing to play.
    NoLegalMoves(Faction),
    GameOver(GameStatus),
    OverlayToggled(bool),
    StateSaved(usize),
    StateLoaded(usize),
}
