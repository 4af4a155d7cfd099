//! Move execution and capture.
//!
//! The only path that relocates pieces during play. Interactive turns and
//! speculative search steps both go through `Board::execute_move`.

use tracing::debug;

use crate::game_state::board::Board;
use crate::game_state::board_errors::{BoardError, BoardResult};
use crate::game_state::chess_types::PieceId;
use crate::moves::chess_move::Move;

impl Board {
    /// Moves `mv.piece` onto `mv.destination`.
    ///
    /// With `capture_enabled`, an active piece on the destination is captured
    /// first and its handle returned. Without it, an occupied destination is
    /// rejected. No legality check is made here; callers pick destinations
    /// from the generator.
    pub fn execute_move(&mut self, mv: &Move, capture_enabled: bool) -> BoardResult<Option<PieceId>> {
        let piece = self
            .piece(mv.piece)
            .ok_or(BoardError::UnknownPiece(mv.piece))?;
        if !piece.is_active() {
            return Err(BoardError::InactivePiece(mv.piece));
        }
        let from = piece.coordinate();
        let to = mv.destination;

        if self.tile_at(to).is_none() {
            return Err(BoardError::UnknownTile(to));
        }
        if from == to {
            return Ok(None);
        }

        let captured = match self.piece_on(to) {
            Some(occupant) if capture_enabled => {
                self.capture(occupant)?;
                Some(occupant)
            }
            Some(occupant) => {
                return Err(BoardError::TileOccupied {
                    coordinate: to,
                    occupant,
                })
            }
            None => None,
        };

        if let Some(tile) = self.tiles.get_mut(&from) {
            if tile.occupant == Some(mv.piece) {
                tile.occupant = None;
            }
        }
        if let Some(tile) = self.tiles.get_mut(&to) {
            tile.occupant = Some(mv.piece);
        }
        let piece = self.piece_mut(mv.piece)?;
        piece.coordinate = to;
        piece.tile = Some(to);

        Ok(captured)
    }

    /// Takes an active piece off the board. The piece keeps its identity and
    /// last coordinate so a snapshot restore can bring it back.
    pub fn capture(&mut self, id: PieceId) -> BoardResult<()> {
        self.lift(id)?;
        if let Some(piece) = self.piece(id) {
            debug!(
                piece = %id,
                kind = %piece.kind(),
                faction = %piece.faction(),
                at = %piece.coordinate(),
                "piece captured"
            );
        }
        Ok(())
    }
}
