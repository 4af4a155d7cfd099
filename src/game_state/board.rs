//! Board ownership model.
//!
//! `Board` is the single owner of tiles and pieces. Other subsystems hold
//! `Coordinate`s and `PieceId`s only; every mutation of occupancy goes
//! through the move executor, capture, or snapshot restoration, which keeps
//! "one active piece per tile" intact.

use std::collections::HashMap;

use crate::game_state::board_errors::{BoardError, BoardResult};
use crate::game_state::chess_rules::{default_capture_value, game_status, GameStatus};
use crate::game_state::chess_types::{Coordinate, Faction, PieceId, PieceKind};
use crate::game_state::piece::Piece;
use crate::game_state::tile::Tile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) tiles: HashMap<Coordinate, Tile>,
    pub(crate) pieces: Vec<Piece>,
    pub(crate) in_play: Vec<PieceId>,
}

impl Board {
    /// Rectangular `width x height` grid with every tile at the default weight.
    pub fn new(width: i32, height: i32) -> BoardResult<Self> {
        let area = width
            .checked_mul(height)
            .filter(|_| width > 0 && height > 0)
            .ok_or(BoardError::InvalidDimensions { width, height })?;

        let mut coordinates = Vec::with_capacity(area as usize);
        for file in 0..width {
            for rank in 0..height {
                coordinates.push(Coordinate::new(file, rank));
            }
        }
        Ok(Self::from_tiles(coordinates))
    }

    /// Board over an arbitrary tile set. Missing coordinates are holes.
    pub fn from_tiles<I: IntoIterator<Item = Coordinate>>(coordinates: I) -> Self {
        let tiles: HashMap<Coordinate, Tile> = coordinates
            .into_iter()
            .map(|c| (c, Tile::new(c)))
            .collect();

        let width = tiles.keys().map(|c| c.file + 1).max().unwrap_or(0);
        let height = tiles.keys().map(|c| c.rank + 1).max().unwrap_or(0);

        Self {
            width,
            height,
            tiles,
            pieces: Vec::new(),
            in_play: Vec::new(),
        }
    }

    pub fn set_overwatch_weight(&mut self, coordinate: Coordinate, weight: i32) -> BoardResult<()> {
        let tile = self
            .tiles
            .get_mut(&coordinate)
            .ok_or(BoardError::UnknownTile(coordinate))?;
        tile.overwatch_weight = weight;
        Ok(())
    }

    /// Places a new piece with its kind's default capture value.
    pub fn add_piece(
        &mut self,
        kind: PieceKind,
        faction: Faction,
        coordinate: Coordinate,
    ) -> BoardResult<PieceId> {
        self.add_piece_with_value(kind, faction, coordinate, default_capture_value(kind))
    }

    pub fn add_piece_with_value(
        &mut self,
        kind: PieceKind,
        faction: Faction,
        coordinate: Coordinate,
        capture_value: i32,
    ) -> BoardResult<PieceId> {
        let tile = self
            .tiles
            .get_mut(&coordinate)
            .ok_or(BoardError::UnknownTile(coordinate))?;
        if let Some(occupant) = tile.occupant {
            return Err(BoardError::TileOccupied {
                coordinate,
                occupant,
            });
        }

        let id = PieceId(self.pieces.len());
        tile.occupant = Some(id);
        self.pieces
            .push(Piece::new(kind, faction, capture_value, coordinate));
        self.in_play.push(id);
        Ok(id)
    }

    /// Bounding width (files `0..width`).
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Bounding height (ranks `0..height`).
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn tile_at(&self, coordinate: Coordinate) -> Option<&Tile> {
        self.tiles.get(&coordinate)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Tile coordinates in `(file, rank)` order.
    pub fn tile_coordinates(&self) -> Vec<Coordinate> {
        let mut coordinates: Vec<Coordinate> = self.tiles.keys().copied().collect();
        coordinates.sort();
        coordinates
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    /// Active piece standing on `coordinate`, if any.
    pub fn piece_on(&self, coordinate: Coordinate) -> Option<PieceId> {
        let id = self.tiles.get(&coordinate)?.occupant?;
        self.pieces
            .get(id.index())
            .filter(|p| p.active)
            .map(|_| id)
    }

    /// Like [`Board::piece_on`] but returns the piece alongside its handle.
    pub fn occupant(&self, coordinate: Coordinate) -> Option<(PieceId, &Piece)> {
        let id = self.piece_on(coordinate)?;
        Some((id, &self.pieces[id.index()]))
    }

    /// Handles of active pieces, in play order.
    #[inline]
    pub fn in_play(&self) -> &[PieceId] {
        &self.in_play
    }

    pub fn pieces_in_play(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.in_play
            .iter()
            .map(move |&id| (id, &self.pieces[id.index()]))
    }

    pub fn pieces_of(&self, faction: Faction) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces_in_play()
            .filter(move |(_, p)| p.faction == faction)
    }

    /// Every piece ever placed, captured ones included.
    pub fn all_pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .map(|(i, p)| (PieceId(i), p))
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        game_status(self)
    }

    /// Checks the occupancy invariants: tile back-references and piece
    /// positions agree, captured pieces hold no tile, and no tile carries
    /// more than one active piece.
    pub fn is_consistent(&self) -> bool {
        let mut seen = HashMap::<Coordinate, PieceId>::new();

        for (i, piece) in self.pieces.iter().enumerate() {
            let id = PieceId(i);
            let listed = self.in_play.contains(&id);
            if piece.active != listed {
                return false;
            }
            if !piece.active {
                if piece.tile.is_some() {
                    return false;
                }
                continue;
            }
            if piece.tile != Some(piece.coordinate) {
                return false;
            }
            if seen.insert(piece.coordinate, id).is_some() {
                return false;
            }
            match self.tiles.get(&piece.coordinate) {
                Some(tile) if tile.occupant == Some(id) => {}
                _ => return false,
            }
        }

        self.tiles.values().all(|t| match t.occupant {
            None => true,
            Some(id) => seen.get(&t.coordinate) == Some(&id),
        })
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> BoardResult<&mut Piece> {
        self.pieces
            .get_mut(id.index())
            .ok_or(BoardError::UnknownPiece(id))
    }

    /// Removes an active piece from its tile and from the in-play list.
    pub(crate) fn lift(&mut self, id: PieceId) -> BoardResult<()> {
        let piece = self.piece_mut(id)?;
        let Some(at) = piece.tile.take() else {
            return Err(BoardError::InactivePiece(id));
        };
        piece.active = false;

        if let Some(tile) = self.tiles.get_mut(&at) {
            if tile.occupant == Some(id) {
                tile.occupant = None;
            }
        }
        self.in_play.retain(|&p| p != id);
        Ok(())
    }

    /// Puts a lifted piece back on `coordinate` at the end of the play order.
    /// The destination tile must be empty.
    pub(crate) fn place(&mut self, id: PieceId, coordinate: Coordinate) -> BoardResult<()> {
        let tile = self
            .tiles
            .get_mut(&coordinate)
            .ok_or(BoardError::UnknownTile(coordinate))?;
        if let Some(occupant) = tile.occupant {
            return Err(BoardError::TileOccupied {
                coordinate,
                occupant,
            });
        }
        let piece = self
            .pieces
            .get_mut(id.index())
            .ok_or(BoardError::UnknownPiece(id))?;

        tile.occupant = Some(id);
        piece.coordinate = coordinate;
        piece.tile = Some(coordinate);
        piece.active = true;
        self.in_play.push(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::game_state::board_errors::BoardError;
    use crate::game_state::chess_types::{Coordinate, Faction, PieceKind};

    #[test]
    fn tile_lookup_outside_grid_is_none() {
        let board = Board::new(8, 8).expect("board should build");
        assert!(board.tile_at(Coordinate::new(0, 0)).is_some());
        assert!(board.tile_at(Coordinate::new(7, 7)).is_some());
        assert!(board.tile_at(Coordinate::new(8, 0)).is_none());
        assert!(board.tile_at(Coordinate::new(0, -1)).is_none());
        assert_eq!(board.tile_count(), 64);
    }

    #[test]
    fn piece_on_reports_only_active_occupants() {
        let mut board = Board::new(8, 8).expect("board should build");
        let rook = board
            .add_piece(PieceKind::Rook, Faction::White, Coordinate::new(0, 0))
            .expect("rook should place");

        assert_eq!(board.piece_on(Coordinate::new(0, 0)), Some(rook));
        assert_eq!(board.piece_on(Coordinate::new(1, 0)), None);

        board.capture(rook).expect("capture should succeed");
        assert_eq!(board.piece_on(Coordinate::new(0, 0)), None);
        assert!(board.is_consistent());
    }

    #[test]
    fn placing_onto_an_occupied_tile_is_rejected() {
        let mut board = Board::new(2, 2).expect("board should build");
        let first = board
            .add_piece(PieceKind::Pawn, Faction::White, Coordinate::new(1, 1))
            .expect("pawn should place");
        let err = board
            .add_piece(PieceKind::Pawn, Faction::Zombie, Coordinate::new(1, 1))
            .expect_err("second piece should be rejected");
        assert_eq!(
            err,
            BoardError::TileOccupied {
                coordinate: Coordinate::new(1, 1),
                occupant: first,
            }
        );
    }

    #[test]
    fn irregular_boards_track_bounds_and_holes() {
        let board = Board::from_tiles([
            Coordinate::new(0, 0),
            Coordinate::new(2, 0),
            Coordinate::new(2, 3),
        ]);
        assert_eq!(board.width(), 3);
        assert_eq!(board.height(), 4);
        assert!(board.tile_at(Coordinate::new(1, 0)).is_none());
    }

    #[test]
    fn zero_sized_boards_are_rejected() {
        assert!(matches!(
            Board::new(0, 8),
            Err(BoardError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Board::new(-4, -4),
            Err(BoardError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        assert_eq!(
            Board::new(i32::MAX, 2),
            Err(BoardError::InvalidDimensions {
                width: i32::MAX,
                height: 2
            })
        );
    }
}
