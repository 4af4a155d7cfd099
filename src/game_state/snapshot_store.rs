//! Slot-indexed board checkpoints.
//!
//! A snapshot records every active piece and the tile it stands on, in play
//! order. Restoring lifts everything currently in play and re-places the
//! recorded pieces, so pieces captured after the save come back while pieces
//! captured before it stay off the board.
//!
//! Callers must `save` a slot before `load`ing it. Search gives every
//! recursion level its own slot so nested save/load pairs never alias.

use std::collections::HashSet;

use crate::game_state::board::Board;
use crate::game_state::board_errors::{BoardError, SnapshotError, SnapshotResult};
use crate::game_state::chess_types::{Coordinate, PieceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedPiece {
    pub piece: PieceId,
    pub tile: Coordinate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: Vec<SavedPiece>,
}

impl Snapshot {
    pub fn entries(&self) -> &[SavedPiece] {
        &self.entries
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    slots: Vec<Option<Snapshot>>,
}

impl SnapshotStore {
    /// Store with `capacity` pre-allocated, unsaved slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_saved(&self, slot: usize) -> bool {
        matches!(self.slots.get(slot), Some(Some(_)))
    }

    pub fn snapshot(&self, slot: usize) -> Option<&Snapshot> {
        self.slots.get(slot)?.as_ref()
    }

    /// Forgets a slot so a later `load` reports it as unsaved.
    pub fn clear(&mut self, slot: usize) -> SnapshotResult<()> {
        let capacity = self.capacity();
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(SnapshotError::SlotOutOfRange { slot, capacity })?;
        *entry = None;
        Ok(())
    }

    /// Records every active piece into `slot`, overwriting its contents.
    pub fn save(&mut self, board: &Board, slot: usize) -> SnapshotResult<()> {
        let capacity = self.capacity();
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(SnapshotError::SlotOutOfRange { slot, capacity })?;

        let snapshot = entry.get_or_insert_with(Snapshot::default);
        snapshot.entries.clear();
        snapshot
            .entries
            .extend(board.pieces_in_play().filter_map(|(id, piece)| {
                piece.tile().map(|tile| SavedPiece { piece: id, tile })
            }));
        Ok(())
    }

    /// Restores the board to the state recorded in `slot`. The slot keeps its
    /// contents. The board is left untouched if the snapshot does not fit it.
    pub fn load(&self, board: &mut Board, slot: usize) -> SnapshotResult<()> {
        let capacity = self.capacity();
        let snapshot = self
            .slots
            .get(slot)
            .ok_or(SnapshotError::SlotOutOfRange { slot, capacity })?
            .as_ref()
            .ok_or(SnapshotError::EmptySlot(slot))?;

        validate(board, snapshot).map_err(|source| SnapshotError::Stale { slot, source })?;

        let lifted: Vec<PieceId> = board.in_play().to_vec();
        for id in lifted {
            board
                .lift(id)
                .map_err(|source| SnapshotError::Stale { slot, source })?;
        }
        for saved in &snapshot.entries {
            board
                .place(saved.piece, saved.tile)
                .map_err(|source| SnapshotError::Stale { slot, source })?;
        }
        Ok(())
    }
}

fn validate(board: &Board, snapshot: &Snapshot) -> Result<(), BoardError> {
    let mut claimed = HashSet::with_capacity(snapshot.entries.len());
    for saved in &snapshot.entries {
        if board.piece(saved.piece).is_none() {
            return Err(BoardError::UnknownPiece(saved.piece));
        }
        if board.tile_at(saved.tile).is_none() {
            return Err(BoardError::UnknownTile(saved.tile));
        }
        if !claimed.insert(saved.tile) {
            return Err(BoardError::TileOccupied {
                coordinate: saved.tile,
                occupant: saved.piece,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::SnapshotStore;
    use crate::game_state::board::Board;
    use crate::game_state::board_errors::SnapshotError;
    use crate::game_state::chess_types::{Coordinate, Faction, PieceKind};
    use crate::moves::chess_move::Move;

    fn skirmish() -> Board {
        let mut board = Board::new(8, 8).expect("board should build");
        board
            .add_piece(PieceKind::Rook, Faction::White, Coordinate::new(0, 0))
            .expect("rook should place");
        board
            .add_piece(PieceKind::Pawn, Faction::Zombie, Coordinate::new(0, 3))
            .expect("pawn should place");
        board
            .add_piece(PieceKind::Knight, Faction::Zombie, Coordinate::new(5, 5))
            .expect("knight should place");
        board
    }

    #[test]
    fn save_then_load_is_a_no_op() {
        let mut board = skirmish();
        let before = board.clone();
        let mut store = SnapshotStore::new(4);

        store.save(&board, 2).expect("save should succeed");
        store.load(&mut board, 2).expect("load should succeed");

        assert_eq!(board, before);
    }

    #[test]
    fn load_revives_pieces_captured_after_save() {
        let mut board = skirmish();
        let before = board.clone();
        let mut store = SnapshotStore::new(1);
        store.save(&board, 0).expect("save should succeed");

        let rook = board.piece_on(Coordinate::new(0, 0)).expect("rook present");
        let pawn = board.piece_on(Coordinate::new(0, 3)).expect("pawn present");
        let captured = board
            .execute_move(&Move::new(rook, Coordinate::new(0, 3)), true)
            .expect("move should execute");
        assert_eq!(captured, Some(pawn));
        assert!(!board.piece(pawn).expect("pawn exists").is_active());

        store.load(&mut board, 0).expect("load should succeed");
        assert_eq!(board, before);
        assert!(board.piece(pawn).expect("pawn exists").is_active());
        assert!(board.is_consistent());
    }

    #[test]
    fn pieces_captured_before_save_stay_captured() {
        let mut board = skirmish();
        let knight = board.piece_on(Coordinate::new(5, 5)).expect("knight present");
        board.capture(knight).expect("capture should succeed");

        let mut store = SnapshotStore::new(1);
        store.save(&board, 0).expect("save should succeed");
        let rook = board.piece_on(Coordinate::new(0, 0)).expect("rook present");
        board
            .execute_move(&Move::new(rook, Coordinate::new(0, 2)), true)
            .expect("move should execute");
        store.load(&mut board, 0).expect("load should succeed");

        assert!(!board.piece(knight).expect("knight exists").is_active());
        assert_eq!(board.piece_on(Coordinate::new(0, 0)), Some(rook));
        assert!(board.is_consistent());
    }

    #[test]
    fn loading_does_not_consume_the_slot() {
        let mut board = skirmish();
        let before = board.clone();
        let mut store = SnapshotStore::new(1);
        store.save(&board, 0).expect("save should succeed");

        let rook = board.piece_on(Coordinate::new(0, 0)).expect("rook present");
        for dest in [Coordinate::new(1, 0), Coordinate::new(0, 2)] {
            board
                .execute_move(&Move::new(rook, dest), true)
                .expect("move should execute");
            store.load(&mut board, 0).expect("load should succeed");
            assert_eq!(board, before);
        }
        assert!(store.is_saved(0));
    }

    #[test]
    fn unsaved_and_out_of_range_slots_are_errors() {
        let mut board = skirmish();
        let before = board.clone();
        let store = SnapshotStore::new(2);

        assert_eq!(
            store.load(&mut board, 1),
            Err(SnapshotError::EmptySlot(1))
        );
        assert_eq!(
            store.load(&mut board, 7),
            Err(SnapshotError::SlotOutOfRange {
                slot: 7,
                capacity: 2
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn snapshot_from_a_larger_board_is_rejected_without_mutation() {
        let big = skirmish();
        let mut store = SnapshotStore::new(1);
        store.save(&big, 0).expect("save should succeed");

        let mut small = Board::new(2, 2).expect("board should build");
        small
            .add_piece(PieceKind::King, Faction::White, Coordinate::new(0, 0))
            .expect("king should place");
        let before = small.clone();

        let err = store.load(&mut small, 0).expect_err("stale slot should fail");
        assert!(matches!(err, SnapshotError::Stale { slot: 0, .. }));
        assert_eq!(small, before);
    }
}
