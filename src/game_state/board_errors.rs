//! Error types for board setup, move execution, snapshot restoration, and
//! move-tree exploration.

use crate::game_state::chess_types::{Coordinate, PieceId};

/// Errors raised by board mutation and setup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("no tile at {0}")]
    UnknownTile(Coordinate),

    #[error("no piece with handle {0}")]
    UnknownPiece(PieceId),

    #[error("piece {0} has been captured")]
    InactivePiece(PieceId),

    #[error("tile {coordinate} is already occupied by piece {occupant}")]
    TileOccupied {
        coordinate: Coordinate,
        occupant: PieceId,
    },

    #[error("invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
}

pub type BoardResult<T> = Result<T, BoardError>;

/// Snapshot slot misuse. Loading requires a prior save into the same slot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot slot {slot} is out of range (store has {capacity} slots)")]
    SlotOutOfRange { slot: usize, capacity: usize },

    #[error("snapshot slot {0} has not been saved")]
    EmptySlot(usize),

    #[error("snapshot slot {slot} does not match this board: {source}")]
    Stale { slot: usize, source: BoardError },
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Failures while exploring the move tree (search, perft).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("search deadline exceeded")]
    DeadlineExceeded,

    #[error("search worker failed: {0}")]
    Worker(String),
}

pub type ExploreResult<T> = Result<T, SearchError>;
