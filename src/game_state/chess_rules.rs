//! Rule constants and game-over detection for the simplified rule set.
//!
//! No check, castling, en passant, or promotion exists. A side loses when
//! its King is captured (if it ever had one) or when it has no pieces left.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Faction, PieceKind};

/// Standard 8x8 opening, White on ranks 0-1, Zombie on ranks 6-7.
pub const STARTING_LAYOUT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Longest ray a sliding piece walks.
pub const MAX_RAY_STEPS: i32 = 9;

#[inline]
pub const fn default_capture_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 10,
        PieceKind::Knight => 30,
        PieceKind::Bishop => 30,
        PieceKind::Rook => 50,
        PieceKind::Queen => 90,
        PieceKind::King => 900,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Won(Faction),
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Won(_))
    }
}

/// Whether `faction` has been defeated on this board.
pub fn has_lost(board: &Board, faction: Faction) -> bool {
    let mut fielded_king = false;
    let mut active_king = false;
    let mut any_active = false;

    for (_, piece) in board.all_pieces() {
        if piece.faction() != faction {
            continue;
        }
        if piece.is_active() {
            any_active = true;
        }
        if piece.kind() == PieceKind::King {
            fielded_king = true;
            active_king |= piece.is_active();
        }
    }

    !any_active || (fielded_king && !active_king)
}

pub fn game_status(board: &Board) -> GameStatus {
    // Both sides are checked so a double loss (impossible through normal
    // play) still resolves deterministically in White's disfavor.
    if has_lost(board, Faction::White) {
        return GameStatus::Won(Faction::Zombie);
    }
    if has_lost(board, Faction::Zombie) {
        return GameStatus::Won(Faction::White);
    }
    GameStatus::Ongoing
}
