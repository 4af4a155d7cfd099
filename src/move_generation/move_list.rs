//! Whole-side move enumeration.

use crate::game_state::board::Board;
use crate::game_state::chess_types::Faction;
use crate::move_generation::destination_generator::generate_destinations;
use crate::moves::chess_move::Move;

/// Every legal move of `faction`: each active piece, in play order, times
/// its destinations in generation order.
pub fn generate_moves(board: &Board, faction: Faction) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    for (id, piece) in board.pieces_of(faction) {
        for destination in
            generate_destinations(board, piece.kind(), piece.coordinate(), faction)
        {
            out.push(Move::new(id, destination));
        }
    }
    out
}

pub fn has_legal_moves(board: &Board, faction: Faction) -> bool {
    board.pieces_of(faction).any(|(_, piece)| {
        !generate_destinations(board, piece.kind(), piece.coordinate(), faction).is_empty()
    })
}
