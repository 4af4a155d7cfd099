//! Legal-destination and overwatch generation.
//!
//! Walks the movement table entry for a piece kind from a starting tile.
//! Rays stop at missing tiles and at the first occupied tile; an opposing
//! occupant is included as a capture, an own-faction occupant is not (in
//! `Legal` mode). The same walker serves overwatch queries, which differ
//! only in counting own-faction occupants as covered.

use tracing::warn;

use crate::game_state::board::Board;
use crate::game_state::chess_rules::MAX_RAY_STEPS;
use crate::game_state::chess_types::{Coordinate, Faction, PieceId, PieceKind};
use crate::moves::movement_table::movement_pattern;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DestinationMode {
    /// Tiles the piece may move to.
    #[default]
    Legal,
    /// Tiles the piece controls, own-occupied tiles included.
    Overwatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Landing {
    OffBoard,
    Empty,
    Own,
    Opposing,
}

#[inline]
fn landing(board: &Board, at: Coordinate, mover: Faction, ignore: Option<PieceId>) -> Landing {
    if board.tile_at(at).is_none() {
        return Landing::OffBoard;
    }
    match board.occupant(at) {
        Some((id, _)) if Some(id) == ignore => Landing::Empty,
        Some((_, piece)) if mover.is_opposing(piece.faction()) => Landing::Opposing,
        Some(_) => Landing::Own,
        None => Landing::Empty,
    }
}

/// Destinations of a `kind` piece of `mover` standing on `start`.
///
/// `ignore`, when set, names a piece treated as absent for occupancy checks,
/// which lets callers ask "what would this piece reach from over there".
/// The result is in generation order (per direction, outward along rays)
/// and only names existing tiles.
pub fn destinations(
    board: &Board,
    kind: PieceKind,
    start: Coordinate,
    mover: Faction,
    ignore: Option<PieceId>,
    mode: DestinationMode,
) -> Vec<Coordinate> {
    let pattern = movement_pattern(kind);
    let rank_sign = if pattern.faction_oriented {
        match mover.pawn_forward() {
            Some(sign) => sign,
            None => return Vec::new(),
        }
    } else {
        1
    };
    let reach = if pattern.sliding { MAX_RAY_STEPS } else { 1 };

    let mut out = Vec::with_capacity(pattern.steps.len() * reach as usize);

    for &(file_step, rank_step) in pattern.steps {
        let rank_step = rank_step * rank_sign;
        for distance in 1..=reach {
            let at = start.offset(file_step * distance, rank_step * distance);
            match (landing(board, at, mover, ignore), mode) {
                (Landing::OffBoard, _) => break,
                (Landing::Empty, _) => out.push(at),
                (Landing::Opposing, _) | (Landing::Own, DestinationMode::Overwatch) => {
                    out.push(at);
                    break;
                }
                (Landing::Own, DestinationMode::Legal) => break,
            }
        }
    }

    for &(file_step, rank_step) in pattern.capture_only_steps {
        let at = start.offset(file_step, rank_step * rank_sign);
        let include = match (landing(board, at, mover, ignore), mode) {
            (Landing::Opposing, _) => true,
            (Landing::Own, DestinationMode::Overwatch) => true,
            _ => false,
        };
        if include {
            out.push(at);
        }
    }

    out
}

/// Legal destinations, nothing ignored.
#[inline]
pub fn generate_destinations(
    board: &Board,
    kind: PieceKind,
    start: Coordinate,
    mover: Faction,
) -> Vec<Coordinate> {
    destinations(board, kind, start, mover, None, DestinationMode::Legal)
}

/// Legal destinations of an active piece from where it stands. Captured or
/// unknown pieces have none.
pub fn piece_destinations(board: &Board, id: PieceId) -> Vec<Coordinate> {
    match board.piece(id) {
        Some(piece) if piece.is_active() => generate_destinations(
            board,
            piece.kind(),
            piece.coordinate(),
            piece.faction(),
        ),
        _ => Vec::new(),
    }
}

/// Entry point for callers holding a raw piece letter (for example an input
/// layer). Unknown letters are reported and produce no destinations.
pub fn destinations_for_symbol(
    board: &Board,
    symbol: char,
    start: Coordinate,
    mover: Faction,
) -> Vec<Coordinate> {
    match PieceKind::from_symbol(symbol) {
        Some(kind) => generate_destinations(board, kind, start, mover),
        None => {
            warn!(%symbol, %start, "destinations requested for unknown piece type");
            Vec::new()
        }
    }
}
