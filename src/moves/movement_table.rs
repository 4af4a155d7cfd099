//! Data table of per-kind movement patterns.
//!
//! One generic walker in `destination_generator` consumes these entries, so
//! movement rules live here exactly once. Offsets are `(file, rank)` steps
//! written from White's point of view; faction-oriented patterns have their
//! rank component flipped for the Zombie side.

use crate::game_state::chess_types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementPattern {
    /// Steps that may land on empty or opposing tiles.
    pub steps: &'static [(i32, i32)],
    /// Steps that are only legal when an opposing piece stands there.
    pub capture_only_steps: &'static [(i32, i32)],
    /// Repeat each step along a ray instead of applying it once.
    pub sliding: bool,
    /// Flip the rank component by the mover's forward direction.
    pub faction_oriented: bool,
}

const ORTHOGONAL: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
const QUEEN_RAYS: [(i32, i32); 8] = [
    (0, 1),
    (0, -1),
    (-1, 0),
    (1, 0),
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];
const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
];
const KING_STEPS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (-1, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
];
const PAWN_ADVANCE: [(i32, i32); 1] = [(0, 1)];
const PAWN_CAPTURES: [(i32, i32); 2] = [(-1, 1), (1, 1)];

/// Indexed by [`PieceKind::index`].
pub const MOVEMENT_TABLE: [MovementPattern; 6] = [
    MovementPattern {
        steps: &PAWN_ADVANCE,
        capture_only_steps: &PAWN_CAPTURES,
        sliding: false,
        faction_oriented: true,
    },
    MovementPattern {
        steps: &KNIGHT_JUMPS,
        capture_only_steps: &[],
        sliding: false,
        faction_oriented: false,
    },
    MovementPattern {
        steps: &DIAGONAL,
        capture_only_steps: &[],
        sliding: true,
        faction_oriented: false,
    },
    MovementPattern {
        steps: &ORTHOGONAL,
        capture_only_steps: &[],
        sliding: true,
        faction_oriented: false,
    },
    MovementPattern {
        steps: &QUEEN_RAYS,
        capture_only_steps: &[],
        sliding: true,
        faction_oriented: false,
    },
    MovementPattern {
        steps: &KING_STEPS,
        capture_only_steps: &[],
        sliding: false,
        faction_oriented: false,
    },
];

#[inline]
pub const fn movement_pattern(kind: PieceKind) -> &'static MovementPattern {
    &MOVEMENT_TABLE[kind.index()]
}

#[cfg(test)]
mod tests {
    use super::movement_pattern;
    use crate::game_state::chess_types::PieceKind;

    #[test]
    fn queen_rays_are_rook_and_bishop_rays_combined() {
        let queen = movement_pattern(PieceKind::Queen);
        let rook = movement_pattern(PieceKind::Rook);
        let bishop = movement_pattern(PieceKind::Bishop);

        assert_eq!(queen.steps.len(), rook.steps.len() + bishop.steps.len());
        for step in rook.steps.iter().chain(bishop.steps) {
            assert!(queen.steps.contains(step), "queen is missing ray {step:?}");
        }
    }

    #[test]
    fn only_pawns_depend_on_faction() {
        for kind in PieceKind::ALL {
            let pattern = movement_pattern(kind);
            assert_eq!(pattern.faction_oriented, kind == PieceKind::Pawn);
            assert_eq!(
                pattern.capture_only_steps.is_empty(),
                kind != PieceKind::Pawn
            );
        }
    }
}
