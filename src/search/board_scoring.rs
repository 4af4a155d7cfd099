//! Static board evaluation.
//!
//! `evaluate` is the single-sided heuristic: for every legal destination of
//! every active piece of a faction it credits the captured value, the
//! destination's overwatch weight, and a fraction of each opposing piece the
//! mover would threaten from there. Search scores leaves through a
//! `BoardScorer`, always from White's (maximizing) point of view.

use crate::game_state::board::Board;
use crate::game_state::chess_types::Faction;
use crate::move_generation::destination_generator::{
    destinations, generate_destinations, DestinationMode,
};

/// Added to (or subtracted from) the leaf score once a side has lost.
pub const WIN_SCORE: i32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalWeights {
    /// Threatened pieces contribute `capture_value / threat_divisor`.
    /// Zero switches the threat component off.
    pub threat_divisor: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self { threat_divisor: 5 }
    }
}

/// Breakdown of a single-sided evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalTerms {
    pub capture: i32,
    pub mobility: i32,
    pub threat: i32,
}

impl EvalTerms {
    #[inline]
    pub fn total(self) -> i32 {
        self.capture + self.mobility + self.threat
    }
}

pub fn evaluate_terms(board: &Board, faction: Faction, weights: &EvalWeights) -> EvalTerms {
    let mut terms = EvalTerms::default();

    for (id, piece) in board.pieces_of(faction) {
        let kind = piece.kind();
        for destination in generate_destinations(board, kind, piece.coordinate(), faction) {
            if let Some((_, occupant)) = board.occupant(destination) {
                if faction.is_opposing(occupant.faction()) {
                    terms.capture += occupant.capture_value();
                }
            }
            if let Some(tile) = board.tile_at(destination) {
                terms.mobility += tile.overwatch_weight();
            }

            if weights.threat_divisor <= 0 {
                continue;
            }
            for reach in destinations(
                board,
                kind,
                destination,
                faction,
                Some(id),
                DestinationMode::Legal,
            ) {
                if let Some((_, target)) = board.occupant(reach) {
                    if faction.is_opposing(target.faction()) {
                        terms.threat += target.capture_value() / weights.threat_divisor;
                    }
                }
            }
        }
    }

    terms
}

/// Single-sided board quality for `faction`.
#[inline]
pub fn evaluate(board: &Board, faction: Faction, weights: &EvalWeights) -> i32 {
    evaluate_terms(board, faction, weights).total()
}

/// `evaluate(White) - evaluate(Zombie)`.
#[inline]
pub fn evaluate_differential(board: &Board, weights: &EvalWeights) -> i32 {
    evaluate(board, Faction::White, weights) - evaluate(board, Faction::Zombie, weights)
}

pub trait BoardScorer: Send + Sync {
    /// Score from White's perspective; higher favors White.
    fn score(&self, board: &Board) -> i32;
}

/// Two-sided law used by default in search.
#[derive(Debug, Clone, Copy, Default)]
pub struct DifferentialScorer {
    pub weights: EvalWeights,
}

impl BoardScorer for DifferentialScorer {
    fn score(&self, board: &Board) -> i32 {
        evaluate_differential(board, &self.weights)
    }
}

/// Only White's own heuristic; Zombie's prospects are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleSidedScorer {
    pub weights: EvalWeights,
}

impl BoardScorer for SingleSidedScorer {
    fn score(&self, board: &Board) -> i32 {
        evaluate(board, Faction::White, &self.weights)
    }
}

/// Active capture value balance, White minus Zombie.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &Board) -> i32 {
        board
            .pieces_in_play()
            .map(|(_, piece)| match piece.faction() {
                Faction::White => piece.capture_value(),
                Faction::Zombie => -piece.capture_value(),
                Faction::Neutral => 0,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        evaluate, evaluate_differential, evaluate_terms, BoardScorer, DifferentialScorer,
        EvalTerms, EvalWeights, MaterialScorer,
    };
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Coordinate, Faction, PieceKind};

    fn c(file: i32, rank: i32) -> Coordinate {
        Coordinate::new(file, rank)
    }

    #[test]
    fn lone_rook_scores_its_mobility() {
        let mut board = Board::new(8, 8).expect("board should build");
        board
            .add_piece(PieceKind::Rook, Faction::White, c(0, 0))
            .expect("rook should place");

        let terms = evaluate_terms(&board, Faction::White, &EvalWeights::default());
        assert_eq!(
            terms,
            EvalTerms {
                capture: 0,
                mobility: 14,
                threat: 0
            }
        );
    }

    #[test]
    fn capture_and_threat_terms_follow_capture_values() {
        // Rook on (0,0), Zombie queen on (0,3), Zombie knight on (5,1).
        let mut board = Board::new(8, 8).expect("board should build");
        board
            .add_piece(PieceKind::Rook, Faction::White, c(0, 0))
            .expect("rook should place");
        board
            .add_piece(PieceKind::Queen, Faction::Zombie, c(0, 3))
            .expect("queen should place");
        board
            .add_piece(PieceKind::Knight, Faction::Zombie, c(5, 1))
            .expect("knight should place");

        let weights = EvalWeights { threat_divisor: 5 };
        let terms = evaluate_terms(&board, Faction::White, &weights);

        // Destinations: (0,1) (0,2) (0,3)x and (1,0)..(7,0).
        assert_eq!(terms.capture, 90);
        assert_eq!(terms.mobility, 10);
        // From (0,1) both the queen (18) and the knight along rank 1 (6),
        // from (0,2) the queen, from (5,0) the knight; nothing else lines up.
        assert_eq!(terms.threat, (18 + 6) + 18 + 6);
        assert_eq!(evaluate(&board, Faction::White, &weights), 90 + 10 + 48);
    }

    #[test]
    fn zero_divisor_disables_threats() {
        let mut board = Board::new(8, 8).expect("board should build");
        board
            .add_piece(PieceKind::Rook, Faction::White, c(0, 0))
            .expect("rook should place");
        board
            .add_piece(PieceKind::Queen, Faction::Zombie, c(0, 3))
            .expect("queen should place");

        let terms = evaluate_terms(&board, Faction::White, &EvalWeights { threat_divisor: 0 });
        assert_eq!(terms.threat, 0);
    }

    #[test]
    fn overwatch_weights_scale_mobility() {
        let mut board = Board::new(3, 1).expect("board should build");
        board
            .add_piece(PieceKind::King, Faction::White, c(0, 0))
            .expect("king should place");
        board
            .set_overwatch_weight(c(1, 0), 7)
            .expect("tile exists");

        assert_eq!(evaluate(&board, Faction::White, &EvalWeights::default()), 7);
    }

    #[test]
    fn mirrored_position_is_balanced() {
        let mut board = Board::new(8, 8).expect("board should build");
        board
            .add_piece(PieceKind::Knight, Faction::White, c(1, 0))
            .expect("knight should place");
        board
            .add_piece(PieceKind::Knight, Faction::Zombie, c(1, 7))
            .expect("knight should place");

        assert_eq!(evaluate_differential(&board, &EvalWeights::default()), 0);
        assert_eq!(DifferentialScorer::default().score(&board), 0);
        assert_eq!(MaterialScorer.score(&board), 0);
    }

    #[test]
    fn neutral_pieces_count_as_targets_but_never_score() {
        let mut board = Board::new(3, 1).expect("board should build");
        board
            .add_piece(PieceKind::Rook, Faction::White, c(0, 0))
            .expect("rook should place");
        board
            .add_piece(PieceKind::Pawn, Faction::Neutral, c(1, 0))
            .expect("neutral should place");

        assert_eq!(evaluate(&board, Faction::White, &EvalWeights::default()), 10 + 1);
        assert_eq!(evaluate(&board, Faction::Neutral, &EvalWeights::default()), 0);
        assert_eq!(MaterialScorer.score(&board), 50);
    }
}
