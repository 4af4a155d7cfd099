//! One-ply greedy engine.
//!
//! Each candidate is scored by what it captures plus the overwatch the moved
//! piece would hold from its destination. Equal scores are broken at random.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::engines::engine_trait::{parse_option, Engine, EngineOutput, SearchParams};
use crate::game_state::board::Board;
use crate::game_state::chess_types::Faction;
use crate::move_generation::destination_generator::{destinations, DestinationMode};
use crate::move_generation::move_list::generate_moves;
use crate::moves::chess_move::Move;

pub struct GreedyEngine {
    seed: Option<u64>,
    rng: StdRng,
}

impl GreedyEngine {
    pub fn new() -> Self {
        Self::with_seed(None)
    }

    pub fn with_seed(seed: Option<u64>) -> Self {
        Self {
            seed,
            rng: seeded_rng(seed),
        }
    }

    /// Capture gain plus the overwatch sum of the mover from `mv.destination`.
    pub fn score_move(board: &Board, mv: &Move) -> i32 {
        let Some(piece) = board.piece(mv.piece) else {
            return i32::MIN;
        };

        let capture = board
            .occupant(mv.destination)
            .filter(|(_, target)| piece.faction().is_opposing(target.faction()))
            .map_or(0, |(_, target)| target.capture_value());

        let overwatch: i32 = destinations(
            board,
            piece.kind(),
            mv.destination,
            piece.faction(),
            Some(mv.piece),
            DestinationMode::Overwatch,
        )
        .into_iter()
        .filter_map(|at| board.tile_at(at))
        .map(|tile| tile.overwatch_weight())
        .sum();

        capture + overwatch
    }
}

impl Default for GreedyEngine {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(|| rand::rng().random()))
}

impl Engine for GreedyEngine {
    fn name(&self) -> &str {
        "Zombie Chess Greedy"
    }

    fn new_game(&mut self) {
        self.rng = seeded_rng(self.seed);
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        if name.eq_ignore_ascii_case("Seed") {
            self.seed = Some(parse_option(name, value)?);
            self.rng = seeded_rng(self.seed);
            return Ok(());
        }
        Err(format!("unknown option '{name}'"))
    }

    fn choose_move(
        &mut self,
        board: &mut Board,
        faction: Faction,
        params: &SearchParams,
    ) -> Result<EngineOutput, String> {
        let legal_moves = generate_moves(board, faction);

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string greedy_engine legal_moves {}",
            legal_moves.len()
        ));
        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("info string greedy_engine requested_depth {depth}"));
        }

        if legal_moves.is_empty() {
            return Ok(out);
        }

        let scored: Vec<Move> = legal_moves
            .iter()
            .map(|mv| mv.with_score(Self::score_move(board, mv)))
            .collect();

        let best_value = scored.iter().map(|mv| mv.score).max().unwrap_or(i32::MIN);
        let best_moves: Vec<Move> = scored
            .iter()
            .copied()
            .filter(|mv| mv.score == best_value)
            .collect();

        let picked = best_moves
            .as_slice()
            .choose(&mut self.rng)
            .ok_or("failed to choose greedy best move")?;

        debug!(
            %faction,
            score = best_value,
            ties = best_moves.len(),
            "greedy move chosen"
        );
        out.info_lines
            .push(format!("info string greedy_engine score {best_value}"));
        out.best_move = Some(*picked);
        out.root_moves = scored;
        Ok(out)
    }
}
