//! Minimax engine over the differential evaluator.
//!
//! Root scores are exact, so equally scored root moves are genuinely
//! interchangeable; the engine picks among them with its own RNG.

use std::time::Duration;

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use tracing::info;

use crate::engines::engine_greedy::seeded_rng;
use crate::engines::engine_trait::{parse_flag, parse_option, Engine, EngineOutput, SearchParams};
use crate::game_state::board::Board;
use crate::game_state::chess_types::Faction;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{DifferentialScorer, EvalWeights};
use crate::search::minimax::{minimax_search, RootOutcome, SearchConfig};

pub struct MinimaxEngine {
    config: SearchConfig,
    weights: EvalWeights,
    seed: Option<u64>,
    rng: StdRng,
}

impl MinimaxEngine {
    pub fn new(default_depth: u8) -> Self {
        Self::with_config(SearchConfig::with_depth(default_depth), None)
    }

    pub fn with_config(config: SearchConfig, seed: Option<u64>) -> Self {
        Self {
            config,
            weights: EvalWeights::default(),
            seed,
            rng: seeded_rng(seed),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    fn pick_among_ties(&mut self, faction: Faction, best: Move, scored: &[Move]) -> Move {
        let ties: Vec<Move> = scored
            .iter()
            .copied()
            .filter(|mv| mv.score == best.score)
            .collect();
        if ties.len() < 2 || faction == Faction::Neutral {
            return best;
        }
        ties.as_slice().choose(&mut self.rng).copied().unwrap_or(best)
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default().max_depth)
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Zombie Chess Minimax"
    }

    fn new_game(&mut self) {
        self.rng = seeded_rng(self.seed);
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        if name.eq_ignore_ascii_case("Depth") {
            self.config.max_depth = parse_option(name, value)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("ThreatDivisor") {
            let divisor: i32 = parse_option(name, value)?;
            self.weights.threat_divisor = divisor.max(0);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("AlphaBeta") {
            self.config.alpha_beta = parse_flag(name, value)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Threads") {
            let threads: usize = parse_option(name, value)?;
            self.config.threads = threads.max(1);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("MoveTimeMs") {
            let ms: u64 = parse_option(name, value)?;
            self.config.move_time = (ms > 0).then(|| Duration::from_millis(ms));
            return Ok(());
        }
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
        let mut config = self.config;
        if let Some(depth) = params.depth {
            config.max_depth = depth;
        }
        if let Some(ms) = params.movetime_ms {
            config.move_time = Some(Duration::from_millis(ms));
        }

        let scorer = DifferentialScorer {
            weights: self.weights,
        };
        let result =
            minimax_search(board, faction, &scorer, &config).map_err(|e| e.to_string())?;

        let mut out = EngineOutput::default();
        match result.outcome {
            RootOutcome::NoLegalMoves => {
                out.info_lines
                    .push("info string minimax_engine no_legal_moves".to_owned());
            }
            RootOutcome::GameOver(winner) => {
                out.info_lines
                    .push(format!("info string minimax_engine game_over winner {winner}"));
            }
            RootOutcome::Evaluated | RootOutcome::Move => {}
        }

        out.info_lines.push(format!(
            "info depth {} score {} nodes {}",
            result.reached_depth, result.best_score, result.nodes
        ));
        if result.timed_out {
            out.info_lines
                .push("info string minimax_engine deadline_reached".to_owned());
        }

        out.best_move = result
            .best_move
            .map(|best| self.pick_among_ties(faction, best, &result.root_moves));

        if let Some(mv) = out.best_move {
            info!(
                %faction,
                piece = %mv.piece,
                to = %mv.destination,
                score = mv.score,
                depth = result.reached_depth,
                nodes = result.nodes,
                "engine move chosen"
            );
        }
        out.root_moves = result.root_moves;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::MinimaxEngine;
    use crate::engines::engine_greedy::GreedyEngine;
    use crate::engines::engine_trait::{Engine, SearchParams};
    use crate::game_state::chess_rules::STARTING_LAYOUT;
    use crate::game_state::chess_types::{Coordinate, Faction};
    use crate::search::minimax::SearchConfig;
    use crate::utils::layout_parser::parse_layout;

    #[test]
    fn options_update_the_search_config() {
        let mut engine = MinimaxEngine::default();
        engine.set_option("Depth", "3").expect("depth should parse");
        engine.set_option("alphabeta", "off").expect("flag should parse");
        engine.set_option("Threads", "0").expect("threads should parse");
        engine.set_option("MoveTimeMs", "250").expect("time should parse");
        engine.set_option("ThreatDivisor", "0").expect("divisor should parse");

        assert_eq!(engine.config().max_depth, 3);
        assert!(!engine.config().alpha_beta);
        assert_eq!(engine.config().threads, 1);
        assert_eq!(engine.config().move_time, Some(Duration::from_millis(250)));
        assert_eq!(engine.weights().threat_divisor, 0);

        assert!(engine.set_option("Depth", "deep").is_err());
        assert!(engine.set_option("AlphaBeta", "maybe").is_err());
        assert!(engine.set_option("Ponder", "true").is_err());
    }

    #[test]
    fn zombie_engine_takes_the_king() {
        let mut board = parse_layout("4k3/8/8/8/8/8/8/K6q").expect("layout should parse");
        let before = board.clone();
        let mut engine = MinimaxEngine::with_config(SearchConfig::with_depth(2), Some(5));

        let out = engine
            .choose_move(&mut board, Faction::Zombie, &SearchParams::default())
            .expect("engine should run");

        let best = out.best_move.expect("a move exists");
        assert_eq!(best.destination, Coordinate::new(0, 0));
        assert!(!out.root_moves.is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn picked_move_always_carries_the_best_score() {
        let mut board = parse_layout(STARTING_LAYOUT).expect("layout should parse");
        let mut engine = MinimaxEngine::with_config(SearchConfig::with_depth(1), Some(11));

        for faction in Faction::PLAYERS {
            let out = engine
                .choose_move(&mut board, faction, &SearchParams::default())
                .expect("engine should run");
            let best = out.best_move.expect("a move exists");
            let target = if faction == Faction::White {
                out.root_moves.iter().map(|m| m.score).max()
            } else {
                out.root_moves.iter().map(|m| m.score).min()
            };
            assert_eq!(Some(best.score), target);
        }
    }

    #[test]
    fn params_override_the_configured_depth() {
        let mut board = parse_layout(STARTING_LAYOUT).expect("layout should parse");
        let mut engine = MinimaxEngine::new(3);

        let out = engine
            .choose_move(
                &mut board,
                Faction::White,
                &SearchParams {
                    depth: Some(0),
                    movetime_ms: None,
                },
            )
            .expect("engine should run");
        assert!(out.best_move.is_none());
        assert!(out.info_lines.iter().any(|l| l.starts_with("info depth 0")));
    }

    #[test]
    fn finished_games_report_the_winner() {
        let mut board = parse_layout("7r").expect("layout should parse");
        let out = MinimaxEngine::default()
            .choose_move(&mut board, Faction::White, &SearchParams::default())
            .expect("engine should run");
        assert!(out.best_move.is_none());
        assert!(out
            .info_lines
            .iter()
            .any(|l| l.contains("game_over winner Zombie")));
    }

    #[test]
    fn seeded_playout_keeps_the_board_consistent() {
        let mut board = parse_layout(STARTING_LAYOUT).expect("layout should parse");
        let mut threaded = MinimaxEngine::with_config(
            SearchConfig {
                threads: 3,
                ..SearchConfig::with_depth(2)
            },
            Some(11),
        );
        let mut timed = MinimaxEngine::with_config(
            SearchConfig {
                move_time: Some(Duration::from_millis(5)),
                ..SearchConfig::with_depth(3)
            },
            Some(5),
        );
        let mut greedy = GreedyEngine::with_seed(Some(3));

        let mut faction = Faction::White;
        for ply in 0..60 {
            if board.status().is_over() {
                break;
            }
            let engine: &mut dyn Engine = match (faction, ply % 4) {
                (Faction::White, 0) => &mut timed,
                (Faction::White, _) => &mut threaded,
                _ => &mut greedy,
            };

            let before = board.clone();
            let out = engine
                .choose_move(&mut board, faction, &SearchParams::default())
                .expect("engine should run");
            assert_eq!(board, before, "search changed the board at ply {ply}");

            let Some(mv) = out.best_move else {
                break;
            };
            board.execute_move(&mv, true).expect("chosen move should execute");
            assert!(board.is_consistent(), "inconsistent board after ply {ply}");
            faction = faction.opponent().expect("players alternate");
        }
    }
}
