//! Depth-limited minimax over the shared board.
//!
//! Moves are tried in place: each child saves the board into the snapshot
//! slot of its ply, executes the move, recurses, and restores the slot
//! before its score (or error) is propagated. White maximizes, Zombie
//! minimizes, and every leaf is scored from White's point of view.
//!
//! Root moves are always searched with a full window so each carries an
//! exact score; alpha-beta cutoffs, when enabled, apply below the root.

use std::time::Duration;

use tracing::debug;

use crate::game_state::board::Board;
use crate::game_state::board_errors::{ExploreResult, SearchError};
use crate::game_state::chess_rules::GameStatus;
use crate::game_state::chess_types::Faction;
use crate::game_state::snapshot_store::SnapshotStore;
use crate::move_generation::move_list::generate_moves;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{BoardScorer, DifferentialScorer, WIN_SCORE};
use crate::search::threading::parallel_root_scores;
use crate::search::time_management::SearchDeadline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    /// Prune below the root. Does not change any root score.
    pub alpha_beta: bool,
    /// Wall-clock budget; enables iterative deepening.
    pub move_time: Option<Duration>,
    /// Root-split worker count; 1 searches on the caller's board.
    pub threads: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            alpha_beta: true,
            move_time: None,
            threads: 1,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }
}

/// How the root position was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootOutcome {
    /// Depth 0: the board was scored, nothing searched.
    #[default]
    Evaluated,
    /// A best move was found.
    Move,
    /// The side to move has nothing to play.
    NoLegalMoves,
    /// The game was already decided.
    GameOver(Faction),
}

#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    /// Every root move with its exact score, in generation order.
    pub root_moves: Vec<Move>,
    pub outcome: RootOutcome,
    pub timed_out: bool,
}

/// Per-search state: its own snapshot slots, one per ply.
pub(crate) struct Searcher<'a, S: BoardScorer + ?Sized> {
    scorer: &'a S,
    alpha_beta: bool,
    deadline: SearchDeadline,
    enforce_deadline: bool,
    store: SnapshotStore,
    pub(crate) nodes: u64,
}

impl<'a, S: BoardScorer + ?Sized> Searcher<'a, S> {
    pub(crate) fn new(scorer: &'a S, alpha_beta: bool, deadline: SearchDeadline, depth: u8) -> Self {
        Self {
            scorer,
            alpha_beta,
            deadline,
            enforce_deadline: false,
            store: SnapshotStore::new(usize::from(depth) + 1),
            nodes: 0,
        }
    }

    pub(crate) fn enforce_deadline(&mut self, enforce: bool) {
        self.enforce_deadline = enforce;
    }

    /// Exact score of each move in `moves`, searched `depth` plies deep.
    pub(crate) fn score_root_moves(
        &mut self,
        board: &mut Board,
        faction: Faction,
        moves: &[Move],
        depth: u8,
    ) -> ExploreResult<Vec<Move>> {
        let next = faction.opponent().unwrap_or(Faction::White);
        let mut scored = Vec::with_capacity(moves.len());
        for mv in moves {
            let score = self.child(board, mv, depth, 0, next, i32::MIN, i32::MAX)?;
            scored.push(mv.with_score(score));
        }
        Ok(scored)
    }

    /// Tries `mv` on the board, scores the resulting position with
    /// `depth - 1` plies to go, and restores the board.
    #[allow(clippy::too_many_arguments)]
    fn child(
        &mut self,
        board: &mut Board,
        mv: &Move,
        depth: u8,
        ply: u8,
        next: Faction,
        alpha: i32,
        beta: i32,
    ) -> ExploreResult<i32> {
        let slot = usize::from(ply);
        self.store.save(board, slot)?;
        let outcome = match board.execute_move(mv, true) {
            Ok(_) => self.minimax(board, next, depth.saturating_sub(1), ply + 1, alpha, beta),
            Err(e) => Err(e.into()),
        };
        self.store.load(board, slot)?;
        outcome
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        to_move: Faction,
        depth: u8,
        ply: u8,
        mut alpha: i32,
        mut beta: i32,
    ) -> ExploreResult<i32> {
        self.nodes += 1;
        if self.enforce_deadline && self.deadline.expired_at(self.nodes) {
            return Err(SearchError::DeadlineExceeded);
        }

        let status = board.status();
        if status.is_over() {
            return Ok(self.terminal_score(board, status, ply));
        }
        if depth == 0 {
            return Ok(self.scorer.score(board));
        }

        let moves = generate_moves(board, to_move);
        if moves.is_empty() {
            return Ok(self.scorer.score(board));
        }

        let maximizing = to_move == Faction::White;
        let next = to_move.opponent().unwrap_or(Faction::White);
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for mv in &moves {
            let score = self.child(board, mv, depth, ply, next, alpha, beta)?;
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if self.alpha_beta && alpha >= beta {
                break;
            }
        }

        Ok(best)
    }

    /// Leaf score pushed past any heuristic value, nearer wins ranking higher.
    fn terminal_score(&self, board: &Board, status: GameStatus, ply: u8) -> i32 {
        let base = self.scorer.score(board);
        match status {
            GameStatus::Won(Faction::White) => base.saturating_add(WIN_SCORE - i32::from(ply)),
            GameStatus::Won(_) => base.saturating_sub(WIN_SCORE - i32::from(ply)),
            GameStatus::Ongoing => base,
        }
    }
}

/// Picks the best of a set of scored root moves for `faction`. Ties keep the
/// earliest generated move.
pub fn best_of(faction: Faction, scored: &[Move]) -> Option<Move> {
    let maximizing = faction == Faction::White;
    let mut best: Option<Move> = None;
    for mv in scored {
        let better = match best {
            None => true,
            Some(b) if maximizing => mv.score > b.score,
            Some(b) => mv.score < b.score,
        };
        if better {
            best = Some(*mv);
        }
    }
    best
}

/// Full search entry point. The board is returned in exactly the state it
/// was passed in, whatever the outcome.
pub fn minimax_search<S: BoardScorer + ?Sized>(
    board: &mut Board,
    faction: Faction,
    scorer: &S,
    config: &SearchConfig,
) -> ExploreResult<SearchResult> {
    if config.max_depth == 0 {
        return Ok(SearchResult {
            best_score: scorer.score(board),
            nodes: 1,
            outcome: RootOutcome::Evaluated,
            ..SearchResult::default()
        });
    }

    let status = board.status();
    if let GameStatus::Won(winner) = status {
        return Ok(SearchResult {
            best_score: scorer.score(board),
            nodes: 1,
            outcome: RootOutcome::GameOver(winner),
            ..SearchResult::default()
        });
    }

    let moves = if faction.opponent().is_some() {
        generate_moves(board, faction)
    } else {
        Vec::new()
    };
    if moves.is_empty() {
        return Ok(SearchResult {
            best_score: scorer.score(board),
            nodes: 1,
            outcome: RootOutcome::NoLegalMoves,
            ..SearchResult::default()
        });
    }

    let deadline = SearchDeadline::from_budget(config.move_time);
    // Without a budget only the final depth matters.
    let first_depth = if deadline.is_bounded() { 1 } else { config.max_depth };

    let mut result = SearchResult {
        outcome: RootOutcome::Move,
        ..SearchResult::default()
    };

    for depth in first_depth..=config.max_depth {
        // The first iteration always completes so a move is always available.
        let enforce = depth > first_depth;
        let attempt = if config.threads > 1 && moves.len() > 1 {
            parallel_root_scores(board, faction, &moves, depth, scorer, config, deadline, enforce)
        } else {
            let mut searcher = Searcher::new(scorer, config.alpha_beta, deadline, depth);
            searcher.enforce_deadline(enforce);
            searcher
                .score_root_moves(board, faction, &moves, depth)
                .map(|scored| (scored, searcher.nodes))
        };

        match attempt {
            Ok((scored, nodes)) => {
                result.best_move = best_of(faction, &scored);
                result.best_score = result.best_move.map(|m| m.score).unwrap_or_default();
                result.root_moves = scored;
                result.reached_depth = depth;
                result.nodes += nodes;
                debug!(
                    depth,
                    score = result.best_score,
                    nodes,
                    elapsed_ms = deadline.elapsed().as_millis() as u64,
                    "search iteration complete"
                );
            }
            Err(SearchError::DeadlineExceeded) => {
                debug!(depth, "search deadline reached, keeping previous iteration");
                result.timed_out = true;
                break;
            }
            Err(e) => return Err(e),
        }

        if deadline.expired() {
            result.timed_out = depth < config.max_depth;
            break;
        }
    }

    Ok(result)
}

/// Best move for `faction` at `depth` with the default differential scorer.
/// `None` means there is nothing to play (no moves, game over, or depth 0).
pub fn search_best_move(
    board: &mut Board,
    faction: Faction,
    depth: u8,
) -> ExploreResult<Option<Move>> {
    let result = minimax_search(
        board,
        faction,
        &DifferentialScorer::default(),
        &SearchConfig::with_depth(depth),
    )?;
    Ok(result.best_move)
}
