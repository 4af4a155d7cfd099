//! Root-split parallel search.
//!
//! The root move list is dealt round-robin across workers. Each worker owns a
//! clone of the board and its own snapshot slots, so no mutable state is
//! shared; scores are reassembled in generation order afterwards.

use std::thread;

use tracing::trace;

use crate::game_state::board::Board;
use crate::game_state::board_errors::{ExploreResult, SearchError};
use crate::game_state::chess_types::Faction;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::BoardScorer;
use crate::search::minimax::{SearchConfig, Searcher};
use crate::search::time_management::SearchDeadline;

/// Worker count actually used for `root_moves` moves.
#[inline]
pub fn normalized_threads(requested: usize, root_moves: usize) -> usize {
    requested.max(1).min(root_moves.max(1))
}

/// Scores every root move on `threads` workers. Returns the scored moves in
/// the order of `moves` and the total node count.
#[allow(clippy::too_many_arguments)]
pub(crate) fn parallel_root_scores<S: BoardScorer + ?Sized>(
    board: &Board,
    faction: Faction,
    moves: &[Move],
    depth: u8,
    scorer: &S,
    config: &SearchConfig,
    deadline: SearchDeadline,
    enforce: bool,
) -> ExploreResult<(Vec<Move>, u64)> {
    let workers = normalized_threads(config.threads, moves.len());

    let shares: Vec<Vec<(usize, Move)>> = (0..workers)
        .map(|worker| {
            moves
                .iter()
                .copied()
                .enumerate()
                .skip(worker)
                .step_by(workers)
                .collect()
        })
        .collect();

    let outcomes: Vec<ExploreResult<(Vec<(usize, Move)>, u64)>> = thread::scope(|scope| {
        let handles: Vec<_> = shares
            .into_iter()
            .enumerate()
            .map(|(worker, share)| {
                let mut local = board.clone();
                scope.spawn(move || -> ExploreResult<(Vec<(usize, Move)>, u64)> {
                    let (indices, share_moves): (Vec<usize>, Vec<Move>) =
                        share.into_iter().unzip();
                    let mut searcher = Searcher::new(scorer, config.alpha_beta, deadline, depth);
                    searcher.enforce_deadline(enforce);
                    let scored =
                        searcher.score_root_moves(&mut local, faction, &share_moves, depth)?;
                    trace!(worker, nodes = searcher.nodes, "root share finished");
                    Ok((indices.into_iter().zip(scored).collect(), searcher.nodes))
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| Err(SearchError::Worker("search worker panicked".into())))
            })
            .collect()
    });

    let mut slots: Vec<Option<Move>> = vec![None; moves.len()];
    let mut nodes = 0u64;
    for outcome in outcomes {
        let (scored, worker_nodes) = outcome?;
        nodes += worker_nodes;
        for (index, mv) in scored {
            slots[index] = Some(mv);
        }
    }

    let scored = slots
        .into_iter()
        .collect::<Option<Vec<Move>>>()
        .ok_or_else(|| SearchError::Worker("root move left unscored".into()))?;
    Ok((scored, nodes))
}
