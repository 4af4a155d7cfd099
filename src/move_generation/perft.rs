use crate::game_state::board::Board;
use crate::game_state::board_errors::{ExploreResult, SearchError};
use crate::game_state::chess_types::Faction;
use crate::game_state::snapshot_store::SnapshotStore;
use crate::move_generation::move_list::generate_moves;
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    /// Leaves where a side has already lost.
    pub decided: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.decided += rhs.decided;
    }
}

/// Counts leaf positions `depth` plies below `board`, with `faction` to move.
/// Sides alternate White, Zombie. The board is restored before returning.
pub fn perft(board: &mut Board, faction: Faction, depth: u8) -> ExploreResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut store = SnapshotStore::new(usize::from(depth));
    let mut total = PerftCounts::default();
    perft_recurse(board, &mut store, faction, depth, 0, &mut total)?;
    Ok(total)
}

/// Per-root-move leaf counts, in generation order.
pub fn perft_divide(
    board: &mut Board,
    faction: Faction,
    depth: u8,
) -> ExploreResult<Vec<(Move, PerftCounts)>> {
    let depth = depth.max(1);
    let mut store = SnapshotStore::new(usize::from(depth));
    let mut divided = Vec::new();

    for mv in generate_moves(board, faction) {
        let mut counts = PerftCounts::default();
        perft_child(board, &mut store, &mv, faction, depth, 0, &mut counts)?;
        divided.push((mv, counts));
    }
    Ok(divided)
}

fn perft_recurse(
    board: &mut Board,
    store: &mut SnapshotStore,
    faction: Faction,
    depth: u8,
    ply: u8,
    total: &mut PerftCounts,
) -> ExploreResult<()> {
    for mv in generate_moves(board, faction) {
        perft_child(board, store, &mv, faction, depth, ply, total)?;
    }
    Ok(())
}

fn perft_child(
    board: &mut Board,
    store: &mut SnapshotStore,
    mv: &Move,
    faction: Faction,
    depth: u8,
    ply: u8,
    total: &mut PerftCounts,
) -> ExploreResult<()> {
    let slot = usize::from(ply);
    store.save(board, slot)?;

    let outcome = board.execute_move(mv, true).map_err(SearchError::from).and_then(|captured| {
        if depth == 1 {
            let mut leaf = PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            };
            if captured.is_some() {
                leaf.captures = 1;
            }
            if board.status().is_over() {
                leaf.decided = 1;
            }
            total.merge(leaf);
            return Ok(());
        }
        if board.status().is_over() {
            return Ok(());
        }
        let next = faction.opponent().unwrap_or(Faction::White);
        perft_recurse(board, store, next, depth - 1, ply + 1, total)
    });

    store.load(board, slot)?;
    outcome
}

#[cfg(test)]
mod tests {
    use super::{perft, perft_divide, PerftCounts};
    use crate::game_state::chess_rules::STARTING_LAYOUT;
    use crate::game_state::chess_types::Faction;
    use crate::utils::layout_parser::parse_layout;

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let mut board = parse_layout(STARTING_LAYOUT).expect("layout should parse");
        let counts = perft(&mut board, Faction::White, 0).expect("perft should run");
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn opening_counts_are_stable() {
        let mut board = parse_layout(STARTING_LAYOUT).expect("layout should parse");
        let before = board.clone();

        assert_eq!(perft(&mut board, Faction::White, 1).expect("perft").nodes, 12);
        assert_eq!(perft(&mut board, Faction::White, 2).expect("perft").nodes, 144);
        // Bishops reach the a6 and h6 tiles once a pawn or knight lands there.
        let three = perft(&mut board, Faction::White, 3).expect("perft");
        assert_eq!(three.nodes, 2124);
        assert_eq!(three.captures, 4);
        assert_eq!(three.decided, 0);
        assert_eq!(board, before);
    }

    #[test]
    fn captures_and_decided_leaves_are_counted() {
        // The rook can take the only Zombie piece, ending the game.
        let mut board = parse_layout("R1p").expect("layout should parse");
        let counts = perft(&mut board, Faction::White, 1).expect("perft should run");
        assert_eq!(counts.nodes, 2);
        assert_eq!(counts.captures, 1);
        assert_eq!(counts.decided, 1);

        // Nothing is expanded below a decided position.
        let deeper = perft(&mut board, Faction::White, 2).expect("perft should run");
        assert_eq!(deeper.captures, 0);
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut board = parse_layout(STARTING_LAYOUT).expect("layout should parse");
        let divided = perft_divide(&mut board, Faction::Zombie, 2).expect("divide should run");
        let total: u64 = divided.iter().map(|(_, counts)| counts.nodes).sum();
        assert_eq!(divided.len(), 12);
        assert_eq!(total, 144);
    }
}
