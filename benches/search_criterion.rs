use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use zombie_chess::game_state::chess_rules::STARTING_LAYOUT;
use zombie_chess::game_state::chess_types::Faction;
use zombie_chess::search::board_scoring::{evaluate_differential, DifferentialScorer, EvalWeights};
use zombie_chess::search::minimax::{minimax_search, SearchConfig};
use zombie_chess::utils::layout_parser::parse_layout;

const MIDGAME: &str = "r1b1k3/pp3p2/2n5/3q4/4P3/2N5/PP3P2/R3K2R";

fn bench_evaluate(c: &mut Criterion) {
    let board = parse_layout(MIDGAME).expect("layout should parse");
    let weights = EvalWeights::default();
    c.bench_function("evaluate_differential_midgame", |b| {
        b.iter(|| black_box(evaluate_differential(black_box(&board), &weights)));
    });
}

fn bench_minimax(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    let scorer = DifferentialScorer::default();

    for (name, layout) in [("opening", STARTING_LAYOUT), ("midgame", MIDGAME)] {
        let board = parse_layout(layout).expect("benchmark layout should parse");

        for alpha_beta in [false, true] {
            let config = SearchConfig {
                alpha_beta,
                ..SearchConfig::with_depth(2)
            };

            // Correctness guard: the search must hand the board back untouched.
            let mut warm_board = board.clone();
            let warmup =
                minimax_search(&mut warm_board, Faction::Zombie, &scorer, &config).expect("search");
            assert!(warmup.best_move.is_some(), "no move found for {name}");
            assert_eq!(warm_board, board, "board changed while searching {name}");

            let label = if alpha_beta { "ab" } else { "full" };
            let mut bench_board = board.clone();
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{name}_d2_{label}")),
                &config,
                |b, config| {
                    b.iter(|| {
                        let result = minimax_search(
                            black_box(&mut bench_board),
                            Faction::Zombie,
                            &scorer,
                            config,
                        )
                        .expect("search benchmark run should succeed");
                        black_box(result.best_score)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_evaluate, bench_minimax);
criterion_main!(search_benches);
