use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use zombie_chess::controller::events::ControllerEvent;
use zombie_chess::controller::turn_controller::{TurnController, TurnPhase};
use zombie_chess::engines::engine_greedy::GreedyEngine;
use zombie_chess::engines::engine_minimax::MinimaxEngine;
use zombie_chess::engines::engine_trait::{Engine, SearchParams};
use zombie_chess::game_state::chess_rules::{GameStatus, STARTING_LAYOUT};
use zombie_chess::game_state::chess_types::Faction;
use zombie_chess::search::minimax::SearchConfig;
use zombie_chess::utils::coordinates::{coordinate_to_algebraic, parse_coordinate};
use zombie_chess::utils::layout_generator::generate_layout;
use zombie_chess::utils::layout_parser::parse_layout;
use zombie_chess::utils::render_game_state::render_with_highlights;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EngineKind {
    Minimax,
    Greedy,
}

/// Play White against the Zombie engine in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Search depth in plies.
    #[arg(long, default_value_t = 2)]
    depth: u8,

    /// Starting layout, ranks from the top separated by '/'.
    #[arg(long, default_value = STARTING_LAYOUT)]
    layout: String,

    #[arg(long, value_enum, default_value_t = EngineKind::Minimax)]
    engine: EngineKind,

    /// Seed for tie-breaking; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Per-move time budget; enables iterative deepening.
    #[arg(long)]
    move_time_ms: Option<u64>,
}

fn build_engine(cli: &Cli) -> Box<dyn Engine> {
    match cli.engine {
        EngineKind::Greedy => Box::new(GreedyEngine::with_seed(cli.seed)),
        EngineKind::Minimax => {
            let config = SearchConfig {
                max_depth: cli.depth,
                threads: cli.threads.max(1),
                ..SearchConfig::default()
            };
            Box::new(MinimaxEngine::with_config(config, cli.seed))
        }
    }
}

fn describe(event: &ControllerEvent, controller: &TurnController) -> Option<String> {
    match event {
        ControllerEvent::MovePlayed {
            faction,
            mv,
            from,
            captured,
        } => {
            let kind = controller
                .board()
                .piece(mv.piece)
                .map(|p| p.kind().to_string())
                .unwrap_or_default();
            let mut line = format!(
                "{faction} {kind} {} -> {}",
                coordinate_to_algebraic(*from),
                coordinate_to_algebraic(mv.destination)
            );
            if let Some(taken) = captured.and_then(|id| controller.board().piece(id)) {
                line.push_str(&format!(" captures {} {}", taken.faction(), taken.kind()));
            }
            Some(line)
        }
        ControllerEvent::NoLegalMoves(faction) => Some(format!("{faction} has no legal moves")),
        ControllerEvent::GameOver(GameStatus::Won(winner)) => Some(format!("Game over: {winner} wins")),
        ControllerEvent::GameOver(GameStatus::Ongoing) => None,
        ControllerEvent::OverlayToggled(on) => {
            Some(format!("Overlay {}", if *on { "on" } else { "off" }))
        }
        ControllerEvent::StateSaved(slot) => Some(format!("Saved slot {slot}")),
        ControllerEvent::StateLoaded(slot) => Some(format!("Loaded slot {slot}")),
        ControllerEvent::PieceSelected { .. } | ControllerEvent::SelectionCleared => None,
    }
}

fn print_overlay(controller: &TurnController, out: &mut impl Write) -> io::Result<()> {
    if controller.last_scores().is_empty() {
        return writeln!(out, "No engine scores yet.");
    }
    for mv in controller.last_scores() {
        let from = controller
            .board()
            .piece(mv.piece)
            .map(|p| format!("{} {}", p.kind(), mv.piece))
            .unwrap_or_default();
        writeln!(
            out,
            "  {from} -> {}: {}",
            coordinate_to_algebraic(mv.destination),
            mv.score
        )?;
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), String> {
    let board = parse_layout(&cli.layout).map_err(|e| e.to_string())?;
    let mut controller = TurnController::new(board, build_engine(&cli));
    controller.set_search_params(SearchParams {
        depth: Some(cli.depth),
        movetime_ms: cli.move_time_ms,
    });

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    let io_err = |e: io::Error| e.to_string();

    writeln!(out, "{}", render_with_highlights(controller.board(), &[])).map_err(io_err)?;
    writeln!(
        out,
        "Commands: <tile> (e2 or 4,1), save N, load N, overlay, layout, quit"
    )
    .map_err(io_err)?;

    for line in stdin.lock().lines() {
        let line = line.map_err(io_err)?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        let events = match command {
            "quit" | "exit" => break,
            "layout" => {
                writeln!(out, "{}", generate_layout(controller.board())).map_err(io_err)?;
                continue;
            }
            "overlay" => {
                let event = controller.toggle_overlay();
                if controller.overlay_enabled() {
                    print_overlay(&controller, &mut out).map_err(io_err)?;
                }
                vec![event]
            }
            "save" | "load" => {
                let slot = match words.next().map(str::parse::<usize>) {
                    Some(Ok(slot)) => slot,
                    _ => {
                        writeln!(out, "usage: {command} N").map_err(io_err)?;
                        continue;
                    }
                };
                let outcome = if command == "save" {
                    controller.save_state(slot).map(|e| vec![e])
                } else {
                    controller.load_state(slot)
                };
                match outcome {
                    Ok(events) => events,
                    Err(e) => {
                        warn!(%e, "checkpoint command failed");
                        writeln!(out, "error: {e}").map_err(io_err)?;
                        continue;
                    }
                }
            }
            text => match parse_coordinate(text) {
                Ok(coordinate) => controller
                    .on_tile_activated(coordinate)
                    .map_err(|e| e.to_string())?,
                Err(e) => {
                    writeln!(out, "error: {e}").map_err(io_err)?;
                    continue;
                }
            },
        };

        for event in &events {
            if let Some(text) = describe(event, &controller) {
                writeln!(out, "{text}").map_err(io_err)?;
            }
        }
        if events
            .iter()
            .any(|e| matches!(e, ControllerEvent::MovePlayed { faction: Faction::Zombie, .. }))
            && controller.overlay_enabled()
        {
            print_overlay(&controller, &mut out).map_err(io_err)?;
        }
        writeln!(
            out,
            "{}",
            render_with_highlights(controller.board(), controller.highlights())
        )
        .map_err(io_err)?;
        if let TurnPhase::GameOver(_) = controller.phase() {
            writeln!(out, "Use load N to resume from a checkpoint, or quit.").map_err(io_err)?;
        }
    }

    writeln!(out, "\n{}", controller.record().render()).map_err(io_err)?;
    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
