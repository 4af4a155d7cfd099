//! Crate root module declarations for the Zombie Chess engine project.
//!
//! This file exposes all top-level subsystems (board state, movement rules,
//! move generation and execution, search, engines, the turn controller, and
//! utility helpers) so the binary, benchmarks, and tests can import stable
//! module paths.

pub mod game_state {
    pub mod board;
    pub mod board_errors;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod piece;
    pub mod snapshot_store;
    pub mod tile;
}

pub mod moves {
    pub mod chess_move;
    pub mod movement_table;
}

pub mod move_generation {
    pub mod destination_generator;
    pub mod move_executor;
    pub mod move_list;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
    pub mod threading;
    pub mod time_management;
}

pub mod engines {
    pub mod engine_greedy;
    pub mod engine_minimax;
    pub mod engine_trait;
}

pub mod controller {
    pub mod events;
    pub mod turn_controller;
}

pub mod utils {
    pub mod coordinates;
    pub mod game_record;
    pub mod layout_generator;
    pub mod layout_parser;
    pub mod render_game_state;
}
