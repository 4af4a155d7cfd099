//! Engine abstraction used by the turn controller and the terminal game.
//!
//! Defines common input parameters and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface.

use crate::game_state::board::Board;
use crate::game_state::chess_types::Faction;
use crate::moves::chess_move::Move;

/// Per-call overrides; unset fields fall back to the engine's options.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchParams {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    /// Scored root moves, when the engine produces them.
    pub root_moves: Vec<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    /// Picks a move for `faction`. The board is lent mutably for speculative
    /// play and is handed back unchanged.
    fn choose_move(
        &mut self,
        board: &mut Board,
        faction: Faction,
        params: &SearchParams,
    ) -> Result<EngineOutput, String>;
}

pub(crate) fn parse_option<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, String> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| format!("invalid {name} value '{value}'"))
}

pub(crate) fn parse_flag(name: &str, value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(format!("invalid {name} value '{value}'")),
    }
}
