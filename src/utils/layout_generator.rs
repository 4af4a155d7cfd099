//! `Board` to layout text, the inverse of `layout_parser`.
//!
//! Only occupancy and holes are written; custom capture values and
//! overwatch weights are not part of the layout grammar.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Coordinate, Faction};
use crate::game_state::piece::Piece;

pub fn generate_layout(board: &Board) -> String {
    let mut ranks = Vec::with_capacity(board.height().max(0) as usize);

    for rank in (0..board.height()).rev() {
        let mut text = String::new();
        let mut empty_run = 0u32;

        for file in 0..board.width() {
            let at = Coordinate::new(file, rank);
            let symbol = if board.tile_at(at).is_none() {
                Some("x".to_owned())
            } else {
                board.occupant(at).map(|(_, piece)| piece_symbol(piece))
            };

            match symbol {
                None => empty_run += 1,
                Some(s) => {
                    if empty_run > 0 {
                        text.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    text.push_str(&s);
                }
            }
        }
        if empty_run > 0 {
            text.push_str(&empty_run.to_string());
        }
        ranks.push(text);
    }

    ranks.join("/")
}

fn piece_symbol(piece: &Piece) -> String {
    let letter = piece.kind().symbol();
    match piece.faction() {
        Faction::White => letter.to_ascii_uppercase().to_string(),
        Faction::Zombie => letter.to_string(),
        Faction::Neutral => format!("~{letter}"),
    }
}

#[cfg(test)]
mod tests {
    use super::generate_layout;
    use crate::game_state::chess_rules::STARTING_LAYOUT;
    use crate::game_state::chess_types::Coordinate;
    use crate::moves::chess_move::Move;
    use crate::utils::layout_parser::parse_layout;

    #[test]
    fn starting_layout_is_reproduced() {
        let board = parse_layout(STARTING_LAYOUT).expect("layout should parse");
        assert_eq!(generate_layout(&board), STARTING_LAYOUT);
    }

    #[test]
    fn captures_and_special_cells_are_written() {
        let mut board = parse_layout("3~n/x3/R2p").expect("layout should parse");
        let rook = board.piece_on(Coordinate::new(0, 0)).expect("rook present");
        board
            .execute_move(&Move::new(rook, Coordinate::new(3, 0)), true)
            .expect("capture should execute");
        assert_eq!(generate_layout(&board), "3~n/x3/3R");
    }
}
