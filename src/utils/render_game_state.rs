//! Terminal-oriented Unicode board renderer.
//!
//! Works on any board shape: missing tiles render blank, empty tiles as `·`.
//! Highlighted tiles get a trailing `*`.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Coordinate, Faction, PieceKind};

/// Render the board to a Unicode string for terminal output.
pub fn render_game_state(board: &Board) -> String {
    render_with_highlights(board, &[])
}

/// Same as `render_game_state`, marking every coordinate in `highlights`.
pub fn render_with_highlights(board: &Board, highlights: &[Coordinate]) -> String {
    let mut out = String::new();
    let labels = file_labels(board.width());

    out.push_str(&labels);
    out.push('\n');

    for rank in (0..board.height()).rev() {
        out.push_str(&format!("{:>2} ", rank + 1));

        for file in 0..board.width() {
            let at = Coordinate::new(file, rank);
            let glyph = if board.tile_at(at).is_none() {
                ' '
            } else {
                match board.occupant(at) {
                    Some((_, piece)) => piece_to_unicode(piece.faction(), piece.kind()),
                    None => '·',
                }
            };
            out.push(glyph);
            out.push(if highlights.contains(&at) { '*' } else { ' ' });
        }

        out.push_str(&format!("{:>2}", rank + 1));
        out.push('\n');
    }

    out.push_str(&labels);
    out
}

fn file_labels(width: i32) -> String {
    let mut labels = String::from("   ");
    for file in 0..width {
        let label = u8::try_from(file)
            .ok()
            .filter(|f| *f < 26)
            .map_or('?', |f| char::from(b'a' + f));
        labels.push(label);
        labels.push(' ');
    }
    labels.trim_end().to_owned()
}

fn piece_to_unicode(faction: Faction, piece: PieceKind) -> char {
    match (faction, piece) {
        (Faction::White, PieceKind::Pawn) => '♙',
        (Faction::White, PieceKind::Knight) => '♘',
        (Faction::White, PieceKind::Bishop) => '♗',
        (Faction::White, PieceKind::Rook) => '♖',
        (Faction::White, PieceKind::Queen) => '♕',
        (Faction::White, PieceKind::King) => '♔',
        (Faction::Zombie, PieceKind::Pawn) => '♟',
        (Faction::Zombie, PieceKind::Knight) => '♞',
        (Faction::Zombie, PieceKind::Bishop) => '♝',
        (Faction::Zombie, PieceKind::Rook) => '♜',
        (Faction::Zombie, PieceKind::Queen) => '♛',
        (Faction::Zombie, PieceKind::King) => '♚',
        (Faction::Neutral, kind) => kind.symbol(),
    }
}
