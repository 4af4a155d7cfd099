//! Text layout to `Board` parser.
//!
//! Layout grammar (ranks listed from the top rank down, separated by `/`):
//! - a run of digits: that many empty tiles,
//! - `x`: a hole (no tile),
//! - `PNBRQK`: White pieces, `pnbrqk`: Zombie pieces,
//! - `~` followed by a piece letter: a Neutral piece.
//!
//! Every rank must span the same number of files. Pieces are placed in
//! `(rank, file)` order starting from rank 0, which fixes the play order.

use crate::game_state::board::Board;
use crate::game_state::board_errors::BoardError;
use crate::game_state::chess_types::{Coordinate, Faction, PieceKind};

/// Widest rank a layout may describe.
pub const MAX_LAYOUT_FILES: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,

    #[error("rank {rank} spans {found} files, expected {expected}")]
    RaggedRank {
        rank: i32,
        expected: i32,
        found: i32,
    },

    #[error("invalid layout character '{0}'")]
    InvalidSymbol(char),

    #[error("neutral marker '~' must be followed by a piece letter")]
    DanglingNeutralMarker,

    #[error("empty-run length must be positive")]
    ZeroEmptyRun,

    #[error("empty run is longer than 256 files")]
    EmptyRunTooLong,

    #[error("rank is wider than 256 files")]
    RankTooWide,

    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Hole,
    Empty,
    Piece(PieceKind, Faction),
}

pub fn parse_layout(layout: &str) -> Result<Board, LayoutError> {
    let layout = layout.trim();
    if layout.is_empty() {
        return Err(LayoutError::Empty);
    }

    let rows: Vec<Vec<Cell>> = layout
        .split('/')
        .map(parse_rank)
        .collect::<Result<_, _>>()?;

    let height = rows.len() as i32;
    let width = rows[0].len() as i32;
    for (i, row) in rows.iter().enumerate() {
        let found = row.len() as i32;
        if found != width || found == 0 {
            return Err(LayoutError::RaggedRank {
                rank: height - 1 - i as i32,
                expected: width,
                found,
            });
        }
    }

    // Rows arrive top rank first.
    let cell_at = |file: i32, rank: i32| rows[(height - 1 - rank) as usize][file as usize];

    let mut coordinates = Vec::new();
    for rank in 0..height {
        for file in 0..width {
            if cell_at(file, rank) != Cell::Hole {
                coordinates.push(Coordinate::new(file, rank));
            }
        }
    }

    let mut board = Board::from_tiles(coordinates);
    board.width = width;
    board.height = height;

    for rank in 0..height {
        for file in 0..width {
            if let Cell::Piece(kind, faction) = cell_at(file, rank) {
                board.add_piece(kind, faction, Coordinate::new(file, rank))?;
            }
        }
    }

    Ok(board)
}

fn parse_rank(text: &str) -> Result<Vec<Cell>, LayoutError> {
    let mut cells = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch.is_ascii_digit() {
            let mut run = ch.to_digit(10).unwrap_or(0) as usize;
            while let Some(next) = chars.peek().and_then(|c| c.to_digit(10)) {
                run = run
                    .checked_mul(10)
                    .and_then(|run| run.checked_add(next as usize))
                    .filter(|&run| run <= MAX_LAYOUT_FILES)
                    .ok_or(LayoutError::EmptyRunTooLong)?;
                chars.next();
            }
            if run == 0 {
                return Err(LayoutError::ZeroEmptyRun);
            }
            if cells.len() + run > MAX_LAYOUT_FILES {
                return Err(LayoutError::RankTooWide);
            }
            cells.extend(std::iter::repeat(Cell::Empty).take(run));
            continue;
        }

        let cell = match ch {
            'x' | 'X' => Cell::Hole,
            '~' => {
                let letter = chars.next().ok_or(LayoutError::DanglingNeutralMarker)?;
                let kind =
                    PieceKind::from_symbol(letter).ok_or(LayoutError::InvalidSymbol(letter))?;
                Cell::Piece(kind, Faction::Neutral)
            }
            _ => {
                let kind = PieceKind::from_symbol(ch).ok_or(LayoutError::InvalidSymbol(ch))?;
                let faction = if ch.is_ascii_uppercase() {
                    Faction::White
                } else {
                    Faction::Zombie
                };
                Cell::Piece(kind, faction)
            }
        };
        if cells.len() == MAX_LAYOUT_FILES {
            return Err(LayoutError::RankTooWide);
        }
        cells.push(cell);
    }

    Ok(cells)
}
