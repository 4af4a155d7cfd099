//! Human-readable coordinate notation.
//!
//! Accepts algebraic squares (`e2`: file letter, 1-based rank) and raw
//! zero-based pairs (`4,1`). Both name the same `Coordinate`.

use crate::game_state::chess_types::Coordinate;

pub fn parse_coordinate(text: &str) -> Result<Coordinate, String> {
    let text = text.trim();

    if let Some((file, rank)) = text.split_once(',') {
        let file = file
            .trim()
            .parse::<i32>()
            .map_err(|_| format!("Invalid file in coordinate: {text}"))?;
        let rank = rank
            .trim()
            .parse::<i32>()
            .map_err(|_| format!("Invalid rank in coordinate: {text}"))?;
        return Ok(Coordinate::new(file, rank));
    }

    let mut chars = text.chars();
    let file_char = chars
        .next()
        .ok_or_else(|| "Empty coordinate".to_owned())?
        .to_ascii_lowercase();
    if !file_char.is_ascii_lowercase() {
        return Err(format!("Invalid algebraic file: {file_char}"));
    }
    let rank = chars
        .as_str()
        .parse::<i32>()
        .map_err(|_| format!("Invalid algebraic rank: {}", chars.as_str()))?;
    if rank < 1 {
        return Err(format!("Algebraic ranks start at 1, got {rank}"));
    }

    Ok(Coordinate::new(
        i32::from(file_char as u8 - b'a'),
        rank - 1,
    ))
}

/// Algebraic name of a coordinate, or the raw pair when it has none.
pub fn coordinate_to_algebraic(coordinate: Coordinate) -> String {
    if (0..26).contains(&coordinate.file) && coordinate.rank >= 0 {
        let file = char::from(b'a' + coordinate.file as u8);
        format!("{file}{}", coordinate.rank + 1)
    } else {
        format!("{},{}", coordinate.file, coordinate.rank)
    }
}
