//! Square coordinate conversions (`e4` <-> square index).
//!
//! Used by the record parser for en-passant targets and by long-algebraic
//! move text.

use crate::game_state::chess_types::{file_of, rank_of, square_from_file_rank, Square};

/// Convert a coordinate such as "e4" to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, String> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(format!("Invalid algebraic square: {square}"));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("Invalid algebraic file: {}", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("Invalid algebraic rank: {}", rank as char));
    }

    Ok(square_from_file_rank(file - b'a', rank - b'1'))
}

/// Convert a square index (`0..=63`) to a coordinate such as "e4".
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, String> {
    if square > 63 {
        return Err(format!("Square index out of bounds: {square}"));
    }

    let file_char = char::from(b'a' + file_of(square));
    let rank_char = char::from(b'1' + rank_of(square));

    Ok(format!("{file_char}{rank_char}"))
}
