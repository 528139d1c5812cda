use crate::game_state::game_state::{Position, EMPTY_SQUARE_CHAR};

pub fn generate_fen(position: &Position) -> String {
    let expanded = position.to_expanded();
    let (board, rest) = expanded.split_at(64);
    format!("{}{}", compress_board(board), rest)
}

/// Collapse a 64-character expanded board into FEN rank notation.
pub fn compress_board(board: &str) -> String {
    let mut out = String::new();

    for (row, rank) in board.as_bytes().chunks(8).enumerate() {
        let mut empty_count = 0u8;

        for &square in rank {
            if char::from(square) == EMPTY_SQUARE_CHAR {
                empty_count += 1;
                continue;
            }
            if empty_count > 0 {
                out.push(char::from(b'0' + empty_count));
                empty_count = 0;
            }
            out.push(char::from(square));
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row < 7 {
            out.push('/');
        }
    }

    out
}
