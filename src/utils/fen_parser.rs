//! FEN-to-Position parser.
//!
//! Expands the compressed board field (digit runs, `/` rank separators) into
//! the one-character-per-square record and loads it with
//! [`Position::from_expanded`], so both notations share one validation path.

use crate::game_state::game_state::{Position, EMPTY_SQUARE_CHAR};

pub fn parse_fen(fen: &str) -> Result<Position, String> {
    let mut parts = fen.split_whitespace();
    let board_part = parts.next().ok_or("Missing board layout in FEN")?;
    let rest: Vec<&str> = parts.collect();

    let board = expand_board(board_part)?;
    let record = if rest.is_empty() {
        board
    } else {
        format!("{board} {}", rest.join(" "))
    };

    Position::from_expanded(&record)
}

/// Turn `rnbqkbnr/pppppppp/8/...` into a 64-character row-major board.
pub fn expand_board(board_part: &str) -> Result<String, String> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err("Board layout must contain 8 ranks".to_owned());
    }

    let mut out = String::with_capacity(64);
    for rank_str in ranks {
        let mut files = 0usize;
        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                let step = usize::try_from(empty_count).map_err(|_| "Digit conversion failed")?;
                if !(1..=8).contains(&step) {
                    return Err(format!("Invalid empty-square count '{ch}'"));
                }
                files += step;
                if files > 8 {
                    return Err("Board rank has too many files".to_owned());
                }
                out.extend(std::iter::repeat(EMPTY_SQUARE_CHAR).take(step));
                continue;
            }

            if ch == EMPTY_SQUARE_CHAR {
                return Err(format!("Invalid piece character '{ch}' in board layout"));
            }
            files += 1;
            if files > 8 {
                return Err("Board rank has too many files".to_owned());
            }
            out.push(ch);
        }

        if files != 8 {
            return Err("Board rank does not sum to 8 files".to_owned());
        }
    }

    Ok(out)
}
