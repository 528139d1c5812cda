//! Terminal-position oracle consulted by the search.
//!
//! Conditions are tested cheapest first: clock, material, repetition, and
//! only then the legal-move count.

use crate::game_state::chess_rules::FIFTY_MOVE_HALFMOVES;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::has_legal_move;
use crate::move_generation::move_generator::MoveGenResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    FiftyMoveRule,
    InsufficientMaterial,
    ThreefoldRepetition,
    Stalemate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Normal,
    /// The side to move has been mated.
    Mate,
    Draw(DrawReason),
}

pub trait GameStatusOracle {
    /// Classify `position` for its side to move. `last_move_was_check` tells
    /// a mate from a stalemate when no legal move remains.
    fn status(&self, position: &mut Position, last_move_was_check: bool)
        -> MoveGenResult<GameStatus>;
}

/// Standard chess termination rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct RulesOracle;

impl GameStatusOracle for RulesOracle {
    fn status(
        &self,
        position: &mut Position,
        last_move_was_check: bool,
    ) -> MoveGenResult<GameStatus> {
        if position.halfmove_clock() >= FIFTY_MOVE_HALFMOVES {
            return Ok(GameStatus::Draw(DrawReason::FiftyMoveRule));
        }
        if is_insufficient_material(position.state()) {
            return Ok(GameStatus::Draw(DrawReason::InsufficientMaterial));
        }
        if repetition_count(position) >= 3 {
            return Ok(GameStatus::Draw(DrawReason::ThreefoldRepetition));
        }
        if has_legal_move(position)? {
            return Ok(GameStatus::Normal);
        }
        Ok(if last_move_was_check {
            GameStatus::Mate
        } else {
            GameStatus::Draw(DrawReason::Stalemate)
        })
    }
}

/// K v K, minor piece v K, and K+B v K+B with both bishops on one square
/// color.
pub fn is_insufficient_material(state: &BoardState) -> bool {
    for color in [Color::Light, Color::Dark] {
        let heavy = state.pieces_of_kind(color, PieceKind::Pawn)
            | state.pieces_of_kind(color, PieceKind::Rook)
            | state.pieces_of_kind(color, PieceKind::Queen);
        if heavy != 0 {
            return false;
        }
    }

    let knights = [Color::Light, Color::Dark]
        .map(|c| state.pieces(c, PieceCode::Knight).count_ones());
    let bishops = [Color::Light, Color::Dark].map(|c| state.pieces(c, PieceCode::Bishop));
    let bishop_counts = bishops.map(u64::count_ones);
    let minors = knights[0] + knights[1] + bishop_counts[0] + bishop_counts[1];

    match minors {
        0 | 1 => true,
        2 if bishop_counts == [1, 1] => {
            let light_sq = bishops[0].trailing_zeros() as Square;
            let dark_sq = bishops[1].trailing_zeros() as Square;
            square_shade(light_sq) == square_shade(dark_sq)
        }
        _ => false,
    }
}

#[inline]
const fn square_shade(square: Square) -> u8 {
    (file_of(square) + rank_of(square)) % 2
}

/// How many times the current placement, side to move and en-passant target
/// have occurred in this game line, the current one included.
pub fn repetition_count(position: &Position) -> usize {
    let current = position.state();
    1 + position
        .history()
        .iter()
        .filter(|past| {
            past.side_to_move == current.side_to_move
                && past.en_passant_square == current.en_passant_square
                && past.squares == current.squares
        })
        .count()
}
