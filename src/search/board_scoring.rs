//! Pluggable board evaluation interface and the material baseline.
//!
//! Search stays modular by delegating static scoring to this trait, so other
//! heuristics can be swapped in without touching the search code.

use crate::game_state::chess_types::*;

/// Magnitude of a mate score before the ply adjustment.
pub const MATE_SCORE: i32 = 30000;

pub trait BoardScorer {
    /// Score from Light's (White's) perspective: positive favors Light.
    /// The position carries its own move history.
    fn score(&self, position: &Position) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, position: &Position) -> i32 {
        let state = position.state();
        let mut score = 0i32;

        for piece in [
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
        ] {
            let value = Self::piece_value(piece);
            let white_count = state.pieces_of_kind(Color::Light, piece).count_ones() as i32;
            let black_count = state.pieces_of_kind(Color::Dark, piece).count_ones() as i32;
            score += (white_count - black_count) * value;
        }

        score
    }
}
