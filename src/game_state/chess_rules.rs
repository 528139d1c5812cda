//! Canonical chess-rule constants and the piece-code transition table.
//!
//! Castling rights are carried by the king's code. The full set of code
//! transitions is:
//!
//! | event                                   | before            | after            |
//! |-----------------------------------------|-------------------|------------------|
//! | any pawn move                           | `UnmovedPawn`     | `MovedPawn`      |
//! | pawn lands on its promotion rank        | pawn              | promoted kind    |
//! | king moves or castles                   | any king code     | `KingNoRights`   |
//! | piece leaves or is captured on h1 / h8  | `KingBothSides`   | `KingLongOnly`   |
//! |                                         | `KingShortOnly`   | `KingNoRights`   |
//! | piece leaves or is captured on a1 / a8  | `KingBothSides`   | `KingShortOnly`  |
//! |                                         | `KingLongOnly`    | `KingNoRights`   |
//!
//! The corner rows apply to the king of the corner's color. While a right is
//! held the corner holds that color's unmoved rook, so "leaves" means the rook
//! moved and "captured" means the opponent took it.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// The same starting position in the expanded one-character-per-square record.
pub const STARTING_POSITION_EXPANDED: &str = "rnbqkbnrpppppppp................................PPPPPPPPRNBQKBNR w KQkq - 0 1";

/// Half-move clock value at which the fifty-move rule applies.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Squares involved in one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingGeometry {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook that must be empty.
    pub between: u64,
    /// Squares the king crosses and lands on, in order.
    pub king_path: [Square; 2],
}

pub const fn castling_geometry(color: Color, side: CastleSide) -> CastlingGeometry {
    let base = color.back_rank() * 8;
    match side {
        CastleSide::Short => CastlingGeometry {
            king_from: base + 4,
            king_to: base + 6,
            rook_from: base + 7,
            rook_to: base + 5,
            between: bit(base + 5) | bit(base + 6),
            king_path: [base + 5, base + 6],
        },
        CastleSide::Long => CastlingGeometry {
            king_from: base + 4,
            king_to: base + 2,
            rook_from: base,
            rook_to: base + 3,
            between: bit(base + 1) | bit(base + 2) | bit(base + 3),
            king_path: [base + 3, base + 2],
        },
    }
}

/// The castling right tied to a corner square, if any.
pub const fn corner_right(square: Square) -> Option<(Color, CastleSide)> {
    match square {
        0 => Some((Color::Light, CastleSide::Long)),
        7 => Some((Color::Light, CastleSide::Short)),
        56 => Some((Color::Dark, CastleSide::Long)),
        63 => Some((Color::Dark, CastleSide::Short)),
        _ => None,
    }
}

/// Remove one castling right from a king code. Non-king codes are unchanged.
pub const fn revoke_castling(code: PieceCode, side: CastleSide) -> PieceCode {
    match (code, side) {
        (PieceCode::KingBothSides, CastleSide::Short) => PieceCode::KingLongOnly,
        (PieceCode::KingBothSides, CastleSide::Long) => PieceCode::KingShortOnly,
        (PieceCode::KingShortOnly, CastleSide::Short) => PieceCode::KingNoRights,
        (PieceCode::KingLongOnly, CastleSide::Long) => PieceCode::KingNoRights,
        (other, _) => other,
    }
}

pub const fn king_code_from_rights(short: bool, long: bool) -> PieceCode {
    match (short, long) {
        (true, true) => PieceCode::KingBothSides,
        (true, false) => PieceCode::KingShortOnly,
        (false, true) => PieceCode::KingLongOnly,
        (false, false) => PieceCode::KingNoRights,
    }
}

/// Code a piece carries after moving off its square (before promotion).
pub const fn code_after_move(code: PieceCode) -> PieceCode {
    match code {
        PieceCode::UnmovedPawn => PieceCode::MovedPawn,
        PieceCode::KingBothSides | PieceCode::KingShortOnly | PieceCode::KingLongOnly => {
            PieceCode::KingNoRights
        }
        other => other,
    }
}
