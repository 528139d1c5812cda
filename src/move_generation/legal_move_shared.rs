//! Per-piece pseudo-legal dispatch.
//!
//! Each piece code maps to one pure generator taking the piece's square and
//! the occupancy it sees. Nothing here checks king safety.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves_bishop::bishop_moves;
use crate::move_generation::legal_moves_king::{
    king_both_sides_moves, king_long_only_moves, king_no_rights_moves, king_short_only_moves,
};
use crate::move_generation::legal_moves_knight::knight_moves;
use crate::move_generation::legal_moves_pawn::{moved_pawn_moves, unmoved_pawn_moves};
use crate::move_generation::legal_moves_queen::queen_moves;
use crate::move_generation::legal_moves_rook::rook_moves;
use crate::moves::move_descriptions::Move;

/// What a single piece needs to know about the board to list its moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveContext {
    pub square: Square,
    pub color: Color,
    pub friends: u64,
    pub enemies: u64,
    /// Enemy pawns only; an en-passant capture needs one on the victim square.
    pub enemy_pawns: u64,
    pub en_passant: Option<Square>,
}

impl MoveContext {
    #[inline]
    pub fn for_square(state: &BoardState, square: Square, color: Color) -> Self {
        Self {
            square,
            color,
            friends: state.occupancy(color),
            enemies: state.occupancy(color.opposite()),
            enemy_pawns: state.pieces_of_kind(color.opposite(), PieceKind::Pawn),
            en_passant: state.en_passant_square,
        }
    }

    #[inline]
    pub fn occupancy(&self) -> u64 {
        self.friends | self.enemies
    }
}

pub type PseudoMoveFn = fn(&MoveContext, &mut Vec<Move>);

/// Generators indexed by `PieceCode::index()`.
pub const PSEUDO_MOVE_TABLE: [PseudoMoveFn; PIECE_CODE_COUNT] = [
    unmoved_pawn_moves,
    moved_pawn_moves,
    knight_moves,
    bishop_moves,
    rook_moves,
    queen_moves,
    king_both_sides_moves,
    king_short_only_moves,
    king_long_only_moves,
    king_no_rights_moves,
];

#[inline]
pub fn dispatch_pseudo_moves(code: PieceCode, context: &MoveContext, out: &mut Vec<Move>) {
    PSEUDO_MOVE_TABLE[code.index()](context, out);
}

/// Push one plain move per set bit of `targets`.
#[inline]
pub(crate) fn push_targets(origin: Square, mut targets: u64, out: &mut Vec<Move>) {
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        out.push(Move::to_square(origin, to));
        targets &= targets - 1;
    }
}

/// Pseudo-legal moves of every piece belonging to the side to move.
pub fn pseudo_legal_moves(state: &BoardState, out: &mut Vec<Move>) {
    let color = state.side_to_move;
    let mut base = MoveContext::for_square(state, 0, color);

    for code in ALL_PIECE_CODES {
        let mut pieces = state.pieces(color, code);
        while pieces != 0 {
            base.square = pieces.trailing_zeros() as Square;
            dispatch_pseudo_moves(code, &base, out);
            pieces &= pieces - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_follows_code_indexes() {
        // A lone knight and a lone king in the same context must differ.
        let context = MoveContext {
            square: 27,
            color: Color::Light,
            friends: 1u64 << 27,
            enemies: 0,
            enemy_pawns: 0,
            en_passant: None,
        };
        let mut knight = Vec::new();
        let mut king = Vec::new();
        dispatch_pseudo_moves(PieceCode::Knight, &context, &mut knight);
        dispatch_pseudo_moves(PieceCode::KingNoRights, &context, &mut king);
        assert_eq!(knight.len(), 8);
        assert_eq!(king.len(), 8);
        assert_ne!(knight, king);
    }

    #[test]
    fn start_position_has_twenty_pseudo_moves() {
        let position = Position::new_game();
        let mut moves = Vec::new();
        pseudo_legal_moves(position.state(), &mut moves);
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn push_targets_emits_one_move_per_bit() {
        let mut moves = Vec::new();
        push_targets(0, (1u64 << 1) | (1u64 << 8), &mut moves);
        assert_eq!(moves, vec![Move::to_square(0, 1), Move::to_square(0, 8)]);
    }
}
