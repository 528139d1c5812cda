//! King step moves plus castling candidates.
//!
//! The code variant decides which castles are offered. Transit safety is left
//! to the legality filter; here only the rights and the empty squares between
//! king and rook are checked.

use crate::game_state::chess_rules::castling_geometry;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{push_targets, MoveContext};
use crate::moves::king_moves::king_attacks;
use crate::moves::move_descriptions::Move;

pub fn king_both_sides_moves(context: &MoveContext, out: &mut Vec<Move>) {
    king_moves(context, PieceCode::KingBothSides, out);
}

pub fn king_short_only_moves(context: &MoveContext, out: &mut Vec<Move>) {
    king_moves(context, PieceCode::KingShortOnly, out);
}

pub fn king_long_only_moves(context: &MoveContext, out: &mut Vec<Move>) {
    king_moves(context, PieceCode::KingLongOnly, out);
}

pub fn king_no_rights_moves(context: &MoveContext, out: &mut Vec<Move>) {
    king_moves(context, PieceCode::KingNoRights, out);
}

fn king_moves(context: &MoveContext, code: PieceCode, out: &mut Vec<Move>) {
    push_targets(
        context.square,
        king_attacks(context.square) & !context.friends,
        out,
    );

    for side in [CastleSide::Short, CastleSide::Long] {
        if !code.can_castle(side) {
            continue;
        }
        let geometry = castling_geometry(context.color, side);
        if context.square != geometry.king_from {
            continue;
        }
        if context.friends & bit(geometry.rook_from) == 0 {
            continue;
        }
        if context.occupancy() & geometry.between != 0 {
            continue;
        }
        out.push(Move::castle(context.square, side));
    }
}
