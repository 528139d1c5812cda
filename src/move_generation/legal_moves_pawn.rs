use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::MoveContext;
use crate::moves::move_descriptions::{Move, PROMOTION_KINDS};
use crate::moves::pawn_moves::{en_passant_victim, pawn_attacks, pawn_push_square};

/// Pawn still on its home rank: may double-step.
pub fn unmoved_pawn_moves(context: &MoveContext, out: &mut Vec<Move>) {
    pawn_moves(context, true, out);
}

/// Pawn that has already moved: no double step, may capture en passant.
pub fn moved_pawn_moves(context: &MoveContext, out: &mut Vec<Move>) {
    pawn_moves(context, false, out);
    push_en_passant(context, out);
}

fn pawn_moves(context: &MoveContext, may_double_step: bool, out: &mut Vec<Move>) {
    let from = context.square;
    let color = context.color;
    let occupancy = context.occupancy();

    if let Some(one) = pawn_push_square(color, from) {
        if occupancy & bit(one) == 0 {
            push_pawn_move(from, one, color, out);

            if may_double_step {
                if let Some(two) = pawn_push_square(color, one) {
                    if occupancy & bit(two) == 0 {
                        out.push(Move::to_square(from, two));
                    }
                }
            }
        }
    }

    let mut captures = pawn_attacks(color, from) & context.enemies;
    while captures != 0 {
        let to = captures.trailing_zeros() as Square;
        push_pawn_move(from, to, color, out);
        captures &= captures - 1;
    }
}

fn push_en_passant(context: &MoveContext, out: &mut Vec<Move>) {
    let Some(target) = context.en_passant else {
        return;
    };
    if pawn_attacks(context.color, context.square) & bit(target) == 0 {
        return;
    }
    if context.occupancy() & bit(target) != 0 {
        return;
    }
    if context.enemy_pawns & bit(en_passant_victim(context.color, target)) == 0 {
        return;
    }
    out.push(Move::to_square(context.square, target));
}

/// Landing on the promotion rank expands into the four promotion bands.
#[inline]
fn push_pawn_move(from: Square, to: Square, color: Color, out: &mut Vec<Move>) {
    if rank_of(to) == color.promotion_rank() {
        for kind in PROMOTION_KINDS {
            out.push(Move::promotion(from, to, kind));
        }
    } else {
        out.push(Move::to_square(from, to));
    }
}
