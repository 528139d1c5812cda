use crate::move_generation::legal_move_shared::{push_targets, MoveContext};
use crate::moves::move_descriptions::Move;
use crate::moves::rook_moves::rook_attacks;

pub fn rook_moves(context: &MoveContext, out: &mut Vec<Move>) {
    let targets = rook_attacks(context.square, context.occupancy()) & !context.friends;
    push_targets(context.square, targets, out);
}
