use crate::move_generation::legal_move_shared::{push_targets, MoveContext};
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::move_descriptions::Move;

pub fn bishop_moves(context: &MoveContext, out: &mut Vec<Move>) {
    let targets = bishop_attacks(context.square, context.occupancy()) & !context.friends;
    push_targets(context.square, targets, out);
}
