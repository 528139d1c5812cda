use crate::move_generation::legal_move_shared::{push_targets, MoveContext};
use crate::moves::move_descriptions::Move;
use crate::moves::queen_moves::queen_attacks;

pub fn queen_moves(context: &MoveContext, out: &mut Vec<Move>) {
    let targets = queen_attacks(context.square, context.occupancy()) & !context.friends;
    push_targets(context.square, targets, out);
}

#[cfg(test)]
mod tests {
    use super::queen_moves;
    use crate::game_state::chess_types::Color;
    use crate::move_generation::legal_move_shared::MoveContext;

    #[test]
    fn open_board_queen_on_d4() {
        let context = MoveContext {
            square: 27,
            color: Color::Dark,
            friends: 1u64 << 27,
            enemies: 0,
            enemy_pawns: 0,
            en_passant: None,
        };
        let mut moves = Vec::new();
        queen_moves(&context, &mut moves);
        assert_eq!(moves.len(), 27);
    }
}
