use crate::move_generation::legal_move_shared::{push_targets, MoveContext};
use crate::moves::knight_moves::knight_attacks;
use crate::moves::move_descriptions::Move;

pub fn knight_moves(context: &MoveContext, out: &mut Vec<Move>) {
    push_targets(
        context.square,
        knight_attacks(context.square) & !context.friends,
        out,
    );
}

#[cfg(test)]
mod tests {
    use super::knight_moves;
    use crate::game_state::chess_types::Color;
    use crate::move_generation::legal_move_shared::MoveContext;

    #[test]
    fn knight_cannot_land_on_friends_but_captures_enemies() {
        // Knight on b1, friend on d2, enemy on c3.
        let context = MoveContext {
            square: 1,
            color: Color::Light,
            friends: (1u64 << 1) | (1u64 << 11),
            enemies: 1u64 << 18,
            enemy_pawns: 0,
            en_passant: None,
        };
        let mut moves = Vec::new();
        knight_moves(&context, &mut moves);
        let targets: Vec<u16> = moves.iter().map(|m| m.destination).collect();
        assert_eq!(targets, vec![16, 18]);
    }
}
