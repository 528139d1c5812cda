use crate::game_state::chess_types::{Color, Square};
use crate::moves::knight_moves::leaper_table;

pub const LIGHT_PAWN_ATTACKS: [u64; 64] = leaper_table(&[(-1, 1), (1, 1)]);
pub const DARK_PAWN_ATTACKS: [u64; 64] = leaper_table(&[(-1, -1), (1, -1)]);

/// Squares a pawn of `color` on `square` captures onto.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    match color {
        Color::Light => LIGHT_PAWN_ATTACKS[square as usize],
        Color::Dark => DARK_PAWN_ATTACKS[square as usize],
    }
}

/// Square directly in front of a pawn, `None` on the last rank.
#[inline]
pub const fn pawn_push_square(color: Color, square: Square) -> Option<Square> {
    match color {
        Color::Light if square < 56 => Some(square + 8),
        Color::Dark if square >= 8 => Some(square - 8),
        _ => None,
    }
}

/// Square a capturing pawn removes when it lands on the en-passant target.
#[inline]
pub const fn en_passant_victim(color: Color, target: Square) -> Square {
    match color {
        Color::Light => target - 8,
        Color::Dark => target + 8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_pawn_attacks_from_e2() {
        let e2 = 12u8;
        let expected = (1u64 << 19) | (1u64 << 21);
        assert_eq!(LIGHT_PAWN_ATTACKS[e2 as usize], expected);
        assert_eq!(pawn_attacks(Color::Light, e2), expected);
    }

    #[test]
    fn dark_pawn_attacks_from_e7() {
        let e7 = 52u8;
        let expected = (1u64 << 43) | (1u64 << 45);
        assert_eq!(DARK_PAWN_ATTACKS[e7 as usize], expected);
        assert_eq!(pawn_attacks(Color::Dark, e7), expected);
    }

    #[test]
    fn edge_pawns_attack_one_square() {
        assert_eq!(pawn_attacks(Color::Light, 8).count_ones(), 1);
        assert_eq!(pawn_attacks(Color::Dark, 55).count_ones(), 1);
    }

    #[test]
    fn push_and_en_passant_squares() {
        assert_eq!(pawn_push_square(Color::Light, 12), Some(20));
        assert_eq!(pawn_push_square(Color::Dark, 52), Some(44));
        assert_eq!(pawn_push_square(Color::Light, 60), None);
        // d6 target removes the d5 pawn; d3 target removes d4.
        assert_eq!(en_passant_victim(Color::Light, 43), 35);
        assert_eq!(en_passant_victim(Color::Dark, 19), 27);
    }
}
