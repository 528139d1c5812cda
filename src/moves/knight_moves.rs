use crate::game_state::chess_types::Square;

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KNIGHT_ATTACKS: [u64; 64] = leaper_table(&KNIGHT_OFFSETS);

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square as usize]
}

/// Attack sets for a piece that jumps by fixed `(file, rank)` offsets.
pub(crate) const fn leaper_table<const N: usize>(offsets: &[(i32, i32); N]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;

        while i < N {
            let f = file + offsets[i].0;
            let r = rank + offsets[i].1;
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                attacks |= 1u64 << (r * 8 + f);
            }
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::{knight_attacks, KNIGHT_ATTACKS};

    #[test]
    fn knight_attacks_from_d4_has_eight_targets() {
        let d4 = 27u8;
        assert_eq!(KNIGHT_ATTACKS[d4 as usize].count_ones(), 8);
        assert_eq!(knight_attacks(d4).count_ones(), 8);
    }

    #[test]
    fn corner_knight_does_not_wrap() {
        let h1 = 7u8;
        // f2 and g3 only.
        assert_eq!(knight_attacks(h1), (1u64 << 13) | (1u64 << 22));
    }
}
