//! Runtime sliding-attack tables.
//!
//! `build.rs` persists one `(multiplier, index_bits)` pair per square; the
//! attack arrays themselves are filled on first use by ray tracing every
//! blocker arrangement through those multipliers.

use std::sync::OnceLock;

use crate::moves::magic_search::{
    blocker_arrangements, magic_index, relevant_mask, sliding_attacks, Slider,
};

include!(concat!(env!("OUT_DIR"), "/magic_numbers.rs"));

#[derive(Debug, Clone, Copy, Default)]
struct SquareMagic {
    mask: u64,
    magic: u64,
    bits: u32,
    offset: usize,
}

/// Flattened attack table for one slider kind.
#[derive(Debug)]
pub struct SliderTable {
    squares: [SquareMagic; 64],
    attacks: Vec<u64>,
}

impl SliderTable {
    fn build(slider: Slider, magics: &[(u64, u32); 64]) -> Self {
        let mut squares = [SquareMagic::default(); 64];
        let mut attacks = Vec::new();

        for square in 0..64u8 {
            let (magic, bits) = magics[square as usize];
            let mask = relevant_mask(slider, square);
            let offset = attacks.len();
            attacks.resize(offset + (1usize << bits), 0);

            for blockers in blocker_arrangements(mask) {
                let slot = offset + magic_index(blockers, mask, magic, bits);
                attacks[slot] = sliding_attacks(slider, square, blockers);
            }

            squares[square as usize] = SquareMagic {
                mask,
                magic,
                bits,
                offset,
            };
        }

        Self { squares, attacks }
    }

    #[inline]
    pub fn attacks(&self, square: u8, occupancy: u64) -> u64 {
        let entry = &self.squares[square as usize];
        self.attacks[entry.offset + magic_index(occupancy, entry.mask, entry.magic, entry.bits)]
    }

    /// Total number of stored attack sets across all squares.
    pub fn len(&self) -> usize {
        self.attacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }
}

static BISHOP_TABLE: OnceLock<SliderTable> = OnceLock::new();
static ROOK_TABLE: OnceLock<SliderTable> = OnceLock::new();

pub fn bishop_table() -> &'static SliderTable {
    BISHOP_TABLE.get_or_init(|| SliderTable::build(Slider::Bishop, &BISHOP_MAGICS))
}

pub fn rook_table() -> &'static SliderTable {
    ROOK_TABLE.get_or_init(|| SliderTable::build(Slider::Rook, &ROOK_MAGICS))
}
