//! Randomized magic-number search for sliding-piece attack tables.
//!
//! For every square a slider's blocker-relevant mask is enumerated into all of
//! its blocker arrangements, each arrangement is resolved into its true move
//! set by ray tracing, and random sparse 64-bit multipliers are tried until one
//! maps every arrangement to a table slot without two different move sets
//! landing in the same slot.
//!
//! This file is compiled twice: once inside `build.rs`, which persists the
//! multipliers and index widths into `OUT_DIR`, and once as a library module so
//! the runtime tables can be rebuilt and re-verified. It therefore depends only
//! on `std` and `rand`.

use std::error::Error;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Seed used by the build. Changing it changes every generated multiplier.
pub const DEFAULT_MAGIC_SEED: u64 = 0x5EED_0F_C4E55;

/// Sliding piece kinds that need magic lookups. Queens reuse both tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slider {
    Bishop,
    Rook,
}

impl Slider {
    #[inline]
    pub const fn directions(self) -> [(i32, i32); 4] {
        match self {
            Slider::Bishop => BISHOP_DIRECTIONS,
            Slider::Rook => ROOK_DIRECTIONS,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Slider::Bishop => "bishop",
            Slider::Rook => "rook",
        }
    }
}

/// Multiplier and index width found for one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagicEntry {
    pub magic: u64,
    pub bits: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct MagicSearchConfig {
    pub seed: u64,
    /// Candidates tried at each width narrower than the relevant-mask width.
    pub trials_per_width: u32,
    /// Candidates tried at the relevant-mask width before giving up.
    pub trials_at_full_width: u32,
}

impl Default for MagicSearchConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_MAGIC_SEED,
            trials_per_width: 1_000,
            trials_at_full_width: 10_000_000,
        }
    }
}

/// No collision-free multiplier was found within the trial budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagicSearchError {
    pub slider: Slider,
    pub square: u8,
    pub bits: u32,
}

impl fmt::Display for MagicSearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no collision-free {} magic found for square {} at {} index bits",
            self.slider.name(),
            self.square,
            self.bits
        )
    }
}

impl Error for MagicSearchError {}

/// Every square the slider reaches from `square` on an empty board.
pub fn attack_mask(slider: Slider, square: u8) -> u64 {
    sliding_attacks(slider, square, 0)
}

/// Squares whose occupancy can change the slider's move set.
///
/// The last square of each ray is dropped: nothing beyond the board edge can
/// be blocked by it.
pub fn relevant_mask(slider: Slider, square: u8) -> u64 {
    let file = i32::from(square % 8);
    let rank = i32::from(square / 8);
    let mut mask = 0u64;

    for (file_step, rank_step) in slider.directions() {
        let mut f = file + file_step;
        let mut r = rank + rank_step;
        while on_board(f + file_step, r + rank_step) {
            mask |= 1u64 << (r * 8 + f);
            f += file_step;
            r += rank_step;
        }
    }

    mask
}

/// Ground-truth move set: rays stop on (and include) the first blocker.
pub fn sliding_attacks(slider: Slider, square: u8, blockers: u64) -> u64 {
    let file = i32::from(square % 8);
    let rank = i32::from(square / 8);
    let mut attacks = 0u64;

    for (file_step, rank_step) in slider.directions() {
        let mut f = file + file_step;
        let mut r = rank + rank_step;
        while on_board(f, r) {
            let bit = 1u64 << (r * 8 + f);
            attacks |= bit;
            if blockers & bit != 0 {
                break;
            }
            f += file_step;
            r += rank_step;
        }
    }

    attacks
}

/// All `2^popcount(mask)` subsets of `mask`, starting with the empty set.
pub fn blocker_arrangements(mask: u64) -> Vec<u64> {
    let mut out = Vec::with_capacity(1usize << mask.count_ones());
    let mut subset = 0u64;
    loop {
        out.push(subset);
        subset = subset.wrapping_sub(mask) & mask;
        if subset == 0 {
            break;
        }
    }
    out
}

/// Number of different move sets among all blocker arrangements of a square.
pub fn distinct_move_sets(slider: Slider, square: u8) -> usize {
    let mut sets: Vec<u64> = blocker_arrangements(relevant_mask(slider, square))
        .into_iter()
        .map(|blockers| sliding_attacks(slider, square, blockers))
        .collect();
    sets.sort_unstable();
    sets.dedup();
    sets.len()
}

/// Theoretical floor for the index width: `ceil(log2(distinct move sets))`.
pub fn min_index_bits(slider: Slider, square: u8) -> u32 {
    let distinct = distinct_move_sets(slider, square).max(2);
    usize::BITS - (distinct - 1).leading_zeros()
}

#[inline]
pub fn magic_index(blockers: u64, mask: u64, magic: u64, bits: u32) -> usize {
    ((blockers & mask).wrapping_mul(magic) >> (64 - bits)) as usize
}

/// Search one square, narrowest width first.
///
/// Widths below the relevant-mask popcount get `trials_per_width` candidates
/// each; the full width gets `trials_at_full_width`.
pub fn find_magic(
    slider: Slider,
    square: u8,
    config: &MagicSearchConfig,
    rng: &mut StdRng,
) -> Result<MagicEntry, MagicSearchError> {
    let mask = relevant_mask(slider, square);
    let arrangements = blocker_arrangements(mask);
    let move_sets: Vec<u64> = arrangements
        .iter()
        .map(|&blockers| sliding_attacks(slider, square, blockers))
        .collect();

    let full_bits = mask.count_ones();
    let floor_bits = min_index_bits(slider, square).min(full_bits);
    let mut slots = SlotTable::new(1usize << full_bits);

    for bits in floor_bits..=full_bits {
        let trials = if bits == full_bits {
            config.trials_at_full_width
        } else {
            config.trials_per_width
        };

        for _ in 0..trials {
            let candidate = sparse_random(rng);
            if slots.accepts(candidate, bits, mask, &arrangements, &move_sets) {
                return Ok(MagicEntry {
                    magic: candidate,
                    bits,
                });
            }
        }
    }

    Err(MagicSearchError {
        slider,
        square,
        bits: full_bits,
    })
}

/// Search all 64 squares of one slider with a single seeded generator.
pub fn find_all_magics(
    slider: Slider,
    config: &MagicSearchConfig,
) -> Result<[MagicEntry; 64], MagicSearchError> {
    let mut rng = StdRng::seed_from_u64(config.seed ^ slider_salt(slider));
    let mut out = [MagicEntry { magic: 0, bits: 0 }; 64];
    for square in 0..64u8 {
        out[square as usize] = find_magic(slider, square, config, &mut rng)?;
    }
    Ok(out)
}

/// True when `entry` maps every arrangement of the square without a
/// destructive collision.
pub fn verify_magic(slider: Slider, square: u8, entry: MagicEntry) -> bool {
    let mask = relevant_mask(slider, square);
    let arrangements = blocker_arrangements(mask);
    let move_sets: Vec<u64> = arrangements
        .iter()
        .map(|&blockers| sliding_attacks(slider, square, blockers))
        .collect();
    let mut slots = SlotTable::new(1usize << entry.bits);
    slots.accepts(entry.magic, entry.bits, mask, &arrangements, &move_sets)
}

const fn slider_salt(slider: Slider) -> u64 {
    match slider {
        Slider::Bishop => 0xB15B_0000,
        Slider::Rook => 0x2008_0000,
    }
}

#[inline]
const fn on_board(file: i32, rank: i32) -> bool {
    file >= 0 && file < 8 && rank >= 0 && rank < 8
}

#[inline]
fn sparse_random(rng: &mut StdRng) -> u64 {
    rng.random::<u64>() & rng.random::<u64>() & rng.random::<u64>()
}

/// Scratch table reused across candidates; a slot counts as filled only when
/// its stamp matches the current trial.
struct SlotTable {
    move_sets: Vec<u64>,
    stamps: Vec<u32>,
    trial: u32,
}

impl SlotTable {
    fn new(size: usize) -> Self {
        Self {
            move_sets: vec![0; size],
            stamps: vec![0; size],
            trial: 0,
        }
    }

    fn accepts(
        &mut self,
        magic: u64,
        bits: u32,
        mask: u64,
        arrangements: &[u64],
        move_sets: &[u64],
    ) -> bool {
        self.trial = self.trial.wrapping_add(1);
        if self.trial == 0 {
            self.stamps.fill(0);
            self.trial = 1;
        }

        for (&blockers, &moves) in arrangements.iter().zip(move_sets) {
            let slot = magic_index(blockers, mask, magic, bits);
            if self.stamps[slot] == self.trial {
                if self.move_sets[slot] != moves {
                    return false;
                }
            } else {
                self.stamps[slot] = self.trial;
                self.move_sets[slot] = moves;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relevant_mask_drops_board_edges() {
        let a1 = 0u8;
        let d4 = 27u8;
        assert_eq!(relevant_mask(Slider::Rook, a1).count_ones(), 12);
        assert_eq!(relevant_mask(Slider::Rook, d4).count_ones(), 10);
        assert_eq!(relevant_mask(Slider::Bishop, a1).count_ones(), 6);
        assert_eq!(relevant_mask(Slider::Bishop, d4).count_ones(), 9);
        assert_eq!(relevant_mask(Slider::Rook, a1) & (1u64 << 56), 0);
        assert_eq!(relevant_mask(Slider::Rook, a1) & (1u64 << 7), 0);
    }

    #[test]
    fn attack_mask_covers_whole_rays() {
        let d4 = 27u8;
        assert_eq!(attack_mask(Slider::Rook, d4).count_ones(), 14);
        assert_eq!(attack_mask(Slider::Bishop, d4).count_ones(), 13);
    }

    #[test]
    fn blocker_stops_ray_and_is_included() {
        let a1 = 0u8;
        let a4 = 1u64 << 24;
        let attacks = sliding_attacks(Slider::Rook, a1, a4);
        assert_ne!(attacks & a4, 0);
        assert_eq!(attacks & (1u64 << 32), 0);
        assert_eq!(attacks & 0xFE, 0xFE);
    }

    #[test]
    fn arrangements_enumerate_every_subset_once() {
        let mask = relevant_mask(Slider::Bishop, 0);
        let mut arrangements = blocker_arrangements(mask);
        assert_eq!(arrangements.len(), 1 << mask.count_ones());
        assert!(arrangements.iter().all(|b| b & !mask == 0));
        arrangements.sort_unstable();
        arrangements.dedup();
        assert_eq!(arrangements.len(), 1 << mask.count_ones());
    }

    #[test]
    fn floor_width_follows_distinct_move_sets() {
        // A rook in the corner sees 7 * 7 = 49 distinct move sets.
        assert_eq!(distinct_move_sets(Slider::Rook, 0), 49);
        assert_eq!(min_index_bits(Slider::Rook, 0), 6);
        // d4 rook: 3 * 4 * 3 * 4.
        assert_eq!(distinct_move_sets(Slider::Rook, 27), 144);
        assert_eq!(min_index_bits(Slider::Rook, 27), 8);
    }

    #[test]
    fn found_magic_is_collision_free() {
        let config = MagicSearchConfig::default();
        let mut rng = StdRng::seed_from_u64(config.seed);
        for square in [0u8, 27, 36, 63] {
            let entry = find_magic(Slider::Bishop, square, &config, &mut rng)
                .expect("bishop magic should be found");
            assert!(entry.bits <= relevant_mask(Slider::Bishop, square).count_ones());
            assert!(entry.bits >= min_index_bits(Slider::Bishop, square));
            assert!(verify_magic(Slider::Bishop, square, entry));
        }
    }

    #[test]
    fn search_is_reproducible_for_a_seed() {
        let config = MagicSearchConfig::default();
        let mut first = StdRng::seed_from_u64(7);
        let mut second = StdRng::seed_from_u64(7);
        let a = find_magic(Slider::Rook, 9, &config, &mut first).expect("magic");
        let b = find_magic(Slider::Rook, 9, &config, &mut second).expect("magic");
        assert_eq!(a, b);
    }

    #[test]
    fn exhausted_budget_reports_square_and_kind() {
        let config = MagicSearchConfig {
            trials_per_width: 0,
            trials_at_full_width: 0,
            ..MagicSearchConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let err = find_magic(Slider::Rook, 18, &config, &mut rng).expect_err("no trials");
        assert_eq!(err.slider, Slider::Rook);
        assert_eq!(err.square, 18);
        assert_eq!(err.bits, 10);
        assert!(err.to_string().contains("rook"));
    }

    #[test]
    fn zero_multiplier_collides() {
        let entry = MagicEntry { magic: 0, bits: 9 };
        assert!(!verify_magic(Slider::Bishop, 27, entry));
    }
}
