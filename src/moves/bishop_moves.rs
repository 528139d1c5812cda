use crate::game_state::chess_types::Square;
use crate::moves::magic_tables::bishop_table;

/// Diagonal move set from `square`, stopping on (and including) the first
/// occupied square of each ray.
#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    bishop_table().attacks(square, occupancy)
}
