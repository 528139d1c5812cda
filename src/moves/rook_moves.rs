use crate::game_state::chess_types::Square;
use crate::moves::magic_tables::rook_table;

/// Orthogonal move set from `square`, stopping on (and including) the first
/// occupied square of each ray.
#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    rook_table().attacks(square, occupancy)
}
