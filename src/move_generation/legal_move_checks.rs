//! Board control and king-safety queries.
//!
//! A square is attacked when some enemy piece has it in its capture pattern
//! given the current blockers. This answers "could any pseudo-legal reply
//! land on this square" without generating the replies: castling never
//! captures and every other reply captures exactly on its capture pattern.

use crate::game_state::chess_rules::castling_geometry;
use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rook_moves::rook_attacks;

/// Capture pattern of `piece` standing on `square`.
#[inline]
pub fn attacks_from(piece: Piece, square: Square, occupancy: u64) -> u64 {
    match piece.kind() {
        PieceKind::Pawn => pawn_attacks(piece.color, square),
        PieceKind::Knight => knight_attacks(square),
        PieceKind::Bishop => bishop_attacks(square, occupancy),
        PieceKind::Rook => rook_attacks(square, occupancy),
        PieceKind::Queen => queen_attacks(square, occupancy),
        PieceKind::King => king_attacks(square),
    }
}

/// Every square `color` attacks, own pieces included.
pub fn controlled_squares(position: &Position, color: Color) -> u64 {
    let state = position.state();
    let occupancy = state.occupancy_all();
    let mut controlled = 0u64;

    let mut pieces = state.occupancy(color);
    while pieces != 0 {
        let square = pieces.trailing_zeros() as Square;
        if let Some(piece) = state.piece_at(square) {
            controlled |= attacks_from(piece, square, occupancy);
        }
        pieces &= pieces - 1;
    }

    controlled
}

#[inline]
pub fn is_square_attacked(position: &Position, square: Square, attacker: Color) -> bool {
    let state = position.state();
    is_square_attacked_with(state, square, attacker, state.occupancy_all())
}

/// Attack test against an explicit blocker set, used when a piece is
/// hypothetically relocated.
pub fn is_square_attacked_with(
    state: &BoardState,
    square: Square,
    attacker: Color,
    occupancy: u64,
) -> bool {
    let pawns = state.pieces_of_kind(attacker, PieceKind::Pawn);
    if pawn_attacks(attacker.opposite(), square) & pawns != 0 {
        return true;
    }

    if knight_attacks(square) & state.pieces(attacker, PieceCode::Knight) != 0 {
        return true;
    }

    if king_attacks(square) & state.pieces_of_kind(attacker, PieceKind::King) != 0 {
        return true;
    }

    let queens = state.pieces(attacker, PieceCode::Queen);
    let diagonal = state.pieces(attacker, PieceCode::Bishop) | queens;
    if bishop_attacks(square, occupancy) & diagonal != 0 {
        return true;
    }

    let orthogonal = state.pieces(attacker, PieceCode::Rook) | queens;
    rook_attacks(square, occupancy) & orthogonal != 0
}

/// Whether `color`'s king could be captured by the opponent's next reply.
/// A position without that king reports `false`.
#[inline]
pub fn is_in_check(position: &Position, color: Color) -> bool {
    let Some(king_sq) = position.state().king_square(color) else {
        return false;
    };
    is_square_attacked(position, king_sq, color.opposite())
}

/// Castling transit test: the king may not stand attacked on its origin, nor
/// on any square it crosses or lands on. Each transit square is tested with
/// the king lifted off its origin and placed on that square.
pub fn castle_transit_is_safe(position: &Position, color: Color, side: CastleSide) -> bool {
    let state = position.state();
    let geometry = castling_geometry(color, side);
    let enemy = color.opposite();
    let base_occupancy = state.occupancy_all();

    if is_square_attacked_with(state, geometry.king_from, enemy, base_occupancy) {
        return false;
    }

    let without_king = base_occupancy & !bit(geometry.king_from);
    geometry.king_path.iter().all(|&square| {
        !is_square_attacked_with(state, square, enemy, without_king | bit(square))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn start_position_control() {
        let start = Position::new_game();
        let light = controlled_squares(&start, Color::Light);
        // Every third-rank square is covered by a pawn.
        assert_eq!(light & 0x0000_0000_00FF_0000, 0x0000_0000_00FF_0000);
        assert_eq!(light & 0xFFFF_FFFF_0000_0000, 0);
        assert!(!is_in_check(&start, Color::Light));
        assert!(!is_in_check(&start, Color::Dark));
    }

    #[test]
    fn rook_on_open_file_gives_check() {
        let p = position("k7/8/8/8/8/8/R7/1R5K b - - 0 1");
        assert!(is_in_check(&p, Color::Dark));
        assert!(!is_in_check(&p, Color::Light));
    }

    #[test]
    fn pawn_attacks_are_directional() {
        // Dark pawn on e5 attacks d4 and f4, not d6.
        let p = position("4k3/8/8/4p3/8/8/8/4K3 w - - 0 1");
        assert!(is_square_attacked(&p, 27, Color::Dark));
        assert!(is_square_attacked(&p, 29, Color::Dark));
        assert!(!is_square_attacked(&p, 43, Color::Dark));
    }

    #[test]
    fn blocked_slider_does_not_attack() {
        let p = position("4k3/8/8/8/8/8/4P3/4R1K1 w - - 0 1");
        assert!(is_square_attacked(&p, 12, Color::Light));
        // The e2 pawn shields e3 from the rook; only the pawn's diagonals count.
        let control = controlled_squares(&p, Color::Light);
        assert_eq!(control & bit(20), 0);
        assert_ne!(control & bit(19), 0);
    }

    #[test]
    fn castle_through_attacked_square_is_unsafe() {
        // Dark rook on f8 covers f1.
        let p = position("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!castle_transit_is_safe(&p, Color::Light, CastleSide::Short));
        assert!(castle_transit_is_safe(&p, Color::Light, CastleSide::Long));
    }

    #[test]
    fn castle_out_of_check_is_unsafe() {
        let p = position("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!castle_transit_is_safe(&p, Color::Light, CastleSide::Short));
        assert!(!castle_transit_is_safe(&p, Color::Light, CastleSide::Long));
    }

    #[test]
    fn attacked_rook_square_does_not_block_long_castle() {
        // b1 is attacked but the king never crosses it.
        let p = position("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(castle_transit_is_safe(&p, Color::Light, CastleSide::Long));
    }
}
