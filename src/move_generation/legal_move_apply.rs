//! Apply/undo by snapshot.
//!
//! Applying pushes the current `BoardState` onto the position's history and
//! then mutates in place; undo restores the snapshot wholesale.

use crate::game_state::chess_rules::{
    castling_geometry, code_after_move, corner_right, revoke_castling,
};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::is_legal_move;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::move_descriptions::{Destination, Move};
use crate::moves::pawn_moves::en_passant_victim;

/// Apply a move after checking it is legal for the side to move.
///
/// On error the position is left exactly as it was.
pub fn apply_move(position: &mut Position, mv: Move) -> MoveGenResult<()> {
    let piece = position
        .piece_at(mv.origin)
        .ok_or(MoveGenerationError::EmptyOrigin(mv.origin))?;
    if piece.color != position.side_to_move() {
        return Err(MoveGenerationError::WrongTurn {
            square: mv.origin,
            color: piece.color,
        });
    }
    if !is_legal_move(position, mv)? {
        return Err(MoveGenerationError::IllegalDestination {
            origin: mv.origin,
            destination: mv.destination,
        });
    }
    apply_move_unchecked(position, mv)
}

/// Apply a move already known to be pseudo-legal for the side to move.
pub(crate) fn apply_move_unchecked(position: &mut Position, mv: Move) -> MoveGenResult<()> {
    let piece = position
        .piece_at(mv.origin)
        .ok_or(MoveGenerationError::EmptyOrigin(mv.origin))?;
    let destination = mv
        .decode()
        .ok_or(MoveGenerationError::IllegalDestination {
            origin: mv.origin,
            destination: mv.destination,
        })?;

    position.push_history();
    let state = &mut position.state;
    let color = piece.color;
    let previous_en_passant = state.en_passant_square.take();
    let mut reset_clock = piece.kind() == PieceKind::Pawn;

    match destination {
        Destination::Castle(side) => {
            let geometry = castling_geometry(color, side);
            state.remove(geometry.king_from);
            if let Some(rook) = state.remove(geometry.rook_from) {
                state.place(geometry.rook_to, rook);
            }
            state.place(
                geometry.king_to,
                Piece::new(color, PieceCode::KingNoRights),
            );
        }
        Destination::Square(target) | Destination::Promotion { target, .. } => {
            if state.remove(target).is_some() {
                reset_clock = true;
                revoke_corner_right(state, target);
            } else if piece.kind() == PieceKind::Pawn
                && previous_en_passant == Some(target)
                && file_of(target) != file_of(mv.origin)
            {
                state.remove(en_passant_victim(color, target));
            }

            state.remove(mv.origin);
            let code = match destination {
                Destination::Promotion { kind, .. } => kind.piece_code(),
                _ => code_after_move(piece.code),
            };
            state.place(target, Piece::new(color, code));
            revoke_corner_right(state, mv.origin);

            if piece.kind() == PieceKind::Pawn && target.abs_diff(mv.origin) == 16 {
                state.en_passant_square = Some((target + mv.origin) / 2);
            }
        }
    }

    state.halfmove_clock = if reset_clock {
        0
    } else {
        state.halfmove_clock.saturating_add(1)
    };
    if color == Color::Dark {
        state.fullmove_number = state.fullmove_number.saturating_add(1);
    }
    state.side_to_move = color.opposite();

    Ok(())
}

/// Restore the position from before the most recent apply.
pub fn undo_move(position: &mut Position) -> MoveGenResult<()> {
    if position.pop_history() {
        Ok(())
    } else {
        Err(MoveGenerationError::EmptyHistory)
    }
}

/// A piece left or was captured on a corner: the king of that corner's color
/// loses the matching right.
fn revoke_corner_right(state: &mut BoardState, square: Square) {
    let Some((color, side)) = corner_right(square) else {
        return;
    };
    let Some(king_sq) = state.king_square(color) else {
        return;
    };
    let Some(king) = state.piece_at(king_sq) else {
        return;
    };
    let revoked = revoke_castling(king.code, side);
    if revoked != king.code {
        state.remove(king_sq);
        state.place(king_sq, Piece::new(color, revoked));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_descriptions::PromotionKind;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn double_step_sets_en_passant_and_moves_code() {
        let mut p = Position::new_game();
        apply_move(&mut p, Move::to_square(12, 28)).expect("e2e4 is legal");
        assert_eq!(p.en_passant_square(), Some(20));
        assert_eq!(p.piece_at(28).map(|x| x.code), Some(PieceCode::MovedPawn));
        assert_eq!(p.side_to_move(), Color::Dark);
        assert_eq!(p.fullmove_number(), 1);
        assert!(p.state().is_consistent());

        apply_move(&mut p, Move::to_square(62, 45)).expect("Nf6 is legal");
        assert_eq!(p.en_passant_square(), None);
        assert_eq!(p.halfmove_clock(), 1);
        assert_eq!(p.fullmove_number(), 2);
    }

    #[test]
    fn en_passant_removes_pawn_off_the_destination() {
        let mut p = position("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        apply_move(&mut p, Move::to_square(36, 43)).expect("exd6 e.p. is legal");
        assert_eq!(p.piece_at(35), None);
        assert_eq!(p.piece_at(43).map(|x| x.color), Some(Color::Light));
        assert_eq!(p.en_passant_square(), None);
        assert_eq!(p.halfmove_clock(), 0);
        assert_eq!(p.state().occupancy(Color::Dark).count_ones(), 1);
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let mut p = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        apply_move(&mut p, Move::castle(4, CastleSide::Short)).expect("O-O is legal");
        assert_eq!(p.piece_at(6).map(|x| x.code), Some(PieceCode::KingNoRights));
        assert_eq!(p.piece_at(5).map(|x| x.code), Some(PieceCode::Rook));
        assert_eq!(p.piece_at(7), None);
        assert_eq!(p.piece_at(4), None);
        assert_eq!(p.get_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");
    }

    #[test]
    fn rook_move_and_rook_capture_revoke_rights() {
        let mut p = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        // Ra1xa8: white loses long, black loses long.
        apply_move(&mut p, Move::to_square(0, 56)).expect("Rxa8 is legal");
        assert_eq!(p.piece_at(4).map(|x| x.code), Some(PieceCode::KingShortOnly));
        assert_eq!(p.piece_at(60).map(|x| x.code), Some(PieceCode::KingShortOnly));
        assert_eq!(p.get_fen(), "R3k2r/8/8/8/8/8/8/4K2R b Kk - 0 1");
    }

    #[test]
    fn promotion_replaces_pawn_code() {
        let mut p = position("4k3/P7/8/8/8/8/8/4K3 w - - 5 40");
        apply_move(&mut p, Move::promotion(48, 56, PromotionKind::Knight)).expect("a8=N");
        assert_eq!(p.piece_at(56), Some(Piece::new(Color::Light, PieceCode::Knight)));
        assert_eq!(p.halfmove_clock(), 0);
        assert!(p.state().is_consistent());
    }

    #[test]
    fn rejected_moves_leave_position_untouched() {
        let mut p = Position::new_game();
        let before = p.clone();

        assert_eq!(
            apply_move(&mut p, Move::to_square(20, 28)),
            Err(MoveGenerationError::EmptyOrigin(20))
        );
        assert_eq!(
            apply_move(&mut p, Move::to_square(52, 36)),
            Err(MoveGenerationError::WrongTurn {
                square: 52,
                color: Color::Dark
            })
        );
        assert!(matches!(
            apply_move(&mut p, Move::to_square(12, 36)),
            Err(MoveGenerationError::IllegalDestination { .. })
        ));
        assert_eq!(p, before);
        assert_eq!(undo_move(&mut p), Err(MoveGenerationError::EmptyHistory));
    }

    #[test]
    fn pinned_piece_cannot_expose_king() {
        // Light bishop e2 pinned by the e8 rook.
        let mut p = position("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1");
        assert!(matches!(
            apply_move(&mut p, Move::to_square(12, 21)),
            Err(MoveGenerationError::IllegalDestination { .. })
        ));
    }

    #[test]
    fn undo_restores_every_field() {
        let mut p = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let before = p.clone();
        apply_move(&mut p, Move::castle(4, CastleSide::Long)).expect("O-O-O is legal");
        undo_move(&mut p).expect("history has one entry");
        assert_eq!(p, before);
        assert_eq!(p.get_fen(), before.get_fen());
    }
}
