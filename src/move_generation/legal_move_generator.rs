//! Full legal move generation pipeline.
//!
//! Collects pseudo-legal moves through the per-code dispatch table, applies
//! each candidate, drops those that leave the mover's king capturable, and
//! annotates the survivors.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{apply_move_unchecked, undo_move};
use crate::move_generation::legal_move_checks::{castle_transit_is_safe, is_in_check};
use crate::move_generation::legal_move_shared::{
    dispatch_pseudo_moves, pseudo_legal_moves, MoveContext,
};
use crate::move_generation::move_generator::{
    GeneratedMove, MoveAnnotations, MoveGenResult, MoveGenerationError, MoveGenerator,
};
use crate::moves::move_descriptions::{Destination, Move};

/// Legal moves with check and checkmate annotations.
pub struct LegalMoveGenerator;

/// Legal moves annotated only with what the board shows before the move.
pub struct FastLegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, position: &mut Position) -> MoveGenResult<Vec<GeneratedMove>> {
        generate_legal_moves_internal(position, true)
    }
}

impl MoveGenerator for FastLegalMoveGenerator {
    fn generate_legal_moves(&self, position: &mut Position) -> MoveGenResult<Vec<GeneratedMove>> {
        generate_legal_moves_internal(position, false)
    }
}

/// Plain legal move list for the side to move.
pub fn legal_moves(position: &mut Position) -> MoveGenResult<Vec<Move>> {
    let mut pseudo = Vec::with_capacity(64);
    pseudo_legal_moves(position.state(), &mut pseudo);

    let mut legal = Vec::with_capacity(pseudo.len());
    for mv in pseudo {
        if passes_king_safety(position, mv)? {
            legal.push(mv);
        }
    }
    Ok(legal)
}

/// Early-exit variant of `legal_moves(..).is_empty()`.
pub fn has_legal_move(position: &mut Position) -> MoveGenResult<bool> {
    let mut pseudo = Vec::with_capacity(64);
    pseudo_legal_moves(position.state(), &mut pseudo);
    for mv in pseudo {
        if passes_king_safety(position, mv)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Pseudo-legal moves of the piece the caller expects on `square`.
pub fn pseudo_moves_for_piece(
    position: &Position,
    square: Square,
    expected: Piece,
) -> MoveGenResult<Vec<Move>> {
    let found = position.piece_at(square);
    if found != Some(expected) {
        return Err(MoveGenerationError::PieceMismatch {
            square,
            expected,
            found,
        });
    }
    if expected.color != position.side_to_move() {
        return Err(MoveGenerationError::WrongTurn {
            square,
            color: expected.color,
        });
    }

    let context = MoveContext::for_square(position.state(), square, expected.color);
    let mut out = Vec::new();
    dispatch_pseudo_moves(expected.code, &context, &mut out);
    Ok(out)
}

/// Whether `mv` is legal for the side to move. The position is unchanged on
/// return.
pub fn is_legal_move(position: &mut Position, mv: Move) -> MoveGenResult<bool> {
    let Some(piece) = position.piece_at(mv.origin) else {
        return Ok(false);
    };
    if piece.color != position.side_to_move() {
        return Ok(false);
    }
    if !pseudo_moves_for_piece(position, mv.origin, piece)?.contains(&mv) {
        return Ok(false);
    }
    passes_king_safety(position, mv)
}

/// Pseudo-legal `mv` does not leave the mover's king capturable. Castles are
/// additionally refused out of, through, or into check.
fn passes_king_safety(position: &mut Position, mv: Move) -> MoveGenResult<bool> {
    let mover = position.side_to_move();
    if let Some(Destination::Castle(side)) = mv.decode() {
        if !castle_transit_is_safe(position, mover, side) {
            return Ok(false);
        }
    }

    apply_move_unchecked(position, mv)?;
    let safe = !is_in_check(position, mover);
    undo_move(position)?;
    Ok(safe)
}

fn generate_legal_moves_internal(
    position: &mut Position,
    annotate_checks: bool,
) -> MoveGenResult<Vec<GeneratedMove>> {
    let mut pseudo = Vec::with_capacity(64);
    pseudo_legal_moves(position.state(), &mut pseudo);

    let mover = position.side_to_move();
    let mut legal = Vec::with_capacity(pseudo.len());

    for mv in pseudo {
        if let Some(Destination::Castle(side)) = mv.decode() {
            if !castle_transit_is_safe(position, mover, side) {
                continue;
            }
        }

        let mut annotations = board_annotations(position, mv);
        apply_move_unchecked(position, mv)?;

        if is_in_check(position, mover) {
            undo_move(position)?;
            continue;
        }

        if annotate_checks {
            annotations.gives_check = is_in_check(position, mover.opposite());
            if annotations.gives_check {
                annotations.is_checkmate = !has_legal_move(position)?;
            }
        }

        undo_move(position)?;
        legal.push(GeneratedMove { mv, annotations });
    }

    Ok(legal)
}

/// Capture, en-passant, castle and promotion tags read off the board before
/// the move is made.
fn board_annotations(position: &Position, mv: Move) -> MoveAnnotations {
    let mut annotations = MoveAnnotations::default();
    match mv.decode() {
        Some(Destination::Castle(_)) => annotations.is_castle = true,
        Some(Destination::Promotion { target, .. }) => {
            annotations.is_promotion = true;
            annotations.is_capture = position.piece_at(target).is_some();
        }
        Some(Destination::Square(target)) => {
            if position.piece_at(target).is_some() {
                annotations.is_capture = true;
            } else if position.en_passant_square() == Some(target)
                && file_of(target) != file_of(mv.origin)
                && position
                    .piece_at(mv.origin)
                    .is_some_and(|p| p.kind() == PieceKind::Pawn)
            {
                annotations.is_capture = true;
                annotations.is_en_passant = true;
            }
        }
        None => {}
    }
    annotations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::castling_geometry;
    use crate::move_generation::legal_move_checks::is_square_attacked;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn fast_generator_matches_legal_move_count_on_startpos() {
        let mut game = Position::new_game();
        let annotated = LegalMoveGenerator
            .generate_legal_moves(&mut game)
            .expect("annotated move generation should succeed");
        let fast = FastLegalMoveGenerator
            .generate_legal_moves(&mut game)
            .expect("fast move generation should succeed");
        assert_eq!(annotated.len(), fast.len());
        assert_eq!(fast.len(), 20);
        assert!(fast.iter().all(|m| !m.annotations.is_capture));
        assert_eq!(game, Position::new_game());
    }

    #[test]
    fn back_rank_mate_has_no_moves() {
        let mut p = position("k7/8/8/8/8/8/R7/1R5K b - - 0 1");
        assert!(legal_moves(&mut p).expect("generation").is_empty());
        assert!(is_in_check(&p, Color::Dark));
    }

    #[test]
    fn queen_stalemate_has_no_moves() {
        let mut p = position("k7/8/1Q6/8/8/8/8/7K b - - 0 1");
        assert!(!has_legal_move(&mut p).expect("generation"));
        assert!(!is_in_check(&p, Color::Dark));
    }

    #[test]
    fn mating_move_is_annotated() {
        // Rh2-a2 mates: the b1 rook covers the b-file.
        let mut p = position("k7/8/8/8/8/8/7R/1R5K w - - 0 1");
        let moves = LegalMoveGenerator
            .generate_legal_moves(&mut p)
            .expect("generation");
        let mate = moves
            .iter()
            .find(|m| m.mv == Move::to_square(15, 8))
            .expect("Ra2 is legal");
        assert!(mate.annotations.gives_check);
        assert!(mate.annotations.is_checkmate);
    }

    #[test]
    fn piece_mismatch_is_reported() {
        let p = Position::new_game();
        let err = pseudo_moves_for_piece(&p, 0, Piece::new(Color::Light, PieceCode::Queen))
            .expect_err("a1 holds a rook");
        assert!(matches!(err, MoveGenerationError::PieceMismatch { square: 0, .. }));

        let err = pseudo_moves_for_piece(&p, 56, Piece::new(Color::Dark, PieceCode::Rook))
            .expect_err("dark is not to move");
        assert!(matches!(err, MoveGenerationError::WrongTurn { square: 56, .. }));
    }

    #[test]
    fn castles_need_safe_transit() {
        let mut p = position("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let moves = legal_moves(&mut p).expect("generation");
        assert!(!moves.contains(&Move::castle(4, CastleSide::Short)));
        assert!(moves.contains(&Move::castle(4, CastleSide::Long)));
    }

    #[test]
    fn en_passant_annotation() {
        let mut p = position("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let moves = FastLegalMoveGenerator
            .generate_legal_moves(&mut p)
            .expect("generation");
        let ep = moves
            .iter()
            .find(|m| m.mv == Move::to_square(36, 43))
            .expect("exd6 e.p. is legal");
        assert!(ep.annotations.is_en_passant);
        assert!(ep.annotations.is_capture);
    }

    /// Literal king-capture simulation: some opponent pseudo-reply lands on
    /// the mover's king.
    fn reply_captures_king(state: &BoardState, king_color: Color) -> bool {
        let Some(king_sq) = state.king_square(king_color) else {
            return true;
        };
        let mut replies = Vec::new();
        pseudo_legal_moves(state, &mut replies);
        replies
            .iter()
            .any(|r| r.landing_square(state.side_to_move) == Some(king_sq) && !r.is_castle())
    }

    /// The king placed on `square` with the opponent to move.
    fn king_relocated(state: &BoardState, color: Color, from: Square, to: Square) -> BoardState {
        let mut scratch = *state;
        if let Some(king) = scratch.remove(from) {
            scratch.place(to, king);
        }
        scratch.side_to_move = color.opposite();
        scratch
    }

    fn simulated_legal(position: &mut Position, mv: Move) -> bool {
        let mover = position.side_to_move();
        if let Some(Destination::Castle(side)) = mv.decode() {
            let g = castling_geometry(mover, side);
            let state = *position.state();
            for square in [g.king_from, g.king_path[0], g.king_path[1]] {
                if reply_captures_king(&king_relocated(&state, mover, g.king_from, square), mover) {
                    return false;
                }
            }
            return true;
        }
        apply_move_unchecked(position, mv).expect("pseudo move applies");
        let legal = !reply_captures_king(position.state(), mover);
        undo_move(position).expect("undo");
        legal
    }

    fn cross_check(position: &mut Position, depth: u8) {
        let mut pseudo = Vec::new();
        pseudo_legal_moves(position.state(), &mut pseudo);
        for mv in pseudo {
            let fast = passes_king_safety(position, mv).expect("legality test");
            assert_eq!(fast, simulated_legal(position, mv), "{} in {}", mv, position.get_fen());
            if fast && depth > 1 {
                apply_move_unchecked(position, mv).expect("apply");
                cross_check(position, depth - 1);
                undo_move(position).expect("undo");
            }
        }
    }

    #[test]
    fn attack_test_agrees_with_reply_simulation() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
        ] {
            let mut p = position(fen);
            cross_check(&mut p, 2);
        }
    }

    #[test]
    fn legal_moves_never_expose_the_king() {
        let mut p = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let mover = p.side_to_move();
        for mv in legal_moves(&mut p).expect("generation") {
            apply_move_unchecked(&mut p, mv).expect("apply");
            let king = p.state().king_square(mover).expect("king present");
            assert!(!is_square_attacked(&p, king, mover.opposite()));
            undo_move(&mut p).expect("undo");
        }
    }
}
