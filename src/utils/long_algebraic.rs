use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::move_descriptions::*;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// Render `mv` as long algebraic text. Castles print as the king's two-square
/// step (`e1g1`), promotions carry a lowercase suffix (`e7e8q`).
pub fn move_to_long_algebraic(position: &Position, mv: Move) -> Result<String, String> {
    let piece = position
        .piece_at(mv.origin)
        .ok_or_else(|| format!("No piece found on from-square {}", mv.origin))?;
    let to = mv
        .landing_square(piece.color)
        .ok_or_else(|| format!("Invalid destination code {} in move {mv}", mv.destination))?;

    let mut out = String::with_capacity(5);
    out.push_str(&square_to_algebraic(mv.origin)?);
    out.push_str(&square_to_algebraic(to)?);
    if let Some(kind) = mv.promotion_kind() {
        out.push(kind.to_char());
    }
    Ok(out)
}

/// Resolve long algebraic text against the legal moves of `position`.
pub fn long_algebraic_to_move(
    position: &mut Position,
    long_algebraic: &str,
) -> Result<Move, String> {
    let text = long_algebraic.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(format!("Invalid long algebraic move: {long_algebraic}"));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        Some(ch) => Some(
            PromotionKind::from_char(ch.to_ascii_lowercase())
                .ok_or_else(|| format!("Invalid promotion piece '{ch}' in {long_algebraic}"))?,
        ),
        None => None,
    };

    let piece = position
        .piece_at(from)
        .ok_or_else(|| format!("No piece on from-square: {}", &text[0..2]))?;
    if piece.color != position.side_to_move() {
        return Err("Attempted to move a piece that is not on side to move".to_owned());
    }

    let candidates = legal_moves(position).map_err(|e| e.to_string())?;
    candidates
        .into_iter()
        .find(|mv| {
            mv.origin == from
                && mv.landing_square(piece.color) == Some(to)
                && mv.promotion_kind() == promotion
        })
        .ok_or_else(|| format!("Illegal move in current position: {long_algebraic}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_apply::apply_move;

    #[test]
    fn renders_plain_castle_and_promotion_moves() {
        let p = Position::new_game();
        assert_eq!(
            move_to_long_algebraic(&p, Move::to_square(12, 28)).as_deref(),
            Ok("e2e4")
        );

        let p = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").expect("FEN");
        assert_eq!(
            move_to_long_algebraic(&p, Move::castle(60, CastleSide::Long)).as_deref(),
            Ok("e8c8")
        );

        let p = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN");
        assert_eq!(
            move_to_long_algebraic(&p, Move::promotion(48, 56, PromotionKind::Queen)).as_deref(),
            Ok("a7a8q")
        );
    }

    #[test]
    fn parses_against_legal_moves() {
        let mut p = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN");
        assert_eq!(
            long_algebraic_to_move(&mut p, "e1g1"),
            Ok(Move::castle(4, CastleSide::Short))
        );
        assert_eq!(long_algebraic_to_move(&mut p, "a1a8"), Ok(Move::to_square(0, 56)));

        let mut p = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN");
        assert_eq!(
            long_algebraic_to_move(&mut p, "a7a8N"),
            Ok(Move::promotion(48, 56, PromotionKind::Knight))
        );
        assert!(long_algebraic_to_move(&mut p, "a7a8").is_err());
    }

    #[test]
    fn rejects_malformed_or_illegal_text() {
        let mut p = Position::new_game();
        assert!(long_algebraic_to_move(&mut p, "e2").is_err());
        assert!(long_algebraic_to_move(&mut p, "e2e5").is_err());
        assert!(long_algebraic_to_move(&mut p, "e7e5").is_err());
        assert!(long_algebraic_to_move(&mut p, "e3e4").is_err());
        assert!(long_algebraic_to_move(&mut p, "e2e4x").is_err());
    }

    #[test]
    fn text_round_trips_through_a_game() {
        let mut p = Position::new_game();
        for text in [
            "e2e4", "d7d5", "e4d5", "g8f6", "f1b5", "c7c6", "d5c6", "d8d7", "c6b7", "e8d8", "b7a8q",
        ] {
            let mv = long_algebraic_to_move(&mut p, text).expect("move should resolve");
            assert_eq!(move_to_long_algebraic(&p, mv).as_deref(), Ok(text));
            apply_move(&mut p, mv).expect("move is legal");
        }
        assert_eq!(p.piece_at(56).map(|piece| piece.code), Some(PieceCode::Queen));
    }
}
