use crate::game_state::chess_types::*;

/// Complete mutable state of a position; one copy is pushed per applied move.
///
/// `squares`, `piece_index` and `occupancy_by_color` describe the same board
/// and are only changed together through `place` / `remove`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardState {
    pub squares: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub en_passant_square: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // [color][piece_code]
    pub piece_index: [[u64; PIECE_CODE_COUNT]; 2],
    pub occupancy_by_color: [u64; 2],
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            squares: [None; 64],
            side_to_move: Color::Light,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            piece_index: [[0; PIECE_CODE_COUNT]; 2],
            occupancy_by_color: [0; 2],
        }
    }
}

impl BoardState {
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square as usize]
    }

    #[inline]
    pub fn occupancy_all(&self) -> u64 {
        self.occupancy_by_color[0] | self.occupancy_by_color[1]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn pieces(&self, color: Color, code: PieceCode) -> u64 {
        self.piece_index[color.index()][code.index()]
    }

    /// Every square holding `kind` for `color`, whatever its code variant.
    pub fn pieces_of_kind(&self, color: Color, kind: PieceKind) -> u64 {
        let index = &self.piece_index[color.index()];
        match kind {
            PieceKind::Pawn => {
                index[PieceCode::UnmovedPawn.index()] | index[PieceCode::MovedPawn.index()]
            }
            PieceKind::Knight => index[PieceCode::Knight.index()],
            PieceKind::Bishop => index[PieceCode::Bishop.index()],
            PieceKind::Rook => index[PieceCode::Rook.index()],
            PieceKind::Queen => index[PieceCode::Queen.index()],
            PieceKind::King => KING_CODES
                .iter()
                .fold(0u64, |acc, code| acc | index[code.index()]),
        }
    }

    /// Square of `color`'s king, or `None` once it has been captured.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces_of_kind(color, PieceKind::King);
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as Square)
        }
    }

    /// Put `piece` on an empty square.
    #[inline]
    pub(crate) fn place(&mut self, square: Square, piece: Piece) {
        let mask = bit(square);
        self.squares[square as usize] = Some(piece);
        self.piece_index[piece.color.index()][piece.code.index()] |= mask;
        self.occupancy_by_color[piece.color.index()] |= mask;
    }

    /// Clear a square, returning what stood there.
    #[inline]
    pub(crate) fn remove(&mut self, square: Square) -> Option<Piece> {
        let piece = self.squares[square as usize].take()?;
        let mask = !bit(square);
        self.piece_index[piece.color.index()][piece.code.index()] &= mask;
        self.occupancy_by_color[piece.color.index()] &= mask;
        Some(piece)
    }

    /// Re-derive occupancy from the squares array and compare.
    pub fn is_consistent(&self) -> bool {
        let mut index = [[0u64; PIECE_CODE_COUNT]; 2];
        let mut occupancy = [0u64; 2];
        for (square, slot) in self.squares.iter().enumerate() {
            if let Some(piece) = slot {
                index[piece.color.index()][piece.code.index()] |= 1u64 << square;
                occupancy[piece.color.index()] |= 1u64 << square;
            }
        }
        index == self.piece_index && occupancy == self.occupancy_by_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_and_remove_keep_indexes_in_sync() {
        let mut state = BoardState::default();
        let rook = Piece::new(Color::Dark, PieceCode::Rook);

        state.place(63, rook);
        assert_eq!(state.piece_at(63), Some(rook));
        assert_eq!(state.pieces(Color::Dark, PieceCode::Rook), 1u64 << 63);
        assert_eq!(state.occupancy(Color::Dark), 1u64 << 63);
        assert!(state.is_consistent());

        assert_eq!(state.remove(63), Some(rook));
        assert_eq!(state.remove(63), None);
        assert_eq!(state.occupancy_all(), 0);
        assert!(state.is_consistent());
    }

    #[test]
    fn king_square_covers_every_king_code() {
        let mut state = BoardState::default();
        assert_eq!(state.king_square(Color::Light), None);
        state.place(4, Piece::new(Color::Light, PieceCode::KingLongOnly));
        assert_eq!(state.king_square(Color::Light), Some(4));
        assert_eq!(state.king_square(Color::Dark), None);
    }
}
