//! Position model: current board state plus the snapshot history.
//!
//! The history is an arena of `BoardState` copies with an index-based top.
//! Applying a move writes the current state into the next arena slot before
//! mutating; undo copies the slot back. Slots beyond the top are kept for
//! reuse, so a deep search only allocates while its line grows.

use crate::game_state::chess_rules::{
    castling_geometry, king_code_from_rights, STARTING_POSITION_EXPANDED,
};
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::BoardState;
use crate::moves::pawn_moves::en_passant_victim;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

pub const EMPTY_SQUARE_CHAR: char = '.';

#[derive(Debug, Clone)]
pub struct Position {
    pub(crate) state: BoardState,
    history: Vec<BoardState>,
    history_len: usize,
}

impl Position {
    pub fn from_state(state: BoardState) -> Self {
        Self {
            state,
            history: Vec::new(),
            history_len: 0,
        }
    }

    #[inline]
    pub fn new_game() -> Self {
        Self::from_expanded(STARTING_POSITION_EXPANDED)
            .expect("starting position record should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, String> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.state.en_passant_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.state.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.state.fullmove_number
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.state.piece_at(square)
    }

    /// Earlier states of this game line, oldest first.
    #[inline]
    pub fn history(&self) -> &[BoardState] {
        &self.history[..self.history_len]
    }

    #[inline]
    pub fn ply(&self) -> usize {
        self.history_len
    }

    pub(crate) fn push_history(&mut self) {
        if self.history_len < self.history.len() {
            self.history[self.history_len] = self.state;
        } else {
            self.history.push(self.state);
        }
        self.history_len += 1;
    }

    /// Restore the most recent snapshot. Returns `false` on an empty history.
    pub(crate) fn pop_history(&mut self) -> bool {
        if self.history_len == 0 {
            return false;
        }
        self.history_len -= 1;
        self.state = self.history[self.history_len];
        true
    }

    /// Load a six-field record whose board field has one character per square
    /// in FEN order (a8 first, h1 last) and `.` for empty squares.
    pub fn from_expanded(record: &str) -> Result<Self, String> {
        let mut parts = record.split_whitespace();

        let board_part = parts.next().ok_or("Missing board layout in record")?;
        let side_part = parts.next().ok_or("Missing side-to-move in record")?;
        let castling_part = parts.next().ok_or("Missing castling rights in record")?;
        let en_passant_part = parts.next().ok_or("Missing en-passant square in record")?;
        let halfmove_part = parts.next().ok_or("Missing halfmove clock in record")?;
        let fullmove_part = parts.next().ok_or("Missing fullmove number in record")?;

        if parts.next().is_some() {
            return Err("Record has extra trailing fields".to_owned());
        }

        let mut state = BoardState::default();
        parse_board(board_part, &mut state)?;
        state.side_to_move = match side_part {
            "w" => Color::Light,
            "b" => Color::Dark,
            _ => return Err(format!("Invalid side-to-move field: {side_part}")),
        };
        apply_castling_rights(castling_part, &mut state)?;
        state.en_passant_square = parse_en_passant(en_passant_part, &state)?;
        state.halfmove_clock = halfmove_part
            .parse::<u16>()
            .map_err(|_| format!("Invalid halfmove clock: {halfmove_part}"))?;
        state.fullmove_number = fullmove_part
            .parse::<u16>()
            .map_err(|_| format!("Invalid fullmove number: {fullmove_part}"))?;

        Ok(Self::from_state(state))
    }

    /// Inverse of [`Position::from_expanded`].
    pub fn to_expanded(&self) -> String {
        let mut board = String::with_capacity(64);
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let square = square_from_file_rank(file, rank);
                board.push(match self.state.piece_at(square) {
                    Some(piece) => piece_char(piece),
                    None => EMPTY_SQUARE_CHAR,
                });
            }
        }

        let side = match self.state.side_to_move {
            Color::Light => "w",
            Color::Dark => "b",
        };
        let en_passant = self
            .state
            .en_passant_square
            .and_then(|sq| square_to_algebraic(sq).ok())
            .unwrap_or_else(|| "-".to_owned());

        format!(
            "{} {} {} {} {} {}",
            board,
            side,
            castling_field(&self.state),
            en_passant,
            self.state.halfmove_clock,
            self.state.fullmove_number
        )
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new_game()
    }
}

impl PartialEq for Position {
    /// Positions compare by current state and the live part of the history.
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && self.history() == other.history()
    }
}

impl Eq for Position {}

fn parse_board(board_part: &str, state: &mut BoardState) -> Result<(), String> {
    let chars: Vec<char> = board_part.chars().collect();
    if chars.len() != 64 {
        return Err(format!(
            "Expanded board must have 64 squares, found {}",
            chars.len()
        ));
    }

    for (i, ch) in chars.iter().copied().enumerate() {
        if ch == EMPTY_SQUARE_CHAR {
            continue;
        }
        let rank = 7 - (i / 8) as u8;
        let file = (i % 8) as u8;
        let square = square_from_file_rank(file, rank);

        let (color, kind) = piece_from_char(ch)
            .ok_or_else(|| format!("Invalid piece character '{ch}' in board layout"))?;

        let code = match kind {
            PieceKind::Pawn => {
                if rank == 0 || rank == 7 {
                    return Err(format!("Pawn on back rank at index {i}"));
                }
                if rank == color.pawn_home_rank() {
                    PieceCode::UnmovedPawn
                } else {
                    PieceCode::MovedPawn
                }
            }
            // Rights are attached once the castling field is read.
            PieceKind::King => PieceCode::KingNoRights,
            other => PieceCode::promoted(other).ok_or("Unexpected piece kind")?,
        };
        state.place(square, Piece::new(color, code));
    }

    for color in [Color::Light, Color::Dark] {
        let kings = state.pieces_of_kind(color, PieceKind::King).count_ones();
        if kings != 1 {
            return Err(format!("Expected exactly one {color:?} king, found {kings}"));
        }
    }

    Ok(())
}

fn apply_castling_rights(castling_part: &str, state: &mut BoardState) -> Result<(), String> {
    let mut rights = [[false; 2]; 2];
    if castling_part != "-" {
        for ch in castling_part.chars() {
            let (color, side) = match ch {
                'K' => (Color::Light, CastleSide::Short),
                'Q' => (Color::Light, CastleSide::Long),
                'k' => (Color::Dark, CastleSide::Short),
                'q' => (Color::Dark, CastleSide::Long),
                _ => return Err(format!("Invalid castling rights character: {ch}")),
            };
            let geometry = castling_geometry(color, side);
            let king_home = state
                .piece_at(geometry.king_from)
                .is_some_and(|p| p.color == color && p.kind() == PieceKind::King);
            let rook_home = state
                .piece_at(geometry.rook_from)
                .is_some_and(|p| p.color == color && p.code == PieceCode::Rook);
            if !king_home || !rook_home {
                return Err(format!(
                    "Castling right '{ch}' needs king and rook on their home squares"
                ));
            }
            rights[color.index()][side_index(side)] = true;
        }
    }

    for color in [Color::Light, Color::Dark] {
        let [short, long] = rights[color.index()];
        if !(short || long) {
            continue;
        }
        if let Some(king_sq) = state.king_square(color) {
            state.remove(king_sq);
            state.place(king_sq, Piece::new(color, king_code_from_rights(short, long)));
        }
    }

    Ok(())
}

/// The target must sit empty behind an enemy pawn that could just have
/// double-stepped.
fn parse_en_passant(part: &str, state: &BoardState) -> Result<Option<Square>, String> {
    if part == "-" {
        return Ok(None);
    }
    let square = algebraic_to_square(part)?;
    let side_to_move = state.side_to_move;
    let expected_rank = match side_to_move {
        Color::Light => 5,
        Color::Dark => 2,
    };
    if rank_of(square) != expected_rank {
        return Err(format!("En-passant square {part} is not on the capture rank"));
    }
    if state.piece_at(square).is_some() {
        return Err(format!("En-passant square {part} is occupied"));
    }
    let victim = state.piece_at(en_passant_victim(side_to_move, square));
    if !victim.is_some_and(|p| p.color == side_to_move.opposite() && p.kind() == PieceKind::Pawn) {
        return Err(format!("En-passant square {part} has no enemy pawn in front of it"));
    }
    Ok(Some(square))
}

fn castling_field(state: &BoardState) -> String {
    let mut out = String::new();
    for (color, short_ch, long_ch) in [(Color::Light, 'K', 'Q'), (Color::Dark, 'k', 'q')] {
        let Some(king_sq) = state.king_square(color) else {
            continue;
        };
        let Some(king) = state.piece_at(king_sq) else {
            continue;
        };
        if king.code.can_castle(CastleSide::Short) {
            out.push(short_ch);
        }
        if king.code.can_castle(CastleSide::Long) {
            out.push(long_ch);
        }
    }
    if out.is_empty() {
        out.push('-');
    }
    out
}

#[inline]
const fn side_index(side: CastleSide) -> usize {
    match side {
        CastleSide::Short => 0,
        CastleSide::Long => 1,
    }
}

pub fn piece_from_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, kind))
}

pub fn piece_char(piece: Piece) -> char {
    let base = match piece.kind() {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };

    match piece.color {
        Color::Light => base.to_ascii_uppercase(),
        Color::Dark => base,
    }
}
