/// Core value types shared by the position, move generators and search.
///
/// Squares are indexed `0 == a1`, `7 == h1`, `63 == h8`.

pub use crate::game_state::game_state::Position;
pub use crate::game_state::undo_state::BoardState;

/// Board square index (`0..=63`).
pub type Square = u8;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Rank index (0-based) a pawn of this color promotes on.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }

    /// Rank index (0-based) this color's pawns start on.
    #[inline]
    pub const fn pawn_home_rank(self) -> u8 {
        match self {
            Color::Light => 1,
            Color::Dark => 6,
        }
    }

    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }
}

/// Piece kind without any move-history information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }
}

/// Castling wing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Short,
    Long,
}

/// Piece identity including the move history that matters for the rules.
///
/// Pawns remember whether they may still double-step; kings carry their own
/// castling rights. Code transitions live in `chess_rules`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceCode {
    UnmovedPawn,
    MovedPawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    KingBothSides,
    KingShortOnly,
    KingLongOnly,
    KingNoRights,
}

pub const PIECE_CODE_COUNT: usize = 10;

pub const ALL_PIECE_CODES: [PieceCode; PIECE_CODE_COUNT] = [
    PieceCode::UnmovedPawn,
    PieceCode::MovedPawn,
    PieceCode::Knight,
    PieceCode::Bishop,
    PieceCode::Rook,
    PieceCode::Queen,
    PieceCode::KingBothSides,
    PieceCode::KingShortOnly,
    PieceCode::KingLongOnly,
    PieceCode::KingNoRights,
];

pub const KING_CODES: [PieceCode; 4] = [
    PieceCode::KingBothSides,
    PieceCode::KingShortOnly,
    PieceCode::KingLongOnly,
    PieceCode::KingNoRights,
];

impl PieceCode {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceCode::UnmovedPawn => 0,
            PieceCode::MovedPawn => 1,
            PieceCode::Knight => 2,
            PieceCode::Bishop => 3,
            PieceCode::Rook => 4,
            PieceCode::Queen => 5,
            PieceCode::KingBothSides => 6,
            PieceCode::KingShortOnly => 7,
            PieceCode::KingLongOnly => 8,
            PieceCode::KingNoRights => 9,
        }
    }

    #[inline]
    pub const fn kind(self) -> PieceKind {
        match self {
            PieceCode::UnmovedPawn | PieceCode::MovedPawn => PieceKind::Pawn,
            PieceCode::Knight => PieceKind::Knight,
            PieceCode::Bishop => PieceKind::Bishop,
            PieceCode::Rook => PieceKind::Rook,
            PieceCode::Queen => PieceKind::Queen,
            PieceCode::KingBothSides
            | PieceCode::KingShortOnly
            | PieceCode::KingLongOnly
            | PieceCode::KingNoRights => PieceKind::King,
        }
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        matches!(self.kind(), PieceKind::King)
    }

    /// Whether this king code still holds the right to castle on `side`.
    #[inline]
    pub const fn can_castle(self, side: CastleSide) -> bool {
        matches!(
            (self, side),
            (PieceCode::KingBothSides, _)
                | (PieceCode::KingShortOnly, CastleSide::Short)
                | (PieceCode::KingLongOnly, CastleSide::Long)
        )
    }

    /// Code a non-pawn kind is stored under after a fresh placement.
    #[inline]
    pub const fn promoted(kind: PieceKind) -> Option<PieceCode> {
        match kind {
            PieceKind::Knight => Some(PieceCode::Knight),
            PieceKind::Bishop => Some(PieceCode::Bishop),
            PieceKind::Rook => Some(PieceCode::Rook),
            PieceKind::Queen => Some(PieceCode::Queen),
            PieceKind::Pawn | PieceKind::King => None,
        }
    }
}

/// A colored piece as stored on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub code: PieceCode,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, code: PieceCode) -> Self {
        Self { color, code }
    }

    #[inline]
    pub const fn kind(self) -> PieceKind {
        self.code.kind()
    }
}

#[inline]
pub const fn square_from_file_rank(file: u8, rank: u8) -> Square {
    rank * 8 + file
}

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square % 8
}

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square / 8
}

#[inline]
pub const fn bit(square: Square) -> u64 {
    1u64 << square
}
